/*
 *  display/factory.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display driver factory - picks the panel from configuration
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use crate::config::DisplayConfig;
use crate::display::drivers::console::ConsoleDriver;
use crate::display::error::DisplayFactoryError;
use crate::display::traits::DisplayDriver;
use log::info;

#[cfg(feature = "driver-max7219")]
use crate::display::drivers::max7219::Max7219Driver;

/// Type alias for boxed display driver trait objects
pub type BoxedDriver = Box<dyn DisplayDriver>;

/// Factory for creating display drivers from configuration
pub struct DisplayDriverFactory;

impl DisplayDriverFactory {
    /// Create a display driver from configuration
    ///
    /// `emulated` selects the text console; otherwise the MAX7219 chain
    /// described by `config` is opened. The driver is returned
    /// uninitialised.
    pub fn create(config: &DisplayConfig, emulated: bool) -> Result<BoxedDriver, DisplayFactoryError> {
        if config.cascaded == 0 {
            return Err(DisplayFactoryError::ConfigError("cascaded must be at least 1".to_string()));
        }

        if emulated {
            info!("Emulation mode enabled - printing frames to the console");
            return Ok(Box::new(ConsoleDriver::new(config.width(), config.height())));
        }

        Self::create_hardware(config)
    }

    #[cfg(feature = "driver-max7219")]
    fn create_hardware(config: &DisplayConfig) -> Result<BoxedDriver, DisplayFactoryError> {
        Ok(Box::new(Max7219Driver::new_spi(config)?))
    }

    #[cfg(not(feature = "driver-max7219"))]
    fn create_hardware(_config: &DisplayConfig) -> Result<BoxedDriver, DisplayFactoryError> {
        Err(DisplayFactoryError::NoDriverAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emulated_uses_panel_geometry() {
        let config = DisplayConfig { cascaded: 3, ..DisplayConfig::default() };
        let driver = DisplayDriverFactory::create(&config, true).unwrap();
        assert_eq!(driver.dimensions(), (24, 8));
        assert!(!driver.capabilities().supports_contrast);
    }

    #[test]
    fn zero_blocks_rejected() {
        let config = DisplayConfig { cascaded: 0, ..DisplayConfig::default() };
        let err = DisplayDriverFactory::create(&config, true).err();
        assert!(matches!(err, Some(DisplayFactoryError::ConfigError(_))));
    }
}
