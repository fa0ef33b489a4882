/*
 *  display/mod.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - widgets, overlays, composer and drivers
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod factory;

// Display drivers
pub mod drivers;

// Glyph text rendering
pub mod text;

// Clock face widgets
pub mod components;

// Boundary-triggered overlays
pub mod animations;

// Day/night contrast
pub mod brightness;

// Frame composition and the per-tick manager
pub mod composer;
pub mod manager;

// Re-exports for convenience
pub use traits::{DisplayDriver, DisplayCapabilities};
pub use error::{DisplayError, DisplayFactoryError};
pub use factory::{DisplayDriverFactory, BoxedDriver};
pub use text::GlyphRenderer;
pub use brightness::{BrightnessScheduler, NightWindow};
pub use composer::{Frame, FrameComposer};
pub use manager::{DisplayManager, PerformanceMetrics};
pub use drivers::console::ConsoleDriver;
pub use drivers::mock::MockDriver;

#[cfg(feature = "driver-max7219")]
pub use drivers::max7219::Max7219Driver;
