/*
 *  display/drivers/max7219.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  MAX7219 cascaded 8x8 LED matrix driver (SPI)
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

use embedded_hal::spi::SpiDevice;
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::SpidevDevice;
use log::{debug, info};

use crate::canvas::PixelCanvas;
use crate::config::DisplayConfig;
use crate::constants::BLOCK_SIZE;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

// registers
const REG_DIGIT0: u8 = 0x01;
const REG_DECODEMODE: u8 = 0x09;
const REG_INTENSITY: u8 = 0x0A;
const REG_SCANLIMIT: u8 = 0x0B;
const REG_SHUTDOWN: u8 = 0x0C;
const REG_DISPLAYTEST: u8 = 0x0F;

const ROWS: usize = BLOCK_SIZE as usize;

/// One 8x8 block as the eight digit register values.
pub type BlockBytes = [u8; ROWS];

/// Pack a canvas into per-block digit bytes.
///
/// `orientation` is how each module sits in its frame (-90, 0, 90, 180);
/// `rotate == 2` turns the whole display upside down first. Block 0 is the
/// leftmost 8 columns of the canvas.
pub fn pack_blocks(canvas: &PixelCanvas, orientation: i16, rotate: u8) -> Vec<BlockBytes> {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let blocks = canvas.width().div_ceil(BLOCK_SIZE) as usize;
    let mut out = vec![[0u8; ROWS]; blocks];

    for (b, block) in out.iter_mut().enumerate() {
        for ly in 0..ROWS {
            for lx in 0..ROWS {
                let (mut x, mut y) = ((b * ROWS + lx) as i32, ly as i32);
                if rotate == 2 {
                    x = w - 1 - x;
                    y = h - 1 - y;
                }
                if !canvas.is_lit(x, y) {
                    continue;
                }
                let (digit, bit) = match orientation {
                    90 => (lx, ly),
                    -90 => (7 - lx, 7 - ly),
                    180 => (7 - ly, lx),
                    _ => (ly, 7 - lx),
                };
                block[digit] |= 1 << bit;
            }
        }
    }
    out
}

/// Cascaded MAX7219 chain on any `embedded-hal` SPI device.
///
/// Every register write goes to all chips at once: one `[reg, data]` pair
/// per block, block 0 first, so block 0 is shifted through to the far end
/// of the chain.
pub struct Max7219Driver<SPI> {
    spi: SPI,
    capabilities: DisplayCapabilities,
    cascaded: usize,
    orientation: i16,
    rotate: u8,
    intensity: u8,
    scratch: Vec<u8>,
}

impl Max7219Driver<SpidevDevice> {
    /// Open `/dev/spidev{port}.{device}` and configure mode 0, 8 bit words.
    pub fn new_spi(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let path = format!("/dev/spidev{}.{}", config.spi_port, config.spi_device);
        info!("Initializing MAX7219 x{} on {} at {} Hz", config.cascaded, path, config.bus_hz);

        let mut spi = SpidevDevice::open(&path)
            .map_err(|e| DisplayError::InitializationFailed(format!("{}: {:?}", path, e)))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.bus_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)
            .map_err(|e| DisplayError::InitializationFailed(format!("{}: {}", path, e)))?;

        Ok(Self::with_spi(spi, config))
    }
}

impl<SPI: SpiDevice> Max7219Driver<SPI> {
    pub fn with_spi(spi: SPI, config: &DisplayConfig) -> Self {
        let cascaded = config.cascaded.max(1) as usize;
        Self {
            spi,
            capabilities: DisplayCapabilities {
                width: config.width(),
                height: config.height(),
                max_intensity: 1,
                max_fps: 50,
                supports_contrast: true,
            },
            cascaded,
            orientation: config.block_orientation,
            rotate: config.rotate,
            intensity: 0,
            scratch: Vec::with_capacity(cascaded * 2),
        }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// Contrast 0..255 to the 16 step intensity register.
    pub fn intensity_for(level: u8) -> u8 {
        level >> 4
    }

    /// Same register/value to every chip.
    fn broadcast(&mut self, register: u8, value: u8) -> Result<(), DisplayError> {
        self.scratch.clear();
        for _ in 0..self.cascaded {
            self.scratch.extend_from_slice(&[register, value]);
        }
        self.flush_scratch()
    }

    fn flush_scratch(&mut self) -> Result<(), DisplayError> {
        self.spi
            .write(&self.scratch)
            .map_err(|e| DisplayError::SpiError(format!("{:?}", e)))
    }

    fn write_blocks(&mut self, blocks: &[BlockBytes]) -> Result<(), DisplayError> {
        for digit in 0..ROWS {
            self.scratch.clear();
            for b in 0..self.cascaded {
                let value = blocks.get(b).map_or(0, |block| block[digit]);
                self.scratch.extend_from_slice(&[REG_DIGIT0 + digit as u8, value]);
            }
            self.flush_scratch()?;
        }
        Ok(())
    }
}

impl<SPI: SpiDevice + Send> DisplayDriver for Max7219Driver<SPI> {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.broadcast(REG_SCANLIMIT, 7)?;
        self.broadcast(REG_DECODEMODE, 0)?;
        self.broadcast(REG_DISPLAYTEST, 0)?;
        self.broadcast(REG_SHUTDOWN, 1)?;
        self.broadcast(REG_INTENSITY, self.intensity)?;
        self.clear()?;
        debug!("MAX7219 chain ready, orientation {} rotate {}", self.orientation, self.rotate);
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError> {
        self.intensity = Self::intensity_for(level);
        self.broadcast(REG_INTENSITY, self.intensity)
    }

    fn render(&mut self, canvas: &PixelCanvas) -> Result<(), DisplayError> {
        self.check_canvas(canvas)?;
        let blocks = pack_blocks(canvas, self.orientation, self.rotate);
        self.write_blocks(&blocks)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        for digit in 0..ROWS as u8 {
            self.broadcast(REG_DIGIT0 + digit, 0)?;
        }
        Ok(())
    }
}
