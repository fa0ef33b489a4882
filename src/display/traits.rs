/*
 *  display/traits.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display driver abstraction
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

use crate::canvas::PixelCanvas;
use crate::display::error::DisplayError;

/// Display capabilities and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Highest per-pixel intensity the panel can show (1 = on/off)
    pub max_intensity: u8,

    /// Maximum recommended frame rate
    pub max_fps: u32,

    /// Whether `set_contrast` has a visible effect
    pub supports_contrast: bool,
}

/// Minimal hardware abstraction - all display drivers must implement this trait
///
/// The composer never looks behind it: one `render` per tick, a
/// `set_contrast` whenever the schedule changes, one `clear` at shutdown.
pub trait DisplayDriver: Send {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Initialize the display hardware
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Set panel contrast (0-255)
    fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError>;

    /// Push a finished frame to the panel
    fn render(&mut self, canvas: &PixelCanvas) -> Result<(), DisplayError>;

    /// Clear the display to blank/off state
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Reject frames that were composed for a different geometry
    fn check_canvas(&self, canvas: &PixelCanvas) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        let expected = (w * h) as usize;
        let actual = canvas.read().len();
        if canvas.width() != w || canvas.height() != h {
            return Err(DisplayError::BufferSizeMismatch { expected, actual });
        }
        Ok(())
    }
}
