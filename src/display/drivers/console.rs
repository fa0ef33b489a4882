/*
 *  display/drivers/console.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text console display driver, for running without a matrix attached
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

use log::debug;
use std::io::{self, Stdout, Write};

use crate::canvas::PixelCanvas;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

const LIT: char = '#';
const UNLIT: char = '.';

/// Prints each frame as rows of `#`/`.` followed by a footer line with the
/// contrast last set, blank until there is one. Identical frames are
/// skipped so the terminal only scrolls when something moves or dims.
pub struct ConsoleDriver<W: Write + Send = Stdout> {
    capabilities: DisplayCapabilities,
    out: W,
    last: Option<PixelCanvas>,
    contrast: Option<u8>,
}

impl ConsoleDriver<Stdout> {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_writer(io::stdout(), width, height)
    }
}

impl<W: Write + Send> ConsoleDriver<W> {
    pub fn with_writer(out: W, width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities {
                width,
                height,
                max_intensity: 1,
                max_fps: 30,
                supports_contrast: false,
            },
            out,
            last: None,
            contrast: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, canvas: &PixelCanvas) -> io::Result<()> {
        let mut text = String::with_capacity(((canvas.width() + 1) * (canvas.height() + 1)) as usize);
        for row in canvas.rows() {
            text.extend(row.iter().map(|&v| if v > 0 { LIT } else { UNLIT }));
            text.push('\n');
        }
        if let Some(level) = self.contrast {
            text.push_str(&format!("contrast {level}"));
        }
        text.push('\n');
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write + Send> DisplayDriver for ConsoleDriver<W> {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        debug!("console display {}x{}", self.capabilities.width, self.capabilities.height);
        self.last = None;
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError> {
        // nothing to dim on a terminal; show the level instead
        if self.contrast != Some(level) {
            self.contrast = Some(level);
            self.last = None;
        }
        Ok(())
    }

    fn render(&mut self, canvas: &PixelCanvas) -> Result<(), DisplayError> {
        self.check_canvas(canvas)?;
        if self.last.as_ref() == Some(canvas) {
            return Ok(());
        }
        self.print(canvas)?;
        self.last = Some(canvas.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let blank = PixelCanvas::new(self.capabilities.width, self.capabilities.height);
        self.render(&blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_rows_once_per_change() {
        let mut driver = ConsoleDriver::with_writer(Vec::new(), 4, 2);
        let mut canvas = PixelCanvas::new(4, 2);
        canvas.light(0, 0);
        canvas.light(3, 1);
        driver.render(&canvas).unwrap();
        driver.render(&canvas).unwrap();

        let text = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(text, "#...\n...#\n\n");
    }

    #[test]
    fn footer_follows_contrast_changes() {
        let mut driver = ConsoleDriver::with_writer(Vec::new(), 2, 1);
        let mut canvas = PixelCanvas::new(2, 1);
        canvas.light(0, 0);
        driver.set_contrast(12).unwrap();
        driver.render(&canvas).unwrap();
        // same frame, same level: nothing new
        driver.set_contrast(12).unwrap();
        driver.render(&canvas).unwrap();
        // dimmed: the unchanged frame is shown again with the new level
        driver.set_contrast(3).unwrap();
        driver.render(&canvas).unwrap();

        let text = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(text, "#.\ncontrast 12\n#.\ncontrast 3\n");
    }

    #[test]
    fn clear_prints_blank_frame() {
        let mut driver = ConsoleDriver::with_writer(Vec::new(), 3, 1);
        let mut canvas = PixelCanvas::new(3, 1);
        canvas.light(1, 0);
        driver.render(&canvas).unwrap();
        driver.clear().unwrap();

        let text = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(text, ".#.\n\n...\n\n");
    }
}
