/*
 *  display/components/clock.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock display component
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
use crate::constants::{CLOCK_COLON_GAP, CLOCK_COLON_WIDTH};
use crate::display::text::GlyphRenderer;
use crate::fonts::Font;

/// Right-aligned `HH:MM` with a hand-drawn two-dot colon.
///
/// The text arrives already formatted; only the seconds value is needed
/// for the blink phase, so a synthetic snapshot reproduces any frame.
#[derive(Debug, Clone)]
pub struct ClockWidget {
    renderer: GlyphRenderer,
    blink_colon: bool,
    colon_vgap: u32,
}

impl ClockWidget {
    pub fn new(font: Font, blink_colon: bool, colon_vgap: u32) -> Self {
        Self { renderer: GlyphRenderer::new(font), blink_colon, colon_vgap }
    }

    /// Colon shows on even seconds, or always when blinking is off.
    #[inline]
    pub fn colon_visible(&self, second: u32) -> bool {
        !self.blink_colon || second % 2 == 0
    }

    /// Width of the time block: hours, gap, colon, gap, minutes.
    pub fn measure(&self, text: &str) -> u32 {
        match text.split_once(':') {
            Some((hh, mm)) => {
                self.renderer.measure(hh)
                    + CLOCK_COLON_GAP
                    + CLOCK_COLON_WIDTH
                    + CLOCK_COLON_GAP
                    + self.renderer.measure(mm)
            }
            None => self.renderer.measure(text),
        }
    }

    /// Column of the colon for `text` on `canvas`, if the text has one.
    pub fn colon_x(&self, canvas: &PixelCanvas, text: &str) -> Option<i32> {
        let (hh, _) = text.split_once(':')?;
        Some(self.origin_x(canvas, text) + (self.renderer.measure(hh) + CLOCK_COLON_GAP) as i32)
    }

    /// Rows of the two colon dots for glyphs starting at row `y`.
    pub fn colon_rows(&self, y: i32) -> (i32, i32) {
        let h = self.renderer.height() as i32;
        let vgap = self.colon_vgap as i32;
        let t1 = y + ((h - 1 - vgap) / 2).max(0);
        let t2 = (y + h - 1).min(t1 + vgap);
        (t1, t2)
    }

    #[inline]
    fn origin_x(&self, canvas: &PixelCanvas, text: &str) -> i32 {
        canvas.width() as i32 - self.measure(text) as i32
    }

    #[inline]
    fn origin_y(&self, canvas: &PixelCanvas) -> i32 {
        ((canvas.height() as i32 - self.renderer.height() as i32) / 2).max(0)
    }

    /// Draw right-aligned; returns the x the time block starts at.
    pub fn draw(&self, canvas: &mut PixelCanvas, text: &str, second: u32) -> i32 {
        let x0 = self.origin_x(canvas, text);
        let y = self.origin_y(canvas);

        let Some((hh, mm)) = text.split_once(':') else {
            self.renderer.draw_text(canvas, x0, y, text);
            return x0;
        };

        let w_h = self.renderer.draw_text(canvas, x0, y, hh);
        let cx = x0 + (w_h + CLOCK_COLON_GAP) as i32;
        if self.colon_visible(second) {
            let (t1, t2) = self.colon_rows(y);
            canvas.light(cx, t1);
            canvas.light(cx, t2);
        }
        self.renderer.draw_text(canvas, cx + (CLOCK_COLON_WIDTH + CLOCK_COLON_GAP) as i32, y, mm);
        x0
    }
}
