/*
 *  display/text.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bitmap text onto the pixel canvas
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
use crate::fonts::{Font, Glyph};

/// Draws strings in one font, left to right, one blank column between glyphs.
///
/// Characters the font lacks advance by a blank cell of the standard width,
/// so a string's width never depends on glyph coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRenderer {
    font: Font,
}

impl GlyphRenderer {
    pub fn new(font: Font) -> Self {
        Self { font }
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn height(&self) -> u32 {
        self.font.height()
    }

    #[inline]
    fn advance(&self, c: char) -> u32 {
        self.font.glyph(c).map_or(self.font.cell_width(), |g| g.width)
    }

    /// Pixel width `draw_text` would consume, no trailing spacing.
    pub fn measure(&self, text: &str) -> u32 {
        let spacing = self.font.spacing();
        text.chars()
            .enumerate()
            .map(|(i, c)| (if i == 0 { 0 } else { spacing }) + self.advance(c))
            .sum()
    }

    /// Draw `text` with its top-left corner at (x,y); returns the width consumed.
    pub fn draw_text(&self, canvas: &mut PixelCanvas, x: i32, y: i32, text: &str) -> u32 {
        let spacing = self.font.spacing() as i32;
        let mut cx = x;
        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                cx += spacing;
            }
            match self.font.glyph(c) {
                Some(glyph) => {
                    draw_glyph(canvas, cx, y, &glyph);
                    cx += glyph.width as i32;
                }
                None => cx += self.font.cell_width() as i32,
            }
        }
        (cx - x) as u32
    }
}

fn draw_glyph(canvas: &mut PixelCanvas, x: i32, y: i32, glyph: &Glyph) {
    for row in 0..glyph.height() {
        for col in 0..glyph.width {
            if glyph.is_set(col, row) {
                canvas.light(x + col as i32, y + row as i32);
            }
        }
    }
}
