/*
 *  canvas.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Per-frame pixel canvas
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Intensity of an unlit cell
pub const OFF: u8 = 0;

/// A runtime-sized grid of intensity cells, row-major.
///
/// Every write is clipped; nothing outside `[0,W)x[0,H)` is ever indexed.
/// The composer clears it once per frame so nothing leaks between ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    buf: Vec<u8>,
    w: usize,
    h: usize,
    max: u8,
}

impl PixelCanvas {
    /// On/off canvas, the MAX7219 case.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_max_intensity(width, height, 1)
    }

    /// Canvas for drivers that can drive `0..=max_intensity` per pixel.
    pub fn with_max_intensity(width: u32, height: u32, max_intensity: u8) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![OFF; w * h], w, h, max: max_intensity.max(1) }
    }

    pub fn width(&self) -> u32 {
        self.w as u32
    }

    pub fn height(&self) -> u32 {
        self.h as u32
    }

    pub fn max_intensity(&self) -> u8 {
        self.max
    }

    pub fn clear(&mut self) {
        self.buf.fill(OFF);
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 {
            let (x, y) = (x as usize, y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }

    /// Write one cell, clipped. Intensity saturates at the canvas maximum.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, intensity: u8) {
        if let Some(i) = self.idx(x, y) {
            self.buf[i] = intensity.min(self.max);
        }
    }

    /// Light one cell at full intensity.
    #[inline]
    pub fn light(&mut self, x: i32, y: i32) {
        self.set(x, y, self.max);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.idx(x, y).map(|i| self.buf[i])
    }

    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|v| v != OFF)
    }

    /// Fill a rectangle, clipped against the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, intensity: u8) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width as i32).min(self.w as i32);
        let y1 = y.saturating_add(height as i32).min(self.h as i32);
        let v = intensity.min(self.max);
        for yy in y0..y1 {
            let row = yy as usize * self.w;
            for xx in x0..x1 {
                self.buf[row + xx as usize] = v;
            }
        }
    }

    /// Composite `src` with its top-left corner at (x,y).
    /// Lit source cells overwrite, unlit ones are transparent.
    pub fn blit(&mut self, src: &PixelCanvas, x: i32, y: i32) {
        for sy in 0..src.h {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.h as i32 {
                continue;
            }
            for sx in 0..src.w {
                let v = src.buf[sy * src.w + sx];
                if v != OFF {
                    self.set(x + sx as i32, dy, v);
                }
            }
        }
    }

    /// Row-major cells for handoff to a driver.
    pub fn read(&self) -> &[u8] {
        &self.buf
    }

    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let y = y as usize;
        (y < self.h).then(|| &self.buf[y * self.w..(y + 1) * self.w])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.buf.chunks(self.w.max(1))
    }

    pub fn lit_count(&self) -> usize {
        self.buf.iter().filter(|&&v| v != OFF).count()
    }
}

impl OriginDimensions for PixelCanvas {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for PixelCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            let v = if color.is_on() { self.max } else { OFF };
            self.set(p.x, p.y, v);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let v = if color.is_on() { self.max } else { OFF };
        self.buf.fill(v);
        Ok(())
    }
}
