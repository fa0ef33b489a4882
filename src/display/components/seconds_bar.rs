/*
 *  display/components/seconds_bar.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Progress through the minute along the bottom row
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::canvas::PixelCanvas;
use crate::snapshot::TimeSnapshot;

#[derive(Debug, Clone)]
pub struct SecondsBarWidget {
    dotted: bool,
    step: u32,
}

impl SecondsBarWidget {
    pub fn new(dotted: bool, step: u32) -> Self {
        Self { dotted, step: step.max(1) }
    }

    /// Filled length for a bar `length` pixels long.
    pub fn filled(snap: &TimeSnapshot, length: u32) -> u32 {
        ((snap.minute_fraction() * length as f32).floor() as u32).min(length)
    }

    pub fn draw(&self, canvas: &mut PixelCanvas, snap: &TimeSnapshot) {
        let filled = Self::filled(snap, canvas.width());
        if filled == 0 || canvas.height() == 0 {
            return;
        }
        let y = canvas.height() as i32 - 1;

        if self.dotted {
            for x in (0..filled).step_by(self.step as usize) {
                canvas.light(x as i32, y);
            }
        } else {
            Line::new(Point::new(0, y), Point::new(filled as i32 - 1, y))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(canvas)
                .ok();
        }
    }
}
