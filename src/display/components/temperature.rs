/*
 *  display/components/temperature.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  CPU temperature, left of the clock
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

use arrayvec::ArrayString;
use std::fmt::Write;

use crate::canvas::PixelCanvas;
use crate::constants::{TEMP_MAX_C, TEMP_MIN_C, TEMP_MIN_REGION};
use crate::display::text::GlyphRenderer;
use crate::fonts::Font;

/// Integer degrees in the 3x5 font, left-aligned.
///
/// Width-aware: it only uses the columns the clock leaves free, dropping
/// the unit and then the whole reading rather than pushing the time over.
#[derive(Debug, Clone)]
pub struct TemperatureWidget {
    renderer: GlyphRenderer,
    show_unit: bool,
}

impl TemperatureWidget {
    pub fn new(show_unit: bool) -> Self {
        Self { renderer: GlyphRenderer::new(Font::Tiny), show_unit }
    }

    /// Clamped, rounded degrees; `None` for a missing or non-finite reading.
    pub fn degrees(reading: Option<f32>) -> Option<i32> {
        reading
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(TEMP_MIN_C, TEMP_MAX_C).round() as i32)
    }

    /// The text that fits in `budget` columns, if any.
    pub fn label(&self, reading: Option<f32>, budget: u32) -> Option<ArrayString<8>> {
        let degrees = Self::degrees(reading)?;
        if budget < TEMP_MIN_REGION {
            return None;
        }

        let mut text = ArrayString::<8>::new();
        write!(text, "{}", degrees).ok()?;

        if self.show_unit {
            let mut with_unit = text;
            if with_unit.try_push_str("°C").is_ok() && self.renderer.measure(&with_unit) <= budget {
                return Some(with_unit);
            }
        }
        (self.renderer.measure(&text) <= budget).then_some(text)
    }

    /// Draw at the left edge; returns the columns used (0 when nothing fits).
    pub fn draw(&self, canvas: &mut PixelCanvas, reading: Option<f32>, budget: u32) -> u32 {
        let Some(text) = self.label(reading, budget) else {
            return 0;
        };
        let y = ((canvas.height() as i32 - self.renderer.height() as i32) / 2).max(0);
        self.renderer.draw_text(canvas, 0, y, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_and_clamps() {
        assert_eq!(TemperatureWidget::degrees(Some(41.2)), Some(41));
        assert_eq!(TemperatureWidget::degrees(Some(41.5)), Some(42));
        assert_eq!(TemperatureWidget::degrees(Some(-250.0)), Some(-99));
        assert_eq!(TemperatureWidget::degrees(Some(1e6)), Some(199));
        assert_eq!(TemperatureWidget::degrees(Some(f32::NAN)), None);
        assert_eq!(TemperatureWidget::degrees(None), None);
    }

    #[test]
    fn unit_dropped_before_reading() {
        let w = TemperatureWidget::new(true);
        assert_eq!(w.label(Some(41.2), 15).as_deref(), Some("41°C"));
        assert_eq!(w.label(Some(41.2), 13).as_deref(), Some("41"));
        assert_eq!(w.label(Some(41.2), 6), None);
        assert_eq!(w.label(Some(5.0), 3).as_deref(), Some("5"));
        assert_eq!(w.label(Some(5.0), 2), None);
    }

    #[test]
    fn unit_can_be_turned_off() {
        let w = TemperatureWidget::new(false);
        assert_eq!(w.label(Some(-12.0), 32).as_deref(), Some("-12"));
    }

    #[test]
    fn missing_reading_draws_nothing() {
        let w = TemperatureWidget::new(true);
        let mut c = PixelCanvas::new(32, 8);
        assert_eq!(w.draw(&mut c, None, 32), 0);
        assert_eq!(w.draw(&mut c, Some(f32::INFINITY), 32), 0);
        assert_eq!(c.lit_count(), 0);
    }

    #[test]
    fn draws_left_aligned_and_centred() {
        let w = TemperatureWidget::new(true);
        let mut c = PixelCanvas::new(32, 8);
        assert_eq!(w.draw(&mut c, Some(41.2), 15), 14);
        // top-left of the '4' (101 row) at (0,1)
        assert!(c.is_lit(0, 1));
        assert!(!c.is_lit(0, 0));
        assert!((14..32).all(|x| (0..8).all(|y| !c.is_lit(x, y))));
    }
}
