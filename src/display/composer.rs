/*
 *  display/composer.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  One frame per tick from widgets, overlays and the brightness schedule
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
use core::fmt::Write;
use rand::rngs::StdRng;
use std::time::Duration;

use crate::canvas::PixelCanvas;
use crate::config::Config;
use crate::display::animations::{MinuteSwipeAnimator, SparkleAnimator};
use crate::display::brightness::BrightnessScheduler;
use crate::display::components::{ClockWidget, SecondsBarWidget, TemperatureWidget, TickerWidget};
use crate::snapshot::TimeSnapshot;

/// A finished frame: the canvas and the contrast it should be shown at.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub canvas: &'a PixelCanvas,
    pub contrast: u8,
}

/// Owns the canvas and every widget/animator. Each `compose` clears the
/// canvas and draws, in this order and no other: temperature, clock,
/// seconds bar, ticker, then the swipe and sparkle overlays. Enable flags
/// only decide who takes part.
#[derive(Debug)]
pub struct FrameComposer {
    canvas: PixelCanvas,
    time_format: String,
    time_text: ArrayString<32>,
    clock: Option<ClockWidget>,
    temperature: Option<TemperatureWidget>,
    seconds_bar: Option<SecondsBarWidget>,
    ticker: Option<TickerWidget>,
    swipe: Option<MinuteSwipeAnimator>,
    sparkle: Option<SparkleAnimator>,
    brightness: BrightnessScheduler,
}

impl FrameComposer {
    pub fn new(config: &Config, width: u32, height: u32, max_intensity: u8) -> Self {
        Self {
            canvas: PixelCanvas::with_max_intensity(width, height, max_intensity),
            time_format: config.clock.time_format.clone(),
            time_text: ArrayString::new(),
            clock: config.clock.enabled.then(|| {
                ClockWidget::new(config.clock.font, config.clock.blink_colon, config.clock.colon_vgap)
            }),
            temperature: config
                .temperature
                .enabled
                .then(|| TemperatureWidget::new(config.temperature.show_unit)),
            seconds_bar: config
                .seconds_bar
                .enabled
                .then(|| SecondsBarWidget::new(config.seconds_bar.dotted, config.seconds_bar.step)),
            ticker: config.ticker.enabled.then(|| TickerWidget::new(&config.ticker, width)),
            swipe: config.swipe.enabled.then(|| MinuteSwipeAnimator::new(&config.swipe, width)),
            sparkle: config.sparkle.enabled.then(|| SparkleAnimator::new(&config.sparkle)),
            brightness: BrightnessScheduler::from_config(&config.brightness),
        }
    }

    /// Swap the sparkle's random source, for reproducible frames.
    pub fn with_sparkle_rng(mut self, config: &Config, rng: StdRng) -> Self {
        if self.sparkle.is_some() {
            self.sparkle = Some(SparkleAnimator::with_rng(&config.sparkle, rng));
        }
        self
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn ticker(&self) -> Option<&TickerWidget> {
        self.ticker.as_ref()
    }

    pub fn sparkle(&self) -> Option<&SparkleAnimator> {
        self.sparkle.as_ref()
    }

    pub fn swipe(&self) -> Option<&MinuteSwipeAnimator> {
        self.swipe.as_ref()
    }

    /// The formatted time as last composed.
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Time from `now` until the ticker or an active overlay next changes
    /// the picture. `None` when the face only changes at the normal tick.
    pub fn next_frame_in(&self, now: Duration) -> Option<Duration> {
        [
            self.ticker.as_ref().and_then(|t| t.next_step_in(now)),
            self.swipe.as_ref().and_then(|s| s.next_step_in(now)),
            self.sparkle.as_ref().and_then(|s| s.next_step_in(now)),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn format_time(&mut self, snap: &TimeSnapshot) {
        self.time_text.clear();
        if snap.format_into(&self.time_format, &mut self.time_text).is_err() {
            // too long for the buffer or unformattable: plain HH:MM
            self.time_text.clear();
            let _ = write!(&mut self.time_text, "{:02}:{:02}", snap.hour(), snap.minute());
        }
    }

    /// Build the frame for `snap`. `temperature` is the latest sensor
    /// reading, `None` when there is none.
    pub fn compose(&mut self, snap: &TimeSnapshot, temperature: Option<f32>) -> Frame<'_> {
        self.canvas.clear();
        self.format_time(snap);

        let clock_width = self.clock.as_ref().map_or(0, |c| c.measure(&self.time_text));
        let budget = self.canvas.width().saturating_sub(clock_width);

        if let Some(widget) = &self.temperature {
            widget.draw(&mut self.canvas, temperature, budget);
        }
        if let Some(widget) = &self.clock {
            widget.draw(&mut self.canvas, &self.time_text, snap.second());
        }
        if let Some(widget) = &self.seconds_bar {
            widget.draw(&mut self.canvas, snap);
        }
        if let Some(widget) = &mut self.ticker {
            widget.update(snap);
            widget.draw(&mut self.canvas);
        }

        // overlays win
        if let Some(anim) = &mut self.swipe {
            anim.update(snap);
            anim.draw(&mut self.canvas, snap);
        }
        if let Some(anim) = &mut self.sparkle {
            anim.update(snap);
            anim.draw(&mut self.canvas, snap);
        }

        Frame { canvas: &self.canvas, contrast: self.brightness.contrast(snap) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;

    fn quiet_config() -> Config {
        let mut cfg = Config::default();
        cfg.ticker.enabled = false;
        cfg.swipe.enabled = false;
        cfg.sparkle.enabled = false;
        cfg
    }

    fn at(h: u32, m: u32, s: u32, elapsed: Duration) -> TimeSnapshot {
        let local = NaiveDate::from_ymd_opt(2025, 8, 10)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap();
        TimeSnapshot::new(local, elapsed)
    }

    #[test]
    fn nothing_survives_between_frames() {
        let mut cfg = quiet_config();
        cfg.clock.enabled = false;
        cfg.seconds_bar.enabled = false;
        let mut composer = FrameComposer::new(&cfg, 32, 8, 1);
        let lit = composer.compose(&at(12, 0, 30, Duration::ZERO), Some(41.0)).canvas.lit_count();
        assert!(lit > 0);
        let frame = composer.compose(&at(12, 0, 31, Duration::from_secs(1)), None);
        assert_eq!(frame.canvas.lit_count(), 0);
    }

    #[test]
    fn disabled_widgets_draw_nothing() {
        let mut cfg = quiet_config();
        cfg.clock.enabled = false;
        cfg.temperature.enabled = false;
        cfg.seconds_bar.enabled = false;
        let mut composer = FrameComposer::new(&cfg, 32, 8, 1);
        let frame = composer.compose(&at(12, 0, 30, Duration::ZERO), Some(41.0));
        assert_eq!(frame.canvas.lit_count(), 0);
        assert_eq!(frame.contrast, 12);
    }

    #[test]
    fn clock_never_moves_for_temperature() {
        let mut composer = FrameComposer::new(&quiet_config(), 32, 8, 1);
        let a = composer.compose(&at(14, 5, 31, Duration::ZERO), None).canvas.clone();
        let b = composer.compose(&at(14, 5, 31, Duration::ZERO), Some(-99.0)).canvas.clone();
        // time block columns are identical with or without the reading
        for x in 15..32 {
            for y in 0..7 {
                assert_eq!(a.is_lit(x, y), b.is_lit(x, y), "({x},{y})");
            }
        }
    }

    #[test]
    fn bad_format_falls_back_to_hh_mm() {
        let mut cfg = quiet_config();
        cfg.clock.time_format = "%H:%M and a very long suffix that overflows".into();
        let mut composer = FrameComposer::new(&cfg, 32, 8, 1);
        composer.compose(&at(9, 7, 0, Duration::ZERO), None);
        assert_eq!(composer.time_text(), "09:07");
    }

    #[test]
    fn overlays_draw_last() {
        let mut cfg = quiet_config();
        cfg.sparkle.enabled = true;
        cfg.sparkle.density = 0.0;
        let mut composer =
            FrameComposer::new(&cfg, 32, 8, 1).with_sparkle_rng(&cfg, StdRng::seed_from_u64(3));
        // density 0 sparkle blanks everything the widgets drew
        let frame = composer.compose(&at(15, 0, 0, Duration::ZERO), Some(40.0));
        assert_eq!(frame.canvas.lit_count(), 0);
        assert!(composer.sparkle().is_some_and(|s| s.is_active()));
    }

    #[test]
    fn overlays_ask_for_their_own_rate() {
        let mut cfg = quiet_config();
        cfg.swipe.enabled = true;
        let mut composer = FrameComposer::new(&cfg, 32, 8, 1);
        composer.compose(&at(14, 5, 59, Duration::from_secs(1)), None);
        assert_eq!(composer.next_frame_in(Duration::from_secs(1)), None);

        let start = Duration::from_secs(2);
        composer.compose(&at(14, 6, 0, start), None);
        assert_eq!(composer.next_frame_in(start), Some(cfg.swipe.delay()));
    }

    #[test]
    fn night_contrast() {
        let mut composer = FrameComposer::new(&quiet_config(), 32, 8, 1);
        assert_eq!(composer.compose(&at(23, 0, 0, Duration::ZERO), None).contrast, 3);
        assert_eq!(composer.compose(&at(7, 0, 0, Duration::ZERO), None).contrast, 12);
    }
}
