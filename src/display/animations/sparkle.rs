/*
 *  display/animations/sparkle.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Top of the hour sparkle
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

use chrono::NaiveDate;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::time::Duration;

use crate::canvas::PixelCanvas;
use crate::config::SparkleConfig;
use crate::constants::BOUNDARY_GRACE_SECS;
use crate::pacer::Pacer;
use crate::snapshot::TimeSnapshot;

use super::{AnimationState, BoundaryMarker};

/// Random pixels over a blank canvas for a moment at each new hour.
///
/// The pattern is redrawn at `fps`; main ticks between sparkle frames
/// reuse the previous pattern.
#[derive(Debug)]
pub struct SparkleAnimator {
    state: AnimationState,
    marker: BoundaryMarker<(NaiveDate, u32)>,
    duration: Duration,
    density: f32,
    pacer: Pacer,
    pattern: Vec<usize>,
    rng: StdRng,
}

impl SparkleAnimator {
    pub fn new(config: &SparkleConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic pixel choice, for tests.
    pub fn with_rng(config: &SparkleConfig, rng: StdRng) -> Self {
        Self {
            state: AnimationState::Idle,
            marker: BoundaryMarker::default(),
            duration: config.duration(),
            density: config.density.clamp(0.0, 1.0),
            pacer: Pacer::new(config.fps),
            pattern: Vec::new(),
            rng,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Time until the next pattern or the end of the sparkle, while active.
    pub fn next_step_in(&self, now: Duration) -> Option<Duration> {
        let remaining = self.state.remaining(now)?;
        Some(self.pacer.time_until(now).min(remaining))
    }

    /// Pixels lit per frame on a canvas of `total` pixels.
    pub fn pixels_per_frame(&self, total: usize) -> usize {
        ((self.density * total as f32).round() as usize).min(total)
    }

    /// Trigger on a new hour, expire after `duration`.
    /// Returns true on the tick that starts a sparkle.
    pub fn update(&mut self, snap: &TimeSnapshot) -> bool {
        let now = snap.elapsed();
        if self.state.advance(now).is_none() {
            self.pattern.clear();
        }

        let at_boundary = snap.minute() == 0 && snap.second() < BOUNDARY_GRACE_SECS;
        if at_boundary && self.marker.fire((snap.date(), snap.hour())) {
            self.state.start(now, self.duration);
            self.pacer.reset();
            debug!("sparkle for {:02}:00", snap.hour());
            return true;
        }
        false
    }

    /// Replace the canvas with the current sparkle frame while active.
    pub fn draw(&mut self, canvas: &mut PixelCanvas, snap: &TimeSnapshot) {
        if !self.state.is_active() {
            return;
        }
        let width = canvas.width() as usize;
        let total = width * canvas.height() as usize;
        if self.pacer.is_due(snap.elapsed()) || self.pattern.iter().any(|&i| i >= total) {
            let amount = self.pixels_per_frame(total);
            self.pattern = index::sample(&mut self.rng, total, amount).into_vec();
        }

        canvas.clear();
        for &i in &self.pattern {
            canvas.light((i % width) as i32, (i / width) as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SparkleConfig {
        SparkleConfig { enabled: true, duration_secs: 0.45, density: 0.15, fps: 20 }
    }

    fn at(h: u32, m: u32, s: u32, elapsed_ms: u64) -> TimeSnapshot {
        let local = NaiveDate::from_ymd_opt(2025, 8, 10)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap();
        TimeSnapshot::new(local, Duration::from_millis(elapsed_ms))
    }

    #[test]
    fn triggers_once_per_hour_boundary() {
        let mut s = SparkleAnimator::with_rng(&config(), StdRng::seed_from_u64(7));
        assert!(!s.update(&at(9, 59, 59, 0)));

        // many ticks inside the boundary second
        let fired = (0..10)
            .filter(|i| s.update(&at(10, 0, 0, 1_000 + i * 20)))
            .count();
        assert_eq!(fired, 1);
        // and the grace second after it
        assert!(!s.update(&at(10, 0, 1, 2_000)));
        // next hour fires again
        assert!(s.update(&at(11, 0, 0, 3_601_000)));
    }

    #[test]
    fn skipped_boundary_second_still_fires() {
        let mut s = SparkleAnimator::with_rng(&config(), StdRng::seed_from_u64(7));
        s.update(&at(9, 59, 59, 0));
        assert!(s.update(&at(10, 0, 1, 2_000)));
    }

    #[test]
    fn late_start_in_the_hour_does_not_fire() {
        let mut s = SparkleAnimator::with_rng(&config(), StdRng::seed_from_u64(7));
        assert!(!s.update(&at(10, 0, 2, 0)));
        assert!(!s.update(&at(10, 1, 0, 58_000)));
        assert!(!s.is_active());
    }

    #[test]
    fn deactivates_after_duration() {
        let mut s = SparkleAnimator::with_rng(&config(), StdRng::seed_from_u64(7));
        s.update(&at(10, 0, 0, 1_000));
        assert!(s.is_active());
        s.update(&at(10, 0, 0, 1_449));
        assert!(s.is_active());
        s.update(&at(10, 0, 1, 1_450));
        assert!(!s.is_active());

        let mut c = PixelCanvas::new(32, 8);
        c.light(0, 0);
        s.draw(&mut c, &at(10, 0, 1, 1_450));
        assert_eq!(c.lit_count(), 1);
    }

    #[test]
    fn frame_density_and_refresh_rate() {
        let mut s = SparkleAnimator::with_rng(&config(), StdRng::seed_from_u64(42));
        s.update(&at(10, 0, 0, 1_000));

        let mut c = PixelCanvas::new(32, 8);
        c.fill_rect(0, 0, 32, 8, 1);
        s.draw(&mut c, &at(10, 0, 0, 1_000));
        // round(0.15 * 256) = 38, distinct positions
        assert_eq!(c.lit_count(), 38);
        let first = c.clone();

        // inside the same 50 ms sparkle frame: unchanged
        s.draw(&mut c, &at(10, 0, 0, 1_020));
        assert_eq!(c, first);

        // next sparkle frame: same count, new pattern
        s.draw(&mut c, &at(10, 0, 0, 1_050));
        assert_eq!(c.lit_count(), 38);
        assert_ne!(c, first);
    }

    #[test]
    fn asks_for_its_own_frame_rate() {
        let mut s = SparkleAnimator::with_rng(&config(), StdRng::seed_from_u64(9));
        assert_eq!(s.next_step_in(Duration::from_millis(1_000)), None);

        let mut c = PixelCanvas::new(32, 8);
        s.update(&at(10, 0, 0, 1_000));
        s.draw(&mut c, &at(10, 0, 0, 1_000));
        // 20 fps
        assert_eq!(s.next_step_in(Duration::from_millis(1_000)), Some(Duration::from_millis(50)));

        // the last frame is cut short by the end of the sparkle
        s.update(&at(10, 0, 0, 1_440));
        s.draw(&mut c, &at(10, 0, 0, 1_440));
        let left = config().duration() - Duration::from_millis(440);
        assert!(left < Duration::from_millis(50));
        assert_eq!(s.next_step_in(Duration::from_millis(1_440)), Some(left));
    }

    #[test]
    fn density_extremes() {
        let mut cfg = config();
        cfg.density = 0.0;
        let s = SparkleAnimator::with_rng(&cfg, StdRng::seed_from_u64(1));
        assert_eq!(s.pixels_per_frame(256), 0);
        cfg.density = 1.0;
        let s = SparkleAnimator::with_rng(&cfg, StdRng::seed_from_u64(1));
        assert_eq!(s.pixels_per_frame(256), 256);
    }
}
