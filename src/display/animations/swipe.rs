/*
 *  display/animations/swipe.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Minute change wipe
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
use std::time::Duration;

use crate::canvas::{OFF, PixelCanvas};
use crate::config::SwipeConfig;
use crate::constants::BOUNDARY_GRACE_SECS;
use crate::pacer::{steps_in, until_next_step};
use crate::snapshot::TimeSnapshot;

use super::{AnimationState, BoundaryMarker};

/// A lit bar `step` columns wide sweeps left to right, one step per
/// `delay`. Columns behind the bar stay blank until the sweep ends.
#[derive(Debug, Clone)]
pub struct MinuteSwipeAnimator {
    state: AnimationState,
    marker: BoundaryMarker<(NaiveDate, u32, u32)>,
    width: u32,
    step: u32,
    delay: Duration,
}

impl MinuteSwipeAnimator {
    pub fn new(config: &SwipeConfig, width: u32) -> Self {
        Self {
            state: AnimationState::Idle,
            marker: BoundaryMarker::default(),
            width,
            step: config.step_px.max(1),
            delay: config.delay(),
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Bar positions in one sweep.
    pub fn steps(&self) -> u32 {
        self.width.div_ceil(self.step)
    }

    /// Saturates rather than overflow for absurd delays.
    pub fn total_duration(&self) -> Duration {
        self.delay.checked_mul(self.steps()).unwrap_or(Duration::MAX)
    }

    /// Time until the bar moves (or the sweep ends), while active.
    pub fn next_step_in(&self, now: Duration) -> Option<Duration> {
        let elapsed = self.state.elapsed(now)?;
        Some(until_next_step(elapsed, self.delay))
    }

    /// Trigger on a new minute, expire after the last step.
    /// Returns true on the tick that starts a sweep.
    pub fn update(&mut self, snap: &TimeSnapshot) -> bool {
        let now = snap.elapsed();
        self.state.advance(now);

        let at_boundary = snap.second() < BOUNDARY_GRACE_SECS;
        if at_boundary && self.marker.fire((snap.date(), snap.hour(), snap.minute())) {
            self.state.start(now, self.total_duration());
            debug!("swipe for {:02}:{:02}", snap.hour(), snap.minute());
            return true;
        }
        false
    }

    /// Current bar index, `0..steps`, while active.
    pub fn position(&self, now: Duration) -> Option<u32> {
        let elapsed = self.state.elapsed(now)?;
        let last = self.steps().saturating_sub(1);
        Some(steps_in(elapsed, self.delay).min(last as u64) as u32)
    }

    pub fn draw(&self, canvas: &mut PixelCanvas, snap: &TimeSnapshot) {
        let Some(k) = self.position(snap.elapsed()) else {
            return;
        };
        let bar_x = (k * self.step) as i32;
        let h = canvas.height();
        canvas.fill_rect(0, 0, bar_x as u32, h, OFF);
        canvas.fill_rect(bar_x, 0, self.step, h, canvas.max_intensity());
    }
}
