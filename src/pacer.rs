/*
 *  pacer.rs
 *
 *  LyClock - worth the squeeze
 *	(c) 2020-26 Stuart Hunter
 *
 *	Deadline pacing against the tick's monotonic time
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use std::time::Duration;

/// Fires at most once per period. Time is passed in rather than read so a
/// whole tick agrees on "now" and tests can drive it.
#[derive(Debug, Clone)]
pub struct Pacer {
    next_deadline: Option<Duration>,
    frame: Duration,
}

// sparkle frames run at their own fps, the sensor is polled every few seconds,
// both off the same tick clock
impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        Self::every(Self::frame_for(target_fps))
    }

    pub fn every(period: Duration) -> Self {
        Self { next_deadline: None, frame: period }
    }

    #[inline]
    fn frame_for(fps: u32) -> Duration {
        Duration::from_micros((1_000_000u32 / fps.max(1)) as u64)
    }

    pub fn period(&self) -> Duration {
        self.frame
    }

    /// Next call to [`Pacer::is_due`] fires regardless of the deadline.
    pub fn reset(&mut self) {
        self.next_deadline = None;
    }

    /// Time left before the next [`Pacer::is_due`] fires; zero when it already would.
    pub fn time_until(&self, now: Duration) -> Duration {
        self.next_deadline.map_or(Duration::ZERO, |deadline| deadline.saturating_sub(now))
    }

    /// Returns true if the period has elapsed; if true, it also schedules the next deadline.
    #[inline]
    pub fn is_due(&mut self, now: Duration) -> bool {
        match self.next_deadline {
            Some(deadline) if now < deadline => false,
            _ => {
                self.next_deadline = Some(now.checked_add(self.frame).unwrap_or(Duration::MAX));
                true
            }
        }
    }
}

/// Time from `elapsed` to the next whole multiple of `step`, for animations
/// that move one step at a time from their own start.
pub fn until_next_step(elapsed: Duration, step: Duration) -> Duration {
    let step_ns = step.as_nanos();
    if step_ns == 0 {
        return Duration::ZERO;
    }
    let into_step = elapsed.as_nanos() % step_ns;
    step.checked_sub(Duration::from_nanos(into_step as u64)).unwrap_or(Duration::ZERO)
}

/// Whole steps of `step` contained in `elapsed`.
pub fn steps_in(elapsed: Duration, step: Duration) -> u64 {
    let step_ns = step.as_nanos();
    if step_ns == 0 {
        return 0;
    }
    u64::try_from(elapsed.as_nanos() / step_ns).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_is_due() {
        let mut p = Pacer::new(20);
        assert!(p.is_due(Duration::from_secs(3)));
        assert!(!p.is_due(Duration::from_secs(3)));
    }

    #[test]
    fn fires_once_per_period() {
        let mut p = Pacer::every(Duration::from_secs(5));
        let fired = (0..60)
            .map(|i| Duration::from_millis(i * 200))
            .filter(|&t| p.is_due(t))
            .count();
        // 0, 5, 10 seconds
        assert_eq!(fired, 3);
    }

    #[test]
    fn reset_rearms() {
        let mut p = Pacer::new(1);
        assert!(p.is_due(Duration::ZERO));
        assert!(!p.is_due(Duration::from_millis(10)));
        p.reset();
        assert!(p.is_due(Duration::from_millis(10)));
    }

    #[test]
    fn time_until_counts_down_to_the_deadline() {
        let mut p = Pacer::every(Duration::from_millis(50));
        assert_eq!(p.time_until(Duration::ZERO), Duration::ZERO);
        assert!(p.is_due(Duration::from_millis(100)));
        assert_eq!(p.time_until(Duration::from_millis(120)), Duration::from_millis(30));
        assert_eq!(p.time_until(Duration::from_millis(200)), Duration::ZERO);
    }

    #[test]
    fn step_arithmetic_lands_on_boundaries() {
        let step = Duration::from_millis(30);
        assert_eq!(until_next_step(Duration::ZERO, step), step);
        assert_eq!(until_next_step(Duration::from_millis(45), step), Duration::from_millis(15));
        assert_eq!(until_next_step(Duration::from_millis(60), step), step);
        assert_eq!(steps_in(Duration::from_millis(59), step), 1);
        assert_eq!(steps_in(Duration::from_millis(60), step), 2);
        assert_eq!(steps_in(Duration::from_secs(1), Duration::ZERO), 0);
        assert_eq!(until_next_step(Duration::from_secs(1), Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn zero_fps_is_clamped() {
        let p = Pacer::new(0);
        assert_eq!(p.period(), Duration::from_secs(1));
    }
}
