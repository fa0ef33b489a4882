/*
 *  display/animations/mod.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Boundary-triggered overlays: hour sparkle, minute swipe
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

use std::time::Duration;

pub mod sparkle;
pub mod swipe;

pub use sparkle::SparkleAnimator;
pub use swipe::MinuteSwipeAnimator;

/// Lifecycle shared by the overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Active { start: Duration, duration: Duration },
}

impl AnimationState {
    pub fn is_active(&self) -> bool {
        matches!(self, AnimationState::Active { .. })
    }

    pub fn start(&mut self, now: Duration, duration: Duration) {
        *self = AnimationState::Active { start: now, duration };
    }

    /// Time into the animation, or `None` once `now - start >= duration`
    /// (which also drops back to Idle).
    pub fn advance(&mut self, now: Duration) -> Option<Duration> {
        match *self {
            AnimationState::Idle => None,
            AnimationState::Active { start, duration } => {
                let elapsed = now.saturating_sub(start);
                if elapsed >= duration {
                    *self = AnimationState::Idle;
                    None
                } else {
                    Some(elapsed)
                }
            }
        }
    }

    /// Time left before the animation ends, while active.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        match *self {
            AnimationState::Idle => None,
            AnimationState::Active { start, duration } => {
                Some(duration.saturating_sub(now.saturating_sub(start)))
            }
        }
    }

    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        match *self {
            AnimationState::Idle => None,
            AnimationState::Active { start, .. } => Some(now.saturating_sub(start)),
        }
    }
}

/// Compare-and-update against the last boundary that fired.
///
/// The key names the boundary (date+hour, date+hour+minute); the same key
/// never fires twice however many ticks land inside it.
#[derive(Debug, Clone)]
pub struct BoundaryMarker<K> {
    last: Option<K>,
}

impl<K> Default for BoundaryMarker<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: PartialEq + Copy> BoundaryMarker<K> {
    pub fn fire(&mut self, key: K) -> bool {
        if self.last == Some(key) {
            return false;
        }
        self.last = Some(key);
        true
    }

    pub fn last(&self) -> Option<K> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_expires_at_duration() {
        let mut s = AnimationState::default();
        assert_eq!(s.advance(Duration::from_secs(1)), None);

        s.start(Duration::from_millis(1000), Duration::from_millis(450));
        assert_eq!(s.advance(Duration::from_millis(1000)), Some(Duration::ZERO));
        assert_eq!(s.advance(Duration::from_millis(1449)), Some(Duration::from_millis(449)));
        assert!(s.is_active());
        assert_eq!(s.remaining(Duration::from_millis(1300)), Some(Duration::from_millis(150)));
        assert_eq!(s.advance(Duration::from_millis(1450)), None);
        assert_eq!(s.remaining(Duration::from_millis(1450)), None);
        assert_eq!(s, AnimationState::Idle);
    }

    #[test]
    fn marker_fires_once_per_key() {
        let mut m = BoundaryMarker::default();
        assert!(m.fire((10u32, 0u32)));
        assert!(!m.fire((10, 0)));
        assert!(!m.fire((10, 0)));
        assert!(m.fire((11, 0)));
        assert_eq!(m.last(), Some((11, 0)));
    }
}
