/*
 *  snapshot.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  One reading of the clock per tick
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

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::time::{Duration, Instant};

/// Wall-clock time plus monotonic elapsed time, captured once at the start
/// of a tick. Every widget in that tick reads this and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    local: NaiveDateTime,
    elapsed: Duration,
}

impl TimeSnapshot {
    pub fn new(local: NaiveDateTime, elapsed: Duration) -> Self {
        Self { local, elapsed }
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.local.time()
    }

    /// Monotonic time since the clock source started; drives every animation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    /// Fraction of the current second in `[0, 1)`. A leap second reports just under 1.
    pub fn subsec(&self) -> f32 {
        let micros = (self.local.nanosecond() / 1_000).min(999_999);
        micros as f32 / 1_000_000.0
    }

    /// Progress through the current minute in `[0, 1)`.
    pub fn minute_fraction(&self) -> f32 {
        ((self.second() as f32 + self.subsec()) / 60.0).clamp(0.0, 1.0)
    }

    /// strftime-style formatting into any `fmt::Write` sink.
    pub fn format_into<W: fmt::Write>(&self, fmt: &str, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.local.format(fmt))
    }
}

/// Where snapshots come from. The main loop uses [`SystemClock`], tests script their own.
pub trait TimeSource {
    fn capture(&mut self) -> TimeSnapshot;
}

/// Local wall clock plus a monotonic timer started at construction.
#[derive(Debug)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn capture(&mut self) -> TimeSnapshot {
        TimeSnapshot::new(Local::now().naive_local(), self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayString;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> TimeSnapshot {
        let local = NaiveDate::from_ymd_opt(2025, 8, 10)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, ms))
            .unwrap();
        TimeSnapshot::new(local, Duration::ZERO)
    }

    #[test]
    fn fields_come_from_one_reading() {
        let snap = at(14, 5, 30, 500);
        assert_eq!((snap.hour(), snap.minute(), snap.second()), (14, 5, 30));
        assert!((snap.subsec() - 0.5).abs() < 1e-6);
        assert!((snap.minute_fraction() - 30.5 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn leap_second_stays_below_one() {
        let local = NaiveDate::from_ymd_opt(2016, 12, 31)
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 1_500))
            .unwrap();
        let snap = TimeSnapshot::new(local, Duration::ZERO);
        assert!(snap.subsec() < 1.0);
        assert!(snap.minute_fraction() <= 1.0);
    }

    #[test]
    fn formats_without_allocating() {
        let snap = at(7, 3, 0, 0);
        let mut out = ArrayString::<16>::new();
        snap.format_into("%H:%M", &mut out).unwrap();
        assert_eq!(out.as_str(), "07:03");
    }

    #[test]
    fn system_clock_elapsed_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.capture();
        let b = clock.capture();
        assert!(b.elapsed() >= a.elapsed());
    }
}
