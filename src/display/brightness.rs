/*
 *  display/brightness.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Day/night contrast schedule
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

use chrono::NaiveTime;

use crate::config::BrightnessConfig;
use crate::snapshot::TimeSnapshot;

/// Night interval `[from, to)`. `from > to` wraps past midnight,
/// `from == to` is an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

impl NightWindow {
    pub fn new(from: NaiveTime, to: NaiveTime) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.from <= self.to {
            self.from <= t && t < self.to
        } else {
            t >= self.from || t < self.to
        }
    }
}

/// Pure time-of-day to contrast mapping; holds no state between ticks.
#[derive(Debug, Clone)]
pub struct BrightnessScheduler {
    auto_dim: bool,
    day: u8,
    night: u8,
    window: NightWindow,
}

impl BrightnessScheduler {
    pub fn new(auto_dim: bool, day: u8, night: u8, window: NightWindow) -> Self {
        Self { auto_dim, day, night, window }
    }

    pub fn from_config(config: &BrightnessConfig) -> Self {
        Self::new(
            config.auto_dim,
            config.day,
            config.night,
            NightWindow::new(config.night_from.to_naive_time(), config.night_to.to_naive_time()),
        )
    }

    pub fn is_night(&self, snap: &TimeSnapshot) -> bool {
        self.auto_dim && self.window.contains(snap.time_of_day())
    }

    pub fn contrast(&self, snap: &TimeSnapshot) -> u8 {
        if self.is_night(snap) { self.night } else { self.day }
    }
}
