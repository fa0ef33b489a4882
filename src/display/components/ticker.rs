/*
 *  display/components/ticker.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Periodic date ticker
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
use crate::config::TickerConfig;
use crate::display::text::GlyphRenderer;
use crate::pacer::{steps_in, until_next_step};
use crate::snapshot::TimeSnapshot;

/// Ticker phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerPhase {
    /// Waiting for the interval to pass
    Inactive,
    /// Moving left, one pixel every `secs_per_px`
    Scrolling { started: Duration },
}

/// Everything the ticker carries from one tick to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerState {
    pub phase: TickerPhase,
    /// The text's left edge sits at column `-offset`. A run starts at
    /// `-width`, just past the right edge, and stops on reaching `period`.
    pub offset: i32,
    /// Start of the wait; the first tick, then the end of each scroll
    pub last_activation: Option<Duration>,
    pub date: Option<NaiveDate>,
}

impl TickerState {
    fn new(width: u32) -> Self {
        Self {
            phase: TickerPhase::Inactive,
            offset: -(width as i32),
            last_activation: None,
            date: None,
        }
    }
}

/// `"Sun 10 Aug 2025"`, English abbreviations, zero-padded day.
pub fn format_date(date: NaiveDate, with_year: bool) -> String {
    let fmt = if with_year { "%a %d %b %Y" } else { "%a %d %b" };
    date.format(fmt).to_string()
}

/// Scrolls the date across the whole matrix every `interval`.
///
/// The text comes in from the right edge and travels left until it and
/// its trailing gap have cleared column 0, so a run covers
/// `width + text + gap` pixels and ends on a whole text+gap period.
/// Progress is computed from elapsed time, never from tick counts, so a
/// slow loop shows a coarser scroll of the same real-world length.
#[derive(Debug, Clone)]
pub struct TickerWidget {
    renderer: GlyphRenderer,
    width: u32,
    interval: Duration,
    step: Duration,
    gap: u32,
    with_year: bool,
    text: String,
    strip: PixelCanvas,
    state: TickerState,
}

impl TickerWidget {
    pub fn new(config: &TickerConfig, width: u32) -> Self {
        let renderer = GlyphRenderer::new(config.font);
        let secs_per_px = (config.secs_per_px as f64).max(1e-3);
        Self {
            renderer,
            width,
            interval: config.interval(),
            step: Duration::try_from_secs_f64(secs_per_px).unwrap_or(Duration::MAX),
            gap: config.gap,
            with_year: config.with_year,
            text: String::new(),
            strip: PixelCanvas::new(0, renderer.height()),
            state: TickerState::new(width),
        }
    }

    pub fn state(&self) -> &TickerState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.state.phase, TickerPhase::Scrolling { .. })
    }

    /// Text width plus gap.
    pub fn period(&self) -> u32 {
        (self.strip.width() + self.gap).max(1)
    }

    /// Pixels travelled in one run.
    pub fn run_length(&self) -> u32 {
        self.width + self.period()
    }

    /// Real-world length of one run.
    pub fn cycle_duration(&self) -> Duration {
        self.step.checked_mul(self.run_length()).unwrap_or(Duration::MAX)
    }

    /// Time until the text moves another pixel, while scrolling.
    pub fn next_step_in(&self, now: Duration) -> Option<Duration> {
        match self.state.phase {
            TickerPhase::Scrolling { started } => Some(until_next_step(now.saturating_sub(started), self.step)),
            TickerPhase::Inactive => None,
        }
    }

    fn entry_offset(&self) -> i32 {
        -(self.width as i32)
    }

    // Text and its pre-rendered strip change only when the date does.
    fn rebuild(&mut self, date: NaiveDate) {
        self.text = format_date(date, self.with_year);
        let width = self.renderer.measure(&self.text);
        self.strip = PixelCanvas::new(width, self.renderer.height());
        self.renderer.draw_text(&mut self.strip, 0, 0, &self.text);
        self.state.date = Some(date);
        self.state.offset = self.entry_offset();
        debug!("ticker text {:?} ({} px)", self.text, width);
    }

    /// Advance the state machine to `snap`.
    pub fn update(&mut self, snap: &TimeSnapshot) {
        let now = snap.elapsed();

        if self.state.date != Some(snap.date()) {
            self.rebuild(snap.date());
            if self.is_scrolling() {
                self.state.phase = TickerPhase::Scrolling { started: now };
            }
        }

        let last = *self.state.last_activation.get_or_insert(now);

        match self.state.phase {
            TickerPhase::Inactive => {
                // never on the hour's first second; that belongs to the sparkle
                let on_the_hour = snap.minute() == 0 && snap.second() == 0;
                if now.saturating_sub(last) >= self.interval && !on_the_hour {
                    self.state.phase = TickerPhase::Scrolling { started: now };
                    self.state.offset = self.entry_offset();
                    self.state.last_activation = Some(now);
                    debug!("ticker scrolling {:?}", self.text);
                }
            }
            TickerPhase::Scrolling { started } => {
                let travelled = steps_in(now.saturating_sub(started), self.step);
                if travelled >= self.run_length() as u64 {
                    self.state.phase = TickerPhase::Inactive;
                    self.state.offset = self.entry_offset();
                    self.state.last_activation = Some(now);
                    debug!("ticker done");
                } else {
                    self.state.offset = travelled as i32 + self.entry_offset();
                }
            }
        }
    }

    /// While scrolling, own the whole canvas: blank it and draw the date
    /// with its left edge at `-offset`.
    pub fn draw(&self, canvas: &mut PixelCanvas) {
        if !self.is_scrolling() {
            return;
        }
        canvas.fill_rect(0, 0, canvas.width(), canvas.height(), OFF);

        let y = ((canvas.height() as i32 - self.renderer.height() as i32) / 2).max(0);
        canvas.blit(&self.strip, -self.state.offset, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Font;

    const WIDTH: u32 = 32;

    fn config() -> TickerConfig {
        TickerConfig {
            enabled: true,
            every_secs: 60.0,
            secs_per_px: 0.1,
            gap: 16,
            with_year: true,
            font: Font::Tiny,
        }
    }

    fn snap_at(elapsed: Duration) -> TimeSnapshot {
        // wall clock follows elapsed from 10:00:05
        let base = NaiveDate::from_ymd_opt(2025, 8, 10)
            .and_then(|d| d.and_hms_opt(10, 0, 5))
            .unwrap();
        let since = chrono::Duration::from_std(elapsed).unwrap();
        TimeSnapshot::new(base + since, elapsed)
    }

    fn snap(elapsed_ms: u64) -> TimeSnapshot {
        snap_at(Duration::from_millis(elapsed_ms))
    }

    fn lit_columns(c: &PixelCanvas) -> Vec<i32> {
        (0..c.width() as i32)
            .filter(|&x| (0..c.height() as i32).any(|y| c.is_lit(x, y)))
            .collect()
    }

    #[test]
    fn english_date_text() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
        assert_eq!(format_date(d, true), "Sun 10 Aug 2025");
        assert_eq!(format_date(d, false), "Sun 10 Aug");
        let d = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(d, true), "Mon 05 Jan 2026");
    }

    #[test]
    fn waits_for_interval_from_first_tick() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        t.update(&snap(0));
        assert!(!t.is_scrolling());
        t.update(&snap(59_900));
        assert!(!t.is_scrolling());
        t.update(&snap(60_000));
        assert!(t.is_scrolling());
        assert_eq!(t.state().offset, -32);
    }

    #[test]
    fn offset_is_monotonic_and_completes_one_run() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        t.update(&snap(0));
        t.update(&snap(60_000));
        // "Sun 10 Aug 2025" in the 3x5 font is 59 px, plus the gap
        let period = t.period();
        assert_eq!(period, 59 + 16);
        assert_eq!(t.run_length(), 32 + 75);

        // sample mid-pixel every 50 ms
        let mut last = t.state().offset;
        let mut ms = 60_000;
        while t.is_scrolling() {
            ms += 50;
            t.update(&snap(ms));
            if t.is_scrolling() {
                assert!(t.state().offset >= last);
                assert!(t.state().offset < period as i32);
                last = t.state().offset;
            }
        }
        assert_eq!(last, period as i32 - 1);
        assert_eq!(t.state().offset, -32);
        assert_eq!(t.state().phase, TickerPhase::Inactive);
        let done = t.state().last_activation.unwrap();
        assert!(done >= Duration::from_millis(60_000) + t.cycle_duration());
    }

    #[test]
    fn following_the_reported_wait_visits_every_column() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        assert_eq!(t.next_step_in(Duration::ZERO), None);
        t.update(&snap(0));
        let mut now = Duration::from_secs(60);
        t.update(&snap_at(now));

        let mut offsets = vec![t.state().offset];
        while let Some(wait) = t.next_step_in(now) {
            assert!(wait > Duration::ZERO);
            now += wait;
            t.update(&snap_at(now));
            if t.is_scrolling() {
                offsets.push(t.state().offset);
            }
        }
        assert_eq!(offsets, (-32..75).collect::<Vec<_>>());
    }

    #[test]
    fn interval_counts_from_end_of_scroll() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        t.update(&snap(0));
        t.update(&snap(60_000));
        let end = 60_000 + t.cycle_duration().as_millis() as u64 + 50;
        t.update(&snap(end));
        assert!(!t.is_scrolling());
        t.update(&snap(end + 59_000));
        assert!(!t.is_scrolling());
        t.update(&snap(end + 60_000));
        assert!(t.is_scrolling());
    }

    #[test]
    fn skips_exact_hour_second() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        let at = |h, m, s, elapsed_s| {
            let local = NaiveDate::from_ymd_opt(2025, 8, 10)
                .and_then(|d| d.and_hms_opt(h, m, s))
                .unwrap();
            TimeSnapshot::new(local, Duration::from_secs(elapsed_s))
        };
        t.update(&at(10, 59, 0, 0));
        t.update(&at(11, 0, 0, 60));
        assert!(!t.is_scrolling());
        t.update(&at(11, 0, 1, 61));
        assert!(t.is_scrolling());
    }

    #[test]
    fn enters_from_the_right_and_leaves_on_the_left() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        t.update(&snap(0));
        let frame = |t: &mut TickerWidget, px: u64| {
            t.update(&snap(60_000 + px * 100 + 50));
            let mut c = PixelCanvas::new(WIDTH, 8);
            c.fill_rect(0, 0, WIDTH, 8, 1);
            t.draw(&mut c);
            c
        };

        t.update(&snap(60_000));
        assert!(t.is_scrolling());

        // first frame: clock gone, text still past the right edge
        let mut c = PixelCanvas::new(WIDTH, 8);
        c.fill_rect(0, 0, WIDTH, 8, 1);
        t.draw(&mut c);
        assert_eq!(c.lit_count(), 0);

        // one pixel in: the first column of 'S' on the last column
        assert_eq!(lit_columns(&frame(&mut t, 1)), vec![31]);
        assert!(frame(&mut t, 1).is_lit(31, 2));

        // 90 px in: only the last column of the final '5' at column 0
        assert_eq!(lit_columns(&frame(&mut t, 90)), vec![0]);

        // then only the gap scrolls past, and the run ends
        assert_eq!(frame(&mut t, 91).lit_count(), 0);
        let last = frame(&mut t, 106);
        assert!(t.is_scrolling());
        assert_eq!(last.lit_count(), 0);

        // inactive: the clock underneath is left alone
        let after = frame(&mut t, 107);
        assert!(!t.is_scrolling());
        assert_eq!(after.lit_count(), (WIDTH * 8) as usize);
    }

    #[test]
    fn inactive_draws_nothing() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        t.update(&snap(0));
        let mut c = PixelCanvas::new(32, 8);
        c.light(5, 5);
        t.draw(&mut c);
        assert_eq!(c.lit_count(), 1);
    }

    #[test]
    fn day_rollover_rebuilds_text() {
        let mut t = TickerWidget::new(&config(), WIDTH);
        let late = NaiveDate::from_ymd_opt(2025, 8, 10)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap();
        t.update(&TimeSnapshot::new(late, Duration::ZERO));
        assert_eq!(t.text(), "Sun 10 Aug 2025");
        t.update(&TimeSnapshot::new(late + chrono::Duration::seconds(1), Duration::from_secs(1)));
        assert_eq!(t.text(), "Mon 11 Aug 2025");
        assert_eq!(t.state().offset, -32);
    }
}
