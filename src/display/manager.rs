/*
 *  display/manager.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display manager - one tick: snapshot, compose, push to the panel
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

use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::display::composer::FrameComposer;
use crate::display::{BoxedDriver, DisplayError};
use crate::pacer::Pacer;
use crate::sensors::TemperatureSensor;
use crate::snapshot::TimeSource;

/// Performance metrics for display rendering
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Total frame time (compose + transfer)
    pub frame_time_us: u64,

    /// Time spent composing the canvas
    pub render_time_us: u64,

    /// Time spent pushing the frame to the driver
    pub transfer_time_us: u64,

    /// Frame counter
    pub frame_count: u64,

    /// Moving average frame time
    pub avg_frame_time_us: u64,

    /// Tick budget
    pub target_frame_time_us: u64,
}

impl PerformanceMetrics {
    pub fn new(tick: Duration) -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            transfer_time_us: 0,
            frame_count: 0,
            avg_frame_time_us: 0,
            target_frame_time_us: (tick.as_micros() as u64).max(1),
        }
    }

    pub fn record_frame(&mut self, render_time_us: u64, transfer_time_us: u64) {
        self.render_time_us = render_time_us;
        self.transfer_time_us = transfer_time_us;
        self.frame_time_us = render_time_us + transfer_time_us;
        self.frame_count += 1;

        // (last average + current) / 2
        if self.avg_frame_time_us == 0 {
            self.avg_frame_time_us = self.frame_time_us;
        } else {
            self.avg_frame_time_us = (self.avg_frame_time_us + self.frame_time_us) / 2;
        }

        // Warn if exceeding the tick by >20%
        if self.frame_time_us > self.target_frame_time_us * 12 / 10 {
            warn!("Frame time {}μs exceeds tick {}μs (compose: {}μs, transfer: {}μs)",
                  self.frame_time_us, self.target_frame_time_us,
                  render_time_us, transfer_time_us);
        }
    }

    pub fn fps(&self) -> f32 {
        if self.avg_frame_time_us == 0 {
            0.0
        } else {
            1_000_000.0 / self.avg_frame_time_us as f32
        }
    }
}

/// Owns the driver, the composer and the two collaborators (clock and
/// temperature sensor). `tick` is synchronous and never sleeps; after each
/// tick the caller waits until [`DisplayManager::next_frame_at`], which is
/// one tick away unless an animation needs its next step sooner.
pub struct DisplayManager {
    driver: BoxedDriver,
    composer: FrameComposer,
    clock: Box<dyn TimeSource>,
    sensor: Box<dyn TemperatureSensor>,
    sensor_pacer: Pacer,
    temperature: Option<f32>,
    contrast: Option<u8>,
    tick: Duration,
    next_frame_in: Duration,
    next_frame_at: Instant,
    pub metrics: PerformanceMetrics,
}

impl DisplayManager {
    /// Build a manager around an already constructed driver. The canvas
    /// takes the driver's geometry.
    pub fn new(
        config: &Config,
        driver: BoxedDriver,
        clock: Box<dyn TimeSource>,
        sensor: Box<dyn TemperatureSensor>,
    ) -> Self {
        let caps = driver.capabilities().clone();
        info!("Display: {}x{}, max fps {}", caps.width, caps.height, caps.max_fps);
        let composer = FrameComposer::new(config, caps.width, caps.height, caps.max_intensity);
        Self::with_composer(config, driver, composer, clock, sensor)
    }

    /// As `new`, with a caller-built composer (seeded sparkle in tests).
    pub fn with_composer(
        config: &Config,
        driver: BoxedDriver,
        composer: FrameComposer,
        clock: Box<dyn TimeSource>,
        sensor: Box<dyn TemperatureSensor>,
    ) -> Self {
        Self {
            driver,
            composer,
            clock,
            sensor,
            sensor_pacer: Pacer::every(config.temperature.poll_interval()),
            temperature: None,
            contrast: None,
            tick: config.runtime.tick(),
            next_frame_in: config.runtime.tick(),
            next_frame_at: Instant::now(),
            metrics: PerformanceMetrics::new(config.runtime.tick()),
        }
    }

    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.driver.init()
    }

    /// Build one frame and push it. Contrast goes out before the first
    /// frame and afterwards only when the schedule changes it.
    pub fn tick(&mut self) -> Result<(), DisplayError> {
        let frame_start = Instant::now();
        let snap = self.clock.capture();
        let captured = Instant::now();

        if self.sensor_pacer.is_due(snap.elapsed()) {
            self.temperature = self.sensor.read_cpu_temperature();
            debug!("cpu temperature {:?}", self.temperature);
        }

        let contrast = self.composer.compose(&snap, self.temperature).contrast;
        let render_time = frame_start.elapsed().as_micros() as u64;

        self.next_frame_in = self
            .composer
            .next_frame_in(snap.elapsed())
            .map_or(self.tick, |step| step.min(self.tick));
        self.next_frame_at = captured.checked_add(self.next_frame_in).unwrap_or(captured);

        let transfer_start = Instant::now();
        if self.contrast != Some(contrast) {
            info!("contrast {} at {}", contrast, snap.time_of_day().format("%H:%M:%S"));
            self.driver.set_contrast(contrast)?;
            self.contrast = Some(contrast);
        }
        self.driver.render(self.composer.canvas())?;
        let transfer_time = transfer_start.elapsed().as_micros() as u64;

        self.metrics.record_frame(render_time, transfer_time);
        Ok(())
    }

    /// Wait after the last tick's snapshot before the next frame is due.
    pub fn next_frame_in(&self) -> Duration {
        self.next_frame_in
    }

    /// When the next tick should run: the last capture plus
    /// [`DisplayManager::next_frame_in`]. Already past if frames are running late.
    pub fn next_frame_at(&self) -> Instant {
        self.next_frame_at
    }

    /// Blank the panel on the way out.
    pub fn shutdown(&mut self) -> Result<(), DisplayError> {
        info!("clearing display after {} frames", self.metrics.frame_count);
        self.driver.clear()
    }

    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn contrast(&self) -> Option<u8> {
        self.contrast
    }
}
