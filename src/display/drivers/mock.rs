/*
 *  display/drivers/mock.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display driver for testing
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

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::canvas::PixelCanvas;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

/// Mock display driver for testing
///
/// Records every call and keeps a copy of the last frame. The state sits
/// behind an `Arc` so a test can keep a handle after the driver has been
/// boxed and handed to the manager.
#[derive(Debug, Clone)]
pub struct MockDriver {
    /// Display capabilities
    capabilities: DisplayCapabilities,

    /// Shared state for testing
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDriverState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of frames accepted by render()
    pub render_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Every contrast level set, in order
    pub contrast_history: Vec<u8>,

    /// Whether the driver is initialized
    pub is_initialized: bool,

    /// Copy of the most recent frame
    pub last_frame: Option<PixelCanvas>,

    /// Simulate failures (for error testing)
    pub simulate_render_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockDriverState {
    pub fn last_contrast(&self) -> Option<u8> {
        self.contrast_history.last().copied()
    }
}

impl MockDriver {
    /// Create a mock panel of the given size, on/off pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities {
                width,
                height,
                max_intensity: 1,
                max_fps: 60,
                supports_contrast: true,
            },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, MockDriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset state counters (useful between tests)
    pub fn reset_state(&mut self) {
        *self.lock() = MockDriverState::default();
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError> {
        self.lock().contrast_history.push(level);
        Ok(())
    }

    fn render(&mut self, canvas: &PixelCanvas) -> Result<(), DisplayError> {
        self.check_canvas(canvas)?;
        let mut state = self.lock();

        if state.simulate_render_failure {
            return Err(DisplayError::Other("Simulated render failure".to_string()));
        }

        state.render_count += 1;
        state.last_frame = Some(canvas.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let blank = PixelCanvas::new(self.capabilities.width, self.capabilities.height);
        let mut state = self.lock();
        state.clear_count += 1;
        state.last_frame = Some(blank);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_driver_init() {
        let mut driver = MockDriver::new(32, 8);
        let state = driver.state();
        assert_eq!(state.lock().unwrap().init_count, 0);
        assert!(!state.lock().unwrap().is_initialized);

        driver.init().unwrap();

        assert_eq!(state.lock().unwrap().init_count, 1);
        assert!(state.lock().unwrap().is_initialized);
    }

    #[test]
    fn test_mock_driver_render_keeps_frame() {
        let mut driver = MockDriver::new(32, 8);
        let mut canvas = PixelCanvas::new(32, 8);
        canvas.light(3, 4);
        driver.render(&canvas).unwrap();

        let state = driver.state();
        let state = state.lock().unwrap();
        assert_eq!(state.render_count, 1);
        assert_eq!(state.last_frame.as_ref().map(|c| c.lit_count()), Some(1));
    }

    #[test]
    fn test_mock_driver_rejects_wrong_geometry() {
        let mut driver = MockDriver::new(32, 8);
        let err = driver.render(&PixelCanvas::new(16, 8)).unwrap_err();
        assert!(matches!(err, DisplayError::BufferSizeMismatch { expected: 256, actual: 128 }));
    }

    #[test]
    fn test_mock_driver_clear() {
        let mut driver = MockDriver::new(32, 8);
        let mut canvas = PixelCanvas::new(32, 8);
        canvas.fill_rect(0, 0, 32, 8, 1);
        driver.render(&canvas).unwrap();
        driver.clear().unwrap();

        let state = driver.state();
        let state = state.lock().unwrap();
        assert_eq!(state.clear_count, 1);
        assert_eq!(state.last_frame.as_ref().map(|c| c.lit_count()), Some(0));
    }

    #[test]
    fn test_mock_driver_contrast() {
        let mut driver = MockDriver::new(32, 8);
        driver.set_contrast(12).unwrap();
        driver.set_contrast(3).unwrap();
        let state = driver.state();
        assert_eq!(state.lock().unwrap().contrast_history, vec![12, 3]);
        assert_eq!(state.lock().unwrap().last_contrast(), Some(3));
    }

    #[test]
    fn test_mock_driver_simulated_failures() {
        let mut driver = MockDriver::new(32, 8);
        driver.state().lock().unwrap().simulate_init_failure = true;
        assert!(driver.init().is_err());

        driver.state().lock().unwrap().simulate_render_failure = true;
        assert!(driver.render(&PixelCanvas::new(32, 8)).is_err());

        driver.reset_state();
        assert!(driver.init().is_ok());
    }
}
