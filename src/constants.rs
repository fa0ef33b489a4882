//! This module contains global constants used across the display and other modules.

/// Pixels per MAX7219 block edge.
pub const BLOCK_SIZE: u32 = 8;
/// The height of the matrix in pixels (one row of blocks).
pub const MATRIX_HEIGHT: u32 = BLOCK_SIZE;

// Clock
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";
/// Blank column either side of the colon.
pub const CLOCK_COLON_GAP: u32 = 1;
/// The custom colon is a single column of two dots.
pub const CLOCK_COLON_WIDTH: u32 = 1;
pub const DEFAULT_COLON_VGAP: u32 = 2;

// Temperature, always drawn in the 3x5 font
pub const TEMP_MIN_C: f32 = -99.0;
pub const TEMP_MAX_C: f32 = 199.0;
/// Narrowest left region worth drawing into.
pub const TEMP_MIN_REGION: u32 = 3;
pub const DEFAULT_TEMP_POLL_SECS: f32 = 5.0;

// Date ticker
pub const DEFAULT_TICKER_EVERY_SECS: f32 = 60.0;
pub const DEFAULT_TICKER_SECS_PER_PX: f32 = 0.07; // higher -> slower scroll
pub const DEFAULT_TICKER_GAP: u32 = 16;

// Brightness, contrast 0..255
pub const DEFAULT_BRIGHTNESS_DAY: u8 = 12;
pub const DEFAULT_BRIGHTNESS_NIGHT: u8 = 3;
pub const DEFAULT_NIGHT_FROM: (u32, u32) = (22, 30);
pub const DEFAULT_NIGHT_TO: (u32, u32) = (7, 0);

// Seconds bar
pub const DEFAULT_SECONDS_BAR_STEP: u32 = 2;

// Hour sparkle
pub const DEFAULT_SPARKLE_DURATION_SECS: f32 = 0.45;
pub const DEFAULT_SPARKLE_DENSITY: f32 = 0.15;
pub const DEFAULT_SPARKLE_FPS: u32 = 20;
/// Shortest sparkle that still shows a frame.
pub const SPARKLE_MIN_DURATION_SECS: f32 = 0.05;

// Minute swipe
pub const DEFAULT_SWIPE_STEP_PX: u32 = 8;
pub const DEFAULT_SWIPE_DELAY_SECS: f32 = 0.03;

/// Boundary animations still fire if the first tick after the boundary
/// lands within this many seconds of it.
pub const BOUNDARY_GRACE_SECS: u32 = 2;

// Hardware
pub const DEFAULT_SPI_PORT: u8 = 0;
pub const DEFAULT_SPI_DEVICE: u8 = 0;
pub const DEFAULT_BUS_HZ: u32 = 16_000_000;
pub const DEFAULT_CASCADED: u32 = 4;
pub const DEFAULT_BLOCK_ORIENTATION: i16 = -90;

// Main loop
pub const DEFAULT_TICK_MS: u64 = 200;
/// Slowest tick that still shows every second.
pub const MAX_TICK_MS: u64 = 1_000;
