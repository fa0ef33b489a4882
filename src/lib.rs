/*
 *  lib.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  LED matrix clock: frame composition and animation timing
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

pub mod canvas;
pub mod config;
pub mod constants;
pub mod display;
pub mod fonts;
pub mod pacer;
pub mod sensors;
pub mod snapshot;

pub use canvas::PixelCanvas;
pub use config::{Cli, Config, ConfigError};
pub use snapshot::{SystemClock, TimeSnapshot, TimeSource};
