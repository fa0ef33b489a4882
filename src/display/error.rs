/*
 *  display/error.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error types for display subsystem
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

use std::fmt;
use std::error::Error;
use std::io;

/// Unified error type for all display operations
#[derive(Debug)]
pub enum DisplayError {
    /// Hardware initialization failed
    InitializationFailed(String),

    /// SPI communication error
    SpiError(String),

    /// Invalid configuration
    InvalidConfiguration(String),

    /// Frame composed for a different geometry
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Console or device node I/O
    Io(io::Error),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) =>
                write!(f, "Display initialization failed: {}", msg),
            DisplayError::SpiError(msg) =>
                write!(f, "SPI communication error: {}", msg),
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Buffer size mismatch: expected {} pixels, got {}", expected, actual),
            DisplayError::Io(err) =>
                write!(f, "I/O error: {}", err),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DisplayError {
    fn from(err: io::Error) -> Self {
        DisplayError::Io(err)
    }
}

/// Factory error types
#[derive(Debug)]
pub enum DisplayFactoryError {
    /// Hardware requested but this build carries no hardware driver
    NoDriverAvailable,

    /// Display driver initialization failed
    DriverInitFailed(DisplayError),

    /// Configuration validation error
    ConfigError(String),
}

impl fmt::Display for DisplayFactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFactoryError::NoDriverAvailable =>
                write!(f, "No hardware driver built in. Enable with --features driver-max7219 or run --emulated"),
            DisplayFactoryError::DriverInitFailed(err) =>
                write!(f, "Driver initialization failed: {}", err),
            DisplayFactoryError::ConfigError(msg) =>
                write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for DisplayFactoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayFactoryError::DriverInitFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DisplayError> for DisplayFactoryError {
    fn from(err: DisplayError) -> Self {
        DisplayFactoryError::DriverInitFailed(err)
    }
}

// Conversion from DisplayFactoryError to DisplayError
impl From<DisplayFactoryError> for DisplayError {
    fn from(err: DisplayFactoryError) -> Self {
        match err {
            DisplayFactoryError::DriverInitFailed(e) => e,
            DisplayFactoryError::NoDriverAvailable =>
                DisplayError::InvalidConfiguration("No hardware driver available".to_string()),
            DisplayFactoryError::ConfigError(msg) =>
                DisplayError::InvalidConfiguration(msg),
        }
    }
}
