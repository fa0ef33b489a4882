/*
 *  sensors.rs
 *
 *  LyClock - worth the squeeze
 *	(c) 2020-26 Stuart Hunter
 *
 *	CPU temperature from sysfs, vcgencmd as a fallback
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

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Source of the CPU temperature in degrees Celsius.
/// `None` means no reading right now; callers treat that as a valid state.
pub trait TemperatureSensor {
    fn read_cpu_temperature(&mut self) -> Option<f32>;
}

/// Reads the first thermal zone, then asks the firmware.
#[derive(Debug, Clone)]
pub struct CpuThermal {
    zone: PathBuf,
    use_vcgencmd: bool,
}

impl CpuThermal {
    pub fn new() -> Self {
        Self { zone: PathBuf::from(THERMAL_ZONE), use_vcgencmd: true }
    }

    /// Sysfs only, from an arbitrary file.
    pub fn from_zone(path: impl Into<PathBuf>) -> Self {
        Self { zone: path.into(), use_vcgencmd: false }
    }

    fn vcgencmd(&self) -> Option<f32> {
        let out = Command::new("vcgencmd").arg("measure_temp").output().ok()?;
        if !out.status.success() {
            return None;
        }
        parse_vcgencmd(&String::from_utf8_lossy(&out.stdout))
    }
}

impl Default for CpuThermal {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureSensor for CpuThermal {
    fn read_cpu_temperature(&mut self) -> Option<f32> {
        match read_first_float_from_file(&self.zone) {
            // The value is in millidegrees Celsius.
            Ok(millideg) => return Some(millideg / 1000.0),
            Err(e) => debug!("thermal zone {}: {}", self.zone.display(), e),
        }
        if self.use_vcgencmd { self.vcgencmd() } else { None }
    }
}

/// Reads the first float value from a given file path.
fn read_first_float_from_file(path: &Path) -> io::Result<f32> {
    let content = fs::read_to_string(path)?;
    let first_word = content
        .split_whitespace()
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "empty"))?;
    first_word.parse::<f32>().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// `temp=48.3'C` -> 48.3
fn parse_vcgencmd(out: &str) -> Option<f32> {
    let value = out.trim().strip_prefix("temp=")?;
    let end = value.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))?;
    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_millidegrees() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "41250").unwrap();
        let mut sensor = CpuThermal::from_zone(f.path());
        assert_eq!(sensor.read_cpu_temperature(), Some(41.25));
    }

    #[test]
    fn missing_or_garbage_zone_is_none() {
        let mut sensor = CpuThermal::from_zone("/nonexistent/thermal/temp");
        assert_eq!(sensor.read_cpu_temperature(), None);

        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "warm").unwrap();
        let mut sensor = CpuThermal::from_zone(f.path());
        assert_eq!(sensor.read_cpu_temperature(), None);
    }

    #[test]
    fn parses_vcgencmd_output() {
        assert_eq!(parse_vcgencmd("temp=48.3'C\n"), Some(48.3));
        assert_eq!(parse_vcgencmd("temp=-5.0'C"), Some(-5.0));
        assert_eq!(parse_vcgencmd("error"), None);
        assert_eq!(parse_vcgencmd("temp='C"), None);
    }
}
