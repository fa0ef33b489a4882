use chrono::NaiveTime;
use chrono::format::{Item, StrftimeItems};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::{Path, PathBuf}, str::FromStr, time::Duration};
use thiserror::Error;

use crate::constants::*;
use crate::fonts::Font;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level clock configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub clock: ClockConfig,
    pub temperature: TemperatureConfig,
    pub ticker: TickerConfig,
    pub brightness: BrightnessConfig,
    pub seconds_bar: SecondsBarConfig,
    pub sparkle: SparkleConfig,
    pub swipe: SwipeConfig,
    pub runtime: RuntimeConfig,
}

/// MAX7219 chain wiring and geometry; only the driver reads the bus fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub spi_port: u8,
    pub spi_device: u8,
    pub bus_hz: u32,
    /// Number of 8x8 blocks in the chain
    pub cascaded: u32,
    /// Per-block orientation: -90 | 0 | 90 | 180
    pub block_orientation: i16,
    /// Whole display in quarter turns. Only 0 and 2 (180°) are accepted:
    /// 1 and 3 would need a portrait canvas, 8 px wide, which a single
    /// row of blocks cannot show a clock on.
    pub rotate: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            spi_port: DEFAULT_SPI_PORT,
            spi_device: DEFAULT_SPI_DEVICE,
            bus_hz: DEFAULT_BUS_HZ,
            cascaded: DEFAULT_CASCADED,
            block_orientation: DEFAULT_BLOCK_ORIENTATION,
            rotate: 0,
        }
    }
}

impl DisplayConfig {
    pub fn width(&self) -> u32 {
        self.cascaded * BLOCK_SIZE
    }

    pub fn height(&self) -> u32 {
        MATRIX_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub enabled: bool,
    /// strftime format, e.g. "%H:%M"
    pub time_format: String,
    pub font: Font,
    pub blink_colon: bool,
    /// Rows between the two colon dots
    pub colon_vgap: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            font: Font::Tiny,
            blink_colon: true,
            colon_vgap: DEFAULT_COLON_VGAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    pub enabled: bool,
    pub show_unit: bool,
    pub poll_secs: f32,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self { enabled: true, show_unit: true, poll_secs: DEFAULT_TEMP_POLL_SECS }
    }
}

impl TemperatureConfig {
    pub fn poll_interval(&self) -> Duration {
        secs_or(self.poll_secs, DEFAULT_TEMP_POLL_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    pub enabled: bool,
    /// Pause between scrolls, measured from the end of the previous one
    pub every_secs: f32,
    /// Seconds per pixel of travel (higher = slower)
    pub secs_per_px: f32,
    /// Blank pixels after the text before it repeats
    pub gap: u32,
    pub with_year: bool,
    pub font: Font,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            every_secs: DEFAULT_TICKER_EVERY_SECS,
            secs_per_px: DEFAULT_TICKER_SECS_PER_PX,
            gap: DEFAULT_TICKER_GAP,
            with_year: true,
            font: Font::Tiny,
        }
    }
}

impl TickerConfig {
    pub fn interval(&self) -> Duration {
        secs_or(self.every_secs, DEFAULT_TICKER_EVERY_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightnessConfig {
    pub auto_dim: bool,
    pub day: u8,
    pub night: u8,
    /// Night starts here (inclusive)
    pub night_from: HourMinute,
    /// and ends here (exclusive); may be earlier than `night_from`
    pub night_to: HourMinute,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            auto_dim: true,
            day: DEFAULT_BRIGHTNESS_DAY,
            night: DEFAULT_BRIGHTNESS_NIGHT,
            night_from: HourMinute::new(DEFAULT_NIGHT_FROM.0, DEFAULT_NIGHT_FROM.1),
            night_to: HourMinute::new(DEFAULT_NIGHT_TO.0, DEFAULT_NIGHT_TO.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondsBarConfig {
    pub enabled: bool,
    pub dotted: bool,
    /// Dotted mode lights every `step`-th pixel
    pub step: u32,
}

impl Default for SecondsBarConfig {
    fn default() -> Self {
        Self { enabled: true, dotted: false, step: DEFAULT_SECONDS_BAR_STEP }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    pub enabled: bool,
    pub duration_secs: f32,
    /// Fraction of pixels lit per sparkle frame, 0..=1
    pub density: f32,
    pub fps: u32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: DEFAULT_SPARKLE_DURATION_SECS,
            density: DEFAULT_SPARKLE_DENSITY,
            fps: DEFAULT_SPARKLE_FPS,
        }
    }
}

impl SparkleConfig {
    pub fn duration(&self) -> Duration {
        secs_or(self.duration_secs.max(SPARKLE_MIN_DURATION_SECS), DEFAULT_SPARKLE_DURATION_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub enabled: bool,
    /// Bar width; the sweep advances this many columns per step
    pub step_px: u32,
    /// Seconds per step
    pub delay_secs: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self { enabled: true, step_px: DEFAULT_SWIPE_STEP_PX, delay_secs: DEFAULT_SWIPE_DELAY_SECS }
    }
}

impl SwipeConfig {
    pub fn delay(&self) -> Duration {
        secs_or(self.delay_secs, DEFAULT_SWIPE_DELAY_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tick_ms: u64,
    /// Console output instead of the SPI chain
    pub emulated: bool,
    pub debug: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { tick_ms: DEFAULT_TICK_MS, emulated: false, debug: false }
    }
}

impl RuntimeConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Seconds as a `Duration`, falling back when the value is unusable.
fn secs_or(secs: f32, fallback: f32) -> Duration {
    Duration::try_from_secs_f32(secs)
        .or_else(|_| Duration::try_from_secs_f32(fallback))
        .unwrap_or(Duration::ZERO)
}

/// Time of day at minute resolution, written `HH:MM`.
/// Parsing wraps hours mod 24 and minutes mod 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HourMinute {
    pub hour: u32,
    pub minute: u32,
}

impl HourMinute {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour: hour % 24, minute: minute % 60 }
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for HourMinute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got {s:?}"))?;
        let h: i64 = h.trim().parse().map_err(|_| format!("bad hour in {s:?}"))?;
        let m: i64 = m.trim().parse().map_err(|_| format!("bad minute in {s:?}"))?;
        Ok(Self::new(h.rem_euclid(24) as u32, m.rem_euclid(60) as u32))
    }
}

impl TryFrom<String> for HourMinute {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HourMinute> for String {
    fn from(v: HourMinute) -> String {
        v.to_string()
    }
}

impl fmt::Display for HourMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// CLI overrides, highest precedence.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "lyclock", version, about = "LyClock - LED matrix clock", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, short = 'c', value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Debug logging
    #[arg(long, short = 'v', alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    /// Draw frames on the console instead of the SPI chain
    #[arg(long, action = ArgAction::SetTrue)]
    pub emulated: bool,
    /// Main loop tick in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: defaults, YAML, `LED_*` environment, CLI, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    load_with(cli, |name| std::env::var(name).ok())
}

/// As [`load`], with the environment supplied by `lookup`.
pub fn load_with<F>(cli: &Cli, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            cfg = read_yaml(p)?;
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        cfg = read_yaml(&p)?;
    }

    // 3) environment
    apply_env(&mut cfg, lookup);

    // 4) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 5) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of effective config (nice for debugging)
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/lyclock/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/lyclock/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/lyclock.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["lyclock.yaml", "config/lyclock.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// `1/true/yes/y/t` and `0/false/no/n/f`; any other integer is non-zero = true.
pub fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "true" | "yes" | "y" | "t" | "on" => Some(true),
        "false" | "no" | "n" | "f" | "off" => Some(false),
        _ => s.parse::<i64>().ok().map(|v| v != 0),
    }
}

/// Overlay `LED_*` variables. Unparsable values are logged and the
/// previous layer's value is kept.
pub fn apply_env<F>(cfg: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let env = EnvLayer { lookup };

    let c = &mut cfg.clock;
    env.string("LED_TIME_FMT", &mut c.time_format);
    env.font("LED_FONT", &mut c.font);
    env.flag("LED_DRAW_TIME", &mut c.enabled);
    env.flag("LED_BLINK_COLON", &mut c.blink_colon);
    env.parse("LED_COLON_VGAP", &mut c.colon_vgap);

    let t = &mut cfg.temperature;
    env.flag("LED_DRAW_TEMP", &mut t.enabled);
    env.flag("LED_TEMP_SHOW_C", &mut t.show_unit);
    env.parse("LED_TEMP_POLL", &mut t.poll_secs);

    let t = &mut cfg.ticker;
    env.flag("LED_TICKER", &mut t.enabled);
    env.parse("LED_TICKER_EVERY", &mut t.every_secs);
    env.parse("LED_TICKER_SPEED", &mut t.secs_per_px);
    env.parse("LED_TICKER_GAP", &mut t.gap);
    env.flag("LED_TICKER_WITH_YEAR", &mut t.with_year);
    env.font("LED_TICKER_FONT", &mut t.font);

    let b = &mut cfg.brightness;
    env.flag("LED_AUTO_DIM", &mut b.auto_dim);
    env.parse("LED_BRIGHTNESS_DAY", &mut b.day);
    env.parse("LED_BRIGHTNESS_NIGHT", &mut b.night);
    env.parse("LED_NIGHT_FROM", &mut b.night_from);
    env.parse("LED_NIGHT_TO", &mut b.night_to);

    let s = &mut cfg.seconds_bar;
    env.flag("LED_SECONDS_BAR", &mut s.enabled);
    env.flag("LED_SECONDS_BAR_DOTTED", &mut s.dotted);
    env.parse("LED_SECONDS_BAR_STEP", &mut s.step);

    let s = &mut cfg.sparkle;
    env.flag("LED_SPARKLE_ON_HOUR", &mut s.enabled);
    env.parse("LED_SPARKLE_DURATION", &mut s.duration_secs);
    env.parse("LED_SPARKLE_DENSITY", &mut s.density);
    env.parse("LED_SPARKLE_FPS", &mut s.fps);

    let s = &mut cfg.swipe;
    env.flag("LED_MINUTE_SWIPE", &mut s.enabled);
    env.parse("LED_MINUTE_SWIPE_PX", &mut s.step_px);
    env.parse("LED_MINUTE_SWIPE_DELAY", &mut s.delay_secs);

    let d = &mut cfg.display;
    env.parse("LED_SPI_PORT", &mut d.spi_port);
    env.parse("LED_SPI_DEVICE", &mut d.spi_device);
    env.parse("LED_BUS_HZ", &mut d.bus_hz);
    env.parse("LED_CASCADED", &mut d.cascaded);
    env.parse("LED_ORIENTATION", &mut d.block_orientation);
    env.parse("LED_ROTATE", &mut d.rotate);

    env.parse("LED_TICK_MS", &mut cfg.runtime.tick_ms);
}

struct EnvLayer<F> {
    lookup: F,
}

impl<F> EnvLayer<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn parse<T: FromStr>(&self, name: &str, slot: &mut T) {
        if let Some(raw) = self.raw(name) {
            match raw.trim().parse::<T>() {
                Ok(v) => *slot = v,
                Err(_) => warn!("Ignoring {}={:?}: not a valid value", name, raw),
            }
        }
    }

    fn flag(&self, name: &str, slot: &mut bool) {
        if let Some(raw) = self.raw(name) {
            match parse_bool(&raw) {
                Some(v) => *slot = v,
                None => warn!("Ignoring {}={:?}: not a boolean", name, raw),
            }
        }
    }

    fn font(&self, name: &str, slot: &mut Font) {
        if let Some(raw) = self.raw(name) {
            match Font::from_selector(&raw) {
                Some(f) => *slot = f,
                None => warn!("Ignoring {}={:?}: expected 1 (tiny) or 2 (sinclair)", name, raw),
            }
        }
    }

    fn string(&self, name: &str, slot: &mut String) {
        if let Some(raw) = self.raw(name) {
            *slot = raw;
        }
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(ms) = cli.tick_ms { cfg.runtime.tick_ms = ms; }
    if cli.emulated { cfg.runtime.emulated = true; }
    if cli.debug    { cfg.runtime.debug = true; }
}

fn positive(name: &str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{name} must be a positive number of seconds, got {v}")))
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let d = &cfg.display;
    if d.cascaded == 0 {
        return Err(ConfigError::Validation("display cascaded must be > 0".into()));
    }
    if !matches!(d.block_orientation, -90 | 0 | 90 | 180) {
        return Err(ConfigError::Validation("display block_orientation must be -90|0|90|180".into()));
    }
    if !matches!(d.rotate, 0 | 2) {
        return Err(ConfigError::Validation(format!(
            "display rotate {} unsupported: use 0 or 2 (180°); 1 and 3 need a portrait canvas",
            d.rotate
        )));
    }
    if d.bus_hz == 0 {
        return Err(ConfigError::Validation("display bus_hz must be > 0".into()));
    }

    if StrftimeItems::new(&cfg.clock.time_format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::Validation(format!(
            "clock time_format {:?} is not a valid strftime format",
            cfg.clock.time_format
        )));
    }

    positive("temperature poll_secs", cfg.temperature.poll_secs)?;
    positive("ticker every_secs", cfg.ticker.every_secs)?;
    positive("ticker secs_per_px", cfg.ticker.secs_per_px)?;
    positive("sparkle duration_secs", cfg.sparkle.duration_secs)?;
    positive("swipe delay_secs", cfg.swipe.delay_secs)?;

    let density = cfg.sparkle.density;
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::Validation(format!("sparkle density must be within 0..=1, got {density}")));
    }
    if cfg.sparkle.fps == 0 {
        return Err(ConfigError::Validation("sparkle fps must be > 0".into()));
    }
    if cfg.swipe.step_px == 0 {
        return Err(ConfigError::Validation("swipe step_px must be > 0".into()));
    }
    if cfg.seconds_bar.step == 0 {
        return Err(ConfigError::Validation("seconds_bar step must be > 0".into()));
    }
    if !(1..=MAX_TICK_MS).contains(&cfg.runtime.tick_ms) {
        return Err(ConfigError::Validation(format!("runtime tick_ms must be within 1..={MAX_TICK_MS}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    fn yaml(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn cli_with(path: &Path) -> Cli {
        Cli { config: Some(path.to_path_buf()), ..Cli::default() }
    }

    #[test]
    fn defaults_validate() {
        let cfg = Config::default();
        validate(&cfg).unwrap();
        assert_eq!(cfg.display.width(), 32);
        assert_eq!(cfg.display.height(), 8);
        assert_eq!(cfg.brightness.night_from, HourMinute::new(22, 30));
        assert_eq!(cfg.clock.time_format, "%H:%M");
    }

    #[test]
    fn env_overrides_typed_fields() {
        let mut cfg = Config::default();
        apply_env(&mut cfg, env(&[
            ("LED_FONT", "2"),
            ("LED_BLINK_COLON", "0"),
            ("LED_TICKER_SPEED", "0.1"),
            ("LED_NIGHT_FROM", "23:15"),
            ("LED_CASCADED", "8"),
            ("LED_SECONDS_BAR_DOTTED", "yes"),
            ("LED_TIME_FMT", "%I:%M"),
        ]));
        assert_eq!(cfg.clock.font, Font::Sinclair);
        assert!(!cfg.clock.blink_colon);
        assert_eq!(cfg.ticker.secs_per_px, 0.1);
        assert_eq!(cfg.brightness.night_from, HourMinute::new(23, 15));
        assert_eq!(cfg.display.width(), 64);
        assert!(cfg.seconds_bar.dotted);
        assert_eq!(cfg.clock.time_format, "%I:%M");
    }

    #[test]
    fn invalid_env_keeps_previous_value() {
        let mut cfg = Config::default();
        apply_env(&mut cfg, env(&[
            ("LED_BRIGHTNESS_DAY", "bright"),
            ("LED_BRIGHTNESS_NIGHT", "300"),
            ("LED_AUTO_DIM", "maybe"),
            ("LED_NIGHT_TO", "seven"),
            ("LED_FONT", "9"),
        ]));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn bool_vocabulary() {
        for s in ["1", "true", "YES", "y", "t", "7", "-1"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "false", "No", "n", "f"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        assert_eq!(parse_bool("perhaps"), None);
    }

    #[test]
    fn hour_minute_wraps() {
        assert_eq!("25:61".parse::<HourMinute>(), Ok(HourMinute::new(1, 1)));
        assert_eq!("-1:00".parse::<HourMinute>(), Ok(HourMinute::new(23, 0)));
        assert_eq!(" 7:05 ".parse::<HourMinute>(), Ok(HourMinute::new(7, 5)));
        assert!("0700".parse::<HourMinute>().is_err());
        assert_eq!(HourMinute::new(7, 0).to_string(), "07:00");
    }

    #[test]
    fn yaml_sections_are_partial() {
        let f = yaml("brightness:\n  day: 40\n  night_from: \"21:00\"\nticker:\n  font: sinclair\n");
        let cfg = load_with(&cli_with(f.path()), |_| None).unwrap();
        assert_eq!(cfg.brightness.day, 40);
        assert_eq!(cfg.brightness.night, DEFAULT_BRIGHTNESS_NIGHT);
        assert_eq!(cfg.brightness.night_from, HourMinute::new(21, 0));
        assert_eq!(cfg.ticker.font, Font::Sinclair);
        assert_eq!(cfg.ticker.gap, DEFAULT_TICKER_GAP);
    }

    #[test]
    fn layers_apply_in_order() {
        let f = yaml("runtime:\n  tick_ms: 100\nbrightness:\n  day: 40\n");
        let mut cli = cli_with(f.path());
        cli.tick_ms = Some(50);
        let cfg = load_with(&cli, env(&[("LED_TICK_MS", "75"), ("LED_BRIGHTNESS_DAY", "20")])).unwrap();
        assert_eq!(cfg.runtime.tick_ms, 50);
        assert_eq!(cfg.brightness.day, 20);
    }

    #[test]
    fn dump_round_trips_through_yaml() {
        let cfg = Config::default();
        let text = dump(&cfg).unwrap();
        assert!(text.contains("22:30"));
        let back: Config = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = cli_with(Path::new("/nonexistent/lyclock.yaml"));
        assert!(matches!(load_with(&cli, |_| None), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let cases: [fn(&mut Config); 11] = [
            |c: &mut Config| c.display.cascaded = 0,
            |c: &mut Config| c.display.block_orientation = 45,
            |c: &mut Config| c.display.rotate = 1,
            |c: &mut Config| c.clock.time_format = "%H:%Q".into(),
            |c: &mut Config| c.ticker.secs_per_px = 0.0,
            |c: &mut Config| c.sparkle.density = 1.5,
            |c: &mut Config| c.sparkle.duration_secs = f32::NAN,
            |c: &mut Config| c.swipe.step_px = 0,
            |c: &mut Config| c.sparkle.fps = 0,
            |c: &mut Config| c.runtime.tick_ms = 0,
            |c: &mut Config| c.runtime.tick_ms = 5_000,
        ];
        for (i, mutate) in cases.into_iter().enumerate() {
            let mut cfg = Config::default();
            mutate(&mut cfg);
            assert!(validate(&cfg).is_err(), "case {i} should fail");
        }
    }

    #[test]
    fn quarter_turns_explain_themselves() {
        for rotate in [1, 3] {
            let mut cfg = Config::default();
            cfg.display.rotate = rotate;
            match validate(&cfg) {
                Err(ConfigError::Validation(msg)) => assert!(msg.contains("portrait"), "{msg}"),
                other => panic!("rotate {rotate}: {other:?}"),
            }
        }
        let mut cfg = Config::default();
        cfg.display.rotate = 2;
        assert!(validate(&cfg).is_ok());
    }
}
