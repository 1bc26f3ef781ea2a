use crate::Result;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod loader;

pub use loader::LoadedSettings;

pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 2_000;
/// Sensor refreshes cannot be scheduled faster than one driver tick.
pub const MIN_UPDATE_INTERVAL_MS: u64 = 250;
pub const CONFIG_DIR_NAME: &str = ".oledtherm";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "oledtherm.log";
/// Accepted range for pinned thresholds, in °C.
pub const THRESHOLD_RANGE_C: std::ops::RangeInclusive<f32> = -273.15..=1000.0;

#[cfg(windows)]
pub const DEFAULT_CORE_PROPS_PATH: &str =
    r"C:\ProgramData\SteelSeries\SteelSeries Engine 3\coreProps.json";
#[cfg(target_os = "macos")]
pub const DEFAULT_CORE_PROPS_PATH: &str =
    "/Library/Application Support/SteelSeries Engine 3/coreProps.json";
#[cfg(not(any(windows, target_os = "macos")))]
pub const DEFAULT_CORE_PROPS_PATH: &str = "/var/lib/steelseries/coreProps.json";

/// A temperature threshold that is either derived from the device or pinned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ThresholdSetting {
    #[default]
    Auto,
    Fixed(f32),
}

impl ThresholdSetting {
    pub fn resolve(self, auto: f32) -> f32 {
        match self {
            ThresholdSetting::Auto => auto,
            ThresholdSetting::Fixed(value) => value,
        }
    }
}

impl std::str::FromStr for ThresholdSetting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_threshold(s)
    }
}

impl fmt::Display for ThresholdSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdSetting::Auto => f.write_str("auto"),
            ThresholdSetting::Fixed(value) => write!(f, "{value}"),
        }
    }
}

/// User-supplied settings loaded from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub core_props_path: PathBuf,
    pub temperature_update_interval_ms: u64,
    pub cpu_warning_indicators: bool,
    pub gpu_warning_indicators: bool,
    pub gpu_thermal_paste_monitoring: bool,
    pub caps_lock_indicator: bool,
    pub cpu_warning_temperature: ThresholdSetting,
    pub cpu_critical_temperature: ThresholdSetting,
    pub gpu_warning_temperature: ThresholdSetting,
    pub gpu_critical_temperature: ThresholdSetting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            core_props_path: PathBuf::from(DEFAULT_CORE_PROPS_PATH),
            temperature_update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            cpu_warning_indicators: true,
            gpu_warning_indicators: true,
            gpu_thermal_paste_monitoring: true,
            caps_lock_indicator: true,
            cpu_warning_temperature: ThresholdSetting::Auto,
            cpu_critical_temperature: ThresholdSetting::Auto,
            gpu_warning_temperature: ThresholdSetting::Auto,
            gpu_critical_temperature: ThresholdSetting::Auto,
        }
    }
}

impl Settings {
    /// Load from `path`, writing a default file first when none exists.
    pub fn load_or_create(path: &Path) -> Result<LoadedSettings> {
        loader::load_or_create(path)
    }

    pub fn load_from_path(path: &Path) -> Result<LoadedSettings> {
        loader::load_from_path(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        loader::save_to_path(self, path)
    }
}

/// Per-user directory holding the config and log files.
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| {
            crate::Error::InvalidArgs("HOME not set; cannot locate config directory".into())
        })?;
    Ok(home.join(CONFIG_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(LOG_FILE_NAME))
}

fn parse_threshold(raw: &str) -> std::result::Result<ThresholdSetting, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("auto") {
        return Ok(ThresholdSetting::Auto);
    }
    match raw.parse::<f32>() {
        Ok(value) if THRESHOLD_RANGE_C.contains(&value) => Ok(ThresholdSetting::Fixed(value)),
        Ok(value) if value.is_finite() => Err(format!(
            "{value} °C is outside {}..={} °C",
            THRESHOLD_RANGE_C.start(),
            THRESHOLD_RANGE_C.end()
        )),
        _ => Err("expected 'auto' or a temperature in °C (e.g., 85)".to_string()),
    }
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}
