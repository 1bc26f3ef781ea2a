use std::{fs, path::Path, path::PathBuf};

use crate::Result;

use super::{parse_bool, parse_threshold, Settings, MIN_UPDATE_INTERVAL_MS};

/// Parsed settings plus one message for every field that fell back to its default.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

pub fn load_or_create(path: &Path) -> Result<LoadedSettings> {
    if !path.exists() {
        let settings = Settings::default();
        save_to_path(&settings, path)?;
        return Ok(LoadedSettings {
            settings,
            warnings: Vec::new(),
        });
    }
    load_from_path(path)
}

pub fn load_from_path(path: &Path) -> Result<LoadedSettings> {
    if !path.exists() {
        return Ok(LoadedSettings {
            settings: Settings::default(),
            warnings: Vec::new(),
        });
    }

    let raw = fs::read_to_string(path)?;
    Ok(parse(&raw))
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = format!(
        "# oledtherm settings\n\
core_props_path = \"{}\"\n\
temperature_update_interval_ms = {}\n\
cpu_warning_indicators = {}\n\
gpu_warning_indicators = {}\n\
gpu_thermal_paste_monitoring = {}\n\
caps_lock_indicator = {}\n\
# thresholds in °C, or \"auto\" to derive them from the detected device\n\
cpu_warning_temperature = {}\n\
cpu_critical_temperature = {}\n\
gpu_warning_temperature = {}\n\
gpu_critical_temperature = {}\n",
        settings.core_props_path.display(),
        settings.temperature_update_interval_ms,
        settings.cpu_warning_indicators,
        settings.gpu_warning_indicators,
        settings.gpu_thermal_paste_monitoring,
        settings.caps_lock_indicator,
        format_threshold(settings.cpu_warning_temperature),
        format_threshold(settings.cpu_critical_temperature),
        format_threshold(settings.gpu_warning_temperature),
        format_threshold(settings.gpu_critical_temperature),
    );
    fs::write(path, contents)?;
    Ok(())
}

/// Parse the settings document. Never fails: bad lines keep their defaults.
pub fn parse(raw: &str) -> LoadedSettings {
    let mut cfg = Settings::default();
    let mut warnings = Vec::new();

    for (idx, line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            warnings.push(format!("ignoring invalid config line {line_no}: '{line}'"));
            continue;
        };

        let key = key.trim();
        let value = value.trim().trim_matches('"');
        let outcome = match key {
            "core_props_path" => {
                if value.is_empty() {
                    Err("path must not be empty".to_string())
                } else {
                    cfg.core_props_path = PathBuf::from(value);
                    Ok(())
                }
            }
            "temperature_update_interval_ms" => match value.parse::<u64>() {
                Ok(ms) if ms >= MIN_UPDATE_INTERVAL_MS => {
                    cfg.temperature_update_interval_ms = ms;
                    Ok(())
                }
                _ => Err(format!(
                    "expected whole milliseconds >= {MIN_UPDATE_INTERVAL_MS}"
                )),
            },
            "cpu_warning_indicators" => parse_bool(value).map(|v| cfg.cpu_warning_indicators = v),
            "gpu_warning_indicators" => parse_bool(value).map(|v| cfg.gpu_warning_indicators = v),
            "gpu_thermal_paste_monitoring" => {
                parse_bool(value).map(|v| cfg.gpu_thermal_paste_monitoring = v)
            }
            "caps_lock_indicator" => parse_bool(value).map(|v| cfg.caps_lock_indicator = v),
            "cpu_warning_temperature" => {
                parse_threshold(value).map(|v| cfg.cpu_warning_temperature = v)
            }
            "cpu_critical_temperature" => {
                parse_threshold(value).map(|v| cfg.cpu_critical_temperature = v)
            }
            "gpu_warning_temperature" => {
                parse_threshold(value).map(|v| cfg.gpu_warning_temperature = v)
            }
            "gpu_critical_temperature" => {
                parse_threshold(value).map(|v| cfg.gpu_critical_temperature = v)
            }
            other => {
                warnings.push(format!("unknown config key '{other}' on line {line_no}"));
                continue;
            }
        };

        if let Err(e) = outcome {
            warnings.push(format!(
                "invalid {key} on line {line_no}: {e}; using default"
            ));
        }
    }

    LoadedSettings {
        settings: cfg,
        warnings,
    }
}

fn format_threshold(setting: super::ThresholdSetting) -> String {
    match setting {
        super::ThresholdSetting::Auto => "\"auto\"".into(),
        super::ThresholdSetting::Fixed(value) => value.to_string(),
    }
}
