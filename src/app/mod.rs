use std::path::PathBuf;

use crate::{
    cli::RunOptions,
    config::{default_config_path, LoadedSettings, Settings},
    gamesense::{discover_endpoint, HttpTransport},
    sensors::{DeviceRole, SensorSource, SystemSensors},
    Result,
};

mod driver;
mod keyboard;
mod lifecycle;
mod logger;
mod watcher;

pub use driver::{Driver, MonitorState};
pub use keyboard::{KeyState, StaticKeyState, SysfsKeyState};
pub use logger::{LogLevel, Logger};
pub use watcher::{watch_settings, SettingsEvent, WatchHandle, WATCH_INTERVAL};

use lifecycle::create_shutdown_flag;

/// Resolved startup configuration: CLI options merged over the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub settings: Settings,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Merge CLI overrides into the loaded settings.
    pub fn from_sources(config_path: PathBuf, loaded: &LoadedSettings, opts: &RunOptions) -> Self {
        let mut settings = loaded.settings.clone();
        if let Some(path) = &opts.core_props {
            settings.core_props_path = path.clone();
        }
        Self {
            config_path,
            settings,
            log_level: opts.log_level.unwrap_or_default(),
            log_file: opts.log_file.clone(),
        }
    }
}

pub struct App {
    config: AppConfig,
    logger: Logger,
}

impl App {
    pub fn from_options(opts: RunOptions) -> Result<Self> {
        let config_path = match &opts.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let loaded = Settings::load_or_create(&config_path)?;
        let config = AppConfig::from_sources(config_path, &loaded, &opts);
        let logger = Logger::new(config.log_level, config.log_file.clone());
        for warning in &loaded.warnings {
            logger.warn(warning);
        }
        Ok(Self { config, logger })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Discover the engine, register, then drive the display until ctrl-c.
    pub fn run(&self) -> Result<()> {
        let settings = self.config.settings.clone();
        let endpoint = match discover_endpoint(&settings.core_props_path) {
            Ok(endpoint) => endpoint,
            Err(err) => {
                self.logger.error(err.to_string());
                return Err(err);
            }
        };
        self.logger.info(format!(
            "daemon start (engine={}, config={}, interval={}ms)",
            endpoint.base_url(),
            self.config.config_path.display(),
            settings.temperature_update_interval_ms
        ));

        let transport = HttpTransport::new(&endpoint)?;
        let sensors = SystemSensors::new();
        for role in [DeviceRole::Cpu, DeviceRole::Gpu] {
            match sensors.device_name(role) {
                Some(name) => self.logger.info(format!("{role} detected: {name}")),
                None => self.logger.warn(format!("{role} not detected")),
            }
        }

        let running = create_shutdown_flag()?;
        let watch = watch_settings(
            self.config.config_path.clone(),
            WATCH_INTERVAL,
            running.clone(),
        )?;

        let mut driver = Driver::new(
            sensors,
            transport,
            SysfsKeyState::new(),
            settings,
            self.logger.clone(),
        );
        driver.register();
        driver.run(&running, Some(watch.receiver()));
        watch.stop();
        Ok(())
    }
}
