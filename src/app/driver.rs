use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use super::keyboard::KeyState;
use super::watcher::SettingsEvent;
use super::Logger;
use crate::{
    config::Settings,
    display::{render, AnimationClock, Frame, Marquee, RenderInput, TICK_MS},
    gamesense::{game_event, registration, EventValue, Transport, GAME_EVENT_PATH},
    sensors::{aggregate, hot_spot, DeviceRole, SensorSource},
    thermal::{PasteMonitor, Thresholds},
    Result,
};

/// Mutable state carried from one tick to the next.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub cpu: Option<f32>,
    pub gpu: Option<f32>,
    pub hot_spot: Option<f32>,
    pub thresholds: Thresholds,
    pub paste: PasteMonitor,
    pub paste_alert: bool,
    pub clock: AnimationClock,
    pub marquee: Marquee,
    pub event_value: EventValue,
}

/// Poll/push loop: samples sensors on their own cadence, renders and pushes
/// one frame every tick.
pub struct Driver<S, T, K> {
    sensors: S,
    transport: T,
    keys: K,
    settings: Settings,
    state: MonitorState,
    logger: Logger,
    failed_pushes: u32,
}

impl<S: SensorSource, T: Transport, K: KeyState> Driver<S, T, K> {
    pub fn new(sensors: S, transport: T, keys: K, settings: Settings, logger: Logger) -> Self {
        let thresholds = Thresholds::from_settings(
            &settings,
            sensors.device_name(DeviceRole::Cpu),
            sensors.device_name(DeviceRole::Gpu),
        );
        let driver = Self {
            sensors,
            transport,
            keys,
            settings,
            state: MonitorState {
                cpu: None,
                gpu: None,
                hot_spot: None,
                thresholds,
                paste: PasteMonitor::new(),
                paste_alert: false,
                clock: AnimationClock::new(),
                marquee: Marquee::default(),
                event_value: EventValue::default(),
            },
            logger,
            failed_pushes: 0,
        };
        driver.log_thresholds();
        driver
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    /// Announce the game, its event and the screen binding. Failures are logged only.
    pub fn register(&self) {
        for (path, body) in registration() {
            match self.transport.post_json(path, &body) {
                Ok(()) => self.logger.debug(format!("registered {path}")),
                Err(err) => self.logger.warn(format!("registration {path} failed: {err}")),
            }
        }
    }

    /// Swap in a reloaded settings document and recalibrate thresholds.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.state.thresholds = Thresholds::from_settings(
            &self.settings,
            self.sensors.device_name(DeviceRole::Cpu),
            self.sensors.device_name(DeviceRole::Gpu),
        );
        if !self.settings.gpu_thermal_paste_monitoring {
            self.state.paste.reset();
            self.state.paste_alert = false;
        }
        self.logger.info("settings reloaded");
        self.log_thresholds();
    }

    /// One iteration without the trailing sleep. Returns the pushed frame, or
    /// the push error once the clock has still moved on.
    pub fn tick(&mut self) -> Result<Frame> {
        if self
            .state
            .clock
            .sensors_due(self.settings.temperature_update_interval_ms)
        {
            self.refresh_sensors();
        }

        let phase = self.state.clock.frame_phase();
        if self.state.paste_alert {
            self.state.marquee.advance();
        }
        let caps_lock = self.settings.caps_lock_indicator && self.keys.caps_lock_on();
        let frame = render(&RenderInput {
            cpu: self.state.cpu,
            gpu: self.state.gpu,
            hot_spot: self.state.hot_spot,
            thresholds: &self.state.thresholds,
            cpu_indicators: self.settings.cpu_warning_indicators,
            gpu_indicators: self.settings.gpu_warning_indicators,
            caps_lock,
            paste_alert: self.state.paste_alert,
            phase,
            marquee: &self.state.marquee,
        });
        self.logger
            .trace(format!("frame {phase}: '{}' | '{}'", frame.line1, frame.line2));

        let value = self.state.event_value.next();
        let pushed = self
            .transport
            .post_json(GAME_EVENT_PATH, &game_event(value, &frame));
        self.state.clock.end_frame();
        pushed?;
        Ok(frame)
    }

    /// Tick until `running` is cleared, applying settings reloads between ticks.
    /// A failed or panicking tick is logged and the next one runs as scheduled.
    pub fn run(&mut self, running: &AtomicBool, reloads: Option<&Receiver<SettingsEvent>>) {
        let tick = Duration::from_millis(TICK_MS);
        while running.load(Ordering::SeqCst) {
            if let Some(reloads) = reloads {
                self.drain_reloads(reloads);
            }
            match panic::catch_unwind(AssertUnwindSafe(|| self.tick())) {
                Err(payload) => {
                    self.logger
                        .error(format!("tick panicked: {}", panic_message(payload.as_ref())));
                }
                Ok(Ok(_)) => {
                    if self.failed_pushes > 0 {
                        self.logger.info(format!(
                            "frame push recovered after {} failures",
                            self.failed_pushes
                        ));
                        self.failed_pushes = 0;
                    }
                }
                Ok(Err(err)) => {
                    if self.failed_pushes == 0 {
                        self.logger.error(format!("frame push failed: {err}"));
                    } else {
                        self.logger.debug(format!("frame push failed: {err}"));
                    }
                    self.failed_pushes = self.failed_pushes.saturating_add(1);
                }
            }
            thread::sleep(tick);
        }
        self.logger.info("daemon exiting");
    }

    fn drain_reloads(&mut self, reloads: &Receiver<SettingsEvent>) {
        while let Ok(event) = reloads.try_recv() {
            match event {
                SettingsEvent::Reloaded(loaded) => {
                    for warning in &loaded.warnings {
                        self.logger.warn(warning);
                    }
                    self.apply_settings(loaded.settings);
                }
                SettingsEvent::Error(err) => {
                    self.logger.warn(format!("settings reload failed: {err}"));
                }
            }
        }
    }

    fn refresh_sensors(&mut self) {
        self.sensors.refresh(DeviceRole::Cpu);
        self.state.cpu = aggregate(self.sensors.sensors(DeviceRole::Cpu), DeviceRole::Cpu);

        self.sensors.refresh(DeviceRole::Gpu);
        let gpu_sensors = self.sensors.sensors(DeviceRole::Gpu);
        self.state.gpu = aggregate(gpu_sensors, DeviceRole::Gpu);
        self.state.hot_spot = hot_spot(gpu_sensors);

        if !self.settings.gpu_thermal_paste_monitoring {
            self.state.paste.reset();
            self.state.paste_alert = false;
            return;
        }
        let alert = self.state.paste.update(self.state.gpu, self.state.hot_spot);
        if alert != self.state.paste_alert {
            if alert {
                self.logger.warn(format!(
                    "hot spot runs {:.1}°C above GPU core; check thermal paste",
                    self.state.hot_spot.unwrap_or_default() - self.state.gpu.unwrap_or_default()
                ));
            } else {
                self.logger.info("hot spot differential back to normal");
            }
        }
        self.state.paste_alert = alert;
    }

    fn log_thresholds(&self) {
        let t = &self.state.thresholds;
        self.logger.info(format!(
            "thresholds: cpu warn {:.1} crit {:.1}, gpu warn {:.1} crit {:.1}",
            t.cpu.warning, t.cpu.critical, t.gpu.warning, t.gpu.critical
        ));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keyboard::StaticKeyState;
    use crate::app::LogLevel;
    use crate::gamesense::RecordingTransport;
    use crate::sensors::{FakeSensors, SensorReading};

    fn logger() -> Logger {
        Logger::stderr(LogLevel::Error)
    }

    #[test]
    fn first_tick_refreshes_then_waits_for_interval() {
        let mut sensors = FakeSensors::new();
        sensors.push(
            DeviceRole::Cpu,
            vec![SensorReading::temperature("CPU Package", Some(50.0))],
        );
        let mut driver = Driver::new(
            sensors,
            RecordingTransport::new(),
            StaticKeyState(false),
            Settings::default(),
            logger(),
        );
        driver.tick().unwrap();
        assert_eq!(driver.sensors_mut().refresh_count(DeviceRole::Cpu), 1);
        for _ in 0..7 {
            driver.tick().unwrap();
        }
        assert_eq!(driver.sensors_mut().refresh_count(DeviceRole::Cpu), 1);
        driver.tick().unwrap();
        assert_eq!(driver.sensors_mut().refresh_count(DeviceRole::Cpu), 2);
    }

    #[test]
    fn push_failure_still_advances_clock() {
        let transport = RecordingTransport::new();
        transport.set_failing(true);
        let mut driver = Driver::new(
            FakeSensors::new(),
            &transport,
            StaticKeyState(false),
            Settings::default(),
            logger(),
        );
        assert!(driver.tick().is_err());
        assert!(driver.tick().is_err());
        let phases: Vec<i64> = transport
            .posts_to(GAME_EVENT_PATH)
            .iter()
            .map(|body| body["data"]["value"].as_i64().unwrap())
            .collect();
        assert_eq!(phases, vec![1, 2]);

        let mut clock = driver.state().clock;
        assert_eq!(clock.frame_phase(), 1500);
    }

    #[test]
    fn disabling_paste_monitoring_clears_alert() {
        let mut sensors = FakeSensors::new();
        sensors.push(
            DeviceRole::Gpu,
            vec![
                SensorReading::temperature("GPU Core", Some(60.0)),
                SensorReading::temperature("GPU Hot Spot", Some(90.0)),
            ],
        );
        let settings = Settings {
            temperature_update_interval_ms: 250,
            ..Settings::default()
        };
        let mut driver = Driver::new(
            sensors,
            RecordingTransport::new(),
            StaticKeyState(false),
            settings.clone(),
            logger(),
        );
        for _ in 0..12 {
            driver.tick().unwrap();
        }
        assert!(driver.state().paste_alert);

        driver.apply_settings(Settings {
            gpu_thermal_paste_monitoring: false,
            ..settings
        });
        assert!(!driver.state().paste_alert);
        assert_eq!(driver.state().paste.counter(), 0);
        let frame = driver.tick().unwrap();
        assert!(frame.line2.starts_with("GPU: 60.0°C"), "{}", frame.line2);
    }
}
