pub mod aggregate;
pub mod fake;
pub mod system;

pub use aggregate::{aggregate, hot_spot};
pub use fake::FakeSensors;
pub use system::{cpu_model_name, SystemSensors};

/// Which physical device a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceRole {
    Cpu,
    Gpu,
}

impl DeviceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceRole::Cpu => "cpu",
            DeviceRole::Gpu => "gpu",
        }
    }
}

impl std::fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Other,
}

/// One named reading as exposed by the sensor backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub name: String,
    pub kind: SensorKind,
    pub value: Option<f32>,
}

impl SensorReading {
    pub fn temperature(name: impl Into<String>, value: Option<f32>) -> Self {
        Self {
            name: name.into(),
            kind: SensorKind::Temperature,
            value,
        }
    }

    pub fn other(name: impl Into<String>, value: Option<f32>) -> Self {
        Self {
            name: name.into(),
            kind: SensorKind::Other,
            value,
        }
    }

    pub fn is_temperature(&self) -> bool {
        self.kind == SensorKind::Temperature
    }

    /// Lowercased name, used for the case-insensitive matching rules.
    pub(crate) fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Hardware sensor backend. Readings are only re-sampled on `refresh`.
pub trait SensorSource {
    fn refresh(&mut self, role: DeviceRole);
    fn sensors(&self, role: DeviceRole) -> &[SensorReading];
    fn device_name(&self, role: DeviceRole) -> Option<&str>;
}
