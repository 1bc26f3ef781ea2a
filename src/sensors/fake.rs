use std::collections::{HashMap, VecDeque};

use super::{DeviceRole, SensorReading, SensorSource};

/// Scripted sensor backend used in tests.
///
/// Each `refresh` pops the next queued snapshot for the role; once the queue
/// is drained the last snapshot stays in place, like real hardware that
/// simply keeps reporting.
#[derive(Debug, Default)]
pub struct FakeSensors {
    names: HashMap<DeviceRole, String>,
    current: HashMap<DeviceRole, Vec<SensorReading>>,
    script: HashMap<DeviceRole, VecDeque<Vec<SensorReading>>>,
    refreshes: HashMap<DeviceRole, usize>,
}

impl FakeSensors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, role: DeviceRole, name: impl Into<String>) -> Self {
        self.names.insert(role, name.into());
        self
    }

    pub fn push(&mut self, role: DeviceRole, snapshot: Vec<SensorReading>) {
        self.script.entry(role).or_default().push_back(snapshot);
    }

    pub fn refresh_count(&self, role: DeviceRole) -> usize {
        self.refreshes.get(&role).copied().unwrap_or(0)
    }
}

impl SensorSource for FakeSensors {
    fn refresh(&mut self, role: DeviceRole) {
        *self.refreshes.entry(role).or_default() += 1;
        if let Some(next) = self.script.get_mut(&role).and_then(|q| q.pop_front()) {
            self.current.insert(role, next);
        }
    }

    fn sensors(&self, role: DeviceRole) -> &[SensorReading] {
        self.current.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    fn device_name(&self, role: DeviceRole) -> Option<&str> {
        self.names.get(&role).map(String::as_str)
    }
}
