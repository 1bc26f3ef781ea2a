use super::{DeviceRole, SensorReading};

/// Pick one representative temperature for a device.
///
/// CPU: an "average" sensor, then "package", then the mean of the
/// `core #N` sensors, then the first temperature with a value.
/// GPU: a "core" sensor, then the first temperature with a value.
/// `None` when nothing usable is present.
pub fn aggregate(snapshot: &[SensorReading], role: DeviceRole) -> Option<f32> {
    match role {
        DeviceRole::Cpu => named(snapshot, &["average"])
            .or_else(|| named(snapshot, &["package"]))
            .or_else(|| core_mean(snapshot))
            .or_else(|| first_with_value(snapshot)),
        DeviceRole::Gpu => named(snapshot, &["core"]).or_else(|| first_with_value(snapshot)),
    }
}

/// GPU hot-spot (junction) temperature, if the backend exposes one.
pub fn hot_spot(snapshot: &[SensorReading]) -> Option<f32> {
    named(snapshot, &["hot spot", "hotspot"])
}

// The first temperature sensor whose name matches decides the rule; if it has
// no value the rule yields nothing and the caller falls through.
fn named(snapshot: &[SensorReading], needles: &[&str]) -> Option<f32> {
    snapshot
        .iter()
        .filter(|s| s.is_temperature())
        .find(|s| {
            let name = s.lower_name();
            needles.iter().any(|needle| name.contains(needle))
        })
        .and_then(|s| s.value)
}

fn core_mean(snapshot: &[SensorReading]) -> Option<f32> {
    let values: Vec<f32> = snapshot
        .iter()
        .filter(|s| s.is_temperature() && is_core_sensor(&s.lower_name()))
        .filter_map(|s| s.value)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Matches names ending in `core #<digits>`.
fn is_core_sensor(lower: &str) -> bool {
    let digits = lower
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return false;
    }
    lower[..lower.len() - digits].ends_with("core #")
}

fn first_with_value(snapshot: &[SensorReading]) -> Option<f32> {
    snapshot
        .iter()
        .find(|s| s.is_temperature() && s.value.is_some())
        .and_then(|s| s.value)
}
