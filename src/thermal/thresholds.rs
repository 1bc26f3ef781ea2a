use crate::config::{Settings, ThresholdSetting};
use crate::sensors::DeviceRole;

/// Gap between the derived warning and the critical temperature.
pub const WARNING_MARGIN_C: f32 = 15.0;
pub const GENERIC_CPU_CRITICAL_C: f32 = 95.0;
pub const GENERIC_GPU_CRITICAL_C: f32 = 92.0;

/// Rated maximum temperatures of well-known CPUs, keyed by exact model name.
const CPU_CRITICAL_C: &[(&str, f32)] = &[
    ("Intel Core i9-13900K", 100.0),
    ("Intel Core i7-13700K", 100.0),
    ("Intel Core i5-13600K", 100.0),
    ("Intel Core i9-12900K", 100.0),
    ("Intel Core i7-12700K", 100.0),
    ("Intel Core i5-12600K", 100.0),
    ("Intel Core i9-11900K", 100.0),
    ("Intel Core i7-11700K", 100.0),
    ("Intel Core i5-11600K", 100.0),
    ("Intel Core i9-10900K", 100.0),
    ("Intel Core i7-10700K", 100.0),
    ("Intel Core i5-10600K", 100.0),
    ("Intel Core i9-9900K", 100.0),
    ("Intel Core i7-9700K", 100.0),
    ("Intel Core i5-9600K", 100.0),
    ("Intel Core i7-8700K", 100.0),
    ("Intel Core i5-8600K", 100.0),
    ("Intel Core i7-7700K", 100.0),
    ("Intel Core i5-7600K", 100.0),
    ("Intel Core i7-6700K", 100.0),
    ("Intel Core i5-6600K", 100.0),
    ("AMD Ryzen 9 7950X", 95.0),
    ("AMD Ryzen 9 7900X", 95.0),
    ("AMD Ryzen 7 7700X", 95.0),
    ("AMD Ryzen 7 7700", 95.0),
    ("AMD Ryzen 5 7600X", 95.0),
    ("AMD Ryzen 5 7600", 95.0),
    ("AMD Ryzen 9 5950X", 90.0),
    ("AMD Ryzen 9 5900X", 90.0),
    ("AMD Ryzen 7 5800X", 90.0),
    ("AMD Ryzen 7 5800X3D", 90.0),
    ("AMD Ryzen 5 5600X", 95.0),
    ("AMD Ryzen 5 5600", 95.0),
    ("AMD Ryzen 7 5700X", 95.0),
    ("AMD Ryzen 5 5500", 95.0),
    ("AMD Ryzen 5 3600", 95.0),
    ("AMD Ryzen 5 3600X", 95.0),
    ("AMD Ryzen 5 3400G", 95.0),
    ("AMD Ryzen 5 3400GE", 95.0),
    ("AMD Ryzen 3 3300X", 95.0),
    ("AMD Ryzen 3 3200G", 95.0),
    ("AMD Ryzen 3 3200GE", 95.0),
    ("AMD Ryzen 7 2700X", 85.0),
    ("AMD Ryzen 7 2700", 85.0),
    ("AMD Ryzen 5 2600X", 95.0),
    ("AMD Ryzen 5 2600", 95.0),
    ("AMD Ryzen 3 2300X", 95.0),
    ("AMD Ryzen 3 2200G", 95.0),
    ("AMD Ryzen 3 2200GE", 95.0),
    ("AMD Ryzen 7 1700X", 95.0),
    ("AMD Ryzen 7 1700", 95.0),
    ("AMD Ryzen 5 1600X", 95.0),
    ("AMD Ryzen 5 1600", 95.0),
    ("AMD Ryzen 3 1300X", 95.0),
    ("AMD Ryzen 3 1300", 95.0),
];

const GPU_CRITICAL_C: &[(&str, f32)] = &[
    ("NVIDIA GeForce RTX 5090", 90.0),
    ("NVIDIA GeForce RTX 5080", 88.0),
    ("NVIDIA GeForce RTX 5070 Ti", 88.0),
    ("NVIDIA GeForce RTX 5070", 85.0),
    ("NVIDIA GeForce RTX 4090", 90.0),
    ("NVIDIA GeForce RTX 4080", 90.0),
    ("NVIDIA GeForce RTX 4070 Ti", 90.0),
    ("NVIDIA GeForce RTX 4070", 90.0),
    ("NVIDIA GeForce RTX 4060 Ti", 90.0),
    ("NVIDIA GeForce RTX 4060", 90.0),
    ("NVIDIA GeForce RTX 3090 Ti", 92.0),
    ("NVIDIA GeForce RTX 3090", 92.0),
    ("NVIDIA GeForce RTX 3080 Ti", 93.0),
    ("NVIDIA GeForce RTX 3080", 93.0),
    ("NVIDIA GeForce RTX 3070 Ti", 93.0),
    ("NVIDIA GeForce RTX 3070", 93.0),
    ("NVIDIA GeForce RTX 3060 Ti", 93.0),
    ("NVIDIA GeForce RTX 3060", 93.0),
    ("NVIDIA GeForce GTX 1080 Ti", 94.0),
    ("NVIDIA GeForce GTX 1080", 94.0),
    ("NVIDIA GeForce GTX 1070 Ti", 94.0),
    ("NVIDIA GeForce GTX 1070", 94.0),
    ("NVIDIA GeForce GTX 1060", 94.0),
    ("NVIDIA GeForce GTX 1050 Ti", 94.0),
    ("NVIDIA GeForce GTX 1050", 94.0),
    ("AMD Radeon RX 7900 XTX", 110.0),
    ("AMD Radeon RX 7900 XT", 110.0),
    ("AMD Radeon RX 7800 XT", 110.0),
    ("AMD Radeon RX 7800", 110.0),
    ("AMD Radeon RX 7700 XT", 110.0),
    ("AMD Radeon RX 7700", 110.0),
    ("AMD Radeon RX 7600 XT", 110.0),
    ("AMD Radeon RX 7600", 110.0),
    ("AMD Radeon RX 6950 XT", 110.0),
    ("AMD Radeon RX 6900 XT", 110.0),
    ("AMD Radeon RX 6800 XT", 110.0),
    ("AMD Radeon RX 6800", 110.0),
    ("AMD Radeon RX 6700 XT", 110.0),
    ("AMD Radeon RX 6700", 110.0),
    ("AMD Radeon RX 6600 XT", 110.0),
    ("AMD Radeon RX 6600", 110.0),
    ("AMD Radeon RX 6500 XT", 110.0),
    ("AMD Radeon RX 6500", 110.0),
    ("AMD Radeon RX 6400", 110.0),
    ("AMD Radeon RX 5700 XT", 110.0),
    ("AMD Radeon RX 5700", 110.0),
    ("AMD Radeon RX 5600 XT", 110.0),
    ("AMD Radeon RX 5600", 110.0),
    ("AMD Radeon RX 5500 XT", 110.0),
    ("AMD Radeon RX 5500", 110.0),
    ("AMD Radeon RX 5300 XT", 110.0),
    ("AMD Radeon RX 5300", 110.0),
    ("AMD Radeon RX 5200", 110.0),
];

/// Vendor markers tried in order when a model is not in the table.
const CPU_FAMILIES: &[(&str, f32)] = &[("Intel", 100.0), ("AMD", 95.0), ("Ryzen", 95.0)];
const GPU_FAMILIES: &[(&str, f32)] = &[("Radeon", 110.0), ("amdgpu", 110.0)];

/// Effective warning/critical temperatures for one device.
///
/// `warning < critical` always holds for values built by [`ThresholdPair::calibrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPair {
    pub warning: f32,
    pub critical: f32,
}

impl ThresholdPair {
    pub fn calibrate(
        warning: ThresholdSetting,
        critical: ThresholdSetting,
        device_name: Option<&str>,
        role: DeviceRole,
    ) -> Self {
        let critical = critical.resolve(default_critical(device_name, role));
        let mut warning = warning.resolve(critical - WARNING_MARGIN_C);
        if warning >= critical {
            warning = step_below(critical);
        }
        Self { warning, critical }
    }

    /// Start of the upper half of the warning band, where the flame glyph takes over.
    pub fn midpoint(&self) -> f32 {
        self.critical - (self.critical - self.warning) / 2.0
    }
}

/// Calibrated thresholds for both devices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub cpu: ThresholdPair,
    pub gpu: ThresholdPair,
}

impl Thresholds {
    pub fn from_settings(settings: &Settings, cpu_name: Option<&str>, gpu_name: Option<&str>) -> Self {
        Self {
            cpu: ThresholdPair::calibrate(
                settings.cpu_warning_temperature,
                settings.cpu_critical_temperature,
                cpu_name,
                DeviceRole::Cpu,
            ),
            gpu: ThresholdPair::calibrate(
                settings.gpu_warning_temperature,
                settings.gpu_critical_temperature,
                gpu_name,
                DeviceRole::Gpu,
            ),
        }
    }
}

/// One degree below `value`, or the next representable float when a degree
/// is lost to rounding.
fn step_below(value: f32) -> f32 {
    let lowered = value - 1.0;
    if lowered < value || !value.is_finite() {
        return lowered;
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

/// Rated maximum for a device: exact model, then vendor family, then generic.
pub fn default_critical(device_name: Option<&str>, role: DeviceRole) -> f32 {
    let (table, families, generic) = match role {
        DeviceRole::Cpu => (CPU_CRITICAL_C, CPU_FAMILIES, GENERIC_CPU_CRITICAL_C),
        DeviceRole::Gpu => (GPU_CRITICAL_C, GPU_FAMILIES, GENERIC_GPU_CRITICAL_C),
    };
    let Some(name) = device_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return generic;
    };
    table
        .iter()
        .find(|(model, _)| *model == name)
        .or_else(|| families.iter().find(|(marker, _)| name.contains(marker)))
        .map(|(_, temp)| *temp)
        .unwrap_or(generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_model_wins() {
        assert_eq!(default_critical(Some("AMD Ryzen 7 2700X"), DeviceRole::Cpu), 85.0);
        assert_eq!(
            default_critical(Some("NVIDIA GeForce RTX 5070"), DeviceRole::Gpu),
            85.0
        );
    }

    #[test]
    fn unknown_models_use_vendor_family_then_generic() {
        assert_eq!(
            default_critical(Some("Intel Core Ultra 9 285K"), DeviceRole::Cpu),
            100.0
        );
        assert_eq!(
            default_critical(Some("AMD Ryzen 9 9950X 16-Core Processor"), DeviceRole::Cpu),
            95.0
        );
        assert_eq!(
            default_critical(Some("AMD Radeon RX 9070 XT"), DeviceRole::Gpu),
            110.0
        );
        assert_eq!(
            default_critical(Some("NVIDIA GeForce RTX 2080"), DeviceRole::Gpu),
            GENERIC_GPU_CRITICAL_C
        );
        assert_eq!(default_critical(None, DeviceRole::Cpu), GENERIC_CPU_CRITICAL_C);
        assert_eq!(default_critical(Some("  "), DeviceRole::Gpu), GENERIC_GPU_CRITICAL_C);
    }

    #[test]
    fn auto_warning_is_fifteen_below_critical() {
        let pair = ThresholdPair::calibrate(
            ThresholdSetting::Auto,
            ThresholdSetting::Auto,
            Some("Intel Core i9-13900K"),
            DeviceRole::Cpu,
        );
        assert_eq!(pair, ThresholdPair { warning: 85.0, critical: 100.0 });
        assert_eq!(pair.midpoint(), 92.5);
    }

    #[test]
    fn fixed_values_override_defaults() {
        let pair = ThresholdPair::calibrate(
            ThresholdSetting::Fixed(70.0),
            ThresholdSetting::Fixed(90.0),
            Some("AMD Radeon RX 7900 XTX"),
            DeviceRole::Gpu,
        );
        assert_eq!(pair, ThresholdPair { warning: 70.0, critical: 90.0 });
    }

    #[test]
    fn warning_is_clamped_below_critical() {
        let pair = ThresholdPair::calibrate(
            ThresholdSetting::Fixed(95.0),
            ThresholdSetting::Fixed(90.0),
            None,
            DeviceRole::Cpu,
        );
        assert_eq!(pair, ThresholdPair { warning: 89.0, critical: 90.0 });

        let equal = ThresholdPair::calibrate(
            ThresholdSetting::Fixed(80.0),
            ThresholdSetting::Fixed(80.0),
            None,
            DeviceRole::Gpu,
        );
        assert!(equal.warning < equal.critical);
    }

    #[test]
    fn clamp_holds_where_one_degree_is_lost_to_rounding() {
        for critical in [1e9_f32, 3e38, -1e9] {
            for warning in [ThresholdSetting::Auto, ThresholdSetting::Fixed(critical)] {
                let pair = ThresholdPair::calibrate(
                    warning,
                    ThresholdSetting::Fixed(critical),
                    None,
                    DeviceRole::Cpu,
                );
                assert_eq!(pair.critical, critical);
                assert!(pair.warning < pair.critical, "{warning:?}/{critical} -> {pair:?}");
            }
        }
    }

    #[test]
    fn warning_below_critical_for_any_combination() {
        let values = [
            ThresholdSetting::Auto,
            ThresholdSetting::Fixed(-40.0),
            ThresholdSetting::Fixed(0.0),
            ThresholdSetting::Fixed(77.7),
            ThresholdSetting::Fixed(150.0),
        ];
        for warning in values {
            for critical in values {
                for role in [DeviceRole::Cpu, DeviceRole::Gpu] {
                    let pair = ThresholdPair::calibrate(warning, critical, Some("AMD"), role);
                    assert!(pair.warning < pair.critical, "{warning:?}/{critical:?} -> {pair:?}");
                }
            }
        }
    }
}
