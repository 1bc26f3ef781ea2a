use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};

use super::{DeviceRole, SensorReading, SensorSource};

const CPU_CHIPS: &[&str] = &["coretemp", "k10temp", "zenpower", "cpu"];
const GPU_CHIPS: &[&str] = &["amdgpu", "radeon", "nouveau", "nvidia", "gpu"];

/// Sensor backend over the platform's hardware monitors (via `sysinfo`).
///
/// Components are split into CPU and GPU groups by chip name and their
/// labels are normalised so the aggregation rules find the usual sensors.
pub struct SystemSensors {
    components: Components,
    cpu_name: Option<String>,
    gpu_name: Option<String>,
    cpu: Vec<SensorReading>,
    gpu: Vec<SensorReading>,
    reads: ReadGate,
}

impl SystemSensors {
    pub fn new() -> Self {
        let components = Components::new_with_refreshed_list();
        let system =
            System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
        let cpu_name = system
            .cpus()
            .first()
            .map(|cpu| cpu_model_name(cpu.brand()))
            .filter(|model| !model.is_empty());
        let gpu_name = components
            .list()
            .iter()
            .filter_map(|c| split_label(c.label()))
            .find(|(chip, _)| chip_role(chip) == Some(DeviceRole::Gpu))
            .map(|(chip, _)| chip.to_string());

        let mut sensors = Self {
            components,
            cpu_name,
            gpu_name,
            cpu: Vec::new(),
            gpu: Vec::new(),
            reads: ReadGate::default(),
        };
        sensors.collect(DeviceRole::Cpu);
        sensors.collect(DeviceRole::Gpu);
        sensors
    }

    fn collect(&mut self, role: DeviceRole) {
        let readings: Vec<SensorReading> = self
            .components
            .list()
            .iter()
            .filter_map(|component| {
                let (found, name) = classify(component.label())?;
                (found == role).then(|| SensorReading::temperature(name, component.temperature()))
            })
            .collect();
        match role {
            DeviceRole::Cpu => self.cpu = readings,
            DeviceRole::Gpu => self.gpu = readings,
        }
    }
}

impl Default for SystemSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SystemSensors {
    fn refresh(&mut self, role: DeviceRole) {
        if self.reads.take(role) {
            self.components.refresh(false);
        }
        self.collect(role);
    }

    fn sensors(&self, role: DeviceRole) -> &[SensorReading] {
        match role {
            DeviceRole::Cpu => &self.cpu,
            DeviceRole::Gpu => &self.gpu,
        }
    }

    fn device_name(&self, role: DeviceRole) -> Option<&str> {
        match role {
            DeviceRole::Cpu => self.cpu_name.as_deref(),
            DeviceRole::Gpu => self.gpu_name.as_deref(),
        }
    }
}

/// Tracks which roles have not yet been collected from the latest hardware
/// read, so refreshing both devices in turn reads hwmon once.
#[derive(Debug, Default)]
struct ReadGate {
    pending: Vec<DeviceRole>,
}

impl ReadGate {
    /// Whether `role` needs a fresh hardware read. Marks it collected either way.
    fn take(&mut self, role: DeviceRole) -> bool {
        let fresh = !self.pending.contains(&role);
        if fresh {
            self.pending = vec![DeviceRole::Cpu, DeviceRole::Gpu];
        }
        self.pending.retain(|pending| *pending != role);
        fresh
    }
}

/// Reduce a CPU brand string to the plain model name used by the threshold
/// tables, e.g. `Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz` → `Intel Core i7-9700K`.
pub fn cpu_model_name(brand: &str) -> String {
    let mut name = brand
        .replace("(R)", "")
        .replace("(r)", "")
        .replace("(TM)", "")
        .replace("(tm)", "");
    for cut in [" @", " with Radeon"] {
        if let Some(idx) = name.find(cut) {
            name.truncate(idx);
        }
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    let mut kept = Vec::with_capacity(words.len());
    let mut idx = 0;
    while idx < words.len() {
        let word = words[idx];
        if is_generation(word) && words.get(idx + 1) == Some(&"Gen") {
            idx += 2;
            continue;
        }
        let core_count = word.len() > 5 && word.to_ascii_lowercase().ends_with("-core");
        if !(word == "CPU" || word == "Processor" || core_count) {
            kept.push(word);
        }
        idx += 1;
    }
    kept.join(" ")
}

/// `12th`, `13th`, `1st`, ...
fn is_generation(word: &str) -> bool {
    ["th", "st", "nd", "rd"].iter().any(|suffix| {
        word.strip_suffix(suffix)
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    })
}

fn split_label(label: &str) -> Option<(&str, &str)> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(label.split_once(' ').unwrap_or((label, "")))
}

fn chip_role(chip: &str) -> Option<DeviceRole> {
    let chip = chip.to_ascii_lowercase();
    if CPU_CHIPS.iter().any(|p| chip.starts_with(p)) {
        Some(DeviceRole::Cpu)
    } else if GPU_CHIPS.iter().any(|p| chip.starts_with(p)) {
        Some(DeviceRole::Gpu)
    } else {
        None
    }
}

/// Map a raw component label to its device and the reading name we expose.
fn classify(label: &str) -> Option<(DeviceRole, String)> {
    let (chip, rest) = split_label(label)?;
    let role = chip_role(chip)?;
    let rest = rest.trim();
    let name = match role {
        DeviceRole::Cpu => {
            if let Some(n) = rest.strip_prefix("Core ") {
                format!("CPU Core #{n}")
            } else if rest.starts_with("Package id") {
                "CPU Package".to_string()
            } else if rest.is_empty() {
                chip.to_string()
            } else {
                rest.to_string()
            }
        }
        DeviceRole::Gpu => match rest {
            "edge" => "GPU Core".to_string(),
            "junction" => "GPU Hot Spot".to_string(),
            "mem" => "GPU Memory".to_string(),
            "" => chip.to_string(),
            other => format!("GPU {other}"),
        },
    };
    Some((role, name))
}
