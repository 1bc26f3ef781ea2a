#[cfg(target_os = "linux")]
use std::path::{Path, PathBuf};

/// Source of the auxiliary key state shown on the CPU line.
pub trait KeyState {
    fn caps_lock_on(&self) -> bool;
}

/// Fixed key state, for tests and headless runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticKeyState(pub bool);

impl KeyState for StaticKeyState {
    fn caps_lock_on(&self) -> bool {
        self.0
    }
}

/// Caps-lock LED state read from sysfs; always off on other platforms.
#[cfg(target_os = "linux")]
pub struct SysfsKeyState {
    leds: Vec<PathBuf>,
}

#[cfg(target_os = "linux")]
impl SysfsKeyState {
    pub fn new() -> Self {
        Self::scan(Path::new("/sys/class/leds"))
    }

    /// Collect the brightness files of every `*capslock*` LED under `root`.
    pub fn scan(root: &Path) -> Self {
        let leds: Vec<PathBuf> = std::fs::read_dir(root)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_name().to_string_lossy().contains("capslock"))
                    .map(|entry| entry.path().join("brightness"))
                    .collect()
            })
            .unwrap_or_default();
        Self { leds }
    }
}

#[cfg(target_os = "linux")]
impl KeyState for SysfsKeyState {
    fn caps_lock_on(&self) -> bool {
        self.leds.iter().any(|path| {
            std::fs::read_to_string(path)
                .ok()
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .is_some_and(|level| level > 0)
        })
    }
}

#[cfg(not(target_os = "linux"))]
pub struct SysfsKeyState;

#[cfg(not(target_os = "linux"))]
impl SysfsKeyState {
    pub fn new() -> Self {
        SysfsKeyState
    }
}

#[cfg(not(target_os = "linux"))]
impl KeyState for SysfsKeyState {
    fn caps_lock_on(&self) -> bool {
        false
    }
}

impl Default for SysfsKeyState {
    fn default() -> Self {
        Self::new()
    }
}
