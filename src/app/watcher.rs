use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{
    mpsc::{self, Receiver},
    Arc,
};
use std::thread;
use std::time::{Duration, SystemTime};

use crate::config::{LoadedSettings, Settings};
use crate::{Error, Result};

pub const WATCH_INTERVAL: Duration = Duration::from_millis(500);
/// Grace period after a change so the editor finishes writing the file.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Reports sent over the watcher channel.
#[derive(Debug)]
pub enum SettingsEvent {
    Reloaded(LoadedSettings),
    Error(String),
}

/// Keeps the watcher thread alive until dropped or stopped.
pub struct WatchHandle {
    receiver: Receiver<SettingsEvent>,
    running: Arc<AtomicBool>,
}

impl WatchHandle {
    pub fn receiver(&self) -> &Receiver<SettingsEvent> {
        &self.receiver
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Spawn a thread that reloads `path` whenever its modification time changes.
pub fn watch_settings(
    path: PathBuf,
    interval: Duration,
    app_running: Arc<AtomicBool>,
) -> Result<WatchHandle> {
    let (tx, rx) = mpsc::channel();
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    thread::Builder::new()
        .name("oledtherm-settings".into())
        .spawn(move || {
            let mut last_seen = modified(&path);
            while app_running.load(Ordering::SeqCst) && running_clone.load(Ordering::SeqCst) {
                thread::sleep(interval);
                let current = modified(&path);
                if current.is_none() || current == last_seen {
                    continue;
                }
                last_seen = current;
                thread::sleep(SETTLE_DELAY);
                let event = match Settings::load_from_path(&path) {
                    Ok(loaded) => SettingsEvent::Reloaded(loaded),
                    Err(err) => SettingsEvent::Error(err.to_string()),
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        })
        .map_err(Error::Io)?;
    Ok(WatchHandle {
        receiver: rx,
        running,
    })
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
