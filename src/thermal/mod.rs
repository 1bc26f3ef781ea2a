pub mod paste;
pub mod thresholds;

pub use paste::{PasteMonitor, PASTE_COUNTER_MAX, PASTE_DIFFERENTIAL_C};
pub use thresholds::{default_critical, ThresholdPair, Thresholds};
