/// Hot-spot minus core differential above which a sample counts as suspect.
pub const PASTE_DIFFERENTIAL_C: f32 = 15.0;
/// Consecutive suspect samples needed before the alert is raised.
pub const PASTE_COUNTER_MAX: u8 = 12;

/// Debounced thermal-paste degradation monitor.
///
/// The counter climbs by one for each suspect sample (saturating at the cap)
/// and decays by one otherwise. The alert is a plain comparison against the
/// cap, so it drops again on the first decay step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasteMonitor {
    counter: u8,
}

impl PasteMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, core: Option<f32>, hot_spot: Option<f32>) -> bool {
        let suspect = matches!(
            (core, hot_spot),
            (Some(core), Some(hot)) if hot - core > PASTE_DIFFERENTIAL_C
        );
        if suspect {
            self.counter = (self.counter + 1).min(PASTE_COUNTER_MAX);
        } else {
            self.counter = self.counter.saturating_sub(1);
        }
        self.is_alerting()
    }

    pub fn is_alerting(&self) -> bool {
        self.counter >= PASTE_COUNTER_MAX
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
