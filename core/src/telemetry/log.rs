use crate::prelude::Waveform;
use log::{debug, info};

/// Thin facade over the `log` macros shared by the generator and analysis.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }

    pub fn trace_waveform(&self, waveform: &Waveform) {
        debug!(
            "[{}] waveform: {} samples over {:.3}s",
            self.component,
            waveform.len(),
            waveform.duration()
        );
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("breathcore")
    }
}
