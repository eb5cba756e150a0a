use anyhow::Context;
use breathcore::BreathingPattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Pattern parameters plus where the run should send its outputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub pattern: BreathingPattern,
    /// SVG artifact path; setting it always renders headless.
    pub output: Option<PathBuf>,
    /// JSON trace drawn over the target.
    pub measured: Option<PathBuf>,
    /// Jitter for a simulated measured trace when no file is given.
    pub noise: Option<f64>,
    pub seed: u64,
    /// Where to write the breath summary as JSON.
    pub summary: Option<PathBuf>,
}

/// Per-field pattern overrides coming from the command line.
#[derive(Clone, Debug, Default)]
pub struct PatternOverrides {
    pub total_time: Option<f64>,
    pub num_breaths: Option<u32>,
    pub inhale_duration: Option<f64>,
    pub exhale_duration: Option<f64>,
    pub peak_inhale_flow: Option<f64>,
    pub peak_exhale_flow: Option<f64>,
    pub sampling_rate: Option<f64>,
}

/// Command-line values layered over a YAML workflow; `None` keeps the file's value.
#[derive(Clone, Debug, Default)]
pub struct WorkflowOverrides {
    pub pattern: PatternOverrides,
    pub output: Option<PathBuf>,
    pub measured: Option<PathBuf>,
    pub noise: Option<f64>,
    pub seed: Option<u64>,
    pub summary: Option<PathBuf>,
}

impl WorkflowConfig {
    /// Loads `path` (or the defaults) and lets every given override win.
    pub fn resolve(path: Option<&Path>, overrides: WorkflowOverrides) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(&overrides.pattern);
        if overrides.output.is_some() {
            config.output = overrides.output;
        }
        if overrides.measured.is_some() {
            config.measured = overrides.measured;
        }
        if overrides.noise.is_some() {
            config.noise = overrides.noise;
        }
        if let Some(seed) = overrides.seed {
            config.seed = seed;
        }
        if overrides.summary.is_some() {
            config.summary = overrides.summary;
        }
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &PatternOverrides) {
        let pattern = &mut self.pattern;
        if let Some(value) = overrides.total_time {
            pattern.total_time = value;
        }
        if let Some(value) = overrides.num_breaths {
            pattern.num_breaths = value;
        }
        if let Some(value) = overrides.inhale_duration {
            pattern.inhale_duration = value;
        }
        if let Some(value) = overrides.exhale_duration {
            pattern.exhale_duration = value;
        }
        if let Some(value) = overrides.peak_inhale_flow {
            pattern.peak_inhale_flow = value;
        }
        if let Some(value) = overrides.peak_exhale_flow {
            pattern.peak_exhale_flow = value;
        }
        if let Some(value) = overrides.sampling_rate {
            pattern.sampling_rate = value;
        }
    }
}
