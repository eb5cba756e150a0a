use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use breathcore::analysis::{summarize, BreathSummary};
use breathcore::chart::Chart;
use breathcore::generator::{MeasuredTrace, WaveformGenerator};
use breathcore::{BreathingPattern, Waveform};
use log::info;

pub struct WorkflowResult {
    pub pattern: BreathingPattern,
    pub waveform: Waveform,
    pub measured: Option<Waveform>,
    pub summary: BreathSummary,
}

impl WorkflowResult {
    pub fn chart(&self) -> Chart {
        let chart = Chart::target_pattern(&self.pattern, &self.waveform);
        match &self.measured {
            Some(measured) => chart.with_measured(measured),
            None => chart,
        }
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let generator = WaveformGenerator::new(self.config.pattern.clone())
            .context("validating breathing pattern")?;
        let waveform = generator.generate().context("sampling target waveform")?;
        let measured = self.measured_trace(&waveform)?;
        let summary = summarize(&waveform);

        Ok(WorkflowResult {
            pattern: generator.pattern().clone(),
            waveform,
            measured,
            summary,
        })
    }

    fn measured_trace(&self, target: &Waveform) -> anyhow::Result<Option<Waveform>> {
        let trace = if let Some(path) = &self.config.measured {
            info!("loading measured trace from {}", path.display());
            MeasuredTrace::load(path)
                .with_context(|| format!("loading measured trace {}", path.display()))?
        } else if let Some(noise) = self.config.noise {
            info!(
                "simulating measured trace (noise {noise}, seed {})",
                self.config.seed
            );
            MeasuredTrace::simulate(target, noise, self.config.seed)
                .context("simulating measured trace")?
        } else {
            return Ok(None);
        };

        let waveform = trace
            .into_waveform()
            .context("converting measured trace")?;
        Ok(Some(waveform))
    }
}
