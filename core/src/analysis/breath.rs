use crate::math::stats::StatsHelper;
use crate::prelude::Waveform;
use crate::telemetry::LogManager;
use serde::Serialize;
use std::collections::VecDeque;

const LPM_TO_LPS: f64 = 1.0 / 60.0;
/// Flow (L/s) beyond which the detector considers a phase started.
const FLOW_THRESHOLD_LPS: f64 = 0.1;
/// Breaths kept for the average inhaled volume.
const VOLUME_HISTORY: usize = 10;

/// Counts breaths and integrates inhaled volume from a stream of flow samples.
///
/// A breath starts when flow rises above the threshold and completes on the
/// first sample below the negative threshold.
#[derive(Debug, Clone, Default)]
pub struct BreathDetector {
    inhaling: bool,
    current_volume: f64,
    breath_count: usize,
    recent_volumes: VecDeque<f64>,
    volumes: Vec<f64>,
}

impl BreathDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one flow sample (L/min) held for `dt` seconds.
    pub fn push(&mut self, flow_lpm: f64, dt: f64) {
        let flow = flow_lpm * LPM_TO_LPS;
        if flow > FLOW_THRESHOLD_LPS {
            self.inhaling = true;
            self.current_volume += flow * dt;
        } else if flow < -FLOW_THRESHOLD_LPS && self.inhaling {
            self.inhaling = false;
            self.complete_breath();
        }
    }

    fn complete_breath(&mut self) {
        let volume = std::mem::take(&mut self.current_volume);
        if self.recent_volumes.len() == VOLUME_HISTORY {
            self.recent_volumes.pop_front();
        }
        self.recent_volumes.push_back(volume);
        self.volumes.push(volume);
        self.breath_count += 1;
    }

    pub fn breath_count(&self) -> usize {
        self.breath_count
    }

    /// Mean of the positive volumes among the most recent breaths, in liters.
    pub fn average_volume(&self) -> f64 {
        let (sum, count) = self
            .recent_volumes
            .iter()
            .filter(|&&volume| volume > 0.0)
            .fold((0.0, 0usize), |(sum, count), &volume| (sum + volume, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

/// Exercise summary reported after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreathSummary {
    pub total_breaths: usize,
    pub avg_inhaled_volume: f64,
    pub inhaled_volumes: Vec<f64>,
    pub duration: f64,
    pub peak_flow: f64,
    pub trough_flow: f64,
    pub rms_flow: f64,
}

pub fn summarize(waveform: &Waveform) -> BreathSummary {
    let mut detector = BreathDetector::new();
    let mut previous_time = None;
    for (time, flow) in waveform.samples() {
        let dt = previous_time.map_or(0.0, |previous| time - previous);
        detector.push(flow, dt);
        previous_time = Some(time);
    }

    let flow = waveform.flow().to_vec();
    let (trough_flow, peak_flow) = StatsHelper::extent(&flow).unwrap_or((0.0, 0.0));
    let summary = BreathSummary {
        total_breaths: detector.breath_count(),
        avg_inhaled_volume: detector.average_volume(),
        inhaled_volumes: detector.volumes.clone(),
        duration: waveform.duration(),
        peak_flow,
        trough_flow,
        rms_flow: StatsHelper::rms(&flow),
    };

    LogManager::new("analysis").record(&format!(
        "{} breaths, average inhaled volume {:.3} L",
        summary.total_breaths, summary.avg_inhaled_volume
    ));
    summary
}
