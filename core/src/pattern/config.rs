use crate::prelude::{PatternError, PatternResult};
use serde::{Deserialize, Serialize};

/// Upper bound on sampling intervals per exercise (a ~80 MB time/flow grid).
pub const MAX_GRID_INTERVALS: usize = 5_000_000;

/// Parameters of a controlled-breathing exercise.
///
/// Durations are in seconds, flows in L/min. Inhale flow is positive and
/// exhale flow negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingPattern {
    pub total_time: f64,
    pub num_breaths: u32,
    pub inhale_duration: f64,
    pub exhale_duration: f64,
    pub peak_inhale_flow: f64,
    pub peak_exhale_flow: f64,
    /// Samples per second.
    pub sampling_rate: f64,
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self {
            total_time: 60.0,
            num_breaths: 10,
            inhale_duration: 2.0,
            exhale_duration: 4.0,
            peak_inhale_flow: 35.0,
            peak_exhale_flow: -18.0,
            sampling_rate: 20.0,
        }
    }
}

impl BreathingPattern {
    pub fn cycle_duration(&self) -> f64 {
        self.total_time / f64::from(self.num_breaths)
    }

    pub fn breaths_per_minute(&self) -> f64 {
        f64::from(self.num_breaths) * 60.0 / self.total_time
    }

    /// Number of sampling intervals; the grid holds one more point than this.
    pub fn num_points(&self) -> usize {
        (self.total_time * self.sampling_rate).floor() as usize
    }

    pub fn validate(&self) -> PatternResult<()> {
        let positive = [
            ("total_time", self.total_time),
            ("inhale_duration", self.inhale_duration),
            ("exhale_duration", self.exhale_duration),
            ("sampling_rate", self.sampling_rate),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PatternError::InvalidPattern(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.num_breaths == 0 {
            return Err(PatternError::InvalidPattern(
                "num_breaths must be at least 1".into(),
            ));
        }
        if !self.peak_inhale_flow.is_finite() || self.peak_inhale_flow < 0.0 {
            return Err(PatternError::InvalidPattern(format!(
                "peak_inhale_flow must be >= 0, got {}",
                self.peak_inhale_flow
            )));
        }
        if !self.peak_exhale_flow.is_finite() || self.peak_exhale_flow > 0.0 {
            return Err(PatternError::InvalidPattern(format!(
                "peak_exhale_flow must be <= 0, got {}",
                self.peak_exhale_flow
            )));
        }
        let intervals = self.total_time * self.sampling_rate;
        if !intervals.is_finite() || intervals > MAX_GRID_INTERVALS as f64 {
            return Err(PatternError::InvalidPattern(format!(
                "{}s at {} samples/s exceeds {} sampling intervals",
                self.total_time, self.sampling_rate, MAX_GRID_INTERVALS
            )));
        }
        if self.num_points() < 1 {
            return Err(PatternError::InvalidPattern(format!(
                "{}s at {} samples/s yields fewer than two samples",
                self.total_time, self.sampling_rate
            )));
        }

        let cycle = self.cycle_duration();
        let breath = self.inhale_duration + self.exhale_duration;
        if (breath - cycle).abs() > 1e-9 * cycle {
            return Err(PatternError::InvalidPattern(format!(
                "inhale ({}s) + exhale ({}s) must fill the {}s cycle",
                self.inhale_duration, self.exhale_duration, cycle
            )));
        }
        Ok(())
    }

    /// Two-line chart title summarizing rate and phase durations.
    pub fn title(&self) -> String {
        format!(
            "Target Pattern: Controlled Breathing\n({} breaths/min, Inhale {}s, Exhale {}s)",
            round_for_display(self.breaths_per_minute()),
            self.inhale_duration,
            self.exhale_duration
        )
    }
}

fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
