use crate::prelude::{PatternError, PatternResult, Waveform};
use ndarray::Array1;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recorded (or simulated) flow trace overlaid on the target pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredTrace {
    pub time: Vec<f64>,
    pub flow: Vec<f64>,
}

impl MeasuredTrace {
    pub fn load<P: AsRef<Path>>(path: P) -> PatternResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let trace: MeasuredTrace = serde_json::from_str(&contents)?;
        trace.check()?;
        Ok(trace)
    }

    /// Target flow plus uniform jitter in `(-noise, noise)`, reproducible per seed.
    ///
    /// `noise` must be finite with a finite span `2 * noise`; zero or negative adds no jitter.
    pub fn simulate(target: &Waveform, noise: f64, seed: u64) -> PatternResult<Self> {
        if !noise.is_finite() || !(2.0 * noise).is_finite() {
            return Err(PatternError::InvalidSamples(format!(
                "jitter amplitude {noise} is out of range"
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let flow = target
            .flow()
            .iter()
            .map(|&value| {
                if noise > 0.0 {
                    value + rng.gen_range(-noise..noise)
                } else {
                    value
                }
            })
            .collect();

        Ok(Self {
            time: target.time().to_vec(),
            flow,
        })
    }

    fn check(&self) -> PatternResult<()> {
        if self.time.len() != self.flow.len() {
            return Err(PatternError::InvalidSamples(format!(
                "measured trace has {} times but {} flows",
                self.time.len(),
                self.flow.len()
            )));
        }
        if self.time.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(PatternError::InvalidSamples(
                "measured trace time must be non-decreasing".into(),
            ));
        }
        if self
            .time
            .iter()
            .chain(self.flow.iter())
            .any(|value| !value.is_finite())
        {
            return Err(PatternError::InvalidSamples(
                "measured trace contains non-finite values".into(),
            ));
        }
        Ok(())
    }

    pub fn into_waveform(self) -> PatternResult<Waveform> {
        self.check()?;
        Waveform::new(Array1::from(self.time), Array1::from(self.flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_waveform;
    use crate::pattern::BreathingPattern;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn simulated_trace_is_seeded_and_bounded() {
        let target = generate_waveform(&BreathingPattern::default()).unwrap();
        let first = MeasuredTrace::simulate(&target, 1.5, 7).unwrap();
        let second = MeasuredTrace::simulate(&target, 1.5, 7).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.flow.len(), target.len());
        for (measured, expected) in first.flow.iter().zip(target.flow().iter()) {
            assert!((measured - expected).abs() < 1.5);
        }
    }

    #[test]
    fn zero_noise_reproduces_target() {
        let target = generate_waveform(&BreathingPattern::default()).unwrap();
        let trace = MeasuredTrace::simulate(&target, 0.0, 1).unwrap();
        assert_eq!(trace.into_waveform().unwrap(), target);
    }

    #[test]
    fn simulate_rejects_unbounded_jitter() {
        let target = generate_waveform(&BreathingPattern::default()).unwrap();
        for noise in [f64::INFINITY, f64::NAN, 1e308] {
            assert!(
                matches!(
                    MeasuredTrace::simulate(&target, noise, 1),
                    Err(PatternError::InvalidSamples(_))
                ),
                "noise {noise} accepted"
            );
        }
    }

    #[test]
    fn load_reads_json_trace() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"time": [0.0, 0.5, 1.0], "flow": [0.0, 12.5, 30.0]}"#)
            .unwrap();
        let path = temp.into_temp_path();
        let trace = MeasuredTrace::load(&path).unwrap();
        assert_eq!(trace.flow, vec![0.0, 12.5, 30.0]);
    }

    #[test]
    fn load_rejects_misaligned_trace() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"time": [0.0, 0.5], "flow": [0.0]}"#)
            .unwrap();
        let path = temp.into_temp_path();
        assert!(matches!(
            MeasuredTrace::load(&path),
            Err(PatternError::InvalidSamples(_))
        ));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"time: [0.0]").unwrap();
        let path = temp.into_temp_path();
        assert!(matches!(
            MeasuredTrace::load(&path),
            Err(PatternError::Decode(_))
        ));
    }
}
