use crate::math::grid::{is_close, is_close_tol, linspace, DEFAULT_RTOL};
use crate::pattern::BreathingPattern;
use crate::prelude::{PatternError, PatternResult, Waveform};
use crate::telemetry::LogManager;
use std::f64::consts::PI;

/// Absolute tolerance for the cycle-boundary check.
const CYCLE_BOUNDARY_ATOL: f64 = 1e-9;

/// Samples a validated [`BreathingPattern`] into a [`Waveform`].
pub struct WaveformGenerator {
    pattern: BreathingPattern,
    logger: LogManager,
}

impl WaveformGenerator {
    pub fn new(pattern: BreathingPattern) -> PatternResult<Self> {
        pattern.validate()?;
        Ok(Self {
            pattern,
            logger: LogManager::new("generator"),
        })
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    pub fn generate(&self) -> PatternResult<Waveform> {
        let pattern = &self.pattern;
        let samples = pattern.num_points().checked_add(1).ok_or_else(|| {
            PatternError::InvalidPattern("sampling grid does not fit in memory".into())
        })?;
        let time = linspace(0.0, pattern.total_time, samples);
        let flow = time.mapv(|t| self.flow_at(t));
        let waveform = Waveform::new(time, flow)?;

        self.logger.record(&format!(
            "{} breaths of {}s (inhale {}s / exhale {}s) at {} samples/s",
            pattern.num_breaths,
            pattern.cycle_duration(),
            pattern.inhale_duration,
            pattern.exhale_duration,
            pattern.sampling_rate
        ));
        self.logger.trace_waveform(&waveform);
        Ok(waveform)
    }

    /// Target flow (L/min) at time `t`, including the zero snap at phase boundaries.
    pub fn flow_at(&self, t: f64) -> f64 {
        let pattern = &self.pattern;
        let cycle = pattern.cycle_duration();
        let phase = t.rem_euclid(cycle);
        let flow = lobe_flow(pattern, phase);

        let on_boundary = is_close(phase, 0.0)
            || is_close(phase, pattern.inhale_duration)
            || is_close_tol(phase.rem_euclid(cycle), 0.0, DEFAULT_RTOL, CYCLE_BOUNDARY_ATOL);
        if on_boundary {
            let closes_final_cycle = is_close(t, pattern.total_time) && is_close(phase, 0.0);
            // t = 0 keeps its computed value unless it also closes the final cycle.
            if closes_final_cycle || !is_close(t, 0.0) {
                return 0.0;
            }
        }
        flow
    }
}

/// Half-sine lobe for the phase: positive while inhaling, negative while exhaling.
fn lobe_flow(pattern: &BreathingPattern, phase: f64) -> f64 {
    if phase < pattern.inhale_duration {
        pattern.peak_inhale_flow * (PI * phase / pattern.inhale_duration).sin()
    } else if phase < pattern.cycle_duration() {
        let exhale_phase = phase - pattern.inhale_duration;
        pattern.peak_exhale_flow * (PI * exhale_phase / pattern.exhale_duration).sin()
    } else {
        0.0
    }
}

/// Validates `pattern` and samples it.
pub fn generate_waveform(pattern: &BreathingPattern) -> PatternResult<Waveform> {
    WaveformGenerator::new(pattern.clone())?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_waveform() -> Waveform {
        generate_waveform(&BreathingPattern::default()).unwrap()
    }

    fn flow_near(waveform: &Waveform, t: f64) -> f64 {
        let index = waveform
            .time()
            .iter()
            .position(|&sample| (sample - t).abs() < 1e-9)
            .unwrap_or_else(|| panic!("no sample at t={t}"));
        waveform.flow()[index]
    }

    #[test]
    fn grid_spans_whole_exercise() {
        let waveform = default_waveform();
        assert_eq!(waveform.len(), 60 * 20 + 1);
        assert_eq!(waveform.flow().len(), waveform.time().len());
        assert_eq!(waveform.time()[0], 0.0);
        assert_eq!(waveform.time()[waveform.len() - 1], 60.0);
    }

    #[test]
    fn flow_stays_between_peaks() {
        let waveform = default_waveform();
        assert!(waveform
            .flow()
            .iter()
            .all(|&flow| (-18.0..=35.0).contains(&flow)));
    }

    #[test]
    fn flow_is_zero_at_cycle_and_phase_boundaries() {
        let waveform = default_waveform();
        for cycle in 0..=10 {
            let start = cycle as f64 * 6.0;
            assert!(flow_near(&waveform, start).abs() < 1e-9, "cycle start {start}");
            if cycle < 10 {
                let switch = start + 2.0;
                assert!(flow_near(&waveform, switch).abs() < 1e-9, "switch {switch}");
            }
        }
    }

    #[test]
    fn flow_peaks_mid_phase() {
        let waveform = default_waveform();
        assert!((flow_near(&waveform, 1.0) - 35.0).abs() < 1e-9);
        assert!((flow_near(&waveform, 4.0) + 18.0).abs() < 1e-9);
        assert!((flow_near(&waveform, 55.0) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn regeneration_is_deterministic() {
        assert_eq!(default_waveform(), default_waveform());
    }

    #[test]
    fn invalid_pattern_is_rejected_before_sampling() {
        let pattern = BreathingPattern {
            sampling_rate: 0.0,
            ..Default::default()
        };
        assert!(WaveformGenerator::new(pattern).is_err());
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let pattern = BreathingPattern {
            total_time: 1e300,
            num_breaths: 1,
            inhale_duration: 1e300 / 3.0,
            exhale_duration: 2e300 / 3.0,
            ..Default::default()
        };
        assert!(matches!(
            generate_waveform(&pattern),
            Err(PatternError::InvalidPattern(_))
        ));
    }

    #[test]
    fn custom_pattern_scales_grid_and_lobes() {
        let pattern = BreathingPattern {
            total_time: 30.0,
            num_breaths: 5,
            inhale_duration: 3.0,
            exhale_duration: 3.0,
            peak_inhale_flow: 20.0,
            peak_exhale_flow: -20.0,
            sampling_rate: 10.0,
        };
        let generator = WaveformGenerator::new(pattern).unwrap();
        let waveform = generator.generate().unwrap();
        assert_eq!(waveform.len(), 301);
        assert!((generator.flow_at(1.5) - 20.0).abs() < 1e-9);
        assert!((generator.flow_at(4.5) + 20.0).abs() < 1e-9);
        assert_eq!(generator.flow_at(3.0), 0.0);
    }
}
