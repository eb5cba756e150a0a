pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// Smallest and largest value, `None` for an empty slice.
    pub fn extent(samples: &[f64]) -> Option<(f64, f64)> {
        if samples.is_empty() {
            return None;
        }
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_empty_or_flat_trace_is_zero() {
        assert_eq!(StatsHelper::rms(&[]), 0.0);
        assert_eq!(StatsHelper::rms(&[0.0; 1201]), 0.0);
    }

    #[test]
    fn rms_of_single_sample_is_its_magnitude() {
        assert_eq!(StatsHelper::rms(&[-18.0]), 18.0);
    }

    #[test]
    fn rms_of_full_sine_period_is_peak_over_root_two() {
        let n = 1000;
        let samples: Vec<f64> = (0..n)
            .map(|i| 35.0 * (2.0 * std::f64::consts::PI * i as f64 / n as f64).sin())
            .collect();
        let expected = 35.0 / 2f64.sqrt();
        assert!((StatsHelper::rms(&samples) - expected).abs() < 1e-9);
    }

    #[test]
    fn rms_of_breath_lobes_ignores_sign() {
        let inhale = [0.0, 35.0, 0.0];
        let exhale = [0.0, -35.0, 0.0];
        assert_eq!(StatsHelper::rms(&inhale), StatsHelper::rms(&exhale));
        assert!((StatsHelper::rms(&inhale) - 35.0 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn extent_reports_min_and_max() {
        assert_eq!(StatsHelper::extent(&[]), None);
        assert_eq!(StatsHelper::extent(&[3.0, -18.0, 35.0]), Some((-18.0, 35.0)));
    }
}
