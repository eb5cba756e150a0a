use ndarray::Array1;

/// Common error type for pattern generation and trace handling.
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("invalid samples: {0}")]
    InvalidSamples(String),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type PatternResult<T> = Result<T, PatternError>;

/// Index-aligned time (s) and flow (L/min) samples, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    time: Array1<f64>,
    flow: Array1<f64>,
}

impl Waveform {
    pub fn new(time: Array1<f64>, flow: Array1<f64>) -> PatternResult<Self> {
        if time.len() != flow.len() {
            return Err(PatternError::InvalidSamples(format!(
                "time has {} samples but flow has {}",
                time.len(),
                flow.len()
            )));
        }
        Ok(Self { time, flow })
    }

    pub fn time(&self) -> &Array1<f64> {
        &self.time
    }

    pub fn flow(&self) -> &Array1<f64> {
        &self.flow
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterates over `(time, flow)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.flow.iter().copied())
    }

    /// Total span covered by the time axis, zero for fewer than two samples.
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn waveform_rejects_mismatched_lengths() {
        let err = Waveform::new(array![0.0, 1.0], array![0.0]).unwrap_err();
        assert!(matches!(err, PatternError::InvalidSamples(_)));
    }

    #[test]
    fn waveform_pairs_samples_in_order() {
        let waveform = Waveform::new(array![0.0, 0.5, 1.0], array![0.0, 3.0, -1.0]).unwrap();
        let pairs: Vec<_> = waveform.samples().collect();
        assert_eq!(pairs, vec![(0.0, 0.0), (0.5, 3.0), (1.0, -1.0)]);
        assert_eq!(waveform.duration(), 1.0);
    }
}
