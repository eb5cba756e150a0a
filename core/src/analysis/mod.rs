pub mod breath;

pub use breath::{summarize, BreathDetector, BreathSummary};
