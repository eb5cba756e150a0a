//! Core of the breathing-pattern trainer.
//!
//! Builds the target inhale/exhale flow waveform, summarizes it the way the
//! flow-sensor firmware does, and lays it out as a chart that any drawing
//! surface can paint.

pub mod analysis;
pub mod chart;
pub mod generator;
pub mod math;
pub mod pattern;
pub mod prelude;
pub mod telemetry;

pub use pattern::BreathingPattern;
pub use prelude::{PatternError, PatternResult, Waveform};
