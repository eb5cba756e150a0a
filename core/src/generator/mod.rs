pub mod measured;
pub mod waveform;

pub use measured::MeasuredTrace;
pub use waveform::{generate_waveform, WaveformGenerator};
