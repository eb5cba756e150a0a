pub mod config;

pub use config::BreathingPattern;
