pub mod grid;
pub mod stats;

pub use grid::{is_close, is_close_tol, linspace};
pub use stats::StatsHelper;
