pub mod surface;
pub mod window;

use std::env;

/// Whether a window can be opened; without one the chart goes to an SVG file.
pub fn display_available() -> bool {
    if cfg!(target_os = "linux") {
        env::var_os("DISPLAY").is_some() || env::var_os("WAYLAND_DISPLAY").is_some()
    } else {
        true
    }
}
