//! Renderer-independent line chart.
//!
//! [`Chart`] describes what to draw, [`render::draw`] lays it out onto any
//! [`ChartSurface`]. The SVG surface lives here; windowed surfaces live with
//! their toolkit.

pub mod layout;
pub mod model;
pub mod render;
pub mod svg;

pub use layout::{Anchor, ChartSurface, Layout, Point, Rect, TextLabel};
pub use model::{Chart, Color, Dash, LineStyle};
pub use svg::{render_svg, write_svg, SvgSurface};
