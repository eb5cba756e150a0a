use crate::pattern::BreathingPattern;
use crate::prelude::Waveform;

/// Figure size in inches and the resolution used to turn it into pixels.
pub const FIGURE_WIDTH_IN: f32 = 15.0;
pub const FIGURE_HEIGHT_IN: f32 = 6.0;
pub const DPI: f32 = 100.0;

/// Headroom added above the inhale peak and below the exhale peak.
const FLOW_MARGIN: f64 = 10.0;
/// Fraction of the data span padded on both sides of the time axis.
const TIME_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DODGER_BLUE: Color = Color::rgb(30, 144, 255);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const GRID: Color = Color::rgb(176, 176, 176);
    pub const CRIMSON: Color = Color::rgb(214, 39, 40);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

impl Dash {
    /// On/off lengths in pixels, empty for a solid stroke.
    pub fn segments(self) -> &'static [f32] {
        match self {
            Dash::Solid => &[],
            Dash::Dashed => &[6.0, 4.0],
            Dash::Dotted => &[1.5, 3.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    pub dash: Dash,
}

impl LineStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Dash::Solid,
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Dash::Dashed,
        }
    }

    pub fn dotted(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Dash::Dotted,
        }
    }
}

/// A labeled line drawn through data points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
}

impl Series {
    pub fn from_waveform(label: &str, waveform: &Waveform, style: LineStyle) -> Self {
        Self {
            label: label.to_string(),
            points: waveform.samples().collect(),
            style,
        }
    }
}

/// Horizontal line spanning the whole plot at a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub y: f64,
    pub label: Option<String>,
    pub style: LineStyle,
}

/// Everything needed to lay out and paint one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub width_px: f32,
    pub height_px: f32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<Series>,
    pub reference_lines: Vec<ReferenceLine>,
    pub grid: Option<LineStyle>,
    pub legend: bool,
}

impl Chart {
    /// The target-pattern chart: curve, zero line, dotted grid and legend.
    pub fn target_pattern(pattern: &BreathingPattern, waveform: &Waveform) -> Self {
        let time: Vec<f64> = waveform.time().to_vec();
        Self {
            width_px: FIGURE_WIDTH_IN * DPI,
            height_px: FIGURE_HEIGHT_IN * DPI,
            title: pattern.title(),
            x_label: "Time (seconds)".into(),
            y_label: "Air Flow (L/min)".into(),
            x_range: padded_extent(&time),
            y_range: (
                pattern.peak_exhale_flow - FLOW_MARGIN,
                pattern.peak_inhale_flow + FLOW_MARGIN,
            ),
            series: vec![Series::from_waveform(
                "Target Pattern",
                waveform,
                LineStyle::solid(Color::DODGER_BLUE, 2.0),
            )],
            reference_lines: vec![ReferenceLine {
                y: 0.0,
                label: Some("Zero Flow".into()),
                style: LineStyle::dashed(Color::GREY, 0.8),
            }],
            grid: Some(LineStyle::dotted(Color::GRID.with_alpha(0.6), 0.8)),
            legend: true,
        }
    }

    /// Adds a measured trace on top of the target and widens the time axis if needed.
    pub fn with_measured(mut self, waveform: &Waveform) -> Self {
        self.series.push(Series::from_waveform(
            "Measured Flow",
            waveform,
            LineStyle::solid(Color::CRIMSON.with_alpha(0.7), 1.5),
        ));
        let time: Vec<f64> = self
            .series
            .iter()
            .flat_map(|series| series.points.iter().map(|&(t, _)| t))
            .collect();
        self.x_range = padded_extent(&time);
        self
    }

    /// Labeled items in drawing order, as shown in the legend.
    pub fn legend_entries(&self) -> Vec<(&str, &LineStyle)> {
        let series = self
            .series
            .iter()
            .map(|series| (series.label.as_str(), &series.style));
        let lines = self
            .reference_lines
            .iter()
            .filter_map(|line| line.label.as_deref().map(|label| (label, &line.style)));
        series.chain(lines).collect()
    }
}

fn padded_extent(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * TIME_PADDING, max + span * TIME_PADDING)
}
