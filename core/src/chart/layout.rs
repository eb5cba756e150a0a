use crate::chart::model::{Chart, Color, LineStyle};

const TITLE_LINE_HEIGHT: f32 = 22.0;
const MARGIN_LEFT: f32 = 78.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_BOTTOM: f32 = 58.0;
const MARGIN_TOP_PAD: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A single line of text, vertically centered on `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub content: String,
    pub position: Point,
    pub size: f32,
    pub color: Color,
    pub anchor: Anchor,
    /// Rotated a quarter turn counter-clockwise around `position`.
    pub vertical: bool,
}

/// Drawing backend the chart layout paints onto.
pub trait ChartSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, style: &LineStyle);
    fn polyline(&mut self, points: &[Point], style: &LineStyle);
    fn text(&mut self, label: &TextLabel);
}

/// Data-to-pixel mapping for the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub rect: Rect,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotArea {
    pub fn map_x(&self, x: f64) -> f32 {
        let (lo, hi) = self.x_range;
        let fraction = if hi > lo { (x - lo) / (hi - lo) } else { 0.5 };
        self.rect.x + (fraction as f32) * self.rect.width
    }

    /// Pixel row for `y`; larger values sit higher on screen.
    pub fn map_y(&self, y: f64) -> f32 {
        let (lo, hi) = self.y_range;
        let fraction = if hi > lo { (y - lo) / (hi - lo) } else { 0.5 };
        self.rect.bottom() - (fraction as f32) * self.rect.height
    }

    /// Maps a data point, pinning rows that fall outside the y limits to the frame.
    pub fn map_clamped(&self, (x, y): (f64, f64)) -> Point {
        let row = self.map_y(y).clamp(self.rect.y, self.rect.bottom());
        Point::new(self.map_x(x), row)
    }
}

/// Pixel geometry for a chart drawn at a given size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub figure: Rect,
    pub plot: PlotArea,
    pub title_lines: Vec<(String, Point)>,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl Layout {
    pub fn compute(chart: &Chart, width: f32, height: f32) -> Self {
        let title_lines: Vec<&str> = chart.title.lines().collect();
        let margin_top = MARGIN_TOP_PAD + TITLE_LINE_HEIGHT * title_lines.len() as f32;
        let rect = Rect {
            x: MARGIN_LEFT,
            y: margin_top,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (height - margin_top - MARGIN_BOTTOM).max(1.0),
        };

        let centre = MARGIN_LEFT + rect.width / 2.0;
        let title_lines = title_lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let y = MARGIN_TOP_PAD / 2.0 + TITLE_LINE_HEIGHT * (index as f32 + 0.5);
                (line.to_string(), Point::new(centre, y))
            })
            .collect();

        Self {
            figure: Rect {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            plot: PlotArea {
                rect,
                x_range: chart.x_range,
                y_range: chart.y_range,
            },
            title_lines,
            x_ticks: nice_ticks(chart.x_range.0, chart.x_range.1, 9),
            y_ticks: nice_ticks(chart.y_range.0, chart.y_range.1, 9),
        }
    }
}

/// Round-valued ticks inside `[lo, hi]`, at most `max_ticks` of them.
///
/// Steps are 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || max_ticks < 2 {
        return Vec::new();
    }
    let raw = (hi - lo) / (max_ticks - 1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|factor| factor * magnitude)
        .find(|&step| step >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Tick label text: integers without a fractional part, otherwise trimmed.
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value.round())
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
