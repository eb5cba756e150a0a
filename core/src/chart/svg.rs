use crate::chart::layout::{Anchor, ChartSurface, Point, Rect, TextLabel};
use crate::chart::model::{Chart, Color, LineStyle};
use crate::chart::render;
use crate::prelude::PatternResult;
use std::fs;
use std::path::Path;

/// Collects SVG elements for a headless chart artifact.
pub struct SvgSurface {
    width: f32,
    height: f32,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"DejaVu Sans, Arial, sans-serif\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn stroke_attributes(style: &LineStyle) -> String {
    let mut attributes = format!(
        "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
        style.color.hex(),
        style.width
    );
    if style.color.a < 1.0 {
        attributes.push_str(&format!(" stroke-opacity=\"{}\"", style.color.a));
    }
    let segments = style.dash.segments();
    if !segments.is_empty() {
        let pattern: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        attributes.push_str(&format!(" stroke-dasharray=\"{}\"", pattern.join(" ")));
    }
    attributes
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ChartSurface for SvgSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color.hex(),
            color.a
        ));
    }

    fn stroke_rect(&mut self, rect: Rect, style: &LineStyle) {
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            stroke_attributes(style)
        ));
    }

    fn polyline(&mut self, points: &[Point], style: &LineStyle) {
        let coordinates: Vec<String> = points
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, point.y))
            .collect();
        self.body.push_str(&format!(
            "<polyline points=\"{}\" {} stroke-linejoin=\"round\"/>\n",
            coordinates.join(" "),
            stroke_attributes(style)
        ));
    }

    fn text(&mut self, label: &TextLabel) {
        let anchor = match label.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let transform = if label.vertical {
            format!(
                " transform=\"rotate(-90 {:.2} {:.2})\"",
                label.position.x, label.position.y
            )
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\" dominant-baseline=\"central\"{}>{}</text>\n",
            label.position.x,
            label.position.y,
            label.size,
            label.color.hex(),
            anchor,
            transform,
            escape(&label.content)
        ));
    }
}

/// Renders the chart at its figure size as an SVG document.
pub fn render_svg(chart: &Chart) -> String {
    let mut surface = SvgSurface::new(chart.width_px, chart.height_px);
    render::draw(chart, &mut surface, chart.width_px, chart.height_px);
    surface.finish()
}

pub fn write_svg<P: AsRef<Path>>(chart: &Chart, path: P) -> PatternResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_svg(chart))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_waveform;
    use crate::pattern::BreathingPattern;

    fn target_chart() -> Chart {
        let pattern = BreathingPattern::default();
        let waveform = generate_waveform(&pattern).unwrap();
        Chart::target_pattern(&pattern, &waveform)
    }

    #[test]
    fn svg_carries_labels_and_styles() {
        let svg = render_svg(&target_chart());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"1500\" height=\"600\""));
        assert!(svg.contains(">Target Pattern: Controlled Breathing</text>"));
        assert!(svg.contains(">Time (seconds)</text>"));
        assert!(svg.contains(">Air Flow (L/min)</text>"));
        assert!(svg.contains("stroke=\"#1e90ff\" stroke-width=\"2\""));
        assert!(svg.contains("stroke-dasharray=\"6 4\""));
        assert!(svg.contains("stroke-opacity=\"0.6\""));
        assert!(svg.contains("rotate(-90"));
    }

    #[test]
    fn text_is_escaped() {
        let mut chart = target_chart();
        chart.x_label = "a < b & c".into();
        let svg = render_svg(&chart);
        assert!(svg.contains(">a &lt; b &amp; c</text>"));
    }

    #[test]
    fn write_svg_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("pattern.svg");
        write_svg(&target_chart(), &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("</svg>"));
    }
}
