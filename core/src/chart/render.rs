use crate::chart::layout::{
    format_tick, Anchor, ChartSurface, Layout, PlotArea, Point, Rect, TextLabel,
};
use crate::chart::model::{Chart, Color, LineStyle};

const TITLE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 15.0;
const TICK_SIZE: f32 = 12.0;
const LEGEND_SIZE: f32 = 13.0;
const TICK_LENGTH: f32 = 5.0;
const LEGEND_ROW: f32 = 20.0;
const LEGEND_SAMPLE: f32 = 28.0;
const LEGEND_PADDING: f32 = 8.0;

/// Paints `chart` onto `surface` sized `width` x `height` pixels.
pub fn draw<S: ChartSurface + ?Sized>(chart: &Chart, surface: &mut S, width: f32, height: f32) {
    let layout = Layout::compute(chart, width, height);
    let plot = &layout.plot;

    surface.fill_rect(layout.figure, Color::WHITE);
    if let Some(grid) = &chart.grid {
        draw_grid(surface, plot, &layout, grid);
    }

    for line in &chart.reference_lines {
        let row = plot.map_y(line.y);
        if row >= plot.rect.y && row <= plot.rect.bottom() {
            surface.polyline(
                &[Point::new(plot.rect.x, row), Point::new(plot.rect.right(), row)],
                &line.style,
            );
        }
    }

    for series in &chart.series {
        let points: Vec<Point> = series
            .points
            .iter()
            .map(|&point| plot.map_clamped(point))
            .collect();
        if points.len() > 1 {
            surface.polyline(&points, &series.style);
        }
    }

    surface.stroke_rect(plot.rect, &LineStyle::solid(Color::BLACK, 0.8));
    draw_ticks(surface, plot, &layout);
    draw_labels(surface, chart, &layout);
    if chart.legend {
        draw_legend(surface, chart, plot);
    }
}

fn draw_grid<S: ChartSurface + ?Sized>(
    surface: &mut S,
    plot: &PlotArea,
    layout: &Layout,
    grid: &LineStyle,
) {
    for &tick in &layout.x_ticks {
        let column = plot.map_x(tick);
        surface.polyline(
            &[
                Point::new(column, plot.rect.y),
                Point::new(column, plot.rect.bottom()),
            ],
            grid,
        );
    }
    for &tick in &layout.y_ticks {
        let row = plot.map_y(tick);
        surface.polyline(
            &[Point::new(plot.rect.x, row), Point::new(plot.rect.right(), row)],
            grid,
        );
    }
}

fn draw_ticks<S: ChartSurface + ?Sized>(surface: &mut S, plot: &PlotArea, layout: &Layout) {
    let tick_style = LineStyle::solid(Color::BLACK, 0.8);
    let bottom = plot.rect.bottom();

    for &tick in &layout.x_ticks {
        let column = plot.map_x(tick);
        surface.polyline(
            &[
                Point::new(column, bottom),
                Point::new(column, bottom + TICK_LENGTH),
            ],
            &tick_style,
        );
        surface.text(&TextLabel {
            content: format_tick(tick),
            position: Point::new(column, bottom + TICK_LENGTH + TICK_SIZE * 0.8),
            size: TICK_SIZE,
            color: Color::BLACK,
            anchor: Anchor::Middle,
            vertical: false,
        });
    }

    for &tick in &layout.y_ticks {
        let row = plot.map_y(tick);
        surface.polyline(
            &[
                Point::new(plot.rect.x - TICK_LENGTH, row),
                Point::new(plot.rect.x, row),
            ],
            &tick_style,
        );
        surface.text(&TextLabel {
            content: format_tick(tick),
            position: Point::new(plot.rect.x - TICK_LENGTH - 4.0, row),
            size: TICK_SIZE,
            color: Color::BLACK,
            anchor: Anchor::End,
            vertical: false,
        });
    }
}

fn draw_labels<S: ChartSurface + ?Sized>(surface: &mut S, chart: &Chart, layout: &Layout) {
    let plot = &layout.plot.rect;

    for (line, position) in &layout.title_lines {
        surface.text(&TextLabel {
            content: line.clone(),
            position: *position,
            size: TITLE_SIZE,
            color: Color::BLACK,
            anchor: Anchor::Middle,
            vertical: false,
        });
    }

    surface.text(&TextLabel {
        content: chart.x_label.clone(),
        position: Point::new(
            plot.x + plot.width / 2.0,
            (plot.bottom() + layout.figure.bottom()) / 2.0 + TICK_SIZE * 0.6,
        ),
        size: LABEL_SIZE,
        color: Color::BLACK,
        anchor: Anchor::Middle,
        vertical: false,
    });

    surface.text(&TextLabel {
        content: chart.y_label.clone(),
        position: Point::new(LABEL_SIZE, plot.y + plot.height / 2.0),
        size: LABEL_SIZE,
        color: Color::BLACK,
        anchor: Anchor::Middle,
        vertical: true,
    });
}

fn draw_legend<S: ChartSurface + ?Sized>(surface: &mut S, chart: &Chart, plot: &PlotArea) {
    let entries = chart.legend_entries();
    if entries.is_empty() {
        return;
    }

    let longest = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0) as f32;
    let width = LEGEND_PADDING * 3.0 + LEGEND_SAMPLE + longest * LEGEND_SIZE * 0.6;
    let height = LEGEND_PADDING * 2.0 + LEGEND_ROW * entries.len() as f32;
    let frame = Rect {
        x: plot.rect.right() - width - LEGEND_PADDING,
        y: plot.rect.y + LEGEND_PADDING,
        width,
        height,
    };

    surface.fill_rect(frame, Color::WHITE.with_alpha(0.8));
    surface.stroke_rect(frame, &LineStyle::solid(Color::GRID, 0.8));

    for (index, (label, style)) in entries.into_iter().enumerate() {
        let row = frame.y + LEGEND_PADDING + LEGEND_ROW * (index as f32 + 0.5);
        let sample_start = frame.x + LEGEND_PADDING;
        surface.polyline(
            &[
                Point::new(sample_start, row),
                Point::new(sample_start + LEGEND_SAMPLE, row),
            ],
            style,
        );
        surface.text(&TextLabel {
            content: label.to_string(),
            position: Point::new(sample_start + LEGEND_SAMPLE + LEGEND_PADDING, row),
            size: LEGEND_SIZE,
            color: Color::BLACK,
            anchor: Anchor::Start,
            vertical: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_waveform;
    use crate::pattern::BreathingPattern;

    #[derive(Default)]
    struct Recorder {
        fills: Vec<Rect>,
        lines: Vec<(Vec<Point>, LineStyle)>,
        texts: Vec<TextLabel>,
    }

    impl ChartSurface for Recorder {
        fn fill_rect(&mut self, rect: Rect, _color: Color) {
            self.fills.push(rect);
        }

        fn stroke_rect(&mut self, _rect: Rect, _style: &LineStyle) {}

        fn polyline(&mut self, points: &[Point], style: &LineStyle) {
            self.lines.push((points.to_vec(), *style));
        }

        fn text(&mut self, label: &TextLabel) {
            self.texts.push(label.clone());
        }
    }

    fn recorded() -> (Chart, Recorder) {
        let pattern = BreathingPattern::default();
        let waveform = generate_waveform(&pattern).unwrap();
        let chart = Chart::target_pattern(&pattern, &waveform);
        let mut recorder = Recorder::default();
        draw(&chart, &mut recorder, chart.width_px, chart.height_px);
        (chart, recorder)
    }

    #[test]
    fn draws_every_label() {
        let (_, recorder) = recorded();
        let texts: Vec<&str> = recorder.texts.iter().map(|t| t.content.as_str()).collect();
        for expected in [
            "Target Pattern: Controlled Breathing",
            "(10 breaths/min, Inhale 2s, Exhale 4s)",
            "Time (seconds)",
            "Air Flow (L/min)",
            "Target Pattern",
            "Zero Flow",
            "-20",
            "60",
        ] {
            assert!(texts.contains(&expected), "missing {expected}");
        }
        let y_label = recorder
            .texts
            .iter()
            .find(|t| t.content == "Air Flow (L/min)")
            .unwrap();
        assert!(y_label.vertical);
    }

    #[test]
    fn curve_stays_inside_plot_area() {
        let (chart, recorder) = recorded();
        let layout = Layout::compute(&chart, chart.width_px, chart.height_px);
        let rect = layout.plot.rect;
        let (curve, style) = recorder
            .lines
            .iter()
            .find(|(points, _)| points.len() == 1201)
            .unwrap();
        assert_eq!(style.width, 2.0);
        assert!(curve
            .iter()
            .all(|p| p.y >= rect.y && p.y <= rect.bottom() && p.x >= rect.x && p.x <= rect.right()));
    }

    #[test]
    fn zero_line_is_dashed_across_plot() {
        let (chart, recorder) = recorded();
        let layout = Layout::compute(&chart, chart.width_px, chart.height_px);
        let zero_row = layout.plot.map_y(0.0);
        let dashed = recorder
            .lines
            .iter()
            .find(|(points, style)| {
                style.dash == crate::chart::model::Dash::Dashed && points.len() == 2
            })
            .unwrap();
        assert_eq!(dashed.0[0].y, zero_row);
        assert_eq!(dashed.0[0].x, layout.plot.rect.x);
        assert_eq!(dashed.0[1].x, layout.plot.rect.right());
    }

    #[test]
    fn background_is_painted_first() {
        let (chart, recorder) = recorded();
        assert_eq!(recorder.fills[0].width, chart.width_px);
        assert_eq!(recorder.fills[0].height, chart.height_px);
    }
}
