use breathcore::chart::{Anchor, ChartSurface, Color, LineStyle, Point, Rect, TextLabel};
use iced::{
    alignment,
    widget::canvas::{self, Frame, LineDash, Path, Stroke},
    Size, Vector,
};
use std::f32::consts::FRAC_PI_2;

/// Paints chart primitives onto an `iced` canvas frame.
pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn to_point(point: Point) -> iced::Point {
    iced::Point::new(point.x, point.y)
}

fn stroke(style: &LineStyle) -> Stroke<'static> {
    let stroke = Stroke::default()
        .with_width(style.width)
        .with_color(to_iced(style.color));
    Stroke {
        line_dash: LineDash {
            segments: style.dash.segments(),
            offset: 0,
        },
        ..stroke
    }
}

impl ChartSurface for FrameSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.fill_rectangle(
            iced::Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
            to_iced(color),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, style: &LineStyle) {
        let path = Path::rectangle(
            iced::Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
        );
        self.frame.stroke(&path, stroke(style));
    }

    fn polyline(&mut self, points: &[Point], style: &LineStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let path = Path::new(|builder| {
            builder.move_to(to_point(*first));
            for point in rest {
                builder.line_to(to_point(*point));
            }
        });
        self.frame.stroke(&path, stroke(style));
    }

    fn text(&mut self, label: &TextLabel) {
        let horizontal = match label.anchor {
            Anchor::Start => alignment::Horizontal::Left,
            Anchor::Middle => alignment::Horizontal::Center,
            Anchor::End => alignment::Horizontal::Right,
        };
        let mut text = canvas::Text {
            content: label.content.clone(),
            position: to_point(label.position),
            color: to_iced(label.color),
            size: label.size.into(),
            align_x: horizontal.into(),
            align_y: alignment::Vertical::Center,
            ..canvas::Text::default()
        };

        if label.vertical {
            let origin = Vector::new(label.position.x, label.position.y);
            self.frame.with_save(|frame| {
                frame.translate(origin);
                frame.rotate(-FRAC_PI_2);
                text.position = iced::Point::ORIGIN;
                frame.fill_text(text);
            });
        } else {
            self.frame.fill_text(text);
        }
    }
}
