use crate::display::surface::FrameSurface;
use anyhow::Context;
use breathcore::chart::{render, Chart};
use iced::{
    mouse,
    widget::canvas::{self, Cache, Canvas, Geometry},
    Element, Length, Rectangle, Renderer, Size, Task, Theme,
};

/// Opens the chart in a window and blocks until it is closed.
pub fn show(chart: Chart) -> anyhow::Result<()> {
    let size = Size::new(chart.width_px, chart.height_px);
    iced::application(
        move || ChartWindow::new(chart.clone()),
        ChartWindow::update,
        ChartWindow::view,
    )
    .title(window_title)
    .theme(window_theme)
    .window_size(size)
    .run()
    .context("running chart window")
}

fn window_title(window: &ChartWindow) -> String {
    window
        .chart
        .title
        .lines()
        .next()
        .unwrap_or("Breathing Pattern")
        .to_string()
}

fn window_theme(_: &ChartWindow) -> Theme {
    Theme::Light
}

/// The window never produces messages; it only repaints on resize.
#[derive(Debug, Clone)]
enum Message {}

struct ChartWindow {
    chart: Chart,
    cache: Cache,
}

impl ChartWindow {
    fn new(chart: Chart) -> Self {
        Self {
            chart,
            cache: Cache::new(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {}
    }

    fn view(&self) -> Element<'_, Message> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl canvas::Program<Message> for ChartWindow {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let mut surface = FrameSurface::new(frame);
            render::draw(&self.chart, &mut surface, bounds.width, bounds.height);
        });
        vec![geometry]
    }
}
