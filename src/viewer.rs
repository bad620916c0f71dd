//! Native window showing the chart with `egui_plot`.

use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, Points};

use crate::chart::{ChartData, Series};
use crate::config::{LineKind, Marker};
use crate::error::Result;
use crate::theme;

pub struct ChartViewer {
    chart: ChartData,
}

impl ChartViewer {
    pub fn new(cc: &eframe::CreationContext<'_>, chart: ChartData) -> Self {
        theme::apply_chart_theme(&cc.egui_ctx);
        Self { chart }
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.chart.title.as_str());
            });
            render_chart(ui, &self.chart);
        });
    }
}

/// Blocks until the window is closed.
///
/// # Errors
///
/// Returns [`crate::error::Error::Viewer`] if no window can be created (for
/// example on a headless machine).
pub fn show(chart: ChartData, width: u32, height: u32) -> Result<()> {
    let title = chart.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_title(title.as_str()),
        ..Default::default()
    };

    tracing::debug!(%title, "Opening chart viewer");
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(ChartViewer::new(cc, chart)))),
    )?;
    Ok(())
}

pub fn render_chart(ui: &mut egui::Ui, chart: &ChartData) {
    let years = chart.years.clone();

    Plot::new("suicide_rate_chart")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .show_grid([true, true])
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| year_label(&years, mark.value))
        .show(ui, |plot_ui| {
            for (index, series) in chart.series.iter().enumerate() {
                let color = theme::series_color(index);
                let pts = series_points(series);

                plot_ui.line(
                    Line::new(series.label.clone(), pts.clone())
                        .color(color)
                        .width(theme::SERIES_WIDTH)
                        .style(line_style(series.line)),
                );
                plot_ui.points(
                    Points::new(series.label.clone(), pts)
                        .shape(marker_shape(series.marker))
                        .radius(theme::MARKER_RADIUS)
                        .filled(true)
                        .color(color),
                );
            }
        });
}

/// Plot coordinates: x is the year index, non-finite values are dropped.
fn series_points(series: &Series) -> Vec<[f64; 2]> {
    series
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| [i as f64, v])
        .collect()
}

/// Labels only the integer grid marks that fall on a year.
fn year_label(years: &[String], value: f64) -> String {
    if value < 0.0 || (value - value.round()).abs() > 1e-6 {
        return String::new();
    }
    years
        .get(value.round() as usize)
        .cloned()
        .unwrap_or_default()
}

fn line_style(line: LineKind) -> LineStyle {
    match line {
        LineKind::Solid => LineStyle::Solid,
        LineKind::Dotted => LineStyle::dotted_dense(),
    }
}

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Cross => MarkerShape::Cross,
    }
}
