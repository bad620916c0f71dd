//! Colours and stroke widths shared by the SVG renderer and the viewer.

use eframe::egui;
use egui::{Color32, Stroke};

/// Series colours, cycled in plotting order.
pub const SERIES_COLORS: [Color32; 6] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
];

pub const GRID_COLOR: Color32 = Color32::from_rgb(176, 176, 176);
pub const AXIS_COLOR: Color32 = Color32::from_rgb(38, 38, 38);
pub const TEXT_COLOR: Color32 = Color32::from_rgb(20, 20, 20);

// Line widths in pixels at 1x scale
pub const SERIES_WIDTH: f32 = 1.5;
pub const GRID_WIDTH: f32 = 0.8;
pub const MARKER_RADIUS: f32 = 4.0;

pub fn series_color(index: usize) -> Color32 {
    SERIES_COLORS
        .get(index % SERIES_COLORS.len())
        .copied()
        .unwrap_or(AXIS_COLOR)
}

/// `#rrggbb` for SVG attributes.
pub fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Light visuals so the window matches the saved image.
pub fn apply_chart_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = Color32::WHITE;
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_COLOR);
    ctx.set_visuals(visuals);
}
