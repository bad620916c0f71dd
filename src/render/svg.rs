//! SVG composition of the comparison chart: grid, axes, one polyline per
//! series with markers, a legend box, and the title and axis labels.

use std::fmt::Write as _;

use crate::chart::{ChartData, Series};
use crate::config::{LineKind, Marker};
use crate::error::{Error, Result};
use crate::render::axis::{CategoryAxis, ValueAxis};
use crate::theme;

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";
const TITLE_SIZE: f64 = 18.0;
const LABEL_SIZE: f64 = 14.0;
const TICK_SIZE: f64 = 12.0;
const LEGEND_SIZE: f64 = 12.0;
const Y_TICK_TARGET: usize = 6;

/// Pixel rectangle the data is drawn into.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl PlotArea {
    fn for_size(width: f64, height: f64) -> Self {
        Self {
            left: 70.0,
            top: 50.0,
            right: (width - 30.0).max(71.0),
            bottom: (height - 60.0).max(51.0),
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Composes the line chart as a standalone SVG document.
///
/// # Errors
///
/// Returns [`Error::Render`] if the document cannot be formatted.
pub fn render_svg(chart: &ChartData, width: u32, height: u32) -> Result<String> {
    let mut doc = String::new();
    write_document(&mut doc, chart, f64::from(width), f64::from(height))
        .map_err(|e| Error::Render(format!("failed to compose SVG: {e}")))?;
    Ok(doc)
}

fn write_document(
    doc: &mut String,
    chart: &ChartData,
    width: f64,
    height: f64,
) -> std::fmt::Result {
    let area = PlotArea::for_size(width, height);
    let (lo, hi) = chart.value_range().unwrap_or((0.0, 1.0));
    let y_axis = ValueAxis::auto(lo, hi, Y_TICK_TARGET);
    let x_axis = CategoryAxis::new(&chart.years);

    writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}">"#
    )?;
    writeln!(
        doc,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"#
    )?;

    write_grid(doc, &area, &x_axis, &y_axis)?;
    write_axes(doc, &area, &x_axis, &y_axis)?;

    for (index, series) in chart.series.iter().enumerate() {
        write_series(doc, &area, &x_axis, &y_axis, series, index)?;
    }

    write_legend(doc, &area, &chart.series)?;

    write_text(doc, width / 2.0, 30.0, TITLE_SIZE, "middle", None, &chart.title)?;
    write_text(
        doc,
        area.left + area.width() / 2.0,
        height - 15.0,
        LABEL_SIZE,
        "middle",
        None,
        &chart.x_label,
    )?;
    write_text(
        doc,
        20.0,
        area.top + area.height() / 2.0,
        LABEL_SIZE,
        "middle",
        Some(-90.0),
        &chart.y_label,
    )?;

    writeln!(doc, "</svg>")
}

fn write_grid(
    doc: &mut String,
    area: &PlotArea,
    x_axis: &CategoryAxis,
    y_axis: &ValueAxis,
) -> std::fmt::Result {
    let stroke = theme::hex(theme::GRID_COLOR);
    let width = theme::GRID_WIDTH;
    writeln!(doc, r#"<g stroke="{stroke}" stroke-width="{width}">"#)?;
    for &tick in &y_axis.ticks {
        let y = y_axis.to_pixel(tick, area.bottom, area.top);
        writeln!(
            doc,
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
            area.left, area.right
        )?;
    }
    for index in 0..x_axis.labels.len() {
        let x = x_axis.to_pixel(index, area.left, area.right);
        writeln!(
            doc,
            r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}"/>"#,
            area.top, area.bottom
        )?;
    }
    writeln!(doc, "</g>")
}

fn write_axes(
    doc: &mut String,
    area: &PlotArea,
    x_axis: &CategoryAxis,
    y_axis: &ValueAxis,
) -> std::fmt::Result {
    let stroke = theme::hex(theme::AXIS_COLOR);
    writeln!(
        doc,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{stroke}" stroke-width="1"/>"#,
        area.left,
        area.top,
        area.width(),
        area.height()
    )?;

    for (tick, label) in y_axis.ticks.iter().zip(&y_axis.labels) {
        let y = y_axis.to_pixel(*tick, area.bottom, area.top);
        writeln!(
            doc,
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{stroke}"/>"#,
            area.left - 4.0,
            area.left
        )?;
        write_text(doc, area.left - 8.0, y + 4.0, TICK_SIZE, "end", None, label)?;
    }

    for (index, label) in x_axis.labels.iter().enumerate() {
        let x = x_axis.to_pixel(index, area.left, area.right);
        writeln!(
            doc,
            r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{stroke}"/>"#,
            area.bottom,
            area.bottom + 4.0
        )?;
        write_text(doc, x, area.bottom + 18.0, TICK_SIZE, "middle", None, label)?;
    }
    Ok(())
}

fn points(
    area: &PlotArea,
    x_axis: &CategoryAxis,
    y_axis: &ValueAxis,
    series: &Series,
) -> Vec<(f64, f64)> {
    series
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| {
            (
                x_axis.to_pixel(i, area.left, area.right),
                y_axis.to_pixel(v, area.bottom, area.top),
            )
        })
        .collect()
}

fn dash_attr(line: LineKind) -> &'static str {
    match line {
        LineKind::Solid => "",
        LineKind::Dotted => r#" stroke-dasharray="1.5 3" stroke-linecap="round""#,
    }
}

fn write_series(
    doc: &mut String,
    area: &PlotArea,
    x_axis: &CategoryAxis,
    y_axis: &ValueAxis,
    series: &Series,
    index: usize,
) -> std::fmt::Result {
    let color = theme::hex(theme::series_color(index));
    let pts = points(area, x_axis, y_axis, series);

    let mut path = String::new();
    for (x, y) in &pts {
        write!(path, "{x:.2},{y:.2} ")?;
    }
    writeln!(
        doc,
        r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="{}"{}/>"#,
        path.trim_end(),
        theme::SERIES_WIDTH,
        dash_attr(series.line)
    )?;

    for &(x, y) in &pts {
        write_marker(doc, x, y, series.marker, &color)?;
    }
    Ok(())
}

fn write_marker(doc: &mut String, x: f64, y: f64, marker: Marker, color: &str) -> std::fmt::Result {
    let r = f64::from(theme::MARKER_RADIUS);
    match marker {
        Marker::Circle => writeln!(
            doc,
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="{r}" fill="{color}"/>"#
        ),
        Marker::Cross => writeln!(
            doc,
            r#"<path d="M{:.2},{:.2} L{:.2},{:.2} M{:.2},{:.2} L{:.2},{:.2}" stroke="{color}" stroke-width="1.5"/>"#,
            x - r,
            y - r,
            x + r,
            y + r,
            x - r,
            y + r,
            x + r,
            y - r
        ),
    }
}

fn write_legend(doc: &mut String, area: &PlotArea, series: &[Series]) -> std::fmt::Result {
    if series.is_empty() {
        return Ok(());
    }

    let row_height = LEGEND_SIZE + 6.0;
    let swatch = 28.0;
    let padding = 8.0;
    let longest = series
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let legend_w = padding + swatch + 6.0 + longest * LEGEND_SIZE * 0.6 + padding;
    let legend_h = padding * 2.0 + series.len() as f64 * row_height;
    let lx = area.right - legend_w - 8.0;
    let ly = area.top + 8.0;

    writeln!(
        doc,
        r#"<rect x="{lx:.2}" y="{ly:.2}" width="{legend_w:.2}" height="{legend_h:.2}" fill="white" fill-opacity="0.85" stroke="{}" stroke-width="0.8" rx="3"/>"#,
        theme::hex(theme::GRID_COLOR)
    )?;

    for (index, entry) in series.iter().enumerate() {
        let color = theme::hex(theme::series_color(index));
        let y = ly + padding + index as f64 * row_height + row_height / 2.0;
        let x = lx + padding;
        writeln!(
            doc,
            r#"<line x1="{x:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{color}" stroke-width="{}"{}/>"#,
            x + swatch,
            theme::SERIES_WIDTH,
            dash_attr(entry.line)
        )?;
        write_marker(doc, x + swatch / 2.0, y, entry.marker, &color)?;
        write_text(
            doc,
            x + swatch + 6.0,
            y + LEGEND_SIZE * 0.35,
            LEGEND_SIZE,
            "start",
            None,
            &entry.label,
        )?;
    }
    Ok(())
}

fn write_text(
    doc: &mut String,
    x: f64,
    y: f64,
    size: f64,
    anchor: &str,
    rotate: Option<f64>,
    content: &str,
) -> std::fmt::Result {
    let fill = theme::hex(theme::TEXT_COLOR);
    let transform = rotate
        .map(|deg| format!(r#" transform="rotate({deg} {x:.2} {y:.2})""#))
        .unwrap_or_default();
    writeln!(
        doc,
        r#"<text x="{x:.2}" y="{y:.2}" font-size="{size}" text-anchor="{anchor}" fill="{fill}"{transform}>{}</text>"#,
        escape(content)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::SexCategory;

    fn series(label: &str, marker: Marker, line: LineKind, values: &[f64]) -> Series {
        Series {
            label: label.to_owned(),
            category: SexCategory::BothSexes,
            marker,
            line,
            values: values.to_vec(),
        }
    }

    fn chart(series: Vec<Series>) -> ChartData {
        ChartData {
            title: "Rates & <Trends>".to_owned(),
            x_label: "Years".to_owned(),
            y_label: "Suicide Rates".to_owned(),
            years: vec!["2000".to_owned(), "2005".to_owned(), "2010".to_owned()],
            series,
        }
    }

    #[test]
    fn test_one_polyline_and_legend_entry_per_series() -> Result<()> {
        let data = chart(vec![
            series("USA(Male)", Marker::Cross, LineKind::Dotted, &[20.0, 21.0, 22.5]),
            series("Afghanistan(Male)", Marker::Circle, LineKind::Solid, &[6.0, 7.0, 8.0]),
        ]);
        let svg = render_svg(&data, 1200, 600)?;

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(">USA(Male)</text>"));
        assert!(svg.contains(">Afghanistan(Male)</text>"));
        assert!(svg.contains(">2010</text>"));
        assert_eq!(svg.matches("stroke-dasharray").count(), 2);
        // three data points plus one legend swatch
        assert_eq!(svg.matches("<circle").count(), 4);
        Ok(())
    }

    #[test]
    fn test_title_is_escaped() -> Result<()> {
        let svg = render_svg(&chart(Vec::new()), 640, 480)?;
        assert!(svg.contains("Rates &amp; &lt;Trends&gt;"));
        assert!(!svg.contains("<polyline"));
        Ok(())
    }

    #[test]
    fn test_non_finite_values_are_skipped() -> Result<()> {
        let data = chart(vec![series(
            "x",
            Marker::Circle,
            LineKind::Solid,
            &[1.0, f64::NAN, 3.0],
        )]);
        let svg = render_svg(&data, 400, 300)?;
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<circle").count(), 3);
        Ok(())
    }

    #[test]
    fn test_large_flat_values_render() -> Result<()> {
        let data = chart(vec![series(
            "flat",
            Marker::Cross,
            LineKind::Dotted,
            &[1e17, 1e17, 1e17],
        )]);
        let svg = render_svg(&data, 800, 400)?;
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(!svg.contains("NaN") && !svg.contains("inf"));
        Ok(())
    }

    #[test]
    fn test_large_near_equal_values_render() -> Result<()> {
        let data = chart(vec![series(
            "near",
            Marker::Circle,
            LineKind::Solid,
            &[1e16, 1e16 + 2.0, 1e16],
        )]);
        let svg = render_svg(&data, 800, 400)?;
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 4);
        Ok(())
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\"b'c"), "a&quot;b&apos;c");
        assert_eq!(escape("plain"), "plain");
    }
}
