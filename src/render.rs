//! Static chart output.
//!
//! The chart is composed as SVG ([`svg::render_svg`]) and rasterised with
//! `resvg` when a PNG is requested ([`png::svg_to_png`]).

pub mod axis;
pub mod png;
pub mod svg;

use std::path::Path;

use tracing::debug;

use crate::chart::ChartData;
use crate::error::{Result, ResultExt as _};

/// Writes the chart to `path`, as SVG for a `.svg` extension and PNG
/// otherwise.
///
/// # Errors
///
/// Fails if the chart cannot be rendered or the file cannot be written.
pub fn save_chart(chart: &ChartData, path: &Path, width: u32, height: u32) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let document = svg::render_svg(chart, width, height)?;

    if ext.as_str() == "svg" {
        std::fs::write(path, document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        let bytes = png::svg_to_png(&document)?;
        debug!(bytes = bytes.len(), "Encoded PNG");
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
