//! PNG output via `resvg`.

use crate::error::{Error, Result};

/// Rasterises an SVG document at its own size on a white background.
///
/// Text uses the system fonts; on a machine without any, labels are left out
/// of the image but the rest still renders.
///
/// # Errors
///
/// Returns [`Error::Render`] if the SVG cannot be parsed or encoded.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| Error::Render(e.to_string()))?;

    let size = tree.size();
    let w = size.width().ceil() as u32;
    let h = size.height().ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| Error::Render(format!("failed to create {w}x{h} pixmap")))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_png_signature() -> Result<()> {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="red"/></svg>"#;
        let bytes = svg_to_png(svg)?;
        assert!(bytes.starts_with(&PNG_SIGNATURE));
        Ok(())
    }

    #[test]
    fn test_invalid_svg() {
        assert!(matches!(svg_to_png("<not-svg"), Err(Error::Render(_))));
    }
}
