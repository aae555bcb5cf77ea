use crate::diagram::model::Diagram;
use crate::foundation::error::{MorphcastError, MorphcastResult};
use std::path::Path;
use std::sync::{Arc, OnceLock};

const MAX_DIM: u32 = 16_384;

fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    Arc::clone(FONTDB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    }))
}

/// Rasterize `diagram` at `scale` times its intrinsic size into straight-alpha RGBA8.
///
/// The diagram needs an intrinsic size (`width`/`height` or `viewBox` on the root).
pub fn rasterize_diagram(diagram: &Diagram, scale: f32) -> MorphcastResult<image::RgbaImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(MorphcastError::render(format!(
            "scale must be finite and > 0, got {scale}"
        )));
    }

    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let svg = diagram.to_svg();
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| MorphcastError::render(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(MorphcastError::render(format!(
            "raster size {width}x{height} outside 1..={MAX_DIM}"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MorphcastError::render("failed to allocate pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| MorphcastError::render("pixel buffer does not match raster size"))
}

/// Rasterize `diagram` and write it as a PNG to `path`.
pub fn save_png(diagram: &Diagram, scale: f32, path: &Path) -> MorphcastResult<()> {
    let img = rasterize_diagram(diagram, scale)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| MorphcastError::render(format!("write '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
