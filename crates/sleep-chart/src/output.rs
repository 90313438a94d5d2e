//! Chart file output: SVG as written, PNG rasterized with `resvg`.

use std::fs;
use std::path::{Path, PathBuf};

use resvg::tiny_skia::{self, Pixmap};
use resvg::usvg::{Options, Tree};
use sleep_model::ChartFormat;
use tracing::debug;

use crate::error::{ChartError, Result};

/// Rasterize SVG markup to PNG bytes at its own size.
pub fn rasterize_png(svg: &str) -> Result<Vec<u8>> {
    let mut options = Options::default();
    // System fonts for axis labels; missing fonts only drop the text.
    options.fontdb_mut().load_system_fonts();

    let tree = Tree::from_str(svg, &options).map_err(|e| ChartError::Render(e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ChartError::Render("failed to create pixmap".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| ChartError::Render(e.to_string()))
}

/// Write one chart as `<dir>/<name>.<ext>`, creating `dir` if needed.
pub fn write_chart(dir: &Path, name: &str, svg: &str, format: ChartFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| ChartError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("{name}.{}", format.extension()));
    let bytes = match format {
        ChartFormat::Svg => svg.as_bytes().to_vec(),
        ChartFormat::Png => rasterize_png(svg)?,
    };
    fs::write(&path, &bytes).map_err(|source| ChartError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "chart file written");
    Ok(path)
}

/// File-name fragment for a column: lowercase, runs of other characters
/// collapsed to `_`.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}
