//! Per-colormap PNG preview export.

use std::fs;
use std::path::{Path, PathBuf};

use ramp_core::ColormapRegistry;

use crate::error::GalleryError;
use crate::render::{DEFAULT_STRIP_HEIGHT, DEFAULT_STRIP_WIDTH, gradient_strip};

/// Write one PNG gradient strip per registered colormap into `out_dir`.
///
/// Reversed variants are included. The directory is created if absent.
/// Returns the written paths in registration order.
pub fn save_previews(
    registry: &ColormapRegistry,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, GalleryError> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(registry.len());
    for cmap in registry.iter() {
        let strip = gradient_strip(cmap, DEFAULT_STRIP_WIDTH, DEFAULT_STRIP_HEIGHT);
        let path = out_dir.join(format!("{}.png", cmap.name()));
        strip.save(&path)?;
        tracing::debug!("wrote preview {}", path.display());
        written.push(path);
    }
    Ok(written)
}
