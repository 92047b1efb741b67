//! Self-contained HTML gallery export.
//!
//! Every forward colormap becomes one block embedding its gradient strip
//! as a base64 PNG data URI, so the document needs no external files.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};

use ramp_core::{Colormap, ColormapRegistry};

use crate::error::GalleryError;
use crate::render::{DEFAULT_STRIP_HEIGHT, DEFAULT_STRIP_WIDTH, gradient_strip};

const GALLERY_STYLE: &str = "body { font-family: sans-serif; padding: 20px; background-color: #f8f8f8; }\n\
.cmap-block { display: inline-block; margin-right: 16px; }";

/// Build the gallery document for every forward colormap in `registry`.
///
/// Blocks appear in registration order, or lexicographic order when
/// `sort_names` is set. Reversed variants are excluded; each forward name
/// appears exactly once.
pub fn gallery_html(
    registry: &ColormapRegistry,
    sort_names: bool,
) -> Result<String, GalleryError> {
    let mut cmaps: Vec<&Colormap> = registry.iter().filter(|c| !c.is_reversed()).collect();
    if sort_names {
        cmaps.sort_unstable_by(|a, b| a.name().cmp(b.name()));
    }

    let mut html = String::new();
    html.push_str("<html><head><style>\n");
    html.push_str(GALLERY_STYLE);
    html.push_str("\n</style></head><body>\n<h1>Colormap Gallery</h1>\n");

    for cmap in cmaps {
        let strip = gradient_strip(cmap, DEFAULT_STRIP_WIDTH, DEFAULT_STRIP_HEIGHT);
        let encoded = STANDARD.encode(encode_png(&strip)?);
        let name = cmap.name();
        html.push_str(&format!(
            "<div class=\"cmap-block\" style=\"margin-bottom: 16px;\">\
             <div><strong>{name}</strong></div>\
             <img alt=\"{name}\" title=\"{name}\" \
             style=\"border: 1px solid #aaa; display: block;\" \
             src=\"data:image/png;base64,{encoded}\"/>\
             </div>\n"
        ));
    }

    html.push_str("</body></html>\n");
    Ok(html)
}

/// Write the gallery document to `path`, creating parent directories if
/// absent.
pub fn save_gallery_html(
    registry: &ColormapRegistry,
    path: &Path,
    sort_names: bool,
) -> Result<(), GalleryError> {
    let html = gallery_html(registry, sort_names)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    tracing::info!("gallery written to {}", path.display());
    Ok(())
}

/// Encode an image buffer as in-memory PNG bytes.
fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
