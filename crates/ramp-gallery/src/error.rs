use std::io;

/// Errors that can occur while exporting previews or galleries.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
