//! Upload staging and chart image decoding.

pub mod capability;
pub mod decode;
pub mod upload;

pub use capability::{check_decoders, check_formats_with, CapabilityError, REQUIRED_FORMATS};
pub use decode::{decode_file, ChartImage, ImageSummary};
pub use upload::{StagedUpload, UploadKind};

use thiserror::Error;

/// Diagnostic returned in place of a verdict when an image cannot be loaded.
pub const DECODE_FAILURE: &str = "Error: Could not load image. Check the path.";

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("Unsupported file type '{0}': upload a jpg, jpeg or png image")]
    UnsupportedFileType(String),

    #[error("Error: Could not load image. Check the path.")]
    Decode(#[source] Option<image::ImageError>),

    #[error("Failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error("Failed to encode image for display: {0}")]
    Render(#[source] image::ImageError),
}

impl ImagingError {
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, ImagingError::Decode(_))
    }
}
