//! Startup check for the image decoders the widget depends on

use image::ImageFormat;
use thiserror::Error;
use tracing::{error, info};

/// Decoders an upload may need.
pub const REQUIRED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error(
        "The {format} image decoder is not available in this build. \
         Rebuild with the `image` crate's `{feature}` feature enabled to analyze uploads."
    )]
    MissingDecoder {
        format: &'static str,
        feature: &'static str,
    },
}

/// Verify that every required decoder is compiled in.
pub fn check_decoders() -> Result<(), CapabilityError> {
    check_formats_with(&REQUIRED_FORMATS, |format| format.reading_enabled())
}

/// Run the capability check with an explicit availability probe.
pub fn check_formats_with<F>(formats: &[ImageFormat], is_available: F) -> Result<(), CapabilityError>
where
    F: Fn(ImageFormat) -> bool,
{
    for &format in formats {
        if !is_available(format) {
            let (name, feature) = describe(format);
            error!(format = name, "Required image decoder missing");
            return Err(CapabilityError::MissingDecoder {
                format: name,
                feature,
            });
        }
    }

    info!(count = formats.len(), "Image decoders available");
    Ok(())
}

fn describe(format: ImageFormat) -> (&'static str, &'static str) {
    match format {
        ImageFormat::Png => ("PNG", "png"),
        ImageFormat::Jpeg => ("JPEG", "jpeg"),
        _ => ("requested", "default"),
    }
}
