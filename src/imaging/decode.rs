//! Chart image decoding and display encoding

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, ImageReader};
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

use super::ImagingError;

/// A decoded chart, ready for detection and display.
#[derive(Debug, Clone)]
pub struct ChartImage {
    image: DynamicImage,
    format: ImageFormat,
}

/// Dimensions, source format and a displayable copy of a decoded chart.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub format: &'static str,
    pub data_url: String,
}

impl ChartImage {
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self { image, format }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn format_name(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            _ => "other",
        }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.image
    }

    /// Re-encode the decoded pixels as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, ImagingError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(ImagingError::Render)?;
        Ok(buffer.into_inner())
    }

    /// A `data:image/png;base64,...` URL for inline display.
    pub fn to_png_data_url(&self) -> Result<String, ImagingError> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    pub fn summary(&self) -> Result<ImageSummary, ImagingError> {
        Ok(ImageSummary {
            width: self.width(),
            height: self.height(),
            format: self.format_name(),
            data_url: self.to_png_data_url()?,
        })
    }
}

/// Load a chart from disk.
///
/// The format is sniffed from content, not the file name. Only PNG and JPEG
/// are accepted; anything else is reported as a decode failure.
pub fn decode_file(path: &Path) -> Result<ChartImage, ImagingError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to open image");
            ImagingError::Decode(None)
        })?;

    let format = match reader.format() {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        other => {
            warn!(path = %path.display(), format = ?other, "Unsupported image content");
            return Err(ImagingError::Decode(None));
        }
    };

    let image = reader.decode().map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to decode image");
        ImagingError::Decode(Some(e))
    })?;

    debug!(
        width = image.width(),
        height = image.height(),
        format = ?format,
        "Decoded chart image"
    );

    Ok(ChartImage::new(image, format))
}
