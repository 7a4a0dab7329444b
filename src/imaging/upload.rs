//! Temporary staging for uploaded chart files

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use super::ImagingError;

/// Accepted upload types, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Jpeg,
    Png,
}

impl UploadKind {
    /// Classify an uploaded file by its extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ImagingError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => Ok(UploadKind::Jpeg),
            "png" => Ok(UploadKind::Png),
            _ => Err(ImagingError::UnsupportedFileType(file_name.to_string())),
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            UploadKind::Jpeg => ".jpg",
            UploadKind::Png => ".png",
        }
    }
}

/// Upload bytes written to a temp file. The file is removed when this value
/// is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    kind: UploadKind,
}

impl StagedUpload {
    pub fn write(bytes: &[u8], kind: UploadKind) -> Result<Self, ImagingError> {
        let mut file = tempfile::Builder::new()
            .prefix("fvg-upload-")
            .suffix(kind.suffix())
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(path = %file.path().display(), bytes = bytes.len(), "Staged upload");
        Ok(Self { file, kind })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }
}
