//! Upload-to-verdict pipeline

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::imaging::{decode_file, ImageSummary, ImagingError, StagedUpload, UploadKind};
use crate::models::checklist::ChecklistItem;
use crate::models::label::{DetectionResult, Label};
use crate::models::verdict::Verdict;
use crate::rules::VerdictEvaluator;
use crate::services::label_source::LabelSource;

/// Everything produced for one uploaded chart.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub verdict: Verdict,
    pub trade: bool,
    pub failed_label: Option<Label>,
    pub detected: DetectionResult,
    pub checklist: Vec<ChecklistItem>,
    pub image: ImageSummary,
    pub evaluated_at: DateTime<Utc>,
}

/// Runs staging, decoding, detection and checklist evaluation for each
/// upload. Holds no per-request state.
#[derive(Clone)]
pub struct Analyzer {
    source: Arc<dyn LabelSource + Send + Sync>,
    evaluator: VerdictEvaluator,
}

impl Analyzer {
    pub fn new(source: Arc<dyn LabelSource + Send + Sync>, evaluator: VerdictEvaluator) -> Self {
        Self { source, evaluator }
    }

    pub fn with_source(source: Arc<dyn LabelSource + Send + Sync>) -> Self {
        Self::new(source, VerdictEvaluator::default())
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Stage the upload in a temp file, analyze it, and remove the file.
    pub fn analyze_upload(&self, file_name: &str, bytes: &[u8]) -> Result<Analysis, ImagingError> {
        let kind = UploadKind::from_file_name(file_name)?;
        let staged = StagedUpload::write(bytes, kind)?;
        self.analyze_path(staged.path())
    }

    /// Analyze an image already on disk. A decode failure returns before
    /// detection or evaluation run.
    pub fn analyze_path(&self, path: &Path) -> Result<Analysis, ImagingError> {
        let chart = decode_file(path)?;

        let detected = self.source.detect(&chart);
        let verdict = self.evaluator.evaluate(&detected);
        let checklist = self.evaluator.checklist(&detected);

        info!(
            source = self.source.name(),
            detected = detected.len(),
            trade = verdict.is_trade(),
            verdict = %verdict,
            "Chart analyzed"
        );

        Ok(Analysis {
            trade: verdict.is_trade(),
            failed_label: verdict.failed_label(),
            verdict,
            detected,
            checklist,
            image: chart.summary()?,
            evaluated_at: Utc::now(),
        })
    }
}
