//! Label source interface, the seam where a real chart-pattern model plugs in.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::imaging::ChartImage;
use crate::models::label::{DetectionResult, Label};

/// Reports which checklist labels are present in a chart.
pub trait LabelSource {
    fn detect(&self, image: &ChartImage) -> DetectionResult;

    /// Short name for logs and health output.
    fn name(&self) -> &'static str;
}

/// Fewest labels the placeholder reports.
pub const RANDOM_MIN_LABELS: usize = 2;
/// Most labels the placeholder reports.
pub const RANDOM_MAX_LABELS: usize = Label::ALL.len();

/// Placeholder detector: picks 2 to 5 distinct labels uniformly at random and
/// ignores the pixels entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomLabelSource;

impl RandomLabelSource {
    pub fn new() -> Self {
        Self
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> DetectionResult {
        let count = rng.gen_range(RANDOM_MIN_LABELS..=RANDOM_MAX_LABELS);
        Label::ALL.choose_multiple(rng, count).copied().collect()
    }
}

impl LabelSource for RandomLabelSource {
    fn detect(&self, image: &ChartImage) -> DetectionResult {
        let detected = Self::sample(&mut rand::thread_rng());
        debug!(
            width = image.width(),
            height = image.height(),
            detected = detected.len(),
            "Placeholder detection"
        );
        detected
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always reports the same labels.
#[derive(Debug, Clone, Default)]
pub struct FixedLabelSource {
    labels: DetectionResult,
}

impl FixedLabelSource {
    pub fn new(labels: DetectionResult) -> Self {
        Self { labels }
    }
}

impl LabelSource for FixedLabelSource {
    fn detect(&self, _image: &ChartImage) -> DetectionResult {
        self.labels.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
