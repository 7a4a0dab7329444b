//! Condition labels a detector can report for a chart image

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named chart condition.
///
/// Variant order is the checklist order, so `Ord` sorts labels the way the
/// evaluator walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Buy-side / sell-side liquidity sweep on a key level
    #[serde(rename = "BSLS/SSLS")]
    BslsSsls,
    /// V-shape recovery after the sweep
    #[serde(rename = "Vshape")]
    Vshape,
    /// Fair value gap left behind on the sweeping leg
    #[serde(rename = "FVG_present")]
    FvgPresent,
    /// Candle close beyond the first fair value gap
    #[serde(rename = "FVG_close")]
    FvgClose,
    /// Clear draw on liquidity to target
    #[serde(rename = "Draw")]
    Draw,
}

impl Label {
    /// The full vocabulary in checklist order.
    pub const ALL: [Label; 5] = [
        Label::BslsSsls,
        Label::Vshape,
        Label::FvgPresent,
        Label::FvgClose,
        Label::Draw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::BslsSsls => "BSLS/SSLS",
            Label::Vshape => "Vshape",
            Label::FvgPresent => "FVG_present",
            Label::FvgClose => "FVG_close",
            Label::Draw => "Draw",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label '{0}' (expected one of BSLS/SSLS, Vshape, FVG_present, FVG_close, Draw)")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Label::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == trimmed)
            .ok_or_else(|| UnknownLabel(trimmed.to_string()))
    }
}

/// The set of labels reported for one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionResult {
    labels: BTreeSet<Label>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result containing every label in the vocabulary.
    pub fn all() -> Self {
        Label::ALL.into_iter().collect()
    }

    pub fn with(mut self, label: Label) -> Self {
        self.labels.insert(label);
        self
    }

    pub fn insert(&mut self, label: Label) -> bool {
        self.labels.insert(label)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.labels.contains(&label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in checklist order.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels.iter().copied()
    }

    /// Parse a comma-separated list such as `"BSLS/SSLS, Vshape"`.
    pub fn parse_list(list: &str) -> Result<Self, UnknownLabel> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Label::from_str)
            .collect()
    }
}

impl FromIterator<Label> for DetectionResult {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[Label; N]> for DetectionResult {
    fn from(labels: [Label; N]) -> Self {
        labels.into_iter().collect()
    }
}
