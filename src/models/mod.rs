//! Shared data models spanning the detector layers.

pub mod checklist;
pub mod label;
pub mod verdict;

pub use checklist::{ChecklistItem, Rule, RuleList};
pub use label::{DetectionResult, Label, UnknownLabel};
pub use verdict::{Verdict, TRADE_CONDITION_MET};
