//! Chart upload widget that runs a liquidity-sweep entry checklist.
//!
//! An uploaded chart is decoded, passed to a [`services::LabelSource`] that
//! reports which checklist conditions are present, and the resulting label set
//! is evaluated rule by rule into a single [`models::Verdict`].

pub mod analysis;
pub mod config;
pub mod core;
pub mod imaging;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod rules;
pub mod services;

pub use analysis::{Analysis, Analyzer};
pub use models::{DetectionResult, Label, Verdict};
pub use rules::{evaluate, VerdictEvaluator};
