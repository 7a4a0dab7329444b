//! Verdict produced by the checklist evaluator

use serde::{Serialize, Serializer};
use std::fmt;

use super::label::Label;

/// Message returned when every checklist condition holds.
pub const TRADE_CONDITION_MET: &str = "Trade Condition Met: Take your Entry";

/// Outcome of running the checklist against one detection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The first unmet rule and its failure message
    NoTrade { label: Label, message: String },
    TradeConditionMet,
}

impl Verdict {
    pub fn message(&self) -> &str {
        match self {
            Verdict::NoTrade { message, .. } => message,
            Verdict::TradeConditionMet => TRADE_CONDITION_MET,
        }
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, Verdict::TradeConditionMet)
    }

    /// Label of the rule that stopped the checklist, if any.
    pub fn failed_label(&self) -> Option<Label> {
        match self {
            Verdict::NoTrade { label, .. } => Some(*label),
            Verdict::TradeConditionMet => None,
        }
    }

    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        if self.is_trade() {
            "trade"
        } else {
            "no_trade"
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}
