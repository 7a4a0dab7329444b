//! Checklist data models

use serde::{Deserialize, Serialize};

use super::label::Label;

/// One checklist step: the label that must be detected, the question it
/// answers, and the message reported when it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub label: Label,
    pub question: String,
    pub failure_message: String,
}

impl Rule {
    pub fn new(label: Label, question: impl Into<String>, failure_message: impl Into<String>) -> Self {
        Self {
            label,
            question: question.into(),
            failure_message: failure_message.into(),
        }
    }
}

/// Ordered rules, one per vocabulary label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleList {
    rules: Vec<Rule>,
}

impl RuleList {
    /// The liquidity-sweep entry checklist.
    pub fn liquidity_sweep() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    Label::BslsSsls,
                    "Do we have a 1 HR BSLS/SSLS on any Asia or London Key Level (High or Low)",
                    "No Trades: Missing BSLS/SSLS condition",
                ),
                Rule::new(
                    Label::Vshape,
                    "V Shape Recovery from the Sweep of Liquidity",
                    "No Trades: No V-shape recovery",
                ),
                Rule::new(
                    Label::FvgPresent,
                    "Did a Bullish/Bearish FVG get left behind on the Leg sweeping Liquidity?",
                    "No Trades: No FVG left behind",
                ),
                Rule::new(
                    Label::FvgClose,
                    "Did we have a candle CLOSURE Above or below the first FVG presented on the Leg that swept Liquidity?",
                    "No Trades: No candle close beyond FVG",
                ),
                Rule::new(
                    Label::Draw,
                    "Do we have a Clear Draw on Liquidity.. Internal High/External Low to target?",
                    "No Trades: No clear draw on liquidity",
                ),
            ],
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, label: Label) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.label == label)
    }
}

impl Default for RuleList {
    fn default() -> Self {
        Self::liquidity_sweep()
    }
}

/// Pass/fail state of a single rule, reported for every rule regardless of
/// where the verdict stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub label: Label,
    pub question: String,
    pub passed: bool,
}
