//! Checklist evaluation engine that turns detected labels into a verdict

use crate::models::checklist::{ChecklistItem, RuleList};
use crate::models::label::DetectionResult;
use crate::models::verdict::Verdict;
use tracing::debug;

/// Walks a rule list in order and stops at the first rule whose label was not
/// detected.
#[derive(Debug, Clone, Default)]
pub struct VerdictEvaluator {
    rules: RuleList,
}

impl VerdictEvaluator {
    pub fn new(rules: RuleList) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleList {
        &self.rules
    }

    /// Evaluate a detection result against the checklist.
    pub fn evaluate(&self, detected: &DetectionResult) -> Verdict {
        for rule in self.rules.rules() {
            if !detected.contains(rule.label) {
                debug!(label = %rule.label, "Checklist stopped at missing label");
                return Verdict::NoTrade {
                    label: rule.label,
                    message: rule.failure_message.clone(),
                };
            }
        }

        Verdict::TradeConditionMet
    }

    /// Report every rule's pass state in checklist order.
    ///
    /// Does not short-circuit; the verdict still comes from [`Self::evaluate`].
    pub fn checklist(&self, detected: &DetectionResult) -> Vec<ChecklistItem> {
        self.rules
            .rules()
            .iter()
            .map(|rule| ChecklistItem {
                label: rule.label,
                question: rule.question.clone(),
                passed: detected.contains(rule.label),
            })
            .collect()
    }
}

/// Evaluate against the default liquidity-sweep checklist.
pub fn evaluate(detected: &DetectionResult) -> Verdict {
    VerdictEvaluator::default().evaluate(detected)
}
