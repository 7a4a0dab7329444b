//! Unit tests for the checklist verdict evaluator

use crate::common::all_detection_sets;
use fvg_detector::models::{DetectionResult, Label, RuleList, Verdict, TRADE_CONDITION_MET};
use fvg_detector::rules::{evaluate, VerdictEvaluator};

const MISSING_SWEEP: &str = "No Trades: Missing BSLS/SSLS condition";

#[test]
fn test_missing_sweep_always_reports_sweep() {
    for detected in all_detection_sets() {
        if detected.contains(Label::BslsSsls) {
            continue;
        }
        assert_eq!(evaluate(&detected).message(), MISSING_SWEEP, "{detected:?}");
    }
}

#[test]
fn test_full_set_is_trade_regardless_of_insertion_order() {
    let forward: DetectionResult = Label::ALL.into_iter().collect();
    let backward: DetectionResult = Label::ALL.into_iter().rev().collect();

    for detected in [forward, backward, DetectionResult::all()] {
        let verdict = evaluate(&detected);
        assert_eq!(verdict, Verdict::TradeConditionMet);
        assert_eq!(verdict.message(), TRADE_CONDITION_MET);
    }
}

#[test]
fn test_empty_set_fails_first_rule() {
    let verdict = evaluate(&DetectionResult::new());
    assert_eq!(verdict.message(), MISSING_SWEEP);
    assert_eq!(verdict.failed_label(), Some(Label::BslsSsls));
}

#[test]
fn test_missing_only_draw() {
    let detected = DetectionResult::from([
        Label::BslsSsls,
        Label::Vshape,
        Label::FvgPresent,
        Label::FvgClose,
    ]);
    assert_eq!(
        evaluate(&detected).message(),
        "No Trades: No clear draw on liquidity"
    );
}

#[test]
fn test_sweep_only_fails_on_vshape() {
    let detected = DetectionResult::from([Label::BslsSsls]);
    assert_eq!(evaluate(&detected).message(), "No Trades: No V-shape recovery");
}

#[test]
fn test_missing_sweep_and_draw_reports_sweep() {
    let detected = DetectionResult::from([Label::Vshape, Label::FvgPresent, Label::FvgClose]);
    assert_eq!(evaluate(&detected).message(), MISSING_SWEEP);
}

#[test]
fn test_each_rule_has_its_own_message() {
    let expected = [
        (Label::BslsSsls, MISSING_SWEEP),
        (Label::Vshape, "No Trades: No V-shape recovery"),
        (Label::FvgPresent, "No Trades: No FVG left behind"),
        (Label::FvgClose, "No Trades: No candle close beyond FVG"),
        (Label::Draw, "No Trades: No clear draw on liquidity"),
    ];

    for (missing, message) in expected {
        let detected: DetectionResult = Label::ALL.into_iter().filter(|l| *l != missing).collect();
        let verdict = evaluate(&detected);
        assert_eq!(verdict.failed_label(), Some(missing));
        assert_eq!(verdict.message(), message);
    }
}

#[test]
fn test_verdict_is_first_missing_label_for_every_subset() {
    let evaluator = VerdictEvaluator::new(RuleList::liquidity_sweep());
    let mut outcomes = std::collections::HashSet::new();

    for detected in all_detection_sets() {
        let first_missing = Label::ALL.into_iter().find(|l| !detected.contains(*l));
        let verdict = evaluator.evaluate(&detected);
        assert_eq!(verdict.failed_label(), first_missing, "{detected:?}");
        outcomes.insert(verdict.message().to_string());
    }

    // five failure states plus success
    assert_eq!(outcomes.len(), 6);
}

#[test]
fn test_evaluate_is_idempotent() {
    let evaluator = VerdictEvaluator::default();
    for detected in all_detection_sets() {
        assert_eq!(evaluator.evaluate(&detected), evaluator.evaluate(&detected));
    }
}

#[test]
fn test_checklist_does_not_change_verdict() {
    let evaluator = VerdictEvaluator::default();
    let detected = DetectionResult::from([Label::Vshape, Label::Draw]);

    let items = evaluator.checklist(&detected);
    assert_eq!(items.len(), 5);
    assert!(items.iter().any(|item| item.passed));
    assert_eq!(evaluator.evaluate(&detected).message(), MISSING_SWEEP);
}
