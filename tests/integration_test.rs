// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for conformancebot

use conformancebot::aggregator::{self, ConformanceLevel};
use conformancebot::catalog::Catalog;
use conformancebot::engine::Engine;
use conformancebot::evidence::Evidence;
use conformancebot::model::{Origin, Outcome, PageContext, TestId};
use conformancebot::normalizer::{Impact, ManualAction, UnmappedPolicy, DEFAULT_TEST_ID};
use conformancebot::scanner::AutomatedScan;
use conformancebot::snapshot::ExportSnapshot;
use conformancebot::ConformanceError;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

fn fixture<T: DeserializeOwned>(name: &str) -> T {
    let path = Path::new("tests/fixtures").join(name);
    let content = std::fs::read_to_string(&path).expect("fixture should exist");
    serde_json::from_str(&content).expect("fixture should parse")
}

fn engine(policy: UnmappedPolicy) -> Engine {
    Engine::new(
        Arc::new(Catalog::standard()),
        PageContext::new("https://shop.example.org/checkout", "Checkout"),
        policy,
    )
}

fn id(s: &str) -> TestId {
    s.parse().expect("valid test id")
}

fn outcome(engine: &Engine, test: &str) -> Option<Outcome> {
    engine.session().get(&id(test)).map(|r| r.outcome)
}

fn record_all(engine: &mut Engine, tests: &[&str], outcome: Outcome) {
    for test in tests {
        engine.record_manual(&id(test), outcome, "").expect("known test");
    }
}

#[test]
fn test_scan_fixture() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    let scan: AutomatedScan = fixture("scan.json");
    let report = engine.apply_scan(&scan).expect("scan should apply");

    let images = engine.session().get(&id("7.A")).unwrap();
    assert_eq!(images.outcome, Outcome::Fail);
    assert_eq!(images.failed_elements.len(), 1);
    assert_eq!(images.failed_elements[0].target, "img.hero");

    // Scanner contrast nodes and the contrast heuristic fold into one result
    assert_eq!(engine.session().get(&id("13.C")).unwrap().failed_elements.len(), 3);
    assert_eq!(outcome(&engine, "12.A"), Some(Outcome::Pass));
    assert_eq!(outcome(&engine, "11.A"), Some(Outcome::Pass));
    assert_eq!(outcome(&engine, "4.A"), Some(Outcome::Pass));
    assert_eq!(outcome(&engine, "8.A"), Some(Outcome::NotTested));

    // Scenario E: an unrecognized rule lands on the default test
    assert_eq!(DEFAULT_TEST_ID, id("1.A"));
    assert_eq!(outcome(&engine, "1.A"), Some(Outcome::Fail));

    assert_eq!(report.supplementary.len(), 1);
    assert_eq!(report.supplementary[0].source, "ariaUsage");
    assert!(report.unclassified.is_empty());
    assert_eq!(report.recommendations[0].priority, Impact::Critical);
    assert_eq!(report.recommendations.last().unwrap().priority, Impact::Minor);
}

#[test]
fn test_unclassified_policy_keeps_default_test_clean() {
    let mut engine = engine(UnmappedPolicy::Unclassified);
    let scan: AutomatedScan = fixture("scan.json");
    let report = engine.apply_scan(&scan).unwrap();
    assert_eq!(report.unclassified.len(), 1);
    assert_eq!(report.unclassified[0].source, "experimental-widget-rule");
    assert_eq!(outcome(&engine, "1.A"), None);
}

#[test]
fn test_full_pipeline_and_export() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    engine.apply_scan(&fixture("scan.json")).unwrap();
    engine.apply_evidence(&fixture::<Evidence>("evidence.json")).unwrap();

    // Decided evidence replaces the automated fallback result
    assert_eq!(outcome(&engine, "1.A"), Some(Outcome::Dna));
    assert_eq!(outcome(&engine, "3.A"), Some(Outcome::Dna));
    assert_eq!(outcome(&engine, "4.C"), Some(Outcome::Pass));
    assert_eq!(outcome(&engine, "8.A"), Some(Outcome::Dna));
    assert_eq!(outcome(&engine, "7.A"), Some(Outcome::Dna));
    // Deferred evidence never clobbers a decided scan result
    assert_eq!(outcome(&engine, "13.C"), Some(Outcome::Fail));

    let actions: Vec<ManualAction> = fixture("manual.json");
    for action in &actions {
        engine.apply_manual(action).unwrap();
    }
    let contrast = engine.session().get(&id("13.C")).unwrap();
    assert_eq!(contrast.origin, Origin::Manual);
    assert!(contrast.failed_elements.is_empty());
    assert_eq!(outcome(&engine, "7.A"), Some(Outcome::Pass));

    let summary = engine.summary();
    assert!(summary.critical_failures.is_empty());
    assert_eq!(summary.level, ConformanceLevel::PartiallyConformant);
    assert!(summary.wcag_violations.contains("1.4.3"));

    let snapshot = engine.export().expect("critical tests are all decided");
    assert!(snapshot.validation.is_valid);
    assert_eq!(snapshot.results.len(), Catalog::standard().len());
}

#[test]
fn test_no_evidence_is_not_tested_everywhere() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    let applied = engine.apply_evidence(&Evidence::default()).unwrap();
    assert_eq!(applied.recorded, 0);
    assert!(engine.session().all().all(|r| r.outcome == Outcome::NotTested));
    assert_eq!(engine.session().len(), engine.catalog().len());

    assert_eq!(engine.summary().level, ConformanceLevel::IncompleteTesting);
    // Every critical test has a recorded (NOT TESTED) result
    let validation = engine.validate();
    assert!(validation.is_valid);
    assert!(validation.warnings.is_empty());
}

#[test]
fn test_scenarios_a_and_b_images() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    let none: Evidence = serde_json::from_value(json!({ "elementData": { "images": [] } })).unwrap();
    assert_eq!(engine.evaluate_test(&id("7.A"), &none).unwrap().outcome, Outcome::Dna);

    let missing_alt: Evidence = serde_json::from_value(json!({
        "elementData": { "images": [{ "selector": "img#chart", "isMeaningful": true, "hasAlt": false }] }
    }))
    .unwrap();
    let result = engine.evaluate_test(&id("7.A"), &missing_alt).unwrap();
    assert_eq!(result.outcome, Outcome::Fail);
    assert_eq!(result.failed_elements.len(), 1);
    assert_eq!(outcome(&engine, "7.A"), Some(Outcome::Fail));
}

#[test]
fn test_dna_precedence_over_conflicting_signals() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    let evidence: Evidence = serde_json::from_value(json!({
        "testData": {
            "hasFlashingContent": false,
            "flashesBelowThreshold": false,
            "hasTimeLimits": false,
            "timeLimitAdjustable": false,
            "hasCaptcha": false,
            "captchaHasAlternative": false
        }
    }))
    .unwrap();
    for test in ["3.A", "8.A", "7.C"] {
        assert_eq!(engine.evaluate_test(&id(test), &evidence).unwrap().outcome, Outcome::Dna, "{test}");
    }
}

#[test]
fn test_scenario_c_failure_thresholds() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    record_all(&mut engine, &["5.A", "6.A", "9.A"], Outcome::Fail);
    assert_eq!(engine.summary().level, ConformanceLevel::PartiallyConformant);
    record_all(&mut engine, &["10.A"], Outcome::Fail);
    assert_eq!(engine.summary().level, ConformanceLevel::NotConformant);
}

#[test]
fn test_scenario_d_incomplete() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    record_all(&mut engine, &["2.A", "6.A"], Outcome::Pass);
    record_all(&mut engine, &["14.A", "14.B"], Outcome::NotTested);
    let summary = engine.summary();
    assert_eq!((summary.failed, summary.not_tested), (0, 2));
    assert_eq!(summary.level, ConformanceLevel::IncompleteTesting);
}

#[test]
fn test_single_critical_failure_gates_everything() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    let all: Vec<String> = engine.catalog().tests().map(|t| t.id.to_string()).collect();
    let all: Vec<&str> = all.iter().map(String::as_str).collect();
    record_all(&mut engine, &all, Outcome::Pass);
    assert_eq!(engine.summary().level, ConformanceLevel::FullyConformant);

    record_all(&mut engine, &["8.A"], Outcome::Fail);
    let summary = engine.summary();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.level, ConformanceLevel::CriticalFailures);
    assert_eq!(summary.critical_failures.iter().next(), Some(&id("8.A")));
}

#[test]
fn test_failures_are_monotonic() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    record_all(&mut engine, &["1.A", "4.A", "11.A"], Outcome::Pass);
    let mut previous = engine.summary();

    for test in ["4.A", "7.A", "13.C", "17.A", "20.A"] {
        record_all(&mut engine, &[test], Outcome::Fail);
        let current = engine.summary();
        assert!(current.failed > previous.failed);
        assert!(current.wcag_violations.is_superset(&previous.wcag_violations));
        assert!(current.baseline_violations.is_superset(&previous.baseline_violations));
        previous = current;
    }
}

#[test]
fn test_export_refused_without_critical_tests() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    record_all(&mut engine, &["3.A", "4.C"], Outcome::Pass);
    match engine.export() {
        Err(ConformanceError::CriticalTestsMissing(missing)) => assert_eq!(missing, vec!["8.A".to_string()]),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("export should be refused"),
    }
}

#[test]
fn test_snapshot_round_trip() {
    let mut engine = engine(UnmappedPolicy::Fallback);
    engine.apply_scan(&fixture("scan.json")).unwrap();
    record_all(&mut engine, &["3.A", "4.C", "8.A"], Outcome::Pass);
    let snapshot = engine.export().unwrap();

    let json = snapshot.to_json().unwrap();
    let parsed = ExportSnapshot::from_json(&json).unwrap();

    let mut restored = Engine::new(
        Arc::new(Catalog::standard()),
        PageContext::new("about:blank", ""),
        UnmappedPolicy::Fallback,
    );
    restored.restore(&parsed).unwrap();
    assert_eq!(restored.summary(), snapshot.summary);
    assert_eq!(restored.session().page().url, "https://shop.example.org/checkout");
    assert_eq!(aggregator::validate(restored.session()), snapshot.validation);
}
