// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scan ingestion for automated findings.
//!
//! Folds one automated scan (scanner violations and passes plus heuristic
//! probe results) into at most one result per test id, and collects the
//! remediation recommendations the scan carries.
//!
//! Within a single scan a failing fragment always wins over a passing one
//! for the same test, whichever order they arrive in.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{FailedElement, Origin, Outcome, TestId, TestResult};
use crate::normalizer::{Attribution, EvidenceFragment, HeuristicResult, Impact, Normalizer, RawFinding, ScannerResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Output of one automated scan, as handed over by the page-side runner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomatedScan {
    #[serde(flatten)]
    pub scanner: ScannerResult,
    /// Heuristic probe results keyed by check name
    #[serde(default, alias = "customChecks")]
    pub heuristics: BTreeMap<String, HeuristicResult>,
}

/// A remediation recommendation for one failing node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Impact,
    /// Test the finding was attributed to, if any
    pub test_id: Option<TestId>,
    /// Scanner rule id or heuristic check name
    pub source: String,
    pub issue: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

/// Everything a scan produced
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// One result per attributed test id, in catalog order
    pub results: Vec<TestResult>,
    /// Sorted most severe first
    pub recommendations: Vec<Recommendation>,
    /// Unmapped scanner findings kept aside
    pub unclassified: Vec<EvidenceFragment>,
    /// Heuristic findings with no test of their own
    pub supplementary: Vec<EvidenceFragment>,
}

impl ScanReport {
    /// Result recorded for a test, if the scan touched it
    pub fn result(&self, id: &TestId) -> Option<&TestResult> {
        self.results.iter().find(|r| r.test_id == *id)
    }

    /// Number of tests the scan failed
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }
}

/// Per-test accumulator
#[derive(Default)]
struct Fold {
    outcome: Option<Outcome>,
    sources: Vec<String>,
    failed_elements: Vec<FailedElement>,
    elements_checked: usize,
    notes: Vec<String>,
}

impl Fold {
    fn absorb(&mut self, fragment: EvidenceFragment) {
        self.outcome = Some(match (self.outcome, fragment.outcome) {
            (Some(Outcome::Fail), _) | (_, Outcome::Fail) => Outcome::Fail,
            (Some(Outcome::Pass), _) | (_, Outcome::Pass) => Outcome::Pass,
            (Some(current), _) => current,
            (None, incoming) => incoming,
        });
        if !self.sources.contains(&fragment.source) {
            self.sources.push(fragment.source);
        }
        self.elements_checked += fragment.elements_checked;
        if fragment.outcome == Outcome::NotTested {
            self.notes.push(fragment.notes);
        }
        self.failed_elements.extend(fragment.failed_elements);
    }

    fn notes(&self, outcome: Outcome) -> String {
        let sources = self.sources.join(", ");
        match outcome {
            Outcome::Fail => format!("[AUTOMATED] {} issue(s) found ({})", self.failed_elements.len(), sources),
            Outcome::Pass => format!(
                "[AUTOMATED] Passed automated checks, {} element(s) checked ({})",
                self.elements_checked, sources
            ),
            _ => format!("[AUTOMATED] {}", self.notes.join("; ")),
        }
    }
}

/// Fold one automated scan into per-test results
pub fn ingest(normalizer: &Normalizer, catalog: &Catalog, scan: &AutomatedScan, at: DateTime<Utc>) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    let mut folds: BTreeMap<TestId, Fold> = BTreeMap::new();

    info!(
        "Ingesting scan: {} violation(s), {} pass(es), {} heuristic check(s)",
        scan.scanner.violations.len(),
        scan.scanner.passes.len(),
        scan.heuristics.len()
    );

    let mut fragments = Vec::new();
    for rule in &scan.scanner.violations {
        let fragment = normalizer.normalize(RawFinding::Violation(rule))?;
        for node in &rule.nodes {
            report.recommendations.push(Recommendation {
                priority: rule.impact(),
                test_id: fragment.test_id,
                source: rule.id.clone(),
                issue: rule.description.clone(),
                recommendation: rule.help.clone(),
                learn_more: Some(rule.help_url.clone()).filter(|u| !u.is_empty()),
                element: node.html.clone(),
            });
        }
        fragments.push(fragment);
    }
    for rule in &scan.scanner.passes {
        fragments.push(normalizer.normalize(RawFinding::Pass(rule))?);
    }
    for (name, result) in &scan.heuristics {
        let fragment = normalizer.normalize(RawFinding::Heuristic { name, result })?;
        for issue in &result.issues {
            report.recommendations.push(Recommendation {
                priority: Impact::Moderate,
                test_id: fragment.test_id,
                source: name.clone(),
                issue: issue.issue.clone(),
                recommendation: format!("Review the {} finding on {}", name, issue.element),
                learn_more: None,
                element: Some(issue.element.clone()),
            });
        }
        fragments.push(fragment);
    }

    for fragment in fragments {
        match fragment.test_id {
            Some(id) => folds.entry(id).or_default().absorb(fragment),
            None if fragment.attribution == Attribution::Supplementary => report.supplementary.push(fragment),
            None => report.unclassified.push(fragment),
        }
    }

    for (id, fold) in folds {
        let definition = catalog.require(&id)?;
        let outcome = fold.outcome.unwrap_or(Outcome::NotTested);
        debug!("{} folded to {} from {}", id, outcome, fold.sources.join(", "));
        let notes = fold.notes(outcome);
        report.results.push(
            definition
                .result(outcome, notes, Origin::Automated, at)
                .with_failed_elements(fold.failed_elements),
        );
    }

    // Stable, so equal priorities keep scan order
    report.recommendations.sort_by_key(|r| r.priority);

    info!(
        "Scan folded into {} result(s), {} failing, {} unclassified, {} supplementary",
        report.results.len(),
        report.failed_count(),
        report.unclassified.len(),
        report.supplementary.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{UnmappedPolicy, DEFAULT_TEST_ID};
    use serde_json::json;
    use std::sync::Arc;

    fn run(policy: UnmappedPolicy, scan: serde_json::Value) -> ScanReport {
        let catalog = Arc::new(Catalog::standard());
        let normalizer = Normalizer::new(catalog.clone(), policy);
        let scan: AutomatedScan = serde_json::from_value(scan).unwrap();
        ingest(&normalizer, &catalog, &scan, Utc::now()).unwrap()
    }

    #[test]
    fn test_fail_wins_within_a_scan() {
        let report = run(
            UnmappedPolicy::Fallback,
            json!({
                "violations": [{ "id": "image-alt", "impact": "critical", "nodes": [{ "target": ["img"] }] }],
                "passes": [{ "id": "role-img-alt", "nodes": [{ "target": ["svg"] }, { "target": ["svg.logo"] }] }]
            }),
        );
        let result = report.result(&TestId::new(7, 'A')).unwrap();
        assert_eq!(result.outcome, Outcome::Fail);
        assert_eq!(result.failed_elements.len(), 1);
        assert!(result.notes.starts_with("[AUTOMATED] 1 issue(s) found"));
        assert_eq!(result.wcag_criteria, vec!["1.1.1".to_string()]);
    }

    #[test]
    fn test_passes_record_pass() {
        let report = run(
            UnmappedPolicy::Fallback,
            json!({ "passes": [{ "id": "document-title", "nodes": [{ "target": ["html"] }] }] }),
        );
        let result = report.result(&TestId::new(12, 'A')).unwrap();
        assert_eq!(result.outcome, Outcome::Pass);
        assert!(result.failed_elements.is_empty());
        assert_eq!(result.origin, Origin::Automated);
    }

    #[test]
    fn test_unmapped_rule_policies() {
        let scan = json!({ "violations": [{ "id": "some-new-rule", "nodes": [{ "target": ["#a"] }] }] });

        let fallback = run(UnmappedPolicy::Fallback, scan.clone());
        assert_eq!(fallback.result(&DEFAULT_TEST_ID).unwrap().outcome, Outcome::Fail);
        assert!(fallback.unclassified.is_empty());

        let unclassified = run(UnmappedPolicy::Unclassified, scan);
        assert!(unclassified.results.is_empty());
        assert_eq!(unclassified.unclassified.len(), 1);
    }

    #[test]
    fn test_heuristics_and_supplementary() {
        let report = run(
            UnmappedPolicy::Fallback,
            json!({
                "customChecks": {
                    "focusManagement": { "passed": true, "elementsChecked": 12 },
                    "colorContrast": { "passed": false, "issues": [{ "element": "p.muted", "issue": "Low contrast" }] },
                    "ariaUsage": { "passed": false, "issues": [{ "element": "div[role=tab]", "issue": "Missing aria-selected" }] }
                }
            }),
        );
        assert_eq!(report.result(&TestId::new(4, 'D')).unwrap().outcome, Outcome::Pass);
        let contrast = report.result(&TestId::new(13, 'C')).unwrap();
        assert_eq!(contrast.outcome, Outcome::Fail);
        assert_eq!(contrast.failed_elements[0].target, "p.muted");
        assert_eq!(report.supplementary.len(), 1);
        assert_eq!(report.supplementary[0].source, "ariaUsage");
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.recommendations.len(), 2);
    }

    #[test]
    fn test_recommendations_sorted_by_impact() {
        let report = run(
            UnmappedPolicy::Fallback,
            json!({
                "violations": [
                    { "id": "heading-order", "impact": "minor", "help": "Fix heading order", "nodes": [{ "target": ["h4"] }] },
                    { "id": "label", "impact": "critical", "help": "Label inputs", "helpUrl": "https://example.org/label", "nodes": [{ "target": ["#email"], "html": "<input id=\"email\">" }] },
                    { "id": "link-name", "nodes": [{ "target": ["a.icon"] }] }
                ]
            }),
        );
        let priorities: Vec<Impact> = report.recommendations.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![Impact::Critical, Impact::Moderate, Impact::Minor]);
        assert_eq!(report.recommendations[0].learn_more.as_deref(), Some("https://example.org/label"));
        assert_eq!(report.recommendations[0].test_id, Some(TestId::new(5, 'C')));
    }
}
