// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding normalizer.
//!
//! Maps raw findings (scanner rule results, heuristic probe results and
//! manual judgments) onto catalog test ids and turns each one into an
//! [`EvidenceFragment`]. The normalizer never touches the session.
//!
//! Scanner rule ids without a mapping are attributed to [`DEFAULT_TEST_ID`]
//! under [`UnmappedPolicy::Fallback`] (the default), or kept aside as
//! unclassified under [`UnmappedPolicy::Unclassified`].

use crate::catalog::Catalog;
use crate::error::{ConformanceError, Result};
use crate::model::{FailedElement, Outcome, TestId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Test id unmapped scanner rules fall back to
pub const DEFAULT_TEST_ID: TestId = TestId::new(1, 'A');

/// Scanner rule id to test id
const RULE_MAP: &[(&str, TestId)] = &[
    ("no-autoplay-audio", TestId::new(2, 'A')),
    ("blink", TestId::new(2, 'B')),
    ("marquee", TestId::new(2, 'B')),
    ("scrollable-region-focusable", TestId::new(4, 'A')),
    ("frame-focusable-content", TestId::new(4, 'A')),
    ("server-side-image-map", TestId::new(4, 'A')),
    ("nested-interactive", TestId::new(4, 'A')),
    ("tabindex", TestId::new(4, 'F')),
    ("focus-order-semantics", TestId::new(4, 'F')),
    ("label-title-only", TestId::new(5, 'A')),
    ("label", TestId::new(5, 'C')),
    ("select-name", TestId::new(5, 'C')),
    ("aria-input-field-name", TestId::new(5, 'E')),
    ("aria-toggle-field-name", TestId::new(5, 'E')),
    ("autocomplete-valid", TestId::new(5, 'I')),
    ("link-name", TestId::new(6, 'A')),
    ("button-name", TestId::new(6, 'B')),
    ("input-button-name", TestId::new(6, 'B')),
    ("aria-command-name", TestId::new(6, 'B')),
    ("image-alt", TestId::new(7, 'A')),
    ("image-redundant-alt", TestId::new(7, 'A')),
    ("role-img-alt", TestId::new(7, 'A')),
    ("svg-img-alt", TestId::new(7, 'A')),
    ("object-alt", TestId::new(7, 'A')),
    ("presentation-role-conflict", TestId::new(7, 'B')),
    ("input-image-alt", TestId::new(7, 'E')),
    ("area-alt", TestId::new(7, 'E')),
    ("meta-refresh", TestId::new(8, 'A')),
    ("bypass", TestId::new(9, 'A')),
    ("skip-link", TestId::new(9, 'C')),
    ("empty-heading", TestId::new(10, 'A')),
    ("p-as-heading", TestId::new(10, 'B')),
    ("heading-order", TestId::new(10, 'C')),
    ("list", TestId::new(10, 'D')),
    ("listitem", TestId::new(10, 'D')),
    ("definition-list", TestId::new(10, 'D')),
    ("dlitem", TestId::new(10, 'D')),
    ("html-has-lang", TestId::new(11, 'A')),
    ("html-lang-valid", TestId::new(11, 'A')),
    ("html-xml-lang-mismatch", TestId::new(11, 'A')),
    ("valid-lang", TestId::new(11, 'B')),
    ("document-title", TestId::new(12, 'A')),
    ("frame-title", TestId::new(12, 'C')),
    ("frame-title-unique", TestId::new(12, 'D')),
    ("link-in-text-block", TestId::new(13, 'B')),
    ("color-contrast", TestId::new(13, 'C')),
    ("th-has-data-cells", TestId::new(14, 'A')),
    ("td-has-header", TestId::new(14, 'A')),
    ("scope-attr-valid", TestId::new(14, 'A')),
    ("table-fake-caption", TestId::new(14, 'A')),
    ("td-headers-attr", TestId::new(14, 'B')),
    ("layout-table", TestId::new(14, 'C')),
    ("audio-caption", TestId::new(16, 'A')),
    ("video-caption", TestId::new(17, 'A')),
    ("meta-viewport", TestId::new(18, 'A')),
    ("meta-viewport-large", TestId::new(18, 'A')),
    ("duplicate-id", TestId::new(20, 'A')),
    ("duplicate-id-active", TestId::new(20, 'A')),
    ("duplicate-id-aria", TestId::new(20, 'A')),
];

/// Heuristic check name to test id
const CHECK_MAP: &[(&str, TestId)] = &[
    ("keyboardNavigation", TestId::new(4, 'A')),
    ("focusManagement", TestId::new(4, 'D')),
    ("timeouts", TestId::new(8, 'A')),
    ("animations", TestId::new(2, 'B')),
    ("textResize", TestId::new(18, 'A')),
    ("contentStructure", TestId::new(10, 'C')),
    ("formLabels", TestId::new(5, 'C')),
    ("colorContrast", TestId::new(13, 'C')),
];

/// What to do with scanner rules that map to no test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Attribute the finding to the default test id
    #[default]
    Fallback,
    /// Keep the finding aside, attributed to no test
    Unclassified,
}

impl fmt::Display for UnmappedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmappedPolicy::Fallback => write!(f, "fallback"),
            UnmappedPolicy::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Scanner impact rating, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Impact {
    /// Parse an impact label, treating anything unknown as moderate
    pub fn from_label(label: Option<&str>) -> Self {
        label.and_then(|l| l.parse().ok()).unwrap_or(Impact::Moderate)
    }
}

impl FromStr for Impact {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Impact::Critical),
            "serious" => Ok(Impact::Serious),
            "moderate" => Ok(Impact::Moderate),
            "minor" => Ok(Impact::Minor),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Critical => write!(f, "critical"),
            Impact::Serious => write!(f, "serious"),
            Impact::Moderate => write!(f, "moderate"),
            Impact::Minor => write!(f, "minor"),
        }
    }
}

/// One scanner run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerResult {
    pub violations: Vec<ScannerRule>,
    pub passes: Vec<ScannerRule>,
}

/// Result of one scanner rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerRule {
    #[serde(alias = "ruleId")]
    pub id: String,
    pub nodes: Vec<ScannerNode>,
    pub description: String,
    pub impact: Option<String>,
    pub help: String,
    pub help_url: String,
}

impl ScannerRule {
    pub fn impact(&self) -> Impact {
        Impact::from_label(self.impact.as_deref())
    }
}

/// A node a scanner rule matched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerNode {
    /// Selector, selector list, or nested lists for shadow DOM
    pub target: serde_json::Value,
    pub html: Option<String>,
    pub failure_summary: Option<String>,
}

impl ScannerNode {
    /// Flattened selector for reporting
    pub fn selector(&self) -> String {
        fn collect(value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::String(s) => out.push(s.clone()),
                serde_json::Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
                _ => {}
            }
        }
        let mut parts = Vec::new();
        collect(&self.target, &mut parts);
        parts.join(", ")
    }
}

/// Result of one heuristic probe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeuristicResult {
    pub passed: bool,
    pub issues: Vec<HeuristicIssue>,
    pub elements_checked: Option<usize>,
    /// The probe could not decide on its own
    pub requires_manual_check: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeuristicIssue {
    pub element: String,
    pub issue: String,
    pub wcag: Option<String>,
}

/// A judgment recorded by a tester
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAction {
    pub test_id: String,
    pub outcome: String,
    #[serde(default)]
    pub notes: String,
}

/// A raw finding awaiting normalization
#[derive(Debug, Clone, Copy)]
pub enum RawFinding<'a> {
    Violation(&'a ScannerRule),
    Pass(&'a ScannerRule),
    Heuristic { name: &'a str, result: &'a HeuristicResult },
    Manual(&'a ManualAction),
}

/// How a fragment was attributed to its test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribution {
    /// Found in the rule or check table, or named by the tester
    Mapped,
    /// Unmapped scanner rule assigned to the default test id
    Defaulted,
    /// Unmapped scanner rule kept aside
    Unclassified,
    /// Heuristic evidence with no test of its own
    Supplementary,
}

/// Canonical evidence produced from one raw finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFragment {
    /// `None` for unclassified and supplementary fragments
    pub test_id: Option<TestId>,
    pub attribution: Attribution,
    /// Scanner rule id, heuristic check name, or `manual`
    pub source: String,
    pub outcome: Outcome,
    pub notes: String,
    pub failed_elements: Vec<FailedElement>,
    pub elements_checked: usize,
}

impl EvidenceFragment {
    /// Whether the fragment counts toward a test result
    pub fn is_attributed(&self) -> bool {
        self.test_id.is_some()
    }
}

/// Finding normalizer
pub struct Normalizer {
    catalog: Arc<Catalog>,
    policy: UnmappedPolicy,
    rules: BTreeMap<&'static str, TestId>,
    checks: BTreeMap<&'static str, TestId>,
}

impl Normalizer {
    pub fn new(catalog: Arc<Catalog>, policy: UnmappedPolicy) -> Self {
        Self {
            catalog,
            policy,
            rules: RULE_MAP.iter().copied().collect(),
            checks: CHECK_MAP.iter().copied().collect(),
        }
    }

    pub fn policy(&self) -> UnmappedPolicy {
        self.policy
    }

    /// Test id and attribution for a scanner rule id
    pub fn map_rule(&self, rule_id: &str) -> (Option<TestId>, Attribution) {
        match self.rules.get(rule_id) {
            Some(id) => (Some(*id), Attribution::Mapped),
            None => match self.policy {
                UnmappedPolicy::Fallback => (Some(DEFAULT_TEST_ID), Attribution::Defaulted),
                UnmappedPolicy::Unclassified => (None, Attribution::Unclassified),
            },
        }
    }

    /// Test id for a heuristic check, if it has one
    pub fn map_check(&self, name: &str) -> Option<TestId> {
        self.checks.get(name).copied()
    }

    /// Normalize any raw finding. Only manual actions can fail.
    pub fn normalize(&self, finding: RawFinding<'_>) -> Result<EvidenceFragment> {
        match finding {
            RawFinding::Violation(rule) => Ok(self.normalize_violation(rule)),
            RawFinding::Pass(rule) => Ok(self.normalize_pass(rule)),
            RawFinding::Heuristic { name, result } => Ok(self.normalize_heuristic(name, result)),
            RawFinding::Manual(action) => self.normalize_manual(action),
        }
    }

    pub fn normalize_violation(&self, rule: &ScannerRule) -> EvidenceFragment {
        let (test_id, attribution) = self.map_rule(&rule.id);
        if attribution != Attribution::Mapped {
            debug!("Scanner rule {} has no mapping ({})", rule.id, self.policy);
        }

        let failed_elements: Vec<FailedElement> = rule
            .nodes
            .iter()
            .map(|node| {
                let issue = node
                    .failure_summary
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(&rule.help);
                let mut element = FailedElement::new(&node.selector(), issue);
                if let Some(html) = &node.html {
                    element = element.with_html(html);
                }
                element
            })
            .collect();

        EvidenceFragment {
            test_id,
            attribution,
            source: rule.id.clone(),
            outcome: Outcome::Fail,
            notes: if rule.description.is_empty() {
                rule.help.clone()
            } else {
                rule.description.clone()
            },
            elements_checked: failed_elements.len(),
            failed_elements,
        }
    }

    pub fn normalize_pass(&self, rule: &ScannerRule) -> EvidenceFragment {
        let (test_id, attribution) = self.map_rule(&rule.id);
        EvidenceFragment {
            test_id,
            attribution,
            source: rule.id.clone(),
            outcome: Outcome::Pass,
            notes: format!("{} element(s) checked", rule.nodes.len()),
            failed_elements: Vec::new(),
            elements_checked: rule.nodes.len(),
        }
    }

    pub fn normalize_heuristic(&self, name: &str, result: &HeuristicResult) -> EvidenceFragment {
        let test_id = self.map_check(name);
        let attribution = if test_id.is_some() {
            Attribution::Mapped
        } else {
            Attribution::Supplementary
        };

        let failed_elements: Vec<FailedElement> = result
            .issues
            .iter()
            .map(|issue| {
                let element = FailedElement::new(&issue.element, &issue.issue);
                match &issue.wcag {
                    Some(wcag) => element.with_wcag(wcag),
                    None => element,
                }
            })
            .collect();

        let (outcome, notes) = if !result.passed || !failed_elements.is_empty() {
            (Outcome::Fail, format!("{} issue(s) found by {} check", failed_elements.len(), name))
        } else if result.requires_manual_check {
            (Outcome::NotTested, format!("{} check requires manual verification", name))
        } else {
            (Outcome::Pass, format!("{} check passed", name))
        };

        EvidenceFragment {
            test_id,
            attribution,
            source: name.to_string(),
            outcome,
            notes,
            elements_checked: result.elements_checked.unwrap_or(failed_elements.len()),
            failed_elements,
        }
    }

    /// Manual actions must name a known test and a recognizable outcome
    pub fn normalize_manual(&self, action: &ManualAction) -> Result<EvidenceFragment> {
        let test_id: TestId = action.test_id.parse()?;
        if !self.catalog.contains(&test_id) {
            return Err(ConformanceError::UnknownTest(action.test_id.clone()));
        }
        let outcome: Outcome = action.outcome.parse()?;

        Ok(EvidenceFragment {
            test_id: Some(test_id),
            attribution: Attribution::Mapped,
            source: "manual".to_string(),
            outcome,
            notes: action.notes.clone(),
            failed_elements: Vec::new(),
            elements_checked: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer(policy: UnmappedPolicy) -> Normalizer {
        Normalizer::new(Arc::new(Catalog::standard()), policy)
    }

    fn rule(value: serde_json::Value) -> ScannerRule {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_every_mapping_targets_a_known_test() {
        let catalog = Catalog::standard();
        for (rule, id) in RULE_MAP.iter().chain(CHECK_MAP) {
            assert!(catalog.contains(id), "{} maps to unknown {}", rule, id);
        }
    }

    #[test]
    fn test_mapped_rule() {
        let n = normalizer(UnmappedPolicy::Fallback);
        assert_eq!(n.map_rule("image-alt"), (Some(TestId::new(7, 'A')), Attribution::Mapped));
        assert_eq!(n.map_rule("color-contrast"), (Some(TestId::new(13, 'C')), Attribution::Mapped));
    }

    #[test]
    fn test_unmapped_rule_falls_back() {
        let n = normalizer(UnmappedPolicy::Fallback);
        let fragment = n.normalize_violation(&rule(json!({ "id": "made-up-rule", "nodes": [{ "target": ["#x"] }] })));
        assert_eq!(fragment.test_id, Some(DEFAULT_TEST_ID));
        assert_eq!(fragment.attribution, Attribution::Defaulted);
    }

    #[test]
    fn test_unmapped_rule_unclassified() {
        let n = normalizer(UnmappedPolicy::Unclassified);
        let fragment = n.normalize_violation(&rule(json!({ "id": "made-up-rule" })));
        assert_eq!(fragment.test_id, None);
        assert!(!fragment.is_attributed());
    }

    #[test]
    fn test_violation_nodes_become_failed_elements() {
        let n = normalizer(UnmappedPolicy::Fallback);
        let fragment = n.normalize_violation(&rule(json!({
            "ruleId": "image-alt",
            "description": "Images must have alternate text",
            "help": "Add alt text",
            "nodes": [
                { "target": ["img.hero"], "html": "<img src=\"hero.png\">", "failureSummary": "Element has no alt attribute" },
                { "target": [["my-widget", "img"]] }
            ]
        })));
        assert_eq!(fragment.outcome, Outcome::Fail);
        assert_eq!(fragment.failed_elements.len(), 2);
        assert_eq!(fragment.failed_elements[0].issue, "Element has no alt attribute");
        assert_eq!(fragment.failed_elements[1].target, "my-widget, img");
        assert_eq!(fragment.failed_elements[1].issue, "Add alt text");
    }

    #[test]
    fn test_heuristics() {
        let n = normalizer(UnmappedPolicy::Fallback);
        let failing: HeuristicResult = serde_json::from_value(json!({
            "passed": false,
            "issues": [{ "element": "#nav", "issue": "Not reachable by Tab", "wcag": "2.1.1" }]
        }))
        .unwrap();
        let fragment = n.normalize_heuristic("keyboardNavigation", &failing);
        assert_eq!(fragment.test_id, Some(TestId::new(4, 'A')));
        assert_eq!(fragment.outcome, Outcome::Fail);

        let contrast = n.normalize_heuristic("colorContrast", &failing);
        assert_eq!(contrast.attribution, Attribution::Mapped);
        assert_eq!(contrast.test_id, Some(TestId::new(13, 'C')));

        let aria = n.normalize_heuristic("ariaUsage", &failing);
        assert_eq!(aria.attribution, Attribution::Supplementary);
        assert_eq!(aria.test_id, None);

        let manual_needed = HeuristicResult {
            passed: true,
            requires_manual_check: true,
            ..Default::default()
        };
        assert_eq!(n.normalize_heuristic("timeouts", &manual_needed).outcome, Outcome::NotTested);
    }

    #[test]
    fn test_manual_actions() {
        let n = normalizer(UnmappedPolicy::Fallback);
        let action = ManualAction {
            test_id: "4.C".to_string(),
            outcome: "fail".to_string(),
            notes: "Focus trapped in date picker".to_string(),
        };
        let fragment = n.normalize(RawFinding::Manual(&action)).unwrap();
        assert_eq!(fragment.outcome, Outcome::Fail);

        let unknown = ManualAction {
            test_id: "4.Z".to_string(),
            ..action.clone()
        };
        assert!(matches!(n.normalize_manual(&unknown), Err(ConformanceError::UnknownTest(_))));

        let garbage = ManualAction {
            outcome: "sort of".to_string(),
            ..action
        };
        assert!(matches!(n.normalize_manual(&garbage), Err(ConformanceError::InvalidOutcome(_))));
    }

    #[test]
    fn test_impact_ordering() {
        let mut impacts = vec![Impact::Minor, Impact::Critical, Impact::Moderate, Impact::Serious];
        impacts.sort();
        assert_eq!(impacts, vec![Impact::Critical, Impact::Serious, Impact::Moderate, Impact::Minor]);
        assert_eq!(Impact::from_label(Some("bogus")), Impact::Moderate);
        assert_eq!(Impact::from_label(None), Impact::Moderate);
    }
}
