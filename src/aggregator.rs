// SPDX-License-Identifier: PMPL-1.0-or-later
//! Conformance aggregation.
//!
//! Rolls the session's live results up into outcome counts, WCAG and
//! baseline violation sets and an overall conformance level. Everything
//! here is recomputed from scratch on each call.
//!
//! Level precedence, first match wins:
//! - any critical test failed: Not Conformant (Critical Failures)
//! - nothing failed and nothing left untested: Fully Conformant
//! - one to three failures: Partially Conformant
//! - more than three failures: Not Conformant
//! - otherwise: Incomplete Testing

use crate::catalog::Catalog;
use crate::model::{Outcome, TestId, TestResult};
use crate::session::EvaluationSession;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Most failures a page may have and still be partially conformant
pub const PARTIAL_CONFORMANCE_MAX_FAILURES: usize = 3;

/// Tests whose failure is remediated with medium priority
pub const MAJOR_TESTS: [TestId; 10] = [
    TestId::new(4, 'A'),
    TestId::new(4, 'D'),
    TestId::new(4, 'F'),
    TestId::new(5, 'A'),
    TestId::new(5, 'C'),
    TestId::new(7, 'A'),
    TestId::new(10, 'B'),
    TestId::new(10, 'C'),
    TestId::new(12, 'A'),
    TestId::new(13, 'C'),
];

/// Overall conformance determination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConformanceLevel {
    #[serde(rename = "Not Conformant (Critical Failures)")]
    CriticalFailures,
    #[serde(rename = "Fully Conformant")]
    FullyConformant,
    #[serde(rename = "Partially Conformant")]
    PartiallyConformant,
    #[serde(rename = "Not Conformant")]
    NotConformant,
    #[serde(rename = "Incomplete Testing")]
    IncompleteTesting,
}

impl ConformanceLevel {
    /// Whether the page may claim conformance at all
    pub fn is_conformant(&self) -> bool {
        matches!(self, ConformanceLevel::FullyConformant)
    }
}

impl fmt::Display for ConformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformanceLevel::CriticalFailures => write!(f, "Not Conformant (Critical Failures)"),
            ConformanceLevel::FullyConformant => write!(f, "Fully Conformant"),
            ConformanceLevel::PartiallyConformant => write!(f, "Partially Conformant"),
            ConformanceLevel::NotConformant => write!(f, "Not Conformant"),
            ConformanceLevel::IncompleteTesting => write!(f, "Incomplete Testing"),
        }
    }
}

/// Rollup of a session's results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
    pub not_tested: usize,
    pub wcag_violations: BTreeSet<String>,
    pub baseline_violations: BTreeSet<String>,
    pub critical_failures: BTreeSet<TestId>,
    pub level: ConformanceLevel,
}

impl ConformanceSummary {
    /// Percentage of decided pass/fail tests that passed, rounded
    pub fn pass_rate(&self) -> u32 {
        let completed = self.passed + self.failed;
        if completed == 0 {
            return 0;
        }
        ((self.passed as f64 / completed as f64) * 100.0).round() as u32
    }
}

/// Summarize a session
pub fn summarize(session: &EvaluationSession) -> ConformanceSummary {
    summarize_results(session.catalog(), session.all())
}

/// Summarize any set of results, one per test id
pub fn summarize_results<'a>(catalog: &Catalog, results: impl IntoIterator<Item = &'a TestResult>) -> ConformanceSummary {
    let mut summary = ConformanceSummary {
        total: 0,
        passed: 0,
        failed: 0,
        not_applicable: 0,
        not_tested: 0,
        wcag_violations: BTreeSet::new(),
        baseline_violations: BTreeSet::new(),
        critical_failures: BTreeSet::new(),
        level: ConformanceLevel::IncompleteTesting,
    };

    for result in results {
        summary.total += 1;
        match result.outcome {
            Outcome::Pass => summary.passed += 1,
            Outcome::Dna => summary.not_applicable += 1,
            Outcome::NotTested => summary.not_tested += 1,
            Outcome::Fail => {
                summary.failed += 1;
                summary.wcag_violations.extend(result.wcag_criteria.iter().cloned());
                if !result.baseline_id.is_empty() {
                    summary.baseline_violations.insert(result.baseline_id.clone());
                }
                if catalog.get(&result.test_id).is_some_and(|t| t.critical) {
                    summary.critical_failures.insert(result.test_id);
                }
            }
        }
    }

    summary.level = if !summary.critical_failures.is_empty() {
        ConformanceLevel::CriticalFailures
    } else if summary.failed == 0 && summary.not_tested == 0 {
        ConformanceLevel::FullyConformant
    } else if summary.failed > PARTIAL_CONFORMANCE_MAX_FAILURES {
        ConformanceLevel::NotConformant
    } else if summary.failed > 0 {
        ConformanceLevel::PartiallyConformant
    } else {
        ConformanceLevel::IncompleteTesting
    };

    summary
}

/// Pre-export completeness check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a session before export.
///
/// A critical test is performed once any result is recorded for it.
pub fn validate(session: &EvaluationSession) -> ValidationReport {
    let errors: Vec<String> = missing_critical_tests(session)
        .iter()
        .map(|id| format!("Critical test {} not performed", id))
        .collect();

    let mut warnings = Vec::new();
    for category in session.catalog().categories() {
        let recorded = session.completed_in_category(category.id).len();
        if recorded > 0 && recorded < category.expected_count() {
            warnings.push(format!("Category {} appears incomplete", category.id));
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Critical tests with no recorded result
pub fn missing_critical_tests(session: &EvaluationSession) -> Vec<TestId> {
    session
        .catalog()
        .critical_tests()
        .filter(|t| session.get(&t.id).is_none())
        .map(|t| t.id)
        .collect()
}

/// Critical tests with no decided result, counting NOT TESTED as missing
pub fn undecided_critical_tests(session: &EvaluationSession) -> Vec<TestId> {
    session
        .catalog()
        .critical_tests()
        .filter(|t| !session.get(&t.id).is_some_and(|r| r.outcome.is_decided()))
        .map(|t| t.id)
        .collect()
}

/// Outcome counts for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: u8,
    pub name: String,
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
    pub not_tested: usize,
    pub recorded: usize,
    pub expected: usize,
}

impl CategoryStats {
    pub fn is_complete(&self) -> bool {
        self.recorded >= self.expected
    }
}

/// Per-category statistics in category order
pub fn category_stats(session: &EvaluationSession) -> Vec<CategoryStats> {
    session
        .catalog()
        .categories()
        .iter()
        .map(|category| {
            let results = session.completed_in_category(category.id);
            let count = |outcome: Outcome| results.iter().filter(|r| r.outcome == outcome).count();
            CategoryStats {
                category: category.id,
                name: category.name.to_string(),
                passed: count(Outcome::Pass),
                failed: count(Outcome::Fail),
                not_applicable: count(Outcome::Dna),
                not_tested: count(Outcome::NotTested),
                recorded: results.len(),
                expected: category.expected_count(),
            }
        })
        .collect()
}

/// Remediation priority of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// One failure to remediate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationItem {
    pub test_id: TestId,
    pub title: String,
    pub priority: Priority,
    pub wcag_criteria: Vec<String>,
    pub notes: String,
    pub affected_elements: usize,
}

/// Priority of remediating a failed test
pub fn priority_of(catalog: &Catalog, id: &TestId) -> Priority {
    if catalog.get(id).is_some_and(|t| t.critical) {
        Priority::High
    } else if MAJOR_TESTS.contains(id) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Failures ordered high priority first, then by test id
pub fn remediation_plan(session: &EvaluationSession) -> Vec<RemediationItem> {
    let catalog = session.catalog();
    let mut plan: Vec<RemediationItem> = session
        .all()
        .filter(|r| r.is_failure())
        .map(|r| RemediationItem {
            test_id: r.test_id,
            title: catalog.get(&r.test_id).map(|t| t.title.to_string()).unwrap_or_default(),
            priority: priority_of(catalog, &r.test_id),
            wcag_criteria: r.wcag_criteria.clone(),
            notes: r.notes.clone(),
            affected_elements: r.failed_elements.len(),
        })
        .collect();
    plan.sort_by_key(|item| (item.priority, item.test_id));
    plan
}

/// Failures grouped by priority
pub fn plan_by_priority(plan: &[RemediationItem]) -> BTreeMap<Priority, Vec<&RemediationItem>> {
    let mut grouped: BTreeMap<Priority, Vec<&RemediationItem>> = BTreeMap::new();
    for item in plan {
        grouped.entry(item.priority).or_default().push(item);
    }
    grouped
}

/// Conformance statement wording for a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceStatement {
    pub level: ConformanceLevel,
    pub statement: String,
    pub wcag_statement: String,
    pub section508_statement: String,
}

pub fn statement(summary: &ConformanceSummary) -> ConformanceStatement {
    let (statement, wcag, section508) = match summary.level {
        ConformanceLevel::CriticalFailures => (
            "The tested content contains critical accessibility failures that must be resolved.",
            "Does not meet WCAG 2.1 Level AA due to critical failures.",
            "Does not conform to Revised Section 508 standards.",
        ),
        ConformanceLevel::FullyConformant => (
            "The tested content meets all applicable accessibility requirements.",
            "Meets WCAG 2.1 Level AA for all tested success criteria.",
            "Conforms to Revised Section 508 standards.",
        ),
        ConformanceLevel::PartiallyConformant => (
            "The tested content is partially conformant with minor issues identified.",
            "Partially meets WCAG 2.1 Level AA with specific exceptions.",
            "Partially conforms to Revised Section 508 standards.",
        ),
        ConformanceLevel::NotConformant => (
            "The tested content does not meet accessibility requirements.",
            "Does not meet WCAG 2.1 Level AA.",
            "Does not conform to Revised Section 508 standards.",
        ),
        ConformanceLevel::IncompleteTesting => (
            "Testing is incomplete; no conformance claim can be made yet.",
            "WCAG 2.1 Level AA conformance not yet determined.",
            "Revised Section 508 conformance not yet determined.",
        ),
    };

    ConformanceStatement {
        level: summary.level,
        statement: statement.to_string(),
        wcag_statement: wcag.to_string(),
        section508_statement: section508.to_string(),
    }
}
