// SPDX-License-Identifier: PMPL-1.0-or-later
//! Trusted Tester test catalog.
//!
//! The catalog is immutable configuration data: the 20 test categories,
//! every test definition with its WCAG success criteria and ICT baseline,
//! the WCAG criterion metadata and the baseline names. It is built once and
//! shared behind an `Arc` by the normalizer, evaluators and session.

mod tables;

use crate::error::{ConformanceError, Result};
use crate::model::{Origin, Outcome, TestId, TestResult, WcagLevel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub use tables::CRITICAL_TESTS;

/// Static definition of one test
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    pub id: TestId,
    pub title: &'static str,
    /// WCAG success criteria (or conformance requirement) ids
    pub wcag: &'static [&'static str],
    /// ICT baseline id
    pub baseline: &'static str,
    pub pass_condition: &'static str,
    pub fail_condition: &'static str,
    /// When the test does not apply, if it ever can
    pub not_applicable: Option<&'static str>,
    /// Failure blocks any conformance claim (Non-Interference)
    pub critical: bool,
}

impl TestDefinition {
    /// Category number of this test
    pub fn category(&self) -> u8 {
        self.id.category()
    }

    /// WCAG criteria as owned strings, as stored on results
    pub fn wcag_criteria(&self) -> Vec<String> {
        self.wcag.iter().map(|s| s.to_string()).collect()
    }

    /// Build a result for this test carrying its WCAG and baseline references
    pub fn result(&self, outcome: Outcome, notes: impl Into<String>, origin: Origin, at: DateTime<Utc>) -> TestResult {
        TestResult {
            test_id: self.id,
            outcome,
            notes: notes.into(),
            wcag_criteria: self.wcag_criteria(),
            baseline_id: self.baseline.to_string(),
            failed_elements: Vec::new(),
            timestamp: at,
            origin,
        }
    }
}

/// A test category and its tests in catalog order
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: u8,
    pub name: &'static str,
    pub tests: Vec<TestId>,
}

impl Category {
    /// Number of tests a complete evaluation records for this category
    pub fn expected_count(&self) -> usize {
        self.tests.len()
    }
}

/// WCAG success criterion metadata
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WcagCriterion {
    pub id: &'static str,
    pub name: &'static str,
    pub level: WcagLevel,
    pub principle: &'static str,
}

/// The full test catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    tests: BTreeMap<TestId, TestDefinition>,
    categories: Vec<Category>,
}

impl Catalog {
    /// The Trusted Tester catalog shipped with this crate
    pub fn standard() -> Self {
        let tests: BTreeMap<TestId, TestDefinition> = tables::TESTS
            .iter()
            .map(|def| (def.id, def.clone()))
            .collect();

        let categories = tables::CATEGORIES
            .iter()
            .map(|&(id, name)| Category {
                id,
                name,
                tests: tests.keys().filter(|t| t.category() == id).copied().collect(),
            })
            .collect();

        Self { tests, categories }
    }

    /// Look up a test definition
    pub fn get(&self, id: &TestId) -> Option<&TestDefinition> {
        self.tests.get(id)
    }

    /// Look up a test definition, failing for unknown ids
    pub fn require(&self, id: &TestId) -> Result<&TestDefinition> {
        self.get(id)
            .ok_or_else(|| ConformanceError::UnknownTest(id.to_string()))
    }

    /// Whether the catalog defines this test
    pub fn contains(&self, id: &TestId) -> bool {
        self.tests.contains_key(id)
    }

    /// All test definitions in catalog order
    pub fn tests(&self) -> impl Iterator<Item = &TestDefinition> {
        self.tests.values()
    }

    /// Number of tests
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// All categories in order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category
    pub fn category(&self, id: u8) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Expected number of tests in a category (0 for unknown categories)
    pub fn expected_count(&self, category: u8) -> usize {
        self.category(category).map(Category::expected_count).unwrap_or(0)
    }

    /// Critical (Non-Interference) tests
    pub fn critical_tests(&self) -> impl Iterator<Item = &TestDefinition> {
        self.tests.values().filter(|t| t.critical)
    }

    /// WCAG criterion metadata
    pub fn criterion(&self, id: &str) -> Option<&'static WcagCriterion> {
        tables::WCAG_CRITERIA.iter().find(|c| c.id == id)
    }

    /// ICT baseline name
    pub fn baseline_name(&self, id: &str) -> Option<&'static str> {
        tables::BASELINES
            .iter()
            .find(|(baseline, _)| *baseline == id)
            .map(|(_, name)| *name)
    }

    /// Case-insensitive search over test id, title and WCAG references
    pub fn search(&self, term: &str) -> Vec<&TestDefinition> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.tests().collect();
        }

        self.tests()
            .filter(|t| {
                t.id.to_string().to_lowercase() == needle
                    || t.title.to_lowercase().contains(&needle)
                    || t.wcag.iter().any(|sc| sc.to_lowercase().contains(&needle))
                    || t.wcag.iter().any(|sc| {
                        self.criterion(sc)
                            .map(|c| c.name.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_twenty_categories() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.categories().len(), 20);
        for (idx, category) in catalog.categories().iter().enumerate() {
            assert_eq!(category.id as usize, idx + 1);
            assert!(!category.tests.is_empty(), "category {} has no tests", category.id);
        }
    }

    #[test]
    fn test_every_test_belongs_to_a_category() {
        let catalog = Catalog::standard();
        let counted: usize = catalog.categories().iter().map(|c| c.expected_count()).sum();
        assert_eq!(counted, catalog.len());
        assert_eq!(catalog.len(), 62);
    }

    #[test]
    fn test_every_wcag_reference_is_known() {
        let catalog = Catalog::standard();
        for test in catalog.tests() {
            for sc in test.wcag {
                assert!(catalog.criterion(sc).is_some(), "{} references unknown {}", test.id, sc);
            }
            assert!(
                catalog.baseline_name(test.baseline).is_some(),
                "{} references unknown baseline {}",
                test.id,
                test.baseline
            );
        }
    }

    #[test]
    fn test_critical_tests_match_flags() {
        let catalog = Catalog::standard();
        let flagged: Vec<TestId> = catalog.critical_tests().map(|t| t.id).collect();
        assert_eq!(flagged, CRITICAL_TESTS.to_vec());
    }

    #[test]
    fn test_expected_counts() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.expected_count(4), 7);
        assert_eq!(catalog.expected_count(5), 9);
        assert_eq!(catalog.expected_count(7), 5);
        assert_eq!(catalog.expected_count(13), 4);
        assert_eq!(catalog.expected_count(99), 0);
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::standard();
        let hits = catalog.search("keyboard trap");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, TestId::new(4, 'C'));

        let by_sc = catalog.search("1.4.3");
        assert!(by_sc.iter().any(|t| t.id == TestId::new(13, 'C')));

        let by_id = catalog.search("7.a");
        assert_eq!(by_id[0].id, TestId::new(7, 'A'));
    }

    #[test]
    fn test_unknown_test_is_rejected() {
        let catalog = Catalog::standard();
        assert!(catalog.require(&TestId::new(21, 'A')).is_err());
        assert!(catalog.require(&TestId::new(4, 'H')).is_err());
    }
}
