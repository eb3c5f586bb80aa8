// SPDX-License-Identifier: PMPL-1.0-or-later
//! Core result types shared by the normalizer, evaluators, session and
//! aggregator.
//!
//! A [`TestResult`] is the canonical per-test record. Whatever produced it
//! (scanner rule, heuristic probe, evidence evaluation or a tester clicking
//! "fail"), it carries the same shape so the session can treat every writer
//! identically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConformanceError, Result};

/// WCAG conformance level of a success criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Identifier of a Trusted Tester test, e.g. `4.C`.
///
/// Ordering follows the catalog: category number first, then test letter,
/// so `9.A` sorts before `10.A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestId {
    category: u8,
    letter: char,
}

impl TestId {
    /// Build an id from its parts. Letters are stored upper-case.
    pub const fn new(category: u8, letter: char) -> Self {
        Self {
            category,
            letter: letter.to_ascii_uppercase(),
        }
    }

    /// Category number (1-20 in the standard catalog)
    pub fn category(&self) -> u8 {
        self.category
    }

    /// Test letter within the category
    pub fn letter(&self) -> char {
        self.letter
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.letter)
    }
}

impl FromStr for TestId {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConformanceError::InvalidTestId(s.to_string());
        let (category, letter) = s.trim().split_once('.').ok_or_else(invalid)?;

        let category: u8 = category.parse().map_err(|_| invalid())?;
        if category == 0 {
            return Err(invalid());
        }

        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(TestId::new(category, c)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for TestId {
    type Error = ConformanceError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TestId> for String {
    fn from(id: TestId) -> Self {
        id.to_string()
    }
}

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Every applicable element satisfies the test
    Pass,
    /// At least one applicable element fails the test
    Fail,
    /// Triggering condition is absent from the page
    Dna,
    /// Not enough evidence to decide yet
    NotTested,
}

impl Outcome {
    /// Whether the outcome is a decision (anything but NOT TESTED)
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::NotTested)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "PASS"),
            Outcome::Fail => write!(f, "FAIL"),
            Outcome::Dna => write!(f, "DOES NOT APPLY"),
            Outcome::NotTested => write!(f, "NOT TESTED"),
        }
    }
}

impl FromStr for Outcome {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "pass" | "passed" => Ok(Outcome::Pass),
            "fail" | "failed" => Ok(Outcome::Fail),
            "dna" | "does-not-apply" | "not-applicable" | "n/a" => Ok(Outcome::Dna),
            "nt" | "not-tested" => Ok(Outcome::NotTested),
            _ => Err(ConformanceError::InvalidOutcome(s.to_string())),
        }
    }
}

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origin {
    /// Scanner, heuristic probe or evidence evaluation
    Automated,
    /// Recorded by a tester
    Manual,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Automated => write!(f, "AUTOMATED"),
            Origin::Manual => write!(f, "MANUAL"),
        }
    }
}

/// Evidence of one non-conformant node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedElement {
    /// Selector or other locator of the node
    pub target: String,
    /// Markup excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// What is wrong with it
    pub issue: String,
    /// WCAG reference attached by the source, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wcag: Option<String>,
    /// Threshold the node had to meet (e.g. `4.5:1`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    /// Measured value (e.g. `2.31:1`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl FailedElement {
    /// Create a failed element record
    pub fn new(target: &str, issue: &str) -> Self {
        Self {
            target: target.to_string(),
            html: None,
            issue: issue.to_string(),
            wcag: None,
            required: None,
            actual: None,
        }
    }

    /// Attach a markup excerpt
    pub fn with_html(mut self, html: &str) -> Self {
        self.html = Some(html.to_string());
        self
    }

    /// Attach a WCAG reference
    pub fn with_wcag(mut self, wcag: &str) -> Self {
        self.wcag = Some(wcag.to_string());
        self
    }

    /// Attach the required and measured values
    pub fn with_measure(mut self, required: &str, actual: &str) -> Self {
        self.required = Some(required.to_string());
        self.actual = Some(actual.to_string());
        self
    }
}

/// Canonical result for one test on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_id: TestId,
    pub outcome: Outcome,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub wcag_criteria: Vec<String>,
    #[serde(default)]
    pub baseline_id: String,
    /// Empty unless the outcome is FAIL
    #[serde(default)]
    pub failed_elements: Vec<FailedElement>,
    pub timestamp: DateTime<Utc>,
    pub origin: Origin,
}

impl TestResult {
    /// Whether this result is a failure
    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Fail
    }

    /// Attach failed elements. Dropped unless the outcome is FAIL.
    pub fn with_failed_elements(mut self, elements: Vec<FailedElement>) -> Self {
        if self.outcome == Outcome::Fail {
            self.failed_elements = elements;
        }
        self
    }
}

/// Tester identity printed on exported results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TesterInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub certification_number: String,
}

/// The page under evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub url: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tester: Option<TesterInfo>,
}

impl PageContext {
    /// Create a page context stamped with the current time
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            timestamp: Utc::now(),
            tester: None,
        }
    }

    /// Attach tester identity
    pub fn with_tester(mut self, tester: TesterInfo) -> Self {
        self.tester = Some(tester);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_and_display() {
        let id: TestId = "4.C".parse().unwrap();
        assert_eq!(id, TestId::new(4, 'C'));
        assert_eq!(id.to_string(), "4.C");
        assert_eq!("12.d".parse::<TestId>().unwrap(), TestId::new(12, 'D'));
    }

    #[test]
    fn test_id_rejects_garbage() {
        for bad in ["", "4", "4.", ".A", "0.A", "x.A", "4.AB", "4.1"] {
            assert!(bad.parse::<TestId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_id_orders_by_category_number() {
        let mut ids: Vec<TestId> = ["10.A", "9.C", "2.B", "9.A"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(|i| i.to_string()).collect();
        assert_eq!(rendered, vec!["2.B", "9.A", "9.C", "10.A"]);
    }

    #[test]
    fn test_outcome_parse_variants() {
        assert_eq!("pass".parse::<Outcome>().unwrap(), Outcome::Pass);
        assert_eq!("FAIL".parse::<Outcome>().unwrap(), Outcome::Fail);
        assert_eq!("DOES NOT APPLY".parse::<Outcome>().unwrap(), Outcome::Dna);
        assert_eq!("not-tested".parse::<Outcome>().unwrap(), Outcome::NotTested);
        assert_eq!("NOT_TESTED".parse::<Outcome>().unwrap(), Outcome::NotTested);
        assert!("maybe".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_outcome_serde_names() {
        assert_eq!(serde_json::to_string(&Outcome::NotTested).unwrap(), "\"NOT_TESTED\"");
        assert_eq!(serde_json::to_string(&Outcome::Dna).unwrap(), "\"DNA\"");
        assert_eq!(serde_json::to_string(&Origin::Manual).unwrap(), "\"MANUAL\"");
    }

    #[test]
    fn test_failed_elements_only_kept_on_fail() {
        let result = TestResult {
            test_id: TestId::new(7, 'A'),
            outcome: Outcome::Pass,
            notes: String::new(),
            wcag_criteria: vec!["1.1.1".to_string()],
            baseline_id: "6".to_string(),
            failed_elements: Vec::new(),
            timestamp: Utc::now(),
            origin: Origin::Automated,
        }
        .with_failed_elements(vec![FailedElement::new("img", "missing alt")]);
        assert!(result.failed_elements.is_empty());
    }
}
