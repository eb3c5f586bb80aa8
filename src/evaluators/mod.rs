// SPDX-License-Identifier: PMPL-1.0-or-later
//! Category evaluators implementing the Trusted Tester decision logic.
//!
//! Each evaluator module owns one test category and decides the outcome of
//! its tests from supplied evidence. Every evaluator follows the same
//! policy, in order:
//!
//! 1. the triggering condition is structurally absent: `DNA`
//! 2. any applicable element fails its predicate: `FAIL`
//! 3. every applicable element passes: `PASS`
//! 4. otherwise, when the evidence needed is missing: `NOT_TESTED`
//!
//! Evaluators are pure. The caller supplies the timestamp.

pub mod alternate;
pub mod audio_video;
pub mod auto_play;
pub mod css;
pub mod flashing;
pub mod forms;
pub mod images;
pub mod keyboard;
pub mod language;
pub mod links;
pub mod media;
pub mod multiple_ways;
pub mod parsing;
pub mod repetitive;
pub mod resize;
pub mod sensory;
pub mod structure;
pub mod tables;
pub mod timing;
pub mod titles;

use crate::catalog::Catalog;
use crate::error::{ConformanceError, Result};
use crate::evidence::{ElementData, Evidence, TestData};
use crate::model::{FailedElement, Origin, Outcome, TestId, TestResult};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Trait implemented by all category evaluators
pub trait Evaluator: Send + Sync {
    /// Human-readable name of this evaluator
    fn name(&self) -> &str;

    /// Category number this evaluator owns
    fn category(&self) -> u8;

    /// Tests this evaluator decides
    fn tests(&self) -> &[TestId];

    /// Decide one test. Unknown tests yield `NOT_TESTED`.
    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict;
}

/// Outcome of one evaluation before catalog metadata is attached
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub notes: String,
    pub failed_elements: Vec<FailedElement>,
}

impl Verdict {
    fn with_outcome(outcome: Outcome, notes: impl Into<String>) -> Self {
        Self {
            outcome,
            notes: notes.into(),
            failed_elements: Vec::new(),
        }
    }

    pub fn pass(notes: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Pass, notes)
    }

    pub fn fail(notes: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail, notes)
    }

    pub fn dna(notes: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Dna, notes)
    }

    pub fn not_tested(notes: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::NotTested, notes)
    }

    /// Attach failed elements. Ignored unless the verdict is FAIL.
    pub fn with_failed_elements(mut self, elements: Vec<FailedElement>) -> Self {
        if self.outcome == Outcome::Fail {
            self.failed_elements = elements;
        }
        self
    }
}

/// Note text for the four possible verdicts of a test
pub(crate) struct Wording {
    pub not_tested: &'static str,
    pub absent: &'static str,
    pub passed: &'static str,
    /// For element checks this follows the failure count
    pub failed: &'static str,
}

/// Decide a test from an element collection.
///
/// `None` means the collection was not supplied. A supplied collection
/// without applicable elements means the trigger is absent.
pub(crate) fn judge_elements<T>(
    items: Option<&[T]>,
    applies: impl Fn(&T) -> bool,
    failure: impl Fn(&T) -> Option<FailedElement>,
    wording: &Wording,
) -> Verdict {
    let Some(items) = items else {
        return Verdict::not_tested(wording.not_tested);
    };

    let applicable: Vec<&T> = items.iter().filter(|item| applies(item)).collect();
    if applicable.is_empty() {
        return Verdict::dna(wording.absent);
    }

    let failures: Vec<FailedElement> = applicable.into_iter().filter_map(failure).collect();
    if failures.is_empty() {
        return Verdict::pass(wording.passed);
    }

    let notes = format!("{} {}: {}", failures.len(), wording.failed, targets(&failures));
    Verdict::fail(notes).with_failed_elements(failures)
}

/// Decide a test from a trigger flag and a satisfaction flag.
///
/// An explicit `false` trigger is DNA. A satisfaction flag without a
/// trigger implies the trigger is present.
pub(crate) fn judge_signal(trigger: Option<bool>, satisfied: Option<bool>, wording: &Wording) -> Verdict {
    if trigger == Some(false) {
        return Verdict::dna(wording.absent);
    }
    match satisfied {
        Some(true) => Verdict::pass(wording.passed),
        Some(false) => Verdict::fail(wording.failed),
        None => Verdict::not_tested(wording.not_tested),
    }
}

/// Satisfied when either flag is true, unknown when neither was supplied
pub(crate) fn either(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (None, None) => None,
        _ => Some(false),
    }
}

/// Whether a supplied collection has no element matching `present`
pub(crate) fn none_present<T>(items: Option<&[T]>, present: impl Fn(&T) -> bool) -> bool {
    items.map(|items| !items.iter().any(present)).unwrap_or(false)
}

/// Comma-separated failure targets for notes
pub(crate) fn targets(elements: &[FailedElement]) -> String {
    elements
        .iter()
        .map(|e| e.target.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text with surrounding whitespace removed, treating `None` as empty
pub(crate) fn trimmed(text: Option<&str>) -> &str {
    text.map(str::trim).unwrap_or("")
}

/// The standard evaluator set with its test-id dispatch table
pub struct EvaluatorSet {
    catalog: Arc<Catalog>,
    evaluators: Vec<Box<dyn Evaluator>>,
    routes: BTreeMap<TestId, usize>,
}

impl EvaluatorSet {
    /// Register one evaluator per category
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let evaluators: Vec<Box<dyn Evaluator>> = vec![
            Box::new(alternate::AlternateVersionEvaluator),
            Box::new(auto_play::AutoPlayEvaluator),
            Box::new(flashing::FlashingEvaluator),
            Box::new(keyboard::KeyboardEvaluator),
            Box::new(forms::FormEvaluator),
            Box::new(links::LinkEvaluator),
            Box::new(images::ImageEvaluator),
            Box::new(timing::TimingEvaluator),
            Box::new(repetitive::RepetitiveContentEvaluator),
            Box::new(structure::ContentStructureEvaluator),
            Box::new(language::LanguageEvaluator),
            Box::new(titles::TitleEvaluator),
            Box::new(sensory::SensoryEvaluator),
            Box::new(tables::TableEvaluator),
            Box::new(css::CssEvaluator),
            Box::new(audio_video::AudioVideoEvaluator),
            Box::new(media::SynchronizedMediaEvaluator),
            Box::new(resize::ResizeTextEvaluator),
            Box::new(multiple_ways::MultipleWaysEvaluator),
            Box::new(parsing::ParsingEvaluator),
        ];

        let mut routes = BTreeMap::new();
        for (idx, evaluator) in evaluators.iter().enumerate() {
            for test in evaluator.tests() {
                routes.insert(*test, idx);
            }
        }

        Self {
            catalog,
            evaluators,
            routes,
        }
    }

    /// The evaluator responsible for a test
    pub fn evaluator_for(&self, test: &TestId) -> Option<&dyn Evaluator> {
        let idx = self.routes.get(test)?;
        let evaluator: &dyn Evaluator = self.evaluators.get(*idx)?.as_ref();
        Some(evaluator)
    }

    /// Registered evaluators in category order
    pub fn evaluators(&self) -> &[Box<dyn Evaluator>] {
        &self.evaluators
    }

    /// Decide a test without building a result
    pub fn verdict(&self, test: &TestId, evidence: &Evidence) -> Result<Verdict> {
        self.catalog.require(test)?;
        let evaluator = self
            .evaluator_for(test)
            .ok_or_else(|| ConformanceError::UnknownTest(test.to_string()))?;
        Ok(evaluator.evaluate(test, &evidence.test_data, &evidence.element_data))
    }

    /// Evaluate one test into a full result stamped with `at`
    pub fn evaluate(&self, test: &TestId, evidence: &Evidence, at: DateTime<Utc>) -> Result<TestResult> {
        let definition = self.catalog.require(test)?;
        let verdict = self.verdict(test, evidence)?;
        debug!("{} evaluated as {}", test, verdict.outcome);

        Ok(definition
            .result(verdict.outcome, verdict.notes, Origin::Automated, at)
            .with_failed_elements(verdict.failed_elements))
    }

    /// Evaluate every catalog test against the same evidence
    pub fn evaluate_all(&self, evidence: &Evidence, at: DateTime<Utc>) -> Result<Vec<TestResult>> {
        self.catalog
            .tests()
            .map(|definition| self.evaluate(&definition.id, evidence, at))
            .collect()
    }
}
