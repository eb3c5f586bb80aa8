// SPDX-License-Identifier: PMPL-1.0-or-later
//! Evaluation engine.
//!
//! Owns the session for the page under evaluation and feeds it from the
//! three writers: automated scans, structured evidence and manual judgments.
//! Automated input should be applied before manual input; a manual judgment
//! always replaces whatever was recorded for its test.

use crate::aggregator::{self, ConformanceSummary, ValidationReport};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{ConformanceError, Result};
use crate::evaluators::EvaluatorSet;
use crate::evidence::Evidence;
use crate::model::{Origin, Outcome, PageContext, TestId, TestResult, TesterInfo};
use crate::normalizer::{ManualAction, Normalizer, RawFinding, UnmappedPolicy};
use crate::scanner::{self, AutomatedScan, ScanReport};
use crate::session::EvaluationSession;
use crate::snapshot::ExportSnapshot;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Counts of what an evidence pass did to the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvidenceOutcome {
    /// Decided results written
    pub recorded: usize,
    /// NOT TESTED results written where nothing was recorded yet
    pub deferred: usize,
    /// NOT TESTED results dropped because a result already existed
    pub kept: usize,
}

pub struct Engine {
    catalog: Arc<Catalog>,
    normalizer: Normalizer,
    evaluators: EvaluatorSet,
    session: EvaluationSession,
    require_critical_tests: bool,
    require_decided_critical_tests: bool,
    include_remediation: bool,
}

impl Engine {
    pub fn new(catalog: Arc<Catalog>, page: PageContext, policy: UnmappedPolicy) -> Self {
        Self {
            normalizer: Normalizer::new(catalog.clone(), policy),
            evaluators: EvaluatorSet::new(catalog.clone()),
            session: EvaluationSession::new(catalog.clone(), page),
            catalog,
            require_critical_tests: true,
            require_decided_critical_tests: false,
            include_remediation: true,
        }
    }

    /// Build an engine for the standard catalog from configuration.
    ///
    /// The configured tester is attached to the page unless it already
    /// names one.
    pub fn from_config(config: &Config, page: PageContext) -> Self {
        let page = if page.tester.is_none() && !config.tester.name.is_empty() {
            page.with_tester(TesterInfo::from(&config.tester))
        } else {
            page
        };
        let mut engine = Self::new(Arc::new(Catalog::standard()), page, config.normalizer.unmapped_policy);
        engine.require_critical_tests = config.export.require_critical_tests;
        engine.require_decided_critical_tests = config.export.require_decided_critical_tests;
        engine.include_remediation = config.export.include_remediation;
        engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &EvaluationSession {
        &self.session
    }

    pub fn evaluators(&self) -> &EvaluatorSet {
        &self.evaluators
    }

    /// Start over on a new page
    pub fn load_page(&mut self, page: PageContext) {
        self.session.clear(page);
    }

    /// Replace the session with the one an export snapshot was taken from
    pub fn restore(&mut self, snapshot: &ExportSnapshot) -> Result<()> {
        self.session = snapshot.restore(self.catalog.clone())?;
        info!("Restored {} result(s) for {}", self.session.len(), self.session.page().url);
        Ok(())
    }

    /// Fold an automated scan and record its results
    pub fn apply_scan(&mut self, scan: &AutomatedScan) -> Result<ScanReport> {
        let report = scanner::ingest(&self.normalizer, &self.catalog, scan, Utc::now())?;
        for result in &report.results {
            self.session.record(result.clone())?;
        }
        if !report.unclassified.is_empty() {
            warn!("{} scanner finding(s) could not be attributed to a test", report.unclassified.len());
        }
        Ok(report)
    }

    /// Run every evaluator over the evidence.
    ///
    /// Decided outcomes replace prior results. NOT TESTED only fills gaps.
    pub fn apply_evidence(&mut self, evidence: &Evidence) -> Result<EvidenceOutcome> {
        let mut outcome = EvidenceOutcome::default();
        for result in self.evaluators.evaluate_all(evidence, Utc::now())? {
            if result.outcome.is_decided() {
                self.session.record(result)?;
                outcome.recorded += 1;
            } else if self.session.record_if_absent(result)? {
                outcome.deferred += 1;
            } else {
                outcome.kept += 1;
            }
        }
        info!(
            "Evidence applied: {} decided, {} deferred, {} existing kept",
            outcome.recorded, outcome.deferred, outcome.kept
        );
        Ok(outcome)
    }

    /// Evaluate one test against evidence and record it
    pub fn evaluate_test(&mut self, test: &TestId, evidence: &Evidence) -> Result<TestResult> {
        let result = self.evaluators.evaluate(test, evidence, Utc::now())?;
        self.session.record(result.clone())?;
        Ok(result)
    }

    /// Record a tester's judgment, replacing any prior result
    pub fn apply_manual(&mut self, action: &ManualAction) -> Result<Option<TestResult>> {
        let fragment = self.normalizer.normalize(RawFinding::Manual(action))?;
        let id = fragment
            .test_id
            .ok_or_else(|| ConformanceError::UnknownTest(action.test_id.clone()))?;
        self.record_manual(&id, fragment.outcome, &fragment.notes)
    }

    pub fn record_manual(&mut self, test: &TestId, outcome: Outcome, notes: &str) -> Result<Option<TestResult>> {
        let result = self
            .catalog
            .require(test)?
            .result(outcome, notes, Origin::Manual, Utc::now());
        self.session.record(result)
    }

    pub fn summary(&self) -> ConformanceSummary {
        aggregator::summarize(&self.session)
    }

    pub fn validate(&self) -> ValidationReport {
        aggregator::validate(&self.session)
    }

    /// Snapshot the session for export.
    ///
    /// Fails while any critical test has no result, unless configured off.
    /// With `require_decided_critical_tests` a NOT TESTED result also blocks.
    pub fn export(&self) -> Result<ExportSnapshot> {
        if self.require_critical_tests {
            let missing = if self.require_decided_critical_tests {
                aggregator::undecided_critical_tests(&self.session)
            } else {
                aggregator::missing_critical_tests(&self.session)
            };
            if !missing.is_empty() {
                return Err(ConformanceError::CriticalTestsMissing(
                    missing.iter().map(|id| id.to_string()).collect(),
                ));
            }
        }

        let mut snapshot = ExportSnapshot::capture(&self.session, Utc::now());
        if !self.include_remediation {
            snapshot.remediation.clear();
        }
        info!("Exported {} result(s) for {} ({})", snapshot.results.len(), snapshot.page_context.url, snapshot.summary.level);
        Ok(snapshot)
    }
}
