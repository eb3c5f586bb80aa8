// SPDX-License-Identifier: PMPL-1.0-or-later
//! Export snapshot of an evaluation session.
//!
//! The snapshot is what leaves the engine: page context, every live result,
//! the derived summary and validation. Restoring a snapshot rebuilds the
//! session from its results alone; the derived parts are recomputed.

use crate::aggregator::{self, ConformanceStatement, ConformanceSummary, RemediationItem, ValidationReport};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{PageContext, TestResult};
use crate::session::EvaluationSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Trusted Tester process version the results follow
pub const TRUSTED_TESTER_VERSION: &str = "5.1.3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub version: String,
    pub id: Uuid,
    pub page_context: PageContext,
    pub results: Vec<TestResult>,
    pub summary: ConformanceSummary,
    pub validation: ValidationReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<ConformanceStatement>,
    #[serde(default)]
    pub remediation: Vec<RemediationItem>,
    pub export_date: DateTime<Utc>,
}

impl ExportSnapshot {
    /// Capture a session as it stands
    pub fn capture(session: &EvaluationSession, at: DateTime<Utc>) -> Self {
        let summary = aggregator::summarize(session);
        Self {
            version: TRUSTED_TESTER_VERSION.to_string(),
            id: Uuid::new_v4(),
            page_context: session.page().clone(),
            results: session.all().cloned().collect(),
            statement: Some(aggregator::statement(&summary)),
            summary,
            validation: aggregator::validate(session),
            remediation: aggregator::remediation_plan(session),
            export_date: at,
        }
    }

    /// Rebuild the session the snapshot was taken from
    pub fn restore(&self, catalog: Arc<Catalog>) -> Result<EvaluationSession> {
        EvaluationSession::restore(catalog, self.page_context.clone(), self.results.clone())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
