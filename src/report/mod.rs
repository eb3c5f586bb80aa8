// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for conformance results.
//!
//! Supports two output formats:
//! - Text: human-readable summary with per-category counts and failures
//! - JSON: structured report for programmatic consumption

use crate::aggregator::{self, CategoryStats, ConformanceStatement, ConformanceSummary, Priority, RemediationItem, ValidationReport};
use crate::catalog::{Catalog, TestDefinition};
use crate::model::{Outcome, PageContext, TestResult};
use crate::session::EvaluationSession;
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Everything a summary report shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    pub page: PageContext,
    pub summary: ConformanceSummary,
    pub statement: ConformanceStatement,
    pub validation: ValidationReport,
    pub categories: Vec<CategoryStats>,
    pub remediation: Vec<RemediationItem>,
    pub failures: Vec<TestResult>,
}

impl ConformanceReport {
    pub fn from_session(session: &EvaluationSession) -> Self {
        let summary = aggregator::summarize(session);
        Self {
            page: session.page().clone(),
            statement: aggregator::statement(&summary),
            summary,
            validation: aggregator::validate(session),
            categories: aggregator::category_stats(session),
            remediation: aggregator::remediation_plan(session),
            failures: session.all().filter(|r| r.outcome == Outcome::Fail).cloned().collect(),
        }
    }
}

/// Generate a report for a session
pub fn generate_report(report: &ConformanceReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => to_json(report),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {}\"}}", e))
}

/// Generate human-readable text report
fn generate_text_report(report: &ConformanceReport) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    output.push_str("=== Conformancebot Trusted Tester Report ===\n\n");
    output.push_str(&format!("Page: {} ({})\n", report.page.title, report.page.url));
    if let Some(ref tester) = report.page.tester {
        if !tester.name.is_empty() {
            output.push_str(&format!("Tester: {}", tester.name));
            if !tester.certification_number.is_empty() {
                output.push_str(&format!(" (certification {})", tester.certification_number));
            }
            output.push('\n');
        }
    }
    output.push('\n');

    output.push_str(&format!(
        "{} result(s): {} passed, {} failed, {} does not apply, {} not tested (pass rate {}%)\n\n",
        summary.total,
        summary.passed,
        summary.failed,
        summary.not_applicable,
        summary.not_tested,
        summary.pass_rate()
    ));

    output.push_str("--- Categories ---\n");
    for stats in report.categories.iter().filter(|s| s.recorded > 0) {
        output.push_str(&format!(
            "{:>2}. {:<36} {}/{} recorded, {} pass, {} fail, {} dna, {} nt\n",
            stats.category,
            stats.name,
            stats.recorded,
            stats.expected,
            stats.passed,
            stats.failed,
            stats.not_applicable,
            stats.not_tested
        ));
    }
    output.push('\n');

    if !report.failures.is_empty() {
        output.push_str(&format!("--- Failures ({}) ---\n", report.failures.len()));
        for failure in &report.failures {
            output.push_str(&format!("[{}] {}\n", failure.test_id, failure.notes));
            if !failure.wcag_criteria.is_empty() {
                output.push_str(&format!("  WCAG: {}\n", failure.wcag_criteria.join(", ")));
            }
            for element in &failure.failed_elements {
                output.push_str(&format!("  - {}: {}", element.target, element.issue));
                if let (Some(required), Some(actual)) = (&element.required, &element.actual) {
                    output.push_str(&format!(" (required {}, actual {})", required, actual));
                }
                output.push('\n');
            }
        }
        output.push('\n');
    }

    if !report.remediation.is_empty() {
        output.push_str("--- Remediation ---\n");
        for (priority, items) in aggregator::plan_by_priority(&report.remediation) {
            let ids: Vec<String> = items.iter().map(|i| i.test_id.to_string()).collect();
            output.push_str(&format!("{:<6} {}\n", priority_label(priority), ids.join(", ")));
        }
        output.push('\n');
    }

    for error in &report.validation.errors {
        output.push_str(&format!("ERROR: {}\n", error));
    }
    for warning in &report.validation.warnings {
        output.push_str(&format!("WARNING: {}\n", warning));
    }
    if !report.validation.errors.is_empty() || !report.validation.warnings.is_empty() {
        output.push('\n');
    }

    if !summary.wcag_violations.is_empty() {
        let criteria: Vec<&str> = summary.wcag_violations.iter().map(String::as_str).collect();
        output.push_str(&format!("WCAG violations: {}\n", criteria.join(", ")));
    }
    output.push_str(&format!("{}\n", report.statement.statement));
    output.push_str(&format!("RESULT: {}\n", summary.level));

    output
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}

/// Render catalog entries
pub fn generate_catalog_report(catalog: &Catalog, tests: &[&TestDefinition], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&tests),
        OutputFormat::Text => {
            let mut output = String::new();
            let mut category = 0;
            for test in tests {
                if test.category() != category {
                    category = test.category();
                    let name = catalog.category(category).map(|c| c.name).unwrap_or("Unknown");
                    output.push_str(&format!("\n{}. {}\n", category, name));
                }
                output.push_str(&format!(
                    "  {:<5} {}{} [WCAG {}; baseline {}]\n",
                    test.id.to_string(),
                    test.title,
                    if test.critical { " (critical)" } else { "" },
                    test.wcag.join(", "),
                    test.baseline
                ));
            }
            output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FailedElement, Origin, TestId};
    use chrono::Utc;
    use std::sync::Arc;

    fn session() -> EvaluationSession {
        let catalog = Arc::new(Catalog::standard());
        let mut session = EvaluationSession::new(catalog.clone(), PageContext::new("https://example.org", "Example"));
        let contrast = catalog
            .require(&TestId::new(13, 'C'))
            .unwrap()
            .result(Outcome::Fail, "1 text element(s) below minimum contrast", Origin::Automated, Utc::now())
            .with_failed_elements(vec![FailedElement::new("p.muted", "Insufficient contrast").with_measure("4.5:1", "2.10:1")]);
        session.record(contrast).unwrap();
        session
    }

    #[test]
    fn test_text_report() {
        let report = ConformanceReport::from_session(&session());
        let text = generate_report(&report, OutputFormat::Text);
        assert!(text.contains("[13.C]"));
        assert!(text.contains("required 4.5:1, actual 2.10:1"));
        assert!(text.contains("MEDIUM 13.C"));
        assert!(text.contains("ERROR: Critical test 3.A not performed"));
        assert!(text.contains("RESULT: Partially Conformant"));
    }

    #[test]
    fn test_json_report() {
        let report = ConformanceReport::from_session(&session());
        let json: serde_json::Value = serde_json::from_str(&generate_report(&report, OutputFormat::Json)).unwrap();
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["summary"]["level"], "Partially Conformant");
        assert_eq!(json["failures"][0]["testId"], "13.C");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_catalog_report() {
        let catalog = Catalog::standard();
        let tests = catalog.search("keyboard");
        let text = generate_catalog_report(&catalog, &tests, OutputFormat::Text);
        assert!(text.contains("4. "));
        assert!(text.contains("(critical)"));
    }
}
