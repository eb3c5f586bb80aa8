// SPDX-License-Identifier: PMPL-1.0-or-later
//! Evaluation session: the latest result per test id for one page.

use crate::catalog::Catalog;
use crate::error::{ConformanceError, Result};
use crate::model::{PageContext, TestId, TestResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Results recorded for the page under evaluation
#[derive(Debug, Clone)]
pub struct EvaluationSession {
    catalog: Arc<Catalog>,
    page: PageContext,
    results: BTreeMap<TestId, TestResult>,
}

impl EvaluationSession {
    pub fn new(catalog: Arc<Catalog>, page: PageContext) -> Self {
        Self {
            catalog,
            page,
            results: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    /// Record a result, replacing whatever was live for that test.
    ///
    /// Returns the replaced result. Unknown test ids are rejected.
    pub fn record(&mut self, result: TestResult) -> Result<Option<TestResult>> {
        if !self.catalog.contains(&result.test_id) {
            return Err(ConformanceError::UnknownTest(result.test_id.to_string()));
        }
        debug!("Recording {} = {} ({})", result.test_id, result.outcome, result.origin);
        Ok(self.results.insert(result.test_id, result))
    }

    /// Record a result only when nothing is live for that test yet
    pub fn record_if_absent(&mut self, result: TestResult) -> Result<bool> {
        if self.results.contains_key(&result.test_id) {
            debug!("Keeping existing result for {}", result.test_id);
            return Ok(false);
        }
        self.record(result)?;
        Ok(true)
    }

    pub fn get(&self, id: &TestId) -> Option<&TestResult> {
        self.results.get(id)
    }

    /// All live results ordered by test id
    pub fn all(&self) -> impl Iterator<Item = &TestResult> {
        self.results.values()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Drop every result and switch to a new page
    pub fn clear(&mut self, page: PageContext) {
        info!("Loading {} ({} previous result(s) cleared)", page.url, self.results.len());
        self.results.clear();
        self.page = page;
    }

    /// Results recorded in one category, in test order
    pub fn completed_in_category(&self, category: u8) -> Vec<&TestResult> {
        self.results
            .values()
            .filter(|r| r.test_id.category() == category)
            .collect()
    }

    /// Rebuild a session from exported state.
    ///
    /// Later entries for the same test replace earlier ones.
    pub fn restore(catalog: Arc<Catalog>, page: PageContext, results: Vec<TestResult>) -> Result<Self> {
        let mut session = Self::new(catalog, page);
        for result in results {
            session.record(result)?;
        }
        debug!("Restored session with {} result(s)", session.len());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Origin, Outcome};
    use chrono::Utc;

    fn session() -> EvaluationSession {
        EvaluationSession::new(Arc::new(Catalog::standard()), PageContext::new("https://example.org", "Example"))
    }

    fn result(session: &EvaluationSession, id: &str, outcome: Outcome, origin: Origin) -> TestResult {
        let id: TestId = id.parse().unwrap();
        session
            .catalog()
            .require(&id)
            .unwrap()
            .result(outcome, "", origin, Utc::now())
    }

    #[test]
    fn test_last_write_wins_regardless_of_origin() {
        let mut s = session();
        let manual = result(&s, "4.A", Outcome::Fail, Origin::Manual);
        let automated = result(&s, "4.A", Outcome::Pass, Origin::Automated);
        assert!(s.record(manual).unwrap().is_none());
        let previous = s.record(automated).unwrap().unwrap();
        assert_eq!(previous.origin, Origin::Manual);
        assert_eq!(s.get(&TestId::new(4, 'A')).unwrap().outcome, Outcome::Pass);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_unknown_test_rejected() {
        let mut s = session();
        let mut bogus = result(&s, "4.A", Outcome::Pass, Origin::Manual);
        bogus.test_id = TestId::new(4, 'Z');
        assert!(matches!(s.record(bogus), Err(ConformanceError::UnknownTest(_))));
        assert!(s.is_empty());
    }

    #[test]
    fn test_record_if_absent_keeps_decisions() {
        let mut s = session();
        s.record(result(&s, "7.A", Outcome::Fail, Origin::Automated)).unwrap();
        assert!(!s.record_if_absent(result(&s, "7.A", Outcome::NotTested, Origin::Automated)).unwrap());
        assert_eq!(s.get(&TestId::new(7, 'A')).unwrap().outcome, Outcome::Fail);
        assert!(s.record_if_absent(result(&s, "7.B", Outcome::NotTested, Origin::Automated)).unwrap());
    }

    #[test]
    fn test_ordering_and_category_filter() {
        let mut s = session();
        for id in ["10.A", "2.A", "9.C", "9.A"] {
            s.record(result(&s, id, Outcome::Pass, Origin::Manual)).unwrap();
        }
        let ids: Vec<String> = s.all().map(|r| r.test_id.to_string()).collect();
        assert_eq!(ids, vec!["2.A", "9.A", "9.C", "10.A"]);
        assert_eq!(s.completed_in_category(9).len(), 2);
        assert!(s.completed_in_category(4).is_empty());
    }

    #[test]
    fn test_clear_replaces_page() {
        let mut s = session();
        s.record(result(&s, "1.A", Outcome::Dna, Origin::Manual)).unwrap();
        s.clear(PageContext::new("https://example.org/next", "Next"));
        assert!(s.is_empty());
        assert_eq!(s.page().url, "https://example.org/next");
    }
}
