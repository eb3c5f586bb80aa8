// SPDX-License-Identifier: PMPL-1.0-or-later
//! Parsing - WCAG 4.1.1 Parsing (Level A)

use super::{Evaluator, Verdict};
use crate::evidence::{ElementData, TestData};
use crate::model::{FailedElement, TestId};

/// Markup parsing evaluator
pub struct ParsingEvaluator;

const PARSING: TestId = TestId::new(20, 'A');

impl Evaluator for ParsingEvaluator {
    fn name(&self) -> &str {
        "Parsing"
    }

    fn category(&self) -> u8 {
        20
    }

    fn tests(&self) -> &[TestId] {
        &[PARSING]
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        if *test != PARSING {
            return Verdict::not_tested(format!("{} is not a category 20 test", test));
        }

        match data.parsing_errors.as_deref() {
            None => Verdict::not_tested("Markup parsing not tested"),
            Some([]) => Verdict::pass("No parsing errors affecting assistive technology"),
            Some(errors) => {
                let failed = errors
                    .iter()
                    .map(|err| FailedElement::new("document", err).with_wcag("4.1.1"))
                    .collect();
                Verdict::fail(format!("{} parsing error(s): {}", errors.len(), errors.join("; "))).with_failed_elements(failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    #[test]
    fn test_parsing_errors() {
        let data = TestData {
            parsing_errors: Some(vec!["Duplicate id \"main\"".to_string(), "Unclosed <div>".to_string()]),
            ..Default::default()
        };
        let verdict = ParsingEvaluator.evaluate(&PARSING, &data, &ElementData::default());
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements.len(), 2);

        let clean = TestData {
            parsing_errors: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(ParsingEvaluator.evaluate(&PARSING, &clean, &ElementData::default()).outcome, Outcome::Pass);
    }
}
