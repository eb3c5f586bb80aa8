// SPDX-License-Identifier: PMPL-1.0-or-later
//! CSS content and positioning - WCAG 1.3.1 Info and Relationships, 1.3.2 Meaningful Sequence (Level A)

use super::{judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// CSS content and positioning evaluator
pub struct CssEvaluator;

const POSITIONING: TestId = TestId::new(15, 'A');
const GENERATED_CONTENT: TestId = TestId::new(15, 'B');

const TESTS: &[TestId] = &[POSITIONING, GENERATED_CONTENT];

impl Evaluator for CssEvaluator {
    fn name(&self) -> &str {
        "CSS Content and Positioning"
    }

    fn category(&self) -> u8 {
        15
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        match *test {
            POSITIONING => judge_signal(
                data.has_css_positioned_content,
                data.reading_order_preserved,
                &Wording {
                    not_tested: "CSS positioning not tested",
                    absent: "No meaningful content is positioned with CSS",
                    passed: "Reading order is preserved without CSS positioning",
                    failed: "Meaning changes when CSS positioning is removed",
                },
            ),
            GENERATED_CONTENT => judge_signal(
                data.has_css_generated_content,
                data.css_content_conveyed_otherwise,
                &Wording {
                    not_tested: "CSS generated content not tested",
                    absent: "No CSS generated content",
                    passed: "Meaningful CSS content is also available in the page",
                    failed: "Meaningful content exists only in CSS",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 15 test", test)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    #[test]
    fn test_css_signals() {
        let data = TestData {
            has_css_positioned_content: Some(true),
            reading_order_preserved: Some(false),
            has_css_generated_content: Some(false),
            css_content_conveyed_otherwise: Some(false),
            ..Default::default()
        };
        let els = ElementData::default();
        assert_eq!(CssEvaluator.evaluate(&POSITIONING, &data, &els).outcome, Outcome::Fail);
        assert_eq!(CssEvaluator.evaluate(&GENERATED_CONTENT, &data, &els).outcome, Outcome::Dna);
    }
}
