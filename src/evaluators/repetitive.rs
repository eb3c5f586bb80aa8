// SPDX-License-Identifier: PMPL-1.0-or-later
//! Repetitive content - WCAG 2.4.1 Bypass Blocks (Level A), 3.2.3/3.2.4 Consistency (Level AA)

use super::{judge_elements, judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::{FailedElement, TestId};

/// Repetitive content evaluator
pub struct RepetitiveContentEvaluator;

const BYPASS: TestId = TestId::new(9, 'A');
const CONSISTENT: TestId = TestId::new(9, 'B');
const SKIP_TARGET: TestId = TestId::new(9, 'C');

const TESTS: &[TestId] = &[BYPASS, CONSISTENT, SKIP_TARGET];

const NO_REPETITION: &str = "No blocks of content are repeated across pages";

impl Evaluator for RepetitiveContentEvaluator {
    fn name(&self) -> &str {
        "Repetitive Content"
    }

    fn category(&self) -> u8 {
        9
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        match *test {
            BYPASS => judge_signal(
                data.has_repetitive_content,
                data.has_bypass_mechanism,
                &Wording {
                    not_tested: "Bypass mechanism not tested",
                    absent: NO_REPETITION,
                    passed: "A mechanism is available to bypass repeated content",
                    failed: "Repeated content cannot be bypassed",
                },
            ),
            CONSISTENT => judge_signal(
                data.has_repetitive_content,
                data.navigation_consistent,
                &Wording {
                    not_tested: "Navigation consistency not tested",
                    absent: NO_REPETITION,
                    passed: "Repeated navigation appears in a consistent order",
                    failed: "Repeated navigation changes order between pages",
                },
            ),
            SKIP_TARGET => judge_elements(
                elements.skip_links.as_deref(),
                |_| true,
                |link| {
                    let issue = match (link.target_exists, link.visible_on_focus) {
                        (true, true) => return None,
                        (false, true) => "Skip link target does not exist",
                        (true, false) => "Skip link is not visible on focus",
                        (false, false) => "Skip link has no target and is not visible on focus",
                    };
                    Some(FailedElement::new(&link.selector, issue).with_wcag("2.4.1"))
                },
                &Wording {
                    not_tested: "Skip links not tested",
                    absent: "No skip links found",
                    passed: "All skip links reach their targets and are visible on focus",
                    failed: "skip link(s) broken",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 9 test", test)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use serde_json::json;

    #[test]
    fn test_bypass() {
        let data = TestData {
            has_repetitive_content: Some(true),
            has_bypass_mechanism: Some(false),
            navigation_consistent: Some(true),
            ..Default::default()
        };
        let els = ElementData::default();
        assert_eq!(RepetitiveContentEvaluator.evaluate(&BYPASS, &data, &els).outcome, Outcome::Fail);
        assert_eq!(RepetitiveContentEvaluator.evaluate(&CONSISTENT, &data, &els).outcome, Outcome::Pass);
    }

    #[test]
    fn test_no_repetition_does_not_apply() {
        let data = TestData {
            has_repetitive_content: Some(false),
            has_bypass_mechanism: Some(false),
            ..Default::default()
        };
        let verdict = RepetitiveContentEvaluator.evaluate(&BYPASS, &data, &ElementData::default());
        assert_eq!(verdict.outcome, Outcome::Dna);
    }

    #[test]
    fn test_skip_link_targets() {
        let els: ElementData = serde_json::from_value(json!({
            "skipLinks": [
                { "selector": "a.skip", "targetExists": false, "visibleOnFocus": true }
            ]
        }))
        .unwrap();
        let verdict = RepetitiveContentEvaluator.evaluate(&SKIP_TARGET, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements[0].issue, "Skip link target does not exist");
    }
}
