// SPDX-License-Identifier: PMPL-1.0-or-later
//! Flashing content - WCAG 2.3.1 Three Flashes or Below Threshold (Level A)
//!
//! Failing this test interferes with use of the whole page, so a FAIL here
//! is a critical failure.

use super::{judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// Flashing content evaluator
pub struct FlashingEvaluator;

const THREE_FLASHES: TestId = TestId::new(3, 'A');

impl Evaluator for FlashingEvaluator {
    fn name(&self) -> &str {
        "Flashing Content"
    }

    fn category(&self) -> u8 {
        3
    }

    fn tests(&self) -> &[TestId] {
        &[THREE_FLASHES]
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        if *test != THREE_FLASHES {
            return Verdict::not_tested(format!("{} is not a category 3 test", test));
        }
        judge_signal(
            data.has_flashing_content,
            data.flashes_below_threshold,
            &Wording {
                not_tested: "Flashing content not checked",
                absent: "No flashing content",
                passed: "Content flashes no more than three times per second",
                failed: "Content flashes more than three times per second",
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    #[test]
    fn test_flashing() {
        let flashing = |has: Option<bool>, below: Option<bool>| {
            let data = TestData {
                has_flashing_content: has,
                flashes_below_threshold: below,
                ..Default::default()
            };
            FlashingEvaluator.evaluate(&THREE_FLASHES, &data, &ElementData::default()).outcome
        };
        assert_eq!(flashing(Some(false), Some(false)), Outcome::Dna);
        assert_eq!(flashing(Some(true), Some(false)), Outcome::Fail);
        assert_eq!(flashing(Some(true), Some(true)), Outcome::Pass);
        assert_eq!(flashing(None, None), Outcome::NotTested);
    }
}
