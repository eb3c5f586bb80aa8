// SPDX-License-Identifier: PMPL-1.0-or-later
//! Timing - WCAG 2.2.1 Timing Adjustable (Level A)

use super::{judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// Time limit evaluator
pub struct TimingEvaluator;

const TIMING_ADJUSTABLE: TestId = TestId::new(8, 'A');

impl Evaluator for TimingEvaluator {
    fn name(&self) -> &str {
        "Timing"
    }

    fn category(&self) -> u8 {
        8
    }

    fn tests(&self) -> &[TestId] {
        &[TIMING_ADJUSTABLE]
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        if *test != TIMING_ADJUSTABLE {
            return Verdict::not_tested(format!("{} is not a category 8 test", test));
        }
        judge_signal(
            data.has_time_limits,
            data.time_limit_adjustable,
            &Wording {
                not_tested: "Time limits not checked",
                absent: "No time limits",
                passed: "Time limits can be turned off, adjusted or extended",
                failed: "A time limit cannot be turned off, adjusted or extended",
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    #[test]
    fn test_time_limits() {
        let timing = |has: Option<bool>, adjustable: Option<bool>| {
            let data = TestData {
                has_time_limits: has,
                time_limit_adjustable: adjustable,
                ..Default::default()
            };
            TimingEvaluator.evaluate(&TIMING_ADJUSTABLE, &data, &ElementData::default()).outcome
        };
        assert_eq!(timing(Some(false), Some(false)), Outcome::Dna);
        assert_eq!(timing(Some(true), Some(false)), Outcome::Fail);
        assert_eq!(timing(None, Some(true)), Outcome::Pass);
        assert_eq!(timing(Some(true), None), Outcome::NotTested);
    }
}
