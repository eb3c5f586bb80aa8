// SPDX-License-Identifier: PMPL-1.0-or-later
//! Multiple ways - WCAG 2.4.5 Multiple Ways (Level AA)

use super::{Evaluator, Verdict};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// Multiple ways evaluator
pub struct MultipleWaysEvaluator;

const MULTIPLE_WAYS: TestId = TestId::new(19, 'A');

/// Ways (site map, search, navigation, ...) a page in a set must offer
pub const MIN_WAYS_TO_LOCATE: u32 = 2;

impl Evaluator for MultipleWaysEvaluator {
    fn name(&self) -> &str {
        "Multiple Ways"
    }

    fn category(&self) -> u8 {
        19
    }

    fn tests(&self) -> &[TestId] {
        &[MULTIPLE_WAYS]
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        if *test != MULTIPLE_WAYS {
            return Verdict::not_tested(format!("{} is not a category 19 test", test));
        }
        if data.is_part_of_set == Some(false) {
            return Verdict::dna("Page is not part of a set of pages");
        }
        if data.is_process_step == Some(true) {
            return Verdict::dna("Page is a step in a process");
        }

        match data.ways_to_locate {
            Some(ways) if ways >= MIN_WAYS_TO_LOCATE => {
                Verdict::pass(format!("{} ways are available to locate the page", ways))
            }
            Some(ways) => Verdict::fail(format!(
                "Only {} way(s) available to locate the page, at least {} required",
                ways, MIN_WAYS_TO_LOCATE
            )),
            None => Verdict::not_tested("Ways to locate the page not tested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    fn ways(part_of_set: Option<bool>, process_step: Option<bool>, count: Option<u32>) -> Outcome {
        let data = TestData {
            is_part_of_set: part_of_set,
            is_process_step: process_step,
            ways_to_locate: count,
            ..Default::default()
        };
        MultipleWaysEvaluator.evaluate(&MULTIPLE_WAYS, &data, &ElementData::default()).outcome
    }

    #[test]
    fn test_multiple_ways() {
        assert_eq!(ways(Some(false), None, Some(1)), Outcome::Dna);
        assert_eq!(ways(Some(true), Some(true), Some(0)), Outcome::Dna);
        assert_eq!(ways(Some(true), Some(false), Some(2)), Outcome::Pass);
        assert_eq!(ways(Some(true), None, Some(1)), Outcome::Fail);
        assert_eq!(ways(Some(true), None, None), Outcome::NotTested);
    }
}
