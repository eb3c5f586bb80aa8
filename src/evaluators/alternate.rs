// SPDX-License-Identifier: PMPL-1.0-or-later
//! Conforming alternate version evaluator - WCAG Conformance Requirement 1
//!
//! A non-conforming page may rely on an alternate version only when that
//! version conforms, is reachable, is equivalent and is kept up to date.

use super::{judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// Conforming alternate version evaluator
pub struct AlternateVersionEvaluator;

const CONFORMANT: TestId = TestId::new(1, 'A');
const REACHABLE: TestId = TestId::new(1, 'B');
const EQUIVALENT: TestId = TestId::new(1, 'C');
const UP_TO_DATE: TestId = TestId::new(1, 'D');

const TESTS: &[TestId] = &[CONFORMANT, REACHABLE, EQUIVALENT, UP_TO_DATE];

const NO_ALTERNATE: &str = "No alternate version is provided";

impl Evaluator for AlternateVersionEvaluator {
    fn name(&self) -> &str {
        "Conforming Alternate Version"
    }

    fn category(&self) -> u8 {
        1
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        let trigger = data.has_alternate_version;
        match *test {
            CONFORMANT => judge_signal(
                trigger,
                data.alternate_passes_all_tests,
                &Wording {
                    not_tested: "Alternate version has not been tested",
                    absent: NO_ALTERNATE,
                    passed: "Alternate version passes all applicable tests",
                    failed: "Alternate version fails at least one applicable test",
                },
            ),
            REACHABLE => judge_signal(
                trigger,
                data.alternate_reachable,
                &Wording {
                    not_tested: "Reachability of the alternate version not checked",
                    absent: NO_ALTERNATE,
                    passed: "Alternate version is reachable from the page",
                    failed: "Alternate version cannot be reached from the page",
                },
            ),
            EQUIVALENT => judge_signal(
                trigger,
                data.alternate_equivalent,
                &Wording {
                    not_tested: "Equivalence of the alternate version not checked",
                    absent: NO_ALTERNATE,
                    passed: "Alternate version provides equivalent information and functionality",
                    failed: "Alternate version is missing information or functionality",
                },
            ),
            UP_TO_DATE => judge_signal(
                trigger,
                data.alternate_up_to_date,
                &Wording {
                    not_tested: "Currency of the alternate version not checked",
                    absent: NO_ALTERNATE,
                    passed: "Alternate version is up to date",
                    failed: "Alternate version is out of date",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 1 test", test)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    fn data(has_alternate: Option<bool>, conformant: Option<bool>) -> TestData {
        TestData {
            has_alternate_version: has_alternate,
            alternate_passes_all_tests: conformant,
            alternate_reachable: conformant,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_alternate_does_not_apply() {
        let verdict = AlternateVersionEvaluator.evaluate(&CONFORMANT, &data(Some(false), Some(false)), &ElementData::default());
        assert_eq!(verdict.outcome, Outcome::Dna);
    }

    #[test]
    fn test_failing_alternate() {
        let verdict = AlternateVersionEvaluator.evaluate(&REACHABLE, &data(Some(true), Some(false)), &ElementData::default());
        assert_eq!(verdict.outcome, Outcome::Fail);
    }

    #[test]
    fn test_alternate_without_findings_is_not_tested() {
        let verdict = AlternateVersionEvaluator.evaluate(&UP_TO_DATE, &data(Some(true), Some(true)), &ElementData::default());
        assert_eq!(verdict.outcome, Outcome::NotTested);
    }
}
