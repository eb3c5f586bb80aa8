// SPDX-License-Identifier: PMPL-1.0-or-later
//! Content structure evaluator - WCAG 1.3.1 Info and Relationships (Level A), 2.4.6 Headings and Labels (Level AA)
//!
//! Checks:
//! - Headings describe their sections
//! - Text styled as a heading is a programmatic heading
//! - Heading levels do not skip (h2 -> h4)
//! - Visual lists are semantic lists

use super::{judge_elements, targets, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, Heading, TestData};
use crate::model::{FailedElement, TestId};

/// Content structure evaluator
pub struct ContentStructureEvaluator;

const HEADING_PURPOSE: TestId = TestId::new(10, 'A');
const VISUAL_HEADINGS: TestId = TestId::new(10, 'B');
const HEADING_LEVELS: TestId = TestId::new(10, 'C');
const LISTS: TestId = TestId::new(10, 'D');

const TESTS: &[TestId] = &[HEADING_PURPOSE, VISUAL_HEADINGS, HEADING_LEVELS, LISTS];

/// Headings with less trimmed text than this are treated as empty
const MIN_HEADING_CHARS: usize = 2;

impl Evaluator for ContentStructureEvaluator {
    fn name(&self) -> &str {
        "Content Structure"
    }

    fn category(&self) -> u8 {
        10
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        match *test {
            HEADING_PURPOSE => judge_elements(
                elements.headings.as_deref(),
                |_| true,
                |heading| {
                    let issue = if heading.text.trim().chars().count() < MIN_HEADING_CHARS {
                        "Heading is empty"
                    } else if !heading.is_descriptive {
                        "Heading does not describe its section"
                    } else {
                        return None;
                    };
                    Some(FailedElement::new(&heading.selector, issue).with_wcag("2.4.6"))
                },
                &Wording {
                    not_tested: "Heading purpose not tested",
                    absent: "No headings found",
                    passed: "All headings describe their sections",
                    failed: "heading(s) empty or not descriptive",
                },
            ),
            VISUAL_HEADINGS => judge_elements(
                elements.visual_headings.as_deref(),
                |_| true,
                |heading| {
                    (!heading.is_programmatic_heading).then(|| {
                        FailedElement::new(&heading.selector, &format!("\"{}\" looks like a heading but is not marked up as one", heading.text))
                            .with_wcag("1.3.1")
                    })
                },
                &Wording {
                    not_tested: "Visual headings not tested",
                    absent: "No visual headings found",
                    passed: "All visual headings are programmatic headings",
                    failed: "visual heading(s) not marked up as headings",
                },
            ),
            HEADING_LEVELS => evaluate_heading_levels(data, elements.headings.as_deref()),
            LISTS => judge_elements(
                elements.visual_lists.as_deref(),
                |_| true,
                |list| {
                    (!list.is_semantic_list || !list.has_proper_markup)
                        .then(|| FailedElement::new(&list.selector, "Visual list is not marked up as a list").with_wcag("1.3.1"))
                },
                &Wording {
                    not_tested: "List structure not tested",
                    absent: "No visual lists found",
                    passed: "All visual lists use list markup",
                    failed: "list(s) without proper list markup",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 10 test", test)),
        }
    }
}

/// Headings whose level exceeds the preceding heading's level by more
/// than one. The first heading has no predecessor and never skips.
pub fn heading_skips(headings: &[Heading]) -> Vec<FailedElement> {
    headings
        .windows(2)
        .filter(|pair| pair[1].level > pair[0].level.saturating_add(1))
        .map(|pair| {
            FailedElement::new(
                &pair[1].selector,
                &format!("Heading level skips from h{} to h{}", pair[0].level, pair[1].level),
            )
            .with_wcag("1.3.1")
        })
        .collect()
}

fn evaluate_heading_levels(data: &TestData, headings: Option<&[Heading]>) -> Verdict {
    if let Some([]) = headings {
        return Verdict::dna("No headings found");
    }

    let skips = headings.map(heading_skips).unwrap_or_default();
    if !skips.is_empty() {
        let notes = format!("{} heading(s) skip levels: {}", skips.len(), targets(&skips));
        return Verdict::fail(notes).with_failed_elements(skips);
    }

    match (data.heading_levels_logical, headings) {
        (Some(false), _) => match data.heading_level_issues.as_deref() {
            Some(issues) if !issues.is_empty() => {
                Verdict::fail(format!("Heading levels do not reflect the content hierarchy: {}", issues.join(", ")))
            }
            _ => Verdict::fail("Heading levels do not reflect the content hierarchy"),
        },
        (Some(true), _) | (None, Some(_)) => Verdict::pass("Heading levels follow a logical hierarchy"),
        (None, None) => Verdict::not_tested("Heading levels not tested"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    fn headings(levels: &[u8]) -> ElementData {
        ElementData {
            headings: Some(
                levels
                    .iter()
                    .enumerate()
                    .map(|(i, level)| Heading {
                        selector: format!("h{}:nth-of-type({})", level, i + 1),
                        level: *level,
                        text: format!("Section {}", i + 1),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_heading_may_start_anywhere() {
        let verdict = ContentStructureEvaluator.evaluate(&HEADING_LEVELS, &TestData::default(), &headings(&[2, 3, 3, 2]));
        assert_eq!(verdict.outcome, Outcome::Pass);
    }

    #[test]
    fn test_skipped_level_fails() {
        let verdict = ContentStructureEvaluator.evaluate(&HEADING_LEVELS, &TestData::default(), &headings(&[1, 2, 4, 2]));
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements.len(), 1);
        assert_eq!(verdict.failed_elements[0].issue, "Heading level skips from h2 to h4");
    }

    #[test]
    fn test_going_back_up_is_not_a_skip() {
        assert!(heading_skips(&headings(&[1, 2, 3, 4, 1, 2]).headings.unwrap()).is_empty());
    }

    #[test]
    fn test_reported_illogical_levels_fail() {
        let data = TestData {
            heading_levels_logical: Some(false),
            ..Default::default()
        };
        let verdict = ContentStructureEvaluator.evaluate(&HEADING_LEVELS, &data, &headings(&[1, 2]));
        assert_eq!(verdict.outcome, Outcome::Fail);
    }

    #[test]
    fn test_no_headings_does_not_apply() {
        let data = TestData {
            heading_levels_logical: Some(false),
            ..Default::default()
        };
        let verdict = ContentStructureEvaluator.evaluate(&HEADING_LEVELS, &data, &headings(&[]));
        assert_eq!(verdict.outcome, Outcome::Dna);
    }

    #[test]
    fn test_empty_heading_fails_purpose() {
        let mut els = headings(&[1, 2]);
        if let Some(list) = els.headings.as_mut() {
            list[1].text = " x ".to_string();
        }
        let verdict = ContentStructureEvaluator.evaluate(&HEADING_PURPOSE, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements[0].issue, "Heading is empty");
    }
}
