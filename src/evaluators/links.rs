// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link and button purpose evaluator - WCAG 2.4.4 Link Purpose (Level A), 4.1.2 Name, Role, Value (Level A)
//!
//! A link is ambiguous when its visible text is empty or generic and
//! nothing else (accessible name, title or programmatic context) tells the
//! user where it goes.

use super::{judge_elements, trimmed, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, Link, TestData};
use crate::model::{FailedElement, TestId};

/// Link and button evaluator
pub struct LinkEvaluator;

const LINK_PURPOSE: TestId = TestId::new(6, 'A');
const BUTTON_PURPOSE: TestId = TestId::new(6, 'B');

const TESTS: &[TestId] = &[LINK_PURPOSE, BUTTON_PURPOSE];

/// Link texts that never describe a destination on their own
pub const AMBIGUOUS_LINK_TEXT: &[&str] = &["click here", "read more", "more", "link", "here"];

/// Accessible-name overrides and titles must be longer than this
const MIN_OVERRIDE_LEN: usize = 2;

impl Evaluator for LinkEvaluator {
    fn name(&self) -> &str {
        "Links and Buttons"
    }

    fn category(&self) -> u8 {
        6
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, _data: &TestData, elements: &ElementData) -> Verdict {
        match *test {
            LINK_PURPOSE => judge_elements(
                elements.links.as_deref(),
                |_| true,
                |link| {
                    is_ambiguous(link).then(|| {
                        FailedElement::new(&link.selector, &format!("Link text \"{}\" does not describe its purpose", link.text.trim()))
                            .with_wcag("2.4.4")
                    })
                },
                &Wording {
                    not_tested: "Link purpose not tested",
                    absent: "No links found on the page",
                    passed: "All link purposes are determinable from text or context",
                    failed: "link(s) have ambiguous purpose",
                },
            ),
            BUTTON_PURPOSE => judge_elements(
                elements.buttons.as_deref(),
                |_| true,
                |button| {
                    trimmed(button.accessible_name.as_deref())
                        .is_empty()
                        .then(|| FailedElement::new(&button.selector, "Button has no accessible name").with_wcag("4.1.2"))
                },
                &Wording {
                    not_tested: "Button purpose not tested",
                    absent: "No buttons found on the page",
                    passed: "All buttons have accessible names",
                    failed: "button(s) without an accessible name",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 6 test", test)),
        }
    }
}

/// Whether the purpose of a link cannot be determined
pub fn is_ambiguous(link: &Link) -> bool {
    let text = link.text.trim().to_lowercase();
    let descriptive_text = !text.is_empty() && !AMBIGUOUS_LINK_TEXT.contains(&text.as_str());
    let has_label = trimmed(link.aria_label.as_deref()).chars().count() > MIN_OVERRIDE_LEN;
    let has_title = trimmed(link.title.as_deref()).chars().count() > MIN_OVERRIDE_LEN;

    !descriptive_text && !has_label && !has_title && !link.programmatic_context
}
