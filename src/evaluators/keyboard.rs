// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard access and focus evaluator - WCAG 2.1.1, 2.1.2, 2.1.4, 2.4.3, 2.4.7, 3.2.1
//!
//! Checks:
//! - Interactive elements and user controls are keyboard operable
//! - Focus never becomes trapped (critical)
//! - Focus is visible, orderly and does not change context
//! - Single character shortcuts can be turned off or remapped

use super::{either, judge_elements, judge_signal, none_present, targets, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, InteractiveElement, TestData};
use crate::model::{FailedElement, TestId};

/// Keyboard access and focus evaluator
pub struct KeyboardEvaluator;

const KEYBOARD_ACCESS: TestId = TestId::new(4, 'A');
const USER_CONTROLS: TestId = TestId::new(4, 'B');
const NO_TRAP: TestId = TestId::new(4, 'C');
const FOCUS_VISIBLE: TestId = TestId::new(4, 'D');
const ON_FOCUS: TestId = TestId::new(4, 'E');
const FOCUS_ORDER: TestId = TestId::new(4, 'F');
const SHORTCUTS: TestId = TestId::new(4, 'G');

const TESTS: &[TestId] = &[
    KEYBOARD_ACCESS,
    USER_CONTROLS,
    NO_TRAP,
    FOCUS_VISIBLE,
    ON_FOCUS,
    FOCUS_ORDER,
    SHORTCUTS,
];

const NO_FOCUSABLE: &str = "No focusable elements found on the page";

impl Evaluator for KeyboardEvaluator {
    fn name(&self) -> &str {
        "Keyboard Access and Focus"
    }

    fn category(&self) -> u8 {
        4
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        let interactive = elements.elements.as_deref();
        match *test {
            KEYBOARD_ACCESS => judge_elements(
                interactive,
                |el| el.is_interactive,
                keyboard_access_failure,
                &Wording {
                    not_tested: "Keyboard access not tested",
                    absent: "No interactive elements found on the page",
                    passed: "All functionality is accessible via keyboard",
                    failed: "element(s) not keyboard accessible",
                },
            ),
            USER_CONTROLS => judge_signal(
                data.has_user_controls,
                data.controls_keyboard_accessible,
                &Wording {
                    not_tested: "User controls not tested",
                    absent: "No user controls for video, audio or animation found",
                    passed: "All user controls are keyboard accessible",
                    failed: "User controls require mouse interaction",
                },
            ),
            NO_TRAP => evaluate_keyboard_traps(interactive, elements.keyboard_traps.as_deref()),
            FOCUS_VISIBLE => judge_elements(
                interactive,
                |el| el.focusable,
                |el| {
                    (!el.has_focus_indicator)
                        .then(|| FailedElement::new(&el.selector, "No visible focus indicator").with_wcag("2.4.7"))
                },
                &Wording {
                    not_tested: "Focus visibility not tested",
                    absent: NO_FOCUSABLE,
                    passed: "All focusable elements have visible focus indicators",
                    failed: "element(s) missing focus indicator",
                },
            ),
            ON_FOCUS => {
                if none_present(interactive, is_focusable) {
                    return Verdict::dna(NO_FOCUSABLE);
                }
                match data.context_change_on_focus {
                    Some(true) => {
                        let details = data.context_change_details.as_deref().unwrap_or("no details recorded");
                        Verdict::fail(format!("Unexpected context change on focus: {}", details))
                    }
                    Some(false) => Verdict::pass("No unexpected context changes on focus"),
                    None => Verdict::not_tested("Context changes on focus not tested"),
                }
            }
            FOCUS_ORDER => {
                if none_present(interactive, is_focusable) {
                    return Verdict::dna(NO_FOCUSABLE);
                }
                match data.focus_order_logical {
                    Some(true) => Verdict::pass("Focus order follows the logical reading sequence"),
                    Some(false) => match data.focus_order_issues.as_deref() {
                        Some(issues) => Verdict::fail(format!("Focus order does not match logical sequence: {}", issues)),
                        None => Verdict::fail("Focus order does not match logical sequence"),
                    },
                    None => Verdict::not_tested("Focus order not tested"),
                }
            }
            SHORTCUTS => judge_signal(
                data.has_single_char_shortcuts,
                either(data.shortcuts_can_be_disabled, data.shortcuts_can_be_remapped),
                &Wording {
                    not_tested: "Character key shortcuts not tested",
                    absent: "No single character shortcuts implemented",
                    passed: "Single character shortcuts can be turned off or remapped",
                    failed: "Single character shortcuts cannot be turned off or remapped",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 4 test", test)),
        }
    }
}

fn keyboard_access_failure(el: &InteractiveElement) -> Option<FailedElement> {
    let issue = if !el.keyboard_accessible {
        "Not operable through the keyboard".to_string()
    } else if let Some(tabindex) = el.tabindex.filter(|t| *t < 0) {
        format!("Removed from the tab order (tabindex={})", tabindex)
    } else {
        return None;
    };
    Some(FailedElement::new(&el.selector, &issue).with_wcag("2.1.1"))
}

fn is_focusable(el: &InteractiveElement) -> bool {
    el.focusable || el.is_interactive
}

/// A trap anywhere fails the page. Traps cannot exist without focusable elements.
fn evaluate_keyboard_traps(interactive: Option<&[InteractiveElement]>, traps: Option<&[String]>) -> Verdict {
    if none_present(interactive, is_focusable) {
        return Verdict::dna(NO_FOCUSABLE);
    }

    match traps {
        None => Verdict::not_tested("Keyboard trap testing not performed"),
        Some([]) => Verdict::pass("No keyboard traps detected"),
        Some(traps) => {
            let failed: Vec<FailedElement> = traps
                .iter()
                .map(|selector| FailedElement::new(selector, "Keyboard focus is trapped").with_wcag("2.1.2"))
                .collect();
            Verdict::fail(format!("Keyboard trap(s) found at: {}", targets(&failed))).with_failed_elements(failed)
        }
    }
}
