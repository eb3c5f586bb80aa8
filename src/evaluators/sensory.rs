// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sensory characteristics and contrast evaluator - WCAG 1.3.3, 1.4.1, 1.4.3, 1.4.11
//!
//! Contrast ratios are measured upstream; this evaluator only compares them
//! against the WCAG minimums:
//! - normal text: 4.5:1
//! - large text (18pt, or 14pt bold): 3:1
//! - UI components and graphical objects: 3:1

use super::{judge_elements, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, NonTextElement, TestData, TextElement};
use crate::model::{FailedElement, TestId};

/// Sensory characteristics and contrast evaluator
pub struct SensoryEvaluator;

const SENSORY: TestId = TestId::new(13, 'A');
const USE_OF_COLOR: TestId = TestId::new(13, 'B');
const TEXT_CONTRAST: TestId = TestId::new(13, 'C');
const NON_TEXT_CONTRAST: TestId = TestId::new(13, 'D');

const TESTS: &[TestId] = &[SENSORY, USE_OF_COLOR, TEXT_CONTRAST, NON_TEXT_CONTRAST];

/// Minimum contrast for normal text
pub const NORMAL_TEXT_RATIO: f64 = 4.5;
/// Minimum contrast for large text
pub const LARGE_TEXT_RATIO: f64 = 3.0;
/// Minimum contrast for UI components and graphical objects
pub const NON_TEXT_RATIO: f64 = 3.0;

impl Evaluator for SensoryEvaluator {
    fn name(&self) -> &str {
        "Sensory Characteristics and Contrast"
    }

    fn category(&self) -> u8 {
        13
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        match *test {
            SENSORY => {
                if data.uses_sensory_characteristics == Some(false) {
                    return Verdict::dna("No instructions refer to sensory characteristics");
                }
                match data.sensory_instructions_accessible {
                    Some(true) => Verdict::pass("Sensory instructions include non-sensory references"),
                    Some(false) => listed_failure(
                        "Instructions rely solely on sensory characteristics",
                        data.sensory_only_instructions.as_deref(),
                        "Instruction relies on shape, size, location or sound",
                        "1.3.3",
                    ),
                    None => Verdict::not_tested("Sensory characteristics not tested"),
                }
            }
            USE_OF_COLOR => {
                if data.uses_color_to_convey == Some(false) {
                    return Verdict::dna("Color is not used to convey information");
                }
                match data.color_has_alternative {
                    Some(true) => Verdict::pass("Color information has a non-color alternative"),
                    Some(false) => listed_failure(
                        "Color is the only means of conveying information",
                        data.color_only_elements.as_deref(),
                        "Information conveyed by color alone",
                        "1.4.1",
                    ),
                    None => Verdict::not_tested("Use of color not tested"),
                }
            }
            TEXT_CONTRAST => {
                let texts = elements.text_elements.as_deref();
                if unmeasured(texts, |t| t.contrast_ratio) {
                    return Verdict::not_tested("No text element has a measured contrast ratio");
                }
                judge_elements(
                    texts,
                    |_| true,
                    text_contrast_failure,
                    &Wording {
                        not_tested: "Text contrast not tested",
                        absent: "No text elements to test",
                        passed: "All text meets minimum contrast requirements",
                        failed: "text element(s) fail contrast",
                    },
                )
            }
            NON_TEXT_CONTRAST => {
                let combined: Option<Vec<&NonTextElement>> =
                    match (elements.ui_components.as_deref(), elements.graphical_objects.as_deref()) {
                        (None, None) => None,
                        (ui, graphics) => Some(ui.unwrap_or_default().iter().chain(graphics.unwrap_or_default()).collect()),
                    };
                if unmeasured(combined.as_deref(), |el| el.contrast_ratio) {
                    return Verdict::not_tested("No UI component or graphic has a measured contrast ratio");
                }
                judge_elements(
                    combined.as_deref(),
                    |_| true,
                    |el| non_text_contrast_failure(el),
                    &Wording {
                        not_tested: "Non-text contrast not tested",
                        absent: "No UI components or graphical objects to test",
                        passed: "All UI components and graphics meet 3:1 contrast",
                        failed: "element(s) fail 3:1 contrast",
                    },
                )
            }
            _ => Verdict::not_tested(format!("{} is not a category 13 test", test)),
        }
    }
}

/// Required ratio for a text element
pub fn required_text_ratio(text: &TextElement) -> f64 {
    if text.is_large() {
        LARGE_TEXT_RATIO
    } else {
        NORMAL_TEXT_RATIO
    }
}

fn format_ratio(ratio: f64) -> String {
    format!("{}:1", ratio)
}

/// A non-empty collection in which nothing was measured
fn unmeasured<T>(items: Option<&[T]>, ratio: impl Fn(&T) -> Option<f64>) -> bool {
    matches!(items, Some(items) if !items.is_empty() && items.iter().all(|item| ratio(item).is_none()))
}

fn text_contrast_failure(text: &TextElement) -> Option<FailedElement> {
    let ratio = text.contrast_ratio?;
    let required = required_text_ratio(text);
    if ratio >= required || text.is_disabled || text.is_decorative {
        return None;
    }
    Some(
        FailedElement::new(&text.selector, "Text contrast below minimum")
            .with_wcag("1.4.3")
            .with_measure(&format_ratio(required), &format!("{:.2}:1", ratio)),
    )
}

fn non_text_contrast_failure(el: &NonTextElement) -> Option<FailedElement> {
    let ratio = el.contrast_ratio?;
    if ratio >= NON_TEXT_RATIO || !el.is_required || el.is_disabled {
        return None;
    }
    Some(
        FailedElement::new(&el.selector, "Non-text contrast below 3:1")
            .with_wcag("1.4.11")
            .with_measure(&format_ratio(NON_TEXT_RATIO), &format!("{:.2}:1", ratio)),
    )
}

/// FAIL whose notes and failed elements list the reported offenders
fn listed_failure(summary: &str, offenders: Option<&[String]>, issue: &str, wcag: &str) -> Verdict {
    match offenders {
        Some(list) if !list.is_empty() => {
            let failed = list
                .iter()
                .map(|target| FailedElement::new(target, issue).with_wcag(wcag))
                .collect();
            Verdict::fail(format!("{}: {}", summary, list.join(", "))).with_failed_elements(failed)
        }
        _ => Verdict::fail(summary),
    }
}
