// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page titles and frames - WCAG 2.4.2 Page Titled (Level A), 4.1.2 Name, Role, Value (Level A)

use super::{judge_elements, trimmed, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, Frame, TestData};
use crate::model::{FailedElement, TestId};

/// Page title and frame title evaluator
pub struct TitleEvaluator;

const TITLE_PRESENT: TestId = TestId::new(12, 'A');
const TITLE_DESCRIPTIVE: TestId = TestId::new(12, 'B');
const FRAME_TITLES: TestId = TestId::new(12, 'C');
const IFRAME_TITLES: TestId = TestId::new(12, 'D');

const TESTS: &[TestId] = &[TITLE_PRESENT, TITLE_DESCRIPTIVE, FRAME_TITLES, IFRAME_TITLES];

impl Evaluator for TitleEvaluator {
    fn name(&self) -> &str {
        "Page Titles and Frames"
    }

    fn category(&self) -> u8 {
        12
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        match *test {
            TITLE_PRESENT => evaluate_title_present(data),
            TITLE_DESCRIPTIVE => match data.title_descriptive {
                Some(true) => Verdict::pass("Page title describes the page"),
                Some(false) => Verdict::fail(format!(
                    "Page title \"{}\" does not describe the page",
                    trimmed(data.page_title.as_deref())
                )),
                None => Verdict::not_tested("Page title descriptiveness not tested"),
            },
            FRAME_TITLES => judge_elements(
                elements.frames.as_deref(),
                |_| true,
                |frame| {
                    (!frame.has_title || has_blank_title(frame))
                        .then(|| FailedElement::new(&frame.selector, "Frame has no title").with_wcag("4.1.2"))
                },
                &Wording {
                    not_tested: "Frame titles not tested",
                    absent: "No frames on the page",
                    passed: "All frames have titles",
                    failed: "frame(s) without a title",
                },
            ),
            IFRAME_TITLES => judge_elements(
                elements.iframes.as_deref(),
                |_| true,
                |frame| {
                    let issue = if !frame.has_title || has_blank_title(frame) {
                        "iframe has no title"
                    } else if !frame.title_descriptive {
                        "iframe title does not describe its content"
                    } else {
                        return None;
                    };
                    Some(FailedElement::new(&frame.selector, issue).with_wcag("4.1.2"))
                },
                &Wording {
                    not_tested: "iframe titles not tested",
                    absent: "No iframes on the page",
                    passed: "All iframes have descriptive titles",
                    failed: "iframe(s) with a missing or non-descriptive title",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 12 test", test)),
        }
    }
}

/// A title attribute that is present but only whitespace
fn has_blank_title(frame: &Frame) -> bool {
    frame.title.as_deref().map(|t| t.trim().is_empty()).unwrap_or(false)
}

/// Exactly one non-empty `<title>`.
///
/// Either input alone can decide the test; a missing title text is not an
/// empty title.
fn evaluate_title_present(data: &TestData) -> Verdict {
    let title = data.page_title.as_deref().map(str::trim);
    match (data.title_count, title) {
        (None, None) => Verdict::not_tested("Page title not tested"),
        (Some(0), _) | (_, Some("")) => Verdict::fail("Page has no title")
            .with_failed_elements(vec![FailedElement::new("head > title", "Missing or empty title").with_wcag("2.4.2")]),
        (Some(count), _) if count > 1 => Verdict::fail(format!("Page has {} title elements", count))
            .with_failed_elements(vec![FailedElement::new("head > title", "Multiple title elements").with_wcag("2.4.2")]),
        (_, Some(title)) => Verdict::pass(format!("Page title present: \"{}\"", title)),
        (Some(_), None) => Verdict::pass("One title element present"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use serde_json::json;

    fn title(count: Option<u32>, text: Option<&str>) -> Outcome {
        let data = TestData {
            title_count: count,
            page_title: text.map(String::from),
            ..Default::default()
        };
        TitleEvaluator.evaluate(&TITLE_PRESENT, &data, &ElementData::default()).outcome
    }

    #[test]
    fn test_title_present() {
        assert_eq!(title(None, None), Outcome::NotTested);
        assert_eq!(title(Some(1), Some("Checkout - Example Store")), Outcome::Pass);
        assert_eq!(title(None, Some("Home")), Outcome::Pass);
        assert_eq!(title(Some(1), Some("   ")), Outcome::Fail);
        assert_eq!(title(Some(2), Some("Home")), Outcome::Fail);
        assert_eq!(title(Some(0), None), Outcome::Fail);
        assert_eq!(title(Some(1), None), Outcome::Pass);
        assert_eq!(title(Some(3), None), Outcome::Fail);
        assert_eq!(title(None, Some("")), Outcome::Fail);
    }

    #[test]
    fn test_frames() {
        let els: ElementData = serde_json::from_value(json!({
            "frames": [{ "selector": "frame#nav", "hasTitle": true, "title": " " }],
            "iframes": [
                { "selector": "iframe.map", "hasTitle": true, "title": "Store location map" },
                { "selector": "iframe.ad", "hasTitle": true, "title": "frame", "titleDescriptive": false }
            ]
        }))
        .unwrap();
        let frames = TitleEvaluator.evaluate(&FRAME_TITLES, &TestData::default(), &els);
        assert_eq!(frames.outcome, Outcome::Fail);

        let iframes = TitleEvaluator.evaluate(&IFRAME_TITLES, &TestData::default(), &els);
        assert_eq!(iframes.outcome, Outcome::Fail);
        assert_eq!(iframes.failed_elements[0].issue, "iframe title does not describe its content");
    }

    #[test]
    fn test_no_iframes_does_not_apply() {
        let els: ElementData = serde_json::from_value(json!({ "iframes": [] })).unwrap();
        let verdict = TitleEvaluator.evaluate(&IFRAME_TITLES, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Dna);
    }
}
