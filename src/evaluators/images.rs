// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image evaluator - WCAG 1.1.1 Non-text Content (Level A), 1.4.5 Images of Text (Level AA), 4.1.2
//!
//! Checks:
//! - Meaningful images have a descriptive text alternative
//! - Decorative images are hidden from assistive technology
//! - CAPTCHAs offer an alternative form
//! - Images of text are essential or customizable
//! - Functional images expose role, name and state

use super::{judge_elements, judge_signal, trimmed, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, Image, TestData};
use crate::model::{FailedElement, TestId};

/// Image evaluator
pub struct ImageEvaluator;

const MEANINGFUL: TestId = TestId::new(7, 'A');
const DECORATIVE: TestId = TestId::new(7, 'B');
const CAPTCHA: TestId = TestId::new(7, 'C');
const IMAGES_OF_TEXT: TestId = TestId::new(7, 'D');
const FUNCTIONAL: TestId = TestId::new(7, 'E');

const TESTS: &[TestId] = &[MEANINGFUL, DECORATIVE, CAPTCHA, IMAGES_OF_TEXT, FUNCTIONAL];

impl Evaluator for ImageEvaluator {
    fn name(&self) -> &str {
        "Images"
    }

    fn category(&self) -> u8 {
        7
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        let images = elements.images.as_deref();
        match *test {
            MEANINGFUL => judge_elements(
                images,
                |img| img.is_meaningful,
                meaningful_failure,
                &Wording {
                    not_tested: "Meaningful images not tested",
                    absent: "No meaningful images found",
                    passed: "All meaningful images have descriptive text alternatives",
                    failed: "image(s) missing a descriptive text alternative",
                },
            ),
            DECORATIVE => judge_elements(
                images,
                |img| img.is_decorative,
                decorative_failure,
                &Wording {
                    not_tested: "Decorative images not tested",
                    absent: "No decorative images found",
                    passed: "All decorative images are hidden from assistive technology",
                    failed: "decorative image(s) exposed to assistive technology",
                },
            ),
            CAPTCHA => judge_signal(
                data.has_captcha,
                data.captcha_has_alternative,
                &Wording {
                    not_tested: "CAPTCHA not tested",
                    absent: "No CAPTCHA on the page",
                    passed: "CAPTCHA provides an alternative form",
                    failed: "CAPTCHA has no alternative form",
                },
            ),
            IMAGES_OF_TEXT => judge_elements(
                images,
                |img| img.contains_text,
                |img| {
                    (!img.text_image_essential && !img.text_image_customizable).then(|| {
                        FailedElement::new(&img.selector, "Image of text is neither essential nor customizable").with_wcag("1.4.5")
                    })
                },
                &Wording {
                    not_tested: "Images of text not tested",
                    absent: "No images of text found",
                    passed: "All images of text are essential or customizable",
                    failed: "image(s) of text could be real text",
                },
            ),
            FUNCTIONAL => judge_elements(
                images,
                Image::is_functional,
                |img| {
                    (!img.has_role || !img.has_name || !img.has_state)
                        .then(|| FailedElement::new(&img.selector, "Functional image is missing role, name or state").with_wcag("4.1.2"))
                },
                &Wording {
                    not_tested: "Functional images not tested",
                    absent: "No functional images found",
                    passed: "All functional images expose role, name and state",
                    failed: "functional image(s) missing role, name or state",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 7 test", test)),
        }
    }
}

fn meaningful_failure(img: &Image) -> Option<FailedElement> {
    let issue = if !img.has_alt {
        "Meaningful image has no text alternative"
    } else if !img.alt_descriptive {
        "Text alternative does not describe the image"
    } else {
        return None;
    };

    let mut failed = FailedElement::new(&img.selector, issue).with_wcag("1.1.1");
    if let Some(alt) = &img.alt {
        failed = failed.with_html(&format!("<img alt=\"{}\">", alt));
    }
    Some(failed)
}

fn decorative_failure(img: &Image) -> Option<FailedElement> {
    let has_text = !trimmed(img.alt.as_deref()).is_empty();
    let issue = match (has_text, img.focusable) {
        (false, false) => return None,
        (true, false) => "Decorative image has a text alternative",
        (false, true) => "Decorative image receives focus",
        (true, true) => "Decorative image has a text alternative and receives focus",
    };
    Some(FailedElement::new(&img.selector, issue).with_wcag("1.1.1"))
}
