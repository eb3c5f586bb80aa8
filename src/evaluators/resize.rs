// SPDX-License-Identifier: PMPL-1.0-or-later
//! Resize text - WCAG 1.4.4 Resize Text (Level AA)

use super::{judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// Text resize evaluator
pub struct ResizeTextEvaluator;

const RESIZE_TEXT: TestId = TestId::new(18, 'A');

impl Evaluator for ResizeTextEvaluator {
    fn name(&self) -> &str {
        "Resize Text"
    }

    fn category(&self) -> u8 {
        18
    }

    fn tests(&self) -> &[TestId] {
        &[RESIZE_TEXT]
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        if *test != RESIZE_TEXT {
            return Verdict::not_tested(format!("{} is not a category 18 test", test));
        }

        // Lost content fails even when the text itself scales
        let satisfied = match (data.text_resizable, data.content_lost_on_resize) {
            (Some(false), _) | (_, Some(true)) => Some(false),
            (Some(true), _) => Some(true),
            (None, _) => None,
        };
        judge_signal(
            data.has_text,
            satisfied,
            &Wording {
                not_tested: "Text resizing not tested",
                absent: "No text on the page",
                passed: "Text resizes to 200% without loss of content or functionality",
                failed: "Content or functionality is lost when text is resized to 200%",
            },
        )
    }
}
