// SPDX-License-Identifier: PMPL-1.0-or-later
//! Synchronized media evaluator - WCAG 1.2.2 (A), 1.2.3 (A), 1.2.4 (AA), 1.2.5 (AA)

use super::{judge_elements, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, Media, MediaKind, TestData};
use crate::model::{FailedElement, TestId};

/// Synchronized media evaluator
pub struct SynchronizedMediaEvaluator;

const CAPTIONS_PRERECORDED: TestId = TestId::new(17, 'A');
const DESCRIPTION_OR_ALTERNATIVE: TestId = TestId::new(17, 'B');
const CAPTIONS_LIVE: TestId = TestId::new(17, 'C');
const AUDIO_DESCRIPTION: TestId = TestId::new(17, 'D');

const TESTS: &[TestId] = &[CAPTIONS_PRERECORDED, DESCRIPTION_OR_ALTERNATIVE, CAPTIONS_LIVE, AUDIO_DESCRIPTION];

const NO_PRERECORDED: &str = "No prerecorded synchronized media";

fn prerecorded(media: &Media) -> bool {
    media.is_prerecorded(MediaKind::Synchronized)
}

impl Evaluator for SynchronizedMediaEvaluator {
    fn name(&self) -> &str {
        "Synchronized Media"
    }

    fn category(&self) -> u8 {
        17
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, _data: &TestData, elements: &ElementData) -> Verdict {
        let media = elements.media.as_deref();
        match *test {
            CAPTIONS_PRERECORDED => judge_elements(
                media,
                prerecorded,
                |m| {
                    let issue = if !m.has_captions {
                        "No captions"
                    } else if m.captions_accurate == Some(false) {
                        "Captions are inaccurate or incomplete"
                    } else {
                        return None;
                    };
                    Some(FailedElement::new(&m.selector, issue).with_wcag("1.2.2"))
                },
                &Wording {
                    not_tested: "Prerecorded captions not tested",
                    absent: NO_PRERECORDED,
                    passed: "All prerecorded synchronized media has accurate captions",
                    failed: "media item(s) with missing or inaccurate captions",
                },
            ),
            DESCRIPTION_OR_ALTERNATIVE => judge_elements(
                media,
                prerecorded,
                |m| {
                    (!m.has_audio_description && !m.has_transcript).then(|| {
                        FailedElement::new(&m.selector, "No audio description or media alternative").with_wcag("1.2.3")
                    })
                },
                &Wording {
                    not_tested: "Audio description or alternative not tested",
                    absent: NO_PRERECORDED,
                    passed: "All prerecorded synchronized media has audio description or an alternative",
                    failed: "media item(s) without audio description or alternative",
                },
            ),
            CAPTIONS_LIVE => judge_elements(
                media,
                Media::is_live_synchronized,
                |m| {
                    (!m.has_captions).then(|| FailedElement::new(&m.selector, "Live media has no captions").with_wcag("1.2.4"))
                },
                &Wording {
                    not_tested: "Live captions not tested",
                    absent: "No live synchronized media",
                    passed: "All live synchronized media has captions",
                    failed: "live media item(s) without captions",
                },
            ),
            AUDIO_DESCRIPTION => judge_elements(
                media,
                prerecorded,
                |m| {
                    (!m.has_audio_description)
                        .then(|| FailedElement::new(&m.selector, "No audio description").with_wcag("1.2.5"))
                },
                &Wording {
                    not_tested: "Audio description not tested",
                    absent: NO_PRERECORDED,
                    passed: "All prerecorded synchronized media has audio description",
                    failed: "media item(s) without audio description",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 17 test", test)),
        }
    }
}
