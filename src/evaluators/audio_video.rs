// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audio-only and video-only - WCAG 1.2.1 Audio-only and Video-only (Prerecorded) (Level A)

use super::{judge_elements, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, MediaKind, TestData};
use crate::model::{FailedElement, TestId};

/// Audio-only and video-only evaluator
pub struct AudioVideoEvaluator;

const AUDIO_ONLY: TestId = TestId::new(16, 'A');
const VIDEO_ONLY: TestId = TestId::new(16, 'B');

const TESTS: &[TestId] = &[AUDIO_ONLY, VIDEO_ONLY];

impl Evaluator for AudioVideoEvaluator {
    fn name(&self) -> &str {
        "Audio-Only and Video-Only"
    }

    fn category(&self) -> u8 {
        16
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, _data: &TestData, elements: &ElementData) -> Verdict {
        let media = elements.media.as_deref();
        match *test {
            AUDIO_ONLY => judge_elements(
                media,
                |m| m.is_prerecorded(MediaKind::AudioOnly),
                |m| {
                    (!m.has_transcript)
                        .then(|| FailedElement::new(&m.selector, "Audio-only content has no transcript").with_wcag("1.2.1"))
                },
                &Wording {
                    not_tested: "Audio-only content not tested",
                    absent: "No prerecorded audio-only content",
                    passed: "All prerecorded audio-only content has a transcript",
                    failed: "audio-only item(s) without a transcript",
                },
            ),
            VIDEO_ONLY => judge_elements(
                media,
                |m| m.is_prerecorded(MediaKind::VideoOnly),
                |m| {
                    (!m.has_transcript && !m.has_audio_description).then(|| {
                        FailedElement::new(&m.selector, "Video-only content has no text or audio alternative").with_wcag("1.2.1")
                    })
                },
                &Wording {
                    not_tested: "Video-only content not tested",
                    absent: "No prerecorded video-only content",
                    passed: "All prerecorded video-only content has an alternative",
                    failed: "video-only item(s) without an alternative",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 16 test", test)),
        }
    }
}
