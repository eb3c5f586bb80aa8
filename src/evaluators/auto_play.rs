// SPDX-License-Identifier: PMPL-1.0-or-later
//! Auto-playing and auto-updating content - WCAG 1.4.2 Audio Control (Level A), 2.2.2 Pause, Stop, Hide (Level A)

use super::{either, judge_signal, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::TestId;

/// Auto-playing content evaluator
pub struct AutoPlayEvaluator;

const AUDIO_CONTROL: TestId = TestId::new(2, 'A');
const PAUSE_STOP_HIDE: TestId = TestId::new(2, 'B');

const TESTS: &[TestId] = &[AUDIO_CONTROL, PAUSE_STOP_HIDE];

impl Evaluator for AutoPlayEvaluator {
    fn name(&self) -> &str {
        "Auto-Playing and Auto-Updating Content"
    }

    fn category(&self) -> u8 {
        2
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, _elements: &ElementData) -> Verdict {
        match *test {
            AUDIO_CONTROL => judge_signal(
                data.has_auto_playing_audio,
                either(data.auto_audio_stops_within_3s, data.audio_can_be_controlled),
                &Wording {
                    not_tested: "Auto-playing audio not checked",
                    absent: "No audio plays automatically",
                    passed: "Auto-playing audio stops within 3 seconds or can be controlled",
                    failed: "Auto-playing audio cannot be paused, stopped or muted",
                },
            ),
            PAUSE_STOP_HIDE => judge_signal(
                data.has_moving_content,
                data.moving_content_can_be_paused,
                &Wording {
                    not_tested: "Moving content not checked",
                    absent: "No moving, blinking, scrolling or auto-updating content",
                    passed: "Moving content can be paused, stopped or hidden",
                    failed: "Moving content cannot be paused, stopped or hidden",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 2 test", test)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    fn audio(plays: Option<bool>, stops: Option<bool>, controls: Option<bool>) -> Outcome {
        let data = TestData {
            has_auto_playing_audio: plays,
            auto_audio_stops_within_3s: stops,
            audio_can_be_controlled: controls,
            ..Default::default()
        };
        AutoPlayEvaluator.evaluate(&AUDIO_CONTROL, &data, &ElementData::default()).outcome
    }

    #[test]
    fn test_audio_control() {
        assert_eq!(audio(Some(false), Some(false), Some(false)), Outcome::Dna);
        assert_eq!(audio(Some(true), Some(true), None), Outcome::Pass);
        assert_eq!(audio(Some(true), Some(false), Some(true)), Outcome::Pass);
        assert_eq!(audio(Some(true), Some(false), None), Outcome::Fail);
        assert_eq!(audio(Some(true), None, None), Outcome::NotTested);
    }

    #[test]
    fn test_moving_content() {
        let data = TestData {
            has_moving_content: Some(true),
            moving_content_can_be_paused: Some(false),
            ..Default::default()
        };
        let verdict = AutoPlayEvaluator.evaluate(&PAUSE_STOP_HIDE, &data, &ElementData::default());
        assert_eq!(verdict.outcome, Outcome::Fail);
    }
}
