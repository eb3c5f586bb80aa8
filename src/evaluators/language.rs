// SPDX-License-Identifier: PMPL-1.0-or-later
//! Language evaluator - WCAG 3.1.1 Language of Page (Level A), 3.1.2 Language of Parts (Level AA)

use super::{judge_elements, trimmed, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, TestData};
use crate::model::{FailedElement, TestId};
use regex::Regex;
use std::sync::OnceLock;

/// Language evaluator
pub struct LanguageEvaluator;

const PAGE_LANGUAGE: TestId = TestId::new(11, 'A');
const LANGUAGE_OF_PARTS: TestId = TestId::new(11, 'B');

const TESTS: &[TestId] = &[PAGE_LANGUAGE, LANGUAGE_OF_PARTS];

/// Primary subtag of 2-3 letters followed by optional 1-8 character subtags
const LANG_TAG_PATTERN: &str = r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$";

static LANG_TAG: OnceLock<Option<Regex>> = OnceLock::new();

/// Whether a `lang` value is a well-formed language tag
pub fn is_valid_lang(tag: &str) -> bool {
    LANG_TAG
        .get_or_init(|| Regex::new(LANG_TAG_PATTERN).ok())
        .as_ref()
        .map(|re| re.is_match(tag.trim()))
        .unwrap_or(false)
}

impl Evaluator for LanguageEvaluator {
    fn name(&self) -> &str {
        "Language"
    }

    fn category(&self) -> u8 {
        11
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        match *test {
            // Every page has a default language, so this test always applies
            PAGE_LANGUAGE => match data.page_language.as_deref().map(str::trim) {
                None => Verdict::not_tested("Page language not tested"),
                Some("") => Verdict::fail("Page has no lang attribute")
                    .with_failed_elements(vec![FailedElement::new("html", "Missing lang attribute").with_wcag("3.1.1")]),
                Some(lang) if is_valid_lang(lang) => Verdict::pass(format!("Page language is set to \"{}\"", lang)),
                Some(lang) => Verdict::fail(format!("Page language \"{}\" is not a valid language tag", lang))
                    .with_failed_elements(vec![FailedElement::new("html", "Invalid lang attribute")
                        .with_html(&format!("<html lang=\"{}\">", lang))
                        .with_wcag("3.1.1")]),
            },
            LANGUAGE_OF_PARTS => judge_elements(
                elements.language_parts.as_deref(),
                |_| true,
                |part| {
                    let lang = trimmed(part.lang.as_deref());
                    let issue = if !part.has_lang_attribute || lang.is_empty() {
                        "Passage in another language has no lang attribute"
                    } else if !is_valid_lang(lang) {
                        "Passage has an invalid lang attribute"
                    } else {
                        return None;
                    };
                    Some(FailedElement::new(&part.selector, issue).with_wcag("3.1.2"))
                },
                &Wording {
                    not_tested: "Language of parts not tested",
                    absent: "No passages in another language",
                    passed: "All foreign-language passages declare their language",
                    failed: "passage(s) with missing or invalid lang",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 11 test", test)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use serde_json::json;

    #[test]
    fn test_lang_tags() {
        assert!(is_valid_lang("en"));
        assert!(is_valid_lang("en-US"));
        assert!(is_valid_lang("zh-Hant-TW"));
        assert!(!is_valid_lang("english"));
        assert!(!is_valid_lang("e"));
        assert!(!is_valid_lang("en_US"));
        assert!(!is_valid_lang(""));
    }

    #[test]
    fn test_page_language() {
        let page = |lang: Option<&str>| {
            let data = TestData {
                page_language: lang.map(String::from),
                ..Default::default()
            };
            LanguageEvaluator.evaluate(&PAGE_LANGUAGE, &data, &ElementData::default()).outcome
        };
        assert_eq!(page(None), Outcome::NotTested);
        assert_eq!(page(Some("  ")), Outcome::Fail);
        assert_eq!(page(Some("fr-CA")), Outcome::Pass);
        assert_eq!(page(Some("french")), Outcome::Fail);
    }

    #[test]
    fn test_language_of_parts() {
        let els: ElementData = serde_json::from_value(json!({
            "languageParts": [
                { "selector": "blockquote", "lang": "de", "hasLangAttribute": true },
                { "selector": "p.quote", "hasLangAttribute": false }
            ]
        }))
        .unwrap();
        let verdict = LanguageEvaluator.evaluate(&LANGUAGE_OF_PARTS, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements[0].target, "p.quote");
    }
}
