// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form evaluator - WCAG 1.3.1, 1.3.5, 2.4.6, 3.2.2, 3.3.1-3.3.4, 4.1.2
//!
//! Checks form field labelling, name/role/state exposure, input purpose,
//! context changes on input and the error handling tests.

use super::{judge_elements, judge_signal, none_present, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, FormField, TestData};
use crate::model::{FailedElement, TestId};

/// Form evaluator
pub struct FormEvaluator;

const LABELS_OR_INSTRUCTIONS: TestId = TestId::new(5, 'A');
const LABELS_DESCRIPTIVE: TestId = TestId::new(5, 'B');
const PROGRAMMATIC_LABELS: TestId = TestId::new(5, 'C');
const ON_INPUT: TestId = TestId::new(5, 'D');
const NAME_ROLE_STATE: TestId = TestId::new(5, 'E');
const ERROR_IDENTIFICATION: TestId = TestId::new(5, 'F');
const ERROR_SUGGESTION: TestId = TestId::new(5, 'G');
const ERROR_PREVENTION: TestId = TestId::new(5, 'H');
const INPUT_PURPOSE: TestId = TestId::new(5, 'I');

const TESTS: &[TestId] = &[
    LABELS_OR_INSTRUCTIONS,
    LABELS_DESCRIPTIVE,
    PROGRAMMATIC_LABELS,
    ON_INPUT,
    NAME_ROLE_STATE,
    ERROR_IDENTIFICATION,
    ERROR_SUGGESTION,
    ERROR_PREVENTION,
    INPUT_PURPOSE,
];

const NO_FIELDS: &str = "No form fields found";

impl Evaluator for FormEvaluator {
    fn name(&self) -> &str {
        "Forms"
    }

    fn category(&self) -> u8 {
        5
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, data: &TestData, elements: &ElementData) -> Verdict {
        let fields = elements.form_fields.as_deref();
        match *test {
            LABELS_OR_INSTRUCTIONS => judge_elements(
                fields,
                |_| true,
                |field| {
                    (!field.has_visual_label && !field.has_instruction)
                        .then(|| FailedElement::new(&field.selector, "No visual label or instructions").with_wcag("3.3.2"))
                },
                &Wording {
                    not_tested: "Form labels not tested",
                    absent: NO_FIELDS,
                    passed: "All form fields have labels or instructions",
                    failed: "field(s) missing labels or instructions",
                },
            ),
            LABELS_DESCRIPTIVE => {
                if none_present(fields, |_: &FormField| true) {
                    return Verdict::dna(NO_FIELDS);
                }
                match data.labels_descriptive {
                    Some(true) => Verdict::pass("Form labels are sufficiently descriptive"),
                    Some(false) => match data.non_descriptive_labels.as_deref() {
                        Some(labels) if !labels.is_empty() => {
                            Verdict::fail(format!("Some form labels are not descriptive: {}", labels.join(", ")))
                        }
                        _ => Verdict::fail("Some form labels are not descriptive"),
                    },
                    None => Verdict::not_tested("Label descriptiveness not tested"),
                }
            }
            PROGRAMMATIC_LABELS => judge_elements(
                fields,
                |_| true,
                |field| {
                    (!field.has_programmatic_label)
                        .then(|| FailedElement::new(&field.selector, "No programmatically associated label").with_wcag("1.3.1"))
                },
                &Wording {
                    not_tested: "Programmatic labels not tested",
                    absent: NO_FIELDS,
                    passed: "All form fields have programmatic labels",
                    failed: "field(s) lack programmatic labels",
                },
            ),
            ON_INPUT => {
                if none_present(fields, |_: &FormField| true) {
                    return Verdict::dna(NO_FIELDS);
                }
                match data.unexpected_change_on_input {
                    Some(true) => {
                        let details = data.change_details.as_deref().unwrap_or("no details recorded");
                        Verdict::fail(format!("Unexpected context change on input: {}", details))
                    }
                    Some(false) => Verdict::pass("No unexpected context changes on input"),
                    None => Verdict::not_tested("Context changes on input not tested"),
                }
            }
            NAME_ROLE_STATE => judge_elements(
                fields,
                |_| true,
                missing_name_role_state,
                &Wording {
                    not_tested: "Name, role and state not tested",
                    absent: NO_FIELDS,
                    passed: "All form elements expose name, role and state",
                    failed: "element(s) missing name, role or state",
                },
            ),
            ERROR_IDENTIFICATION => judge_signal(
                data.has_error_conditions,
                data.errors_identified,
                &Wording {
                    not_tested: "Error identification not tested",
                    absent: "No error conditions to test",
                    passed: "Errors are identified and described in text",
                    failed: "Errors are not identified in text",
                },
            ),
            ERROR_SUGGESTION => judge_signal(
                data.has_detectable_errors,
                data.provides_suggestions,
                &Wording {
                    not_tested: "Error suggestions not tested",
                    absent: "No automatically detectable errors",
                    passed: "Error correction suggestions are provided",
                    failed: "No suggestions provided for correctable errors",
                },
            ),
            ERROR_PREVENTION => judge_signal(
                data.has_legal_commitments,
                data.has_reversible_or_reviewable,
                &Wording {
                    not_tested: "Error prevention not tested",
                    absent: "No legal, financial or data transactions",
                    passed: "Submissions are reversible, checked or confirmed",
                    failed: "No error prevention mechanism for legal, financial or data submissions",
                },
            ),
            INPUT_PURPOSE => judge_elements(
                fields,
                |field| field.collects_personal_info,
                |field| {
                    (!field.has_autocomplete || !field.autocomplete_valid)
                        .then(|| FailedElement::new(&field.selector, "Missing or invalid autocomplete value").with_wcag("1.3.5"))
                },
                &Wording {
                    not_tested: "Input purpose not tested",
                    absent: "No fields collect information about the user",
                    passed: "All personal information fields have valid autocomplete",
                    failed: "field(s) missing valid autocomplete",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 5 test", test)),
        }
    }
}

fn missing_name_role_state(field: &FormField) -> Option<FailedElement> {
    let missing: Vec<&str> = [
        (!field.has_name, "name"),
        (!field.has_role, "role"),
        (!field.exposes_states, "state"),
    ]
    .into_iter()
    .filter_map(|(is_missing, what)| is_missing.then_some(what))
    .collect();

    if missing.is_empty() {
        return None;
    }
    Some(FailedElement::new(&field.selector, &format!("Missing {}", missing.join(", "))).with_wcag("4.1.2"))
}
