// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table evaluator - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Data tables need marked-up headers (and, when complex, explicit header
//! associations). Layout tables must not carry data table markup.

use super::{judge_elements, Evaluator, Verdict, Wording};
use crate::evidence::{ElementData, Table, TestData};
use crate::model::{FailedElement, TestId};

/// Table evaluator
pub struct TableEvaluator;

const HEADERS: TestId = TestId::new(14, 'A');
const ASSOCIATIONS: TestId = TestId::new(14, 'B');
const LAYOUT: TestId = TestId::new(14, 'C');

const TESTS: &[TestId] = &[HEADERS, ASSOCIATIONS, LAYOUT];

impl Evaluator for TableEvaluator {
    fn name(&self) -> &str {
        "Tables"
    }

    fn category(&self) -> u8 {
        14
    }

    fn tests(&self) -> &[TestId] {
        TESTS
    }

    fn evaluate(&self, test: &TestId, _data: &TestData, elements: &ElementData) -> Verdict {
        let tables = elements.tables.as_deref();
        match *test {
            HEADERS => judge_elements(
                tables,
                |table| table.is_data_table,
                |table| {
                    let issue = if !table.has_headers {
                        "Data table has no header cells"
                    } else if !table.headers_properly_marked {
                        "Data table headers are not marked up as th"
                    } else {
                        return None;
                    };
                    Some(FailedElement::new(&table.selector, issue).with_wcag("1.3.1"))
                },
                &Wording {
                    not_tested: "Data table headers not tested",
                    absent: "No data tables found",
                    passed: "All data tables have properly marked headers",
                    failed: "data table(s) with missing or improper headers",
                },
            ),
            ASSOCIATIONS => judge_elements(
                tables,
                |table| table.is_data_table && table.is_complex,
                |table| {
                    (!table.has_header_associations || !table.associations_complete).then(|| {
                        FailedElement::new(&table.selector, "Data cells are not associated with their headers").with_wcag("1.3.1")
                    })
                },
                &Wording {
                    not_tested: "Header associations not tested",
                    absent: "No complex data tables found",
                    passed: "All complex data tables associate cells with headers",
                    failed: "complex table(s) with incomplete header associations",
                },
            ),
            LAYOUT => judge_elements(
                tables,
                |table| !table.is_data_table,
                layout_failure,
                &Wording {
                    not_tested: "Layout tables not tested",
                    absent: "No layout tables found",
                    passed: "Layout tables carry no data table markup",
                    failed: "layout table(s) using data table markup",
                },
            ),
            _ => Verdict::not_tested(format!("{} is not a category 14 test", test)),
        }
    }
}

fn layout_failure(table: &Table) -> Option<FailedElement> {
    let markup: Vec<&str> = [
        (table.has_data_table_markup, "data table attributes"),
        (table.has_th_elements, "th elements"),
        (table.has_caption, "caption"),
    ]
    .into_iter()
    .filter_map(|(present, what)| present.then_some(what))
    .collect();

    if markup.is_empty() {
        return None;
    }
    Some(FailedElement::new(&table.selector, &format!("Layout table uses {}", markup.join(", "))).with_wcag("1.3.1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use serde_json::json;

    fn tables(value: serde_json::Value) -> ElementData {
        serde_json::from_value(json!({ "tables": value })).unwrap()
    }

    #[test]
    fn test_layout_tables_only_count_for_layout_test() {
        let els = tables(json!([{ "selector": "table.grid", "isDataTable": false }]));
        assert_eq!(TableEvaluator.evaluate(&HEADERS, &TestData::default(), &els).outcome, Outcome::Dna);
        assert_eq!(TableEvaluator.evaluate(&ASSOCIATIONS, &TestData::default(), &els).outcome, Outcome::Dna);
        assert_eq!(TableEvaluator.evaluate(&LAYOUT, &TestData::default(), &els).outcome, Outcome::Pass);
    }

    #[test]
    fn test_layout_table_with_caption_fails() {
        let els = tables(json!([{ "selector": "table.layout", "isDataTable": false, "hasCaption": true, "hasTHElements": true }]));
        let verdict = TableEvaluator.evaluate(&LAYOUT, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements[0].issue, "Layout table uses th elements, caption");
    }

    #[test]
    fn test_data_table_headers() {
        let els = tables(json!([
            { "selector": "table.prices", "isDataTable": true, "hasHeaders": true, "headersProperlyMarked": true },
            { "selector": "table.stats", "isDataTable": true, "hasHeaders": true, "headersProperlyMarked": false }
        ]));
        let verdict = TableEvaluator.evaluate(&HEADERS, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.failed_elements[0].target, "table.stats");
    }

    #[test]
    fn test_complex_table_associations() {
        let els = tables(json!([{
            "selector": "table.matrix",
            "isDataTable": true,
            "isComplex": true,
            "hasHeaderAssociations": true,
            "associationsComplete": false
        }]));
        let verdict = TableEvaluator.evaluate(&ASSOCIATIONS, &TestData::default(), &els);
        assert_eq!(verdict.outcome, Outcome::Fail);
    }
}
