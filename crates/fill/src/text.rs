//! Text filler.

use crate::edit::{DocEdit, FillPlan};
use crate::error::FillError;
use crate::locator;
use crate::splice;
use stencil_doc::Document;
use stencil_types::{FieldValue, PlaceholderKind, TemplateSchema, ValueMap};

/// Resolve every text-kind field that has data: scalars become one
/// exact replacement, list values are spliced against the field's
/// headers and replaced in one operation. Fields without data are left
/// for the blanking pass.
pub fn scan(
    doc: &Document,
    schema: &TemplateSchema,
    values: &ValueMap,
) -> Result<FillPlan, FillError> {
    let mut plan = FillPlan::new();

    for field in schema.fields_of(PlaceholderKind::Text) {
        let Some(value) = values.get(&field.name) else {
            continue;
        };
        let token = schema.token_for(&field.name);

        match value {
            FieldValue::Text(text) => {
                if locator::document_contains(doc, &token) {
                    plan.push(DocEdit::ReplaceAll {
                        find: token,
                        replace: text.clone(),
                    });
                }
            }
            FieldValue::TextList(items) => {
                let row: Vec<String> = items.iter().filter(|s| !s.is_empty()).cloned().collect();
                if row.is_empty() {
                    continue;
                }
                push_spliced(&mut plan, doc, token, &[row], &field.splicing);
            }
            FieldValue::TextRows(rows) => {
                let rows: Vec<Vec<String>> =
                    rows.iter().filter(|r| !r.is_empty()).cloned().collect();
                if rows.is_empty() {
                    continue;
                }
                push_spliced(&mut plan, doc, token, &rows, &field.splicing);
            }
            other => {
                return Err(FillError::UnresolvedValueType {
                    field: field.name.clone(),
                    shape: other.shape(),
                    kind: "text",
                });
            }
        }
    }

    Ok(plan)
}

fn push_spliced(
    plan: &mut FillPlan,
    doc: &Document,
    token: String,
    rows: &[Vec<String>],
    headers: &[String],
) {
    if locator::document_contains(doc, &token) {
        let normalized = splice::normalize_rows(rows, headers);
        plan.push(DocEdit::ReplaceAll {
            find: token,
            replace: splice::render_rows(&normalized),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply_plans;
    use stencil_doc::Paragraph;
    use stencil_types::FieldDescriptor;

    fn schema() -> TemplateSchema {
        TemplateSchema::builder()
            .field(FieldDescriptor::text("name"))
            .field(FieldDescriptor::text_spliced(
                "children",
                ["子女姓名", "出身日期"],
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_scalar_replacement() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::from_fragments(["姓名：", "${na", "me}"]));
        let mut values = ValueMap::new();
        values.insert("name".into(), FieldValue::Text("胖胖".into()));

        let plan = scan(&doc, &schema(), &values).unwrap();
        apply_plans(&mut doc, vec![plan]).unwrap();
        assert_eq!(doc.text(), "姓名：胖胖");
    }

    #[test]
    fn test_absent_field_is_skipped() {
        let doc = {
            let mut d = Document::new();
            d.push_paragraph(Paragraph::from_text("${name}"));
            d
        };
        let plan = scan(&doc, &schema(), &ValueMap::new()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_spliced_rows() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::from_text("${children}"));
        let mut values = ValueMap::new();
        values.insert(
            "children".into(),
            FieldValue::TextRows(vec![
                vec!["胖胖".into(), "2012-08-15".into()],
                vec!["嘿嘿".into(), "2012-08-15".into()],
            ]),
        );

        let plan = scan(&doc, &schema(), &values).unwrap();
        apply_plans(&mut doc, vec![plan]).unwrap();
        assert_eq!(
            doc.text(),
            "子女姓名胖胖出身日期2012-08-15子女姓名嘿嘿出身日期2012-08-15"
        );
    }

    #[test]
    fn test_flat_list_becomes_single_row() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::from_text("names: ${children}"));
        let mut values = ValueMap::new();
        values.insert(
            "children".into(),
            FieldValue::TextList(vec!["胖胖".into(), "".into(), "熙熙".into()]),
        );

        // Empty items are dropped before splicing.
        let plan = scan(&doc, &schema(), &values).unwrap();
        apply_plans(&mut doc, vec![plan]).unwrap();
        assert_eq!(doc.text(), "names: 子女姓名胖胖出身日期熙熙");
    }

    #[test]
    fn test_records_value_raises_type_error() {
        let doc = Document::new();
        let mut values = ValueMap::new();
        values.insert("name".into(), FieldValue::Records(vec![]));

        let err = scan(&doc, &schema(), &values).unwrap_err();
        match err {
            FillError::UnresolvedValueType { field, .. } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_list_is_skipped() {
        let doc = Document::new();
        let mut values = ValueMap::new();
        values.insert("children".into(), FieldValue::TextList(vec!["".into()]));
        let plan = scan(&doc, &schema(), &values).unwrap();
        assert!(plan.is_empty());
    }
}
