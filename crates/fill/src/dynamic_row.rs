//! Dynamic row expander.
//!
//! A dynamic-row field carries a list of structured records. Any table
//! row whose text contains at least one member token is a stencil: it is
//! cloned once per record with the matched cells' content replaced by
//! the literal values, the clones are inserted in front of it, and the
//! stencil itself is removed exactly once.

use crate::edit::{DocEdit, FillPlan};
use crate::error::FillError;
use crate::filler::BLANK_SPACER;
use log::warn;
use std::collections::{BTreeMap, HashSet};
use stencil_doc::{Document, Paragraph, Row};
use stencil_types::{FieldValue, PlaceholderKind, TemplateSchema, ValueMap};

/// Resolve every dynamic-row field that has data.
pub fn scan(
    doc: &Document,
    schema: &TemplateSchema,
    values: &ValueMap,
) -> Result<FillPlan, FillError> {
    let mut plan = FillPlan::new();
    let mut claimed = HashSet::new();

    for field in schema.fields_of(PlaceholderKind::DynamicRow) {
        let Some(value) = values.get(&field.name) else {
            continue;
        };
        let FieldValue::Records(records) = value else {
            return Err(FillError::UnresolvedValueType {
                field: field.name.clone(),
                shape: value.shape(),
                kind: "dynamic-row",
            });
        };
        if records.is_empty() {
            continue;
        }

        let elements: Vec<&BTreeMap<String, String>> =
            records.iter().filter(|r| !r.is_empty()).collect();
        let Some(first) = elements.first() else {
            warn!(
                "dynamic-row field '{}' carries only empty records, skipping",
                field.name
            );
            continue;
        };

        // Member names come from the data itself; the declared row
        // shape only drives the blanking pass.
        let members: Vec<String> = first.keys().cloned().collect();
        expand(doc, schema, &members, &elements, &mut claimed, &mut plan);
    }

    Ok(plan)
}

/// Blanking variant: expand each stencil with one synthetic record that
/// maps every declared member to the spacer value. The spacer is blank,
/// so the cells come out empty rather than holding raw tokens.
pub fn blank(doc: &Document, schema: &TemplateSchema) -> Result<FillPlan, FillError> {
    let mut plan = FillPlan::new();
    let mut claimed = HashSet::new();

    for field in schema.fields_of(PlaceholderKind::DynamicRow) {
        let spacer: BTreeMap<String, String> = field
            .row_shape
            .iter()
            .map(|name| (name.clone(), BLANK_SPACER.to_string()))
            .collect();
        expand(
            doc,
            schema,
            &field.row_shape,
            &[&spacer],
            &mut claimed,
            &mut plan,
        );
    }

    Ok(plan)
}

fn expand(
    doc: &Document,
    schema: &TemplateSchema,
    members: &[String],
    elements: &[&BTreeMap<String, String>],
    claimed: &mut HashSet<(usize, usize)>,
    plan: &mut FillPlan,
) {
    for (table_idx, table) in doc.tables() {
        for (row_idx, row) in table.rows.iter().enumerate() {
            if claimed.contains(&(table_idx, row_idx)) {
                continue;
            }
            let row_text = row.text();
            let matched: Vec<&String> = members
                .iter()
                .filter(|member| row_text.contains(&schema.token_for(member)))
                .collect();
            if matched.is_empty() {
                continue;
            }

            let rows = elements
                .iter()
                .map(|element| populate(row, &matched, element, schema))
                .collect();
            claimed.insert((table_idx, row_idx));
            plan.push(DocEdit::ExpandRows {
                table: table_idx,
                stencil: row_idx,
                rows,
            });
        }
    }
}

/// Deep-clone the stencil and substitute every matched member's value
/// into the cells whose text contains its token. A blank or missing
/// value leaves the cell empty.
fn populate(
    stencil: &Row,
    matched: &[&String],
    element: &BTreeMap<String, String>,
    schema: &TemplateSchema,
) -> Row {
    let mut row = stencil.clone();
    for member in matched {
        let token = schema.token_for(member);
        let value = element
            .get(member.as_str())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("");
        for cell in row.cells.iter_mut() {
            if cell.text().contains(&token) {
                let para = Paragraph::from_text(value);
                if cell.paragraphs.is_empty() {
                    cell.paragraphs.push(para);
                } else {
                    cell.paragraphs[0] = para;
                }
            }
        }
    }
    row
}
