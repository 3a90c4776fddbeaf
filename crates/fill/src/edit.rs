//! Edit plans.
//!
//! Fillers never mutate the document while scanning: each scan is a
//! read-only pass producing a [`FillPlan`], and the orchestrator applies
//! the joined plans in one place before persisting. The field-kind
//! partition keeps the plans' write sets disjoint, so the apply order
//! across fillers does not affect the result.

use crate::error::FillError;
use crate::locator;
use stencil_doc::{Document, Inline, ParaAddr, Row};

/// One document mutation recorded by a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum DocEdit {
    /// Exact-substring replacement across the whole document.
    ReplaceAll { find: String, replace: String },

    /// Blank one token occurrence in one paragraph, inserting nothing.
    TakeToken { para: ParaAddr, token: String },

    /// Blank one token occurrence and insert an inline image anchored at
    /// the last fragment of the matched run.
    InsertImage {
        para: ParaAddr,
        token: String,
        source: String,
        width: f64,
        height: f64,
    },

    /// Replace the stencil row at `stencil` with the populated clones.
    ExpandRows {
        table: usize,
        stencil: usize,
        rows: Vec<Row>,
    },
}

/// The ordered edits one filler's scan produced.
pub type FillPlan = Vec<DocEdit>;

/// Apply the joined plans of all fillers to the document.
///
/// Row expansions are deferred and applied bottom-up so that stencil
/// indices recorded against the unmutated document stay valid while
/// earlier tables/rows are rewritten.
pub fn apply_plans(doc: &mut Document, plans: Vec<FillPlan>) -> Result<(), FillError> {
    let mut row_edits = Vec::new();

    for edit in plans.into_iter().flatten() {
        match edit {
            DocEdit::ReplaceAll { find, replace } => {
                locator::replace_in_document(doc, &find, &replace);
            }
            DocEdit::TakeToken { para, token } => {
                let paragraph = doc
                    .paragraph_mut(para)
                    .ok_or_else(|| FillError::StaleEdit(para.to_string()))?;
                locator::take_token(paragraph, &token);
            }
            DocEdit::InsertImage {
                para,
                token,
                source,
                width,
                height,
            } => {
                let paragraph = doc
                    .paragraph_mut(para)
                    .ok_or_else(|| FillError::StaleEdit(para.to_string()))?;
                if let Some(anchor) = locator::take_token(paragraph, &token) {
                    paragraph.insert_inline(
                        anchor,
                        Inline::Image {
                            source,
                            width,
                            height,
                        },
                    );
                }
            }
            DocEdit::ExpandRows {
                table,
                stencil,
                rows,
            } => row_edits.push((table, stencil, rows)),
        }
    }

    row_edits.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
    for (table, stencil, rows) in row_edits {
        let t = doc
            .table_mut(table)
            .ok_or_else(|| FillError::StaleEdit(format!("table {table}")))?;
        if stencil >= t.rows.len() {
            return Err(FillError::StaleEdit(format!(
                "table {table} stencil row {stencil}"
            )));
        }
        let inserted = rows.len();
        for (i, row) in rows.into_iter().enumerate() {
            t.insert_row_before(stencil + i, row);
        }
        t.remove_row(stencil + inserted);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_doc::{Paragraph, Table};

    #[test]
    fn test_apply_replace_all() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::from_fragments(["${na", "me} here"]));
        apply_plans(
            &mut doc,
            vec![vec![DocEdit::ReplaceAll {
                find: "${name}".into(),
                replace: "An".into(),
            }]],
        )
        .unwrap();
        assert_eq!(doc.text(), "An here");
    }

    #[test]
    fn test_apply_insert_image_blanks_token_and_anchors() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::from_fragments(["$", "{sign}", " end"]));
        let addr = doc.paragraphs()[0].0;
        apply_plans(
            &mut doc,
            vec![vec![DocEdit::InsertImage {
                para: addr,
                token: "${sign}".into(),
                source: "sig.png".into(),
                width: 80.0,
                height: 40.0,
            }]],
        )
        .unwrap();

        assert_eq!(doc.text(), " end");
        let paras = doc.paragraphs();
        let images: Vec<_> = paras[0]
            .1
            .inlines
            .iter()
            .filter(|i| matches!(i, Inline::Image { .. }))
            .collect();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn test_apply_expand_rows_bottom_up() {
        let mut table = Table::default();
        table.rows.push(Row::from_texts(["header"]));
        table.rows.push(Row::from_texts(["${a}"]));
        table.rows.push(Row::from_texts(["middle"]));
        table.rows.push(Row::from_texts(["${b}"]));
        let mut doc = Document::new();
        doc.push_table(table);

        // Two stencil expansions in one table; applying bottom-up keeps
        // the lower index valid.
        apply_plans(
            &mut doc,
            vec![vec![
                DocEdit::ExpandRows {
                    table: 0,
                    stencil: 1,
                    rows: vec![Row::from_texts(["a1"]), Row::from_texts(["a2"])],
                },
                DocEdit::ExpandRows {
                    table: 0,
                    stencil: 3,
                    rows: vec![Row::from_texts(["b1"])],
                },
            ]],
        )
        .unwrap();

        let (_, t) = doc.tables().next().unwrap();
        let texts: Vec<String> = t.rows.iter().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["header", "a1", "a2", "middle", "b1"]);
    }

    #[test]
    fn test_apply_stale_table_edit_errors() {
        let mut doc = Document::new();
        let result = apply_plans(
            &mut doc,
            vec![vec![DocEdit::ExpandRows {
                table: 0,
                stencil: 0,
                rows: vec![],
            }]],
        );
        assert!(matches!(result, Err(FillError::StaleEdit(_))));
    }
}
