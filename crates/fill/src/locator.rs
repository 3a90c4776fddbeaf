//! Placeholder locator and fragment-aware text replacement.
//!
//! Containment checks over concatenated fragment text are the cheap
//! filter every filler runs before touching a paragraph or row; the
//! replacement primitives here are the only code that mutates fragment
//! text, and they guarantee a token is replaced whole or not at all.

use crate::matcher;
use stencil_doc::{Document, Inline, Paragraph, Row};

/// Whether the paragraph's concatenated fragment text contains `needle`.
pub fn paragraph_contains(para: &Paragraph, needle: &str) -> bool {
    para.text().contains(needle)
}

/// Whether a table row's full text contains `needle`. Used to skip rows
/// before running any per-fragment work on their cells.
pub fn row_contains(row: &Row, needle: &str) -> bool {
    row.text().contains(needle)
}

/// Whether any paragraph in the document contains `needle`.
pub fn document_contains(doc: &Document, needle: &str) -> bool {
    doc.paragraphs()
        .iter()
        .any(|(_, p)| paragraph_contains(p, needle))
}

/// Replace every occurrence of `find` in the paragraph with `replace`,
/// regardless of how the occurrence is split across fragments. Returns
/// the number of occurrences replaced.
pub fn replace_in_paragraph(para: &mut Paragraph, find: &str, replace: &str) -> usize {
    if find.is_empty() {
        return 0;
    }
    let full = para.text();
    let ranges: Vec<(usize, usize)> = full
        .match_indices(find)
        .map(|(start, _)| (start, start + find.len()))
        .collect();

    // Splice back-to-front so earlier offsets stay valid.
    for &(start, end) in ranges.iter().rev() {
        splice_span(para, start, end, replace);
    }
    ranges.len()
}

/// Replace every occurrence of `find` across all paragraphs of the
/// document, body and table cells alike. Returns the occurrence count.
pub fn replace_in_document(doc: &mut Document, find: &str, replace: &str) -> usize {
    let addrs: Vec<_> = doc.paragraphs().iter().map(|(addr, _)| *addr).collect();
    let mut count = 0;
    for addr in addrs {
        if let Some(para) = doc.paragraph_mut(addr) {
            count += replace_in_paragraph(para, find, replace);
        }
    }
    count
}

/// Remove one occurrence of `token` from the paragraph and return the
/// child index of the last fragment that held part of it — the anchor an
/// image insertion belongs at. Returns `None` when the paragraph does
/// not contain the token.
///
/// The fragment run is recovered with the matcher: a fragment holding
/// only token text is emptied, a fragment holding the whole token plus
/// other text keeps the other text. If containment holds but the greedy
/// walk cannot reconstruct the token (boundaries glued to unrelated
/// text), the offset-based splice removes it instead, so the paragraph
/// is never left with a half-replaced token.
pub fn take_token(para: &mut Paragraph, token: &str) -> Option<usize> {
    let full = para.text();
    let start = full.find(token)?;

    let runs: Vec<(usize, String)> = para
        .runs()
        .map(|(child, text)| (child, text.to_string()))
        .collect();
    let texts: Vec<&str> = runs.iter().map(|(_, t)| t.as_str()).collect();

    let matched = matcher::match_fragments(&texts, token);
    if matched.is_empty() {
        let end = start + token.len();
        let anchor = last_run_overlapping(para, start, end);
        splice_span(para, start, end, "");
        return anchor;
    }

    for &m in &matched {
        let (child, text) = &runs[m];
        if text.contains(token) {
            para.set_run_text(*child, text.replace(token, ""));
        } else {
            para.set_run_text(*child, "");
        }
    }
    matched.last().map(|&m| runs[m].0)
}

/// Rewrite the text span `[start, end)` of the paragraph's concatenated
/// text, substituting `replacement` at its beginning. Middle fragments
/// are emptied; boundary fragments keep their text outside the span.
fn splice_span(para: &mut Paragraph, start: usize, end: usize, replacement: &str) {
    let mut affected = Vec::new();
    let mut offset = 0;
    for (child, text) in para.runs() {
        let run_start = offset;
        let run_end = offset + text.len();
        offset = run_end;
        if run_end <= start || run_start >= end {
            continue;
        }
        let local_start = start.max(run_start) - run_start;
        let local_end = end.min(run_end) - run_start;
        affected.push((child, local_start, local_end));
    }

    for (i, (child, local_start, local_end)) in affected.iter().enumerate() {
        let current = match para.inlines.get(*child) {
            Some(Inline::Run { text }) => text.clone(),
            _ => continue,
        };
        let mut rewritten =
            String::with_capacity(current.len() + if i == 0 { replacement.len() } else { 0 });
        rewritten.push_str(&current[..*local_start]);
        if i == 0 {
            rewritten.push_str(replacement);
        }
        rewritten.push_str(&current[*local_end..]);
        para.set_run_text(*child, rewritten);
    }
}

fn last_run_overlapping(para: &Paragraph, start: usize, end: usize) -> Option<usize> {
    let mut offset = 0;
    let mut last = None;
    for (child, text) in para.runs() {
        let run_start = offset;
        offset += text.len();
        if offset > start && run_start < end {
            last = Some(child);
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_within_single_fragment() {
        let mut para = Paragraph::from_text("name: ${name}!");
        let count = replace_in_paragraph(&mut para, "${name}", "An");
        assert_eq!(count, 1);
        assert_eq!(para.text(), "name: An!");
    }

    #[test]
    fn test_replace_across_fragment_boundary() {
        let mut para = Paragraph::from_fragments(["Dear ${n", "ame}, welcome"]);
        let count = replace_in_paragraph(&mut para, "${name}", "An");
        assert_eq!(count, 1);
        assert_eq!(para.text(), "Dear An, welcome");
        // Surrounding text on the boundary fragments survives.
        assert_eq!(para.inlines.len(), 2);
    }

    #[test]
    fn test_replace_multiple_occurrences() {
        let mut para = Paragraph::from_fragments(["${x} and ${", "x} again"]);
        let count = replace_in_paragraph(&mut para, "${x}", "1");
        assert_eq!(count, 2);
        assert_eq!(para.text(), "1 and 1 again");
    }

    #[test]
    fn test_replace_no_occurrence_mutates_nothing() {
        let mut para = Paragraph::from_fragments(["no pla", "ceholder here"]);
        let before = para.clone();
        assert_eq!(replace_in_paragraph(&mut para, "${name}", "x"), 0);
        assert_eq!(para, before);
    }

    #[test]
    fn test_replace_with_cjk_value() {
        let mut para = Paragraph::from_fragments(["姓名：", "${na", "me}"]);
        replace_in_paragraph(&mut para, "${name}", "胖胖");
        assert_eq!(para.text(), "姓名：胖胖");
    }

    #[test]
    fn test_replace_in_document_covers_table_cells() {
        use stencil_doc::{Row, Table};
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::from_text("${a}"));
        let mut table = Table::default();
        table.rows.push(Row::from_texts(["cell ${a}"]));
        doc.push_table(table);

        let count = replace_in_document(&mut doc, "${a}", "v");
        assert_eq!(count, 2);
        assert_eq!(doc.text(), "vcell v");
    }

    #[test]
    fn test_take_token_pure_chunks() {
        let mut para = Paragraph::from_fragments(["$", "{", "sign", "}"]);
        let anchor = take_token(&mut para, "${sign}");
        assert_eq!(anchor, Some(3));
        assert_eq!(para.text(), "");
    }

    #[test]
    fn test_take_token_single_fragment_keeps_neighbors() {
        let mut para = Paragraph::from_fragments(["before ${sign} after"]);
        let anchor = take_token(&mut para, "${sign}");
        assert_eq!(anchor, Some(0));
        assert_eq!(para.text(), "before  after");
    }

    #[test]
    fn test_take_token_falls_back_when_walk_fails() {
        // Containment holds at paragraph level but the first chunk is
        // glued to unrelated text, so the greedy walk fails; the offset
        // splice must still remove the token whole.
        let mut para = Paragraph::from_fragments(["Hello ${si", "gn}"]);
        let anchor = take_token(&mut para, "${sign}");
        assert_eq!(anchor, Some(1));
        assert_eq!(para.text(), "Hello ");
    }

    #[test]
    fn test_take_token_absent() {
        let mut para = Paragraph::from_text("nothing");
        assert_eq!(take_token(&mut para, "${sign}"), None);
    }

    #[test]
    fn test_row_containment_spans_cells() {
        let row = Row::from_texts(["${child", "Name}"]);
        // Aggregated row text is the pre-filter; the token never needs
        // to sit inside a single cell.
        assert!(row_contains(&row, "${childName}"));
        assert!(!row_contains(&row, "${birthday}"));
    }
}
