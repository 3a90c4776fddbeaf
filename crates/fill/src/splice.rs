//! Multi-value splicing.
//!
//! A list-valued text field is rendered by interleaving an ordered
//! header list with each data row, then concatenating everything. With
//! an empty header list the data passes through untouched; degenerate
//! headers like `["", "、"]` turn the interleave into a plain
//! join-with-separator.

use itertools::Itertools;
use std::collections::HashSet;

/// Normalize data rows against a header list.
///
/// For each row, headers are walked in order: a header not already
/// present among the row's own values is emitted followed by the next
/// unused data value (or an empty string if the data ran out); a header
/// that *is* one of the row's values is skipped and only the next data
/// value is emitted. Leftover data values are appended verbatim.
pub fn normalize_rows(rows: &[Vec<String>], headers: &[String]) -> Vec<Vec<String>> {
    if rows.is_empty() || headers.is_empty() {
        return rows.to_vec();
    }
    rows.iter().map(|row| normalize_row(row, headers)).collect()
}

fn normalize_row(row: &[String], headers: &[String]) -> Vec<String> {
    let mut normalized = Vec::new();
    let existing: HashSet<&str> = row.iter().map(String::as_str).collect();

    let mut data_index = 0;
    for header in headers {
        if !existing.contains(header.as_str()) {
            normalized.push(header.clone());
            if data_index < row.len() {
                normalized.push(row[data_index].clone());
                data_index += 1;
            } else {
                normalized.push(String::new());
            }
        } else if data_index < row.len() {
            normalized.push(row[data_index].clone());
            data_index += 1;
        }
    }

    while data_index < row.len() {
        normalized.push(row[data_index].clone());
        data_index += 1;
    }
    normalized
}

/// Render normalized rows as the final replacement text: every value of
/// every row concatenated with the empty separator.
pub fn render_rows(rows: &[Vec<String>]) -> String {
    rows.iter().flat_map(|row| row.iter()).join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn headers(data: &[&str]) -> Vec<String> {
        data.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_interleaves_headers() {
        let data = rows(&[
            &["胖胖", "2012-08-15", "西安"],
            &["嘿嘿", "2012-08-15", "北京"],
        ]);
        let result = normalize_rows(&data, &headers(&["子女姓名", "出身日期", "地址"]));
        assert_eq!(
            result,
            rows(&[
                &["子女姓名", "胖胖", "出身日期", "2012-08-15", "地址", "西安"],
                &["子女姓名", "嘿嘿", "出身日期", "2012-08-15", "地址", "北京"],
            ])
        );
    }

    #[test]
    fn test_normalize_skips_header_already_in_row() {
        let data = rows(&[&["子女姓名", "胖胖"]]);
        let result = normalize_rows(&data, &headers(&["子女姓名", "地址"]));
        assert_eq!(result, rows(&[&["子女姓名", "地址", "胖胖"]]));
    }

    #[test]
    fn test_normalize_pads_when_data_runs_out() {
        let data = rows(&[&["胖胖"]]);
        let result = normalize_rows(&data, &headers(&["姓名", "地址"]));
        assert_eq!(result, rows(&[&["姓名", "胖胖", "地址", ""]]));
    }

    #[test]
    fn test_normalize_appends_leftover_data() {
        let data = rows(&[&["a", "b", "c"]]);
        let result = normalize_rows(&data, &headers(&["H"]));
        assert_eq!(result, rows(&[&["H", "a", "b", "c"]]));
    }

    #[test]
    fn test_empty_headers_pass_through() {
        let data = rows(&[&["a", "b"]]);
        assert_eq!(normalize_rows(&data, &[]), data);
    }

    #[test]
    fn test_separator_join_convenience() {
        // Headers ["", "、"] turn the interleave into join-with-separator.
        let data = rows(&[&["胖胖"], &["熙熙"]]);
        let result = normalize_rows(&data, &headers(&["", "、"]));
        assert_eq!(render_rows(&result), "胖胖、熙熙、");
    }
}
