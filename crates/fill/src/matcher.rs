//! Fragment matcher.
//!
//! Document text is not addressable as one contiguous string: editors
//! split a paragraph into fragments at unpredictable offsets, so a
//! placeholder token may straddle any number of fragment boundaries.
//! Given the ordered fragment texts of a paragraph and a target token,
//! [`match_fragments`] determines which fragment indices, concatenated,
//! reconstitute the token.
//!
//! This is a boundary-reconstruction scan, not a general
//! substring-of-concatenation solver: it assumes the caller has already
//! verified that the whole paragraph text contains the target, and only
//! recovers where the fragment boundaries fall inside it.

/// Returns the ordered fragment indices whose concatenation rebuilds
/// `target`, or an empty vec if no such walk exists.
///
/// Fast path: if any fragment (trimmed) already contains the whole
/// target, the indices of all containing fragments are returned.
/// Otherwise a greedy prefix-consuming walk runs: a cursor moves through
/// the target, and at each step the first non-blank fragment matching
/// the target at the cursor is consumed. Duplicate occurrences match
/// left-to-right, first-available; a fragment may be consumed more than
/// once if its text recurs in the target.
pub fn match_fragments(fragments: &[&str], target: &str) -> Vec<usize> {
    if target.is_empty() {
        return Vec::new();
    }

    let trimmed: Vec<&str> = fragments.iter().map(|f| f.trim()).collect();

    let containing: Vec<usize> = trimmed
        .iter()
        .enumerate()
        .filter(|(_, f)| f.contains(target))
        .map(|(i, _)| i)
        .collect();
    if !containing.is_empty() {
        return containing;
    }

    let mut matched = Vec::new();
    let mut cursor = 0;

    while cursor < target.len() {
        let mut advanced = false;

        for (i, part) in trimmed.iter().enumerate() {
            if !part.is_empty() && target[cursor..].starts_with(part) {
                matched.push(i);
                cursor += part.len();
                advanced = true;
                break;
            }
        }

        if !advanced {
            return Vec::new();
        }
    }

    matched
}
