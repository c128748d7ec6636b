//! Blank line collapsing.

use once_cell::sync::Lazy;
use regex::Regex;

static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

fn is_blank_segment(segment: &str) -> bool {
    segment.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Collapses blank runs left behind by stripping.
///
/// Every segment enclosed by two newlines that holds only spaces, tabs or a
/// carriage return is emptied, then each run of consecutive newlines becomes a
/// single one. The result never contains `"\n\n"`. Text before the first and
/// after the last newline is kept as is.
pub fn collapse_blank_runs(text: &str) -> String {
    let segments: Vec<&str> = text.split('\n').collect();
    let last = segments.len().saturating_sub(1);
    let cleared = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i > 0 && i < last && is_blank_segment(segment) {
                ""
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    NEWLINE_RUN.replace_all(&cleared, "\n").into_owned()
}
