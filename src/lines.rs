//! Line-level filtering and token rewriting.

use crate::profile::TokenPair;

/// True if `line` contains any of the `forbidden` substrings.
pub fn is_forbidden(line: &str, forbidden: &[String]) -> bool {
    forbidden
        .iter()
        .any(|pattern| !pattern.is_empty() && line.contains(pattern.as_str()))
}

/// Keeps the lines that contain none of the `forbidden` substrings, in their
/// original order.
pub fn filter_lines<'a, I>(lines: I, forbidden: &[String]) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|line| !is_forbidden(line, forbidden))
        .collect()
}

/// Deletes every removable token from `line`, then applies `pairs` in order.
///
/// A deletion can join two fragments into a new occurrence of the same token
/// (`"ababcc"` without `"abc"` still holds `"abc"`), so each token is removed
/// until none is left.
pub fn rewrite_line(line: &str, remove_tokens: &[String], pairs: &[TokenPair]) -> String {
    let mut rewritten = line.to_string();
    for token in remove_tokens.iter().filter(|token| !token.is_empty()) {
        while rewritten.contains(token.as_str()) {
            rewritten = rewritten.replace(token.as_str(), "");
        }
    }
    for pair in pairs.iter().filter(|pair| !pair.from.is_empty()) {
        rewritten = rewritten.replace(&pair.from, &pair.to);
    }
    rewritten
}
