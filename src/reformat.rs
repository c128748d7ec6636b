//! Cleanup of syntax orphaned by feature stripping.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::EMPTY_CONDITION_SENTINEL;

/// A parenthesized group holding nothing but spaces and line breaks, `\r\n`
/// included.
/// `()` itself is left alone: it is an ordinary empty argument list.
static BLANK_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([ \r\n]+\)").unwrap());

/// Removes blank parenthesized groups and neutralizes empty conditionals.
///
/// Groups whose interior is only spaces and line breaks are deleted together with
/// their parentheses. Deleting an inner group can leave a blank outer one, so
/// this repeats until nothing matches. Afterwards `if ()` and `if()` become
/// `if (!_CE_) /*Piranhito?@*/ `, an always-false placeholder flagged for
/// manual review.
///
/// Reapplying the function to its own output changes nothing.
pub fn reformat(text: &str) -> String {
    let mut reformatted = text.to_string();
    while BLANK_GROUP.is_match(&reformatted) {
        reformatted = BLANK_GROUP.replace_all(&reformatted, "").into_owned();
    }

    while reformatted.contains("if ()") {
        reformatted = reformatted.replace("if ()", "if()");
    }
    reformatted.replace("if()", EMPTY_CONDITION_SENTINEL)
}
