//! Feature block stripping.
//!
//! Each feature marker is resolved to its disabled branch:
//!
//! * `A Start X End B` becomes `A B`;
//! * `A Start X Leave Y End B` becomes `A FuncBegin Y FuncEnd B`, keeping the
//!   fallback body `Y` between two neutral sentinels.
//!
//! Markers are processed in list order and each marker is applied until no
//! matched `Start` remains. Every pass rescans the text from the beginning, so
//! the cost is quadratic in the number of occurrences of a single feature.

use log::{debug, warn};

use crate::constants::{FUNC_BEGIN_SENTINEL, FUNC_END_SENTINEL};
use crate::marker::MarkerTokens;
use crate::profile::FeatureMarker;

/// A `Start` token with no `End` after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbalancedMarker {
    pub feature_id: String,
    /// Byte offset of the orphaned `Start` in the stripped text.
    pub offset: usize,
}

/// Result of a strip run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripOutcome {
    pub text: String,
    /// Spans deleted wholesale.
    pub removed: usize,
    /// Spans resolved to their fallback branch.
    pub guarded: usize,
    pub unbalanced: Vec<UnbalancedMarker>,
}

impl StripOutcome {
    /// True when every `Start` found had a matching `End`.
    pub fn is_balanced(&self) -> bool {
        self.unbalanced.is_empty()
    }
}

/// Strips every occurrence of every marker in `markers` from `text`.
///
/// An orphaned `Start` is left in place and reported both as a warning and in
/// [`StripOutcome::unbalanced`]; the text is never rejected because of it.
pub fn strip_features(text: &str, markers: &[FeatureMarker]) -> StripOutcome {
    let mut outcome = StripOutcome {
        text: text.to_string(),
        ..Default::default()
    };

    for marker in markers {
        let tokens = MarkerTokens::from(marker);
        while let Some(start) = outcome.text.find(&tokens.start) {
            let body_begin = start + tokens.start.len();
            let Some(end) = outcome.text[body_begin..]
                .find(&tokens.end)
                .map(|relative| body_begin + relative)
            else {
                warn!(
                    "Feature '{}' has a start marker at byte {} but no end marker; left untouched",
                    marker.id, start
                );
                outcome.unbalanced.push(UnbalancedMarker {
                    feature_id: marker.id.clone(),
                    offset: start,
                });
                break;
            };
            let end_finish = end + tokens.end.len();

            match outcome.text[body_begin..end].find(&tokens.leave) {
                Some(relative) => {
                    let leave_finish = body_begin + relative + tokens.leave.len();
                    // End first, so the offsets before it stay valid.
                    outcome.text.replace_range(end..end_finish, FUNC_END_SENTINEL);
                    outcome.text.replace_range(start..leave_finish, FUNC_BEGIN_SENTINEL);
                    outcome.guarded += 1;
                }
                None => {
                    outcome.text.replace_range(start..end_finish, "");
                    outcome.removed += 1;
                }
            }
        }
    }

    debug!(
        "Stripped {} block(s), kept the fallback of {}, {} unbalanced",
        outcome.removed,
        outcome.guarded,
        outcome.unbalanced.len()
    );
    outcome
}

/// Convenience wrapper returning only the stripped text.
pub fn strip(text: &str, markers: &[FeatureMarker]) -> String {
    strip_features(text, markers).text
}
