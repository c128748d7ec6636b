//! Marker token grammar.
//!
//! A feature-gated region in a tagged source file looks like
//!
//! ```text
//! /*Piranhito?@-Tracer-S@O8gSAh@*/ ... /*Piranhito?@-Tracer-L@O8gSAh@*/ ... /*Piranhito?@-Tracer-E@O8gSAh@*/
//! ```
//!
//! where the `L` (leave) token is optional. The grammar is bit-exact with
//! existing tagged trees, so nothing here may change the rendered strings.

use crate::constants::{MARKER_PREFIX, MARKER_SUFFIX};
use crate::profile::FeatureMarker;

/// The three literal tokens bounding one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTokens {
    pub start: String,
    pub leave: String,
    pub end: String,
}

/// Which boundary of a feature a token marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Leave,
    End,
}

impl MarkerKind {
    fn letter(self) -> char {
        match self {
            MarkerKind::Start => 'S',
            MarkerKind::Leave => 'L',
            MarkerKind::End => 'E',
        }
    }
}

/// Renders a single token, e.g. `/*Piranhito?@-Logger-E@85Lbt3@*/`.
pub fn marker_token(feature_id: &str, eyecatcher: &str, kind: MarkerKind) -> String {
    format!(
        "{MARKER_PREFIX}{feature_id}-{}{eyecatcher}{MARKER_SUFFIX}",
        kind.letter()
    )
}

impl MarkerTokens {
    pub fn new(feature_id: &str, eyecatcher: &str) -> Self {
        Self {
            start: marker_token(feature_id, eyecatcher, MarkerKind::Start),
            leave: marker_token(feature_id, eyecatcher, MarkerKind::Leave),
            end: marker_token(feature_id, eyecatcher, MarkerKind::End),
        }
    }
}

impl From<&FeatureMarker> for MarkerTokens {
    fn from(marker: &FeatureMarker) -> Self {
        MarkerTokens::new(&marker.id, &marker.eyecatcher)
    }
}
