//! Common constants used throughout piranhito.

/// Opening of every marker token, e.g. `/*Piranhito?@-Tracer-S@O8gSAh@*/`.
pub const MARKER_PREFIX: &str = "/*Piranhito?@-";

/// Closing of every marker token.
pub const MARKER_SUFFIX: &str = "*/";

/// Replaces `Start…Leave` when a feature with a fallback branch is stripped.
pub const FUNC_BEGIN_SENTINEL: &str = "/*Piranhito?@-@FuncBegin@*/";

/// Replaces `End` when a feature with a fallback branch is stripped.
pub const FUNC_END_SENTINEL: &str = "/*Piranhito?@-@FuncEnd@*/";

/// Conditional whose guarded expression was erased by stripping.
pub const EMPTY_CONDITION_SENTINEL: &str = "if (!_CE_) /*Piranhito?@*/ ";

/// Replacement value asking for a generated identifier, e.g. `@Random(12)`.
pub const RANDOM_DIRECTIVE_PREFIX: &str = "@Random(";

/// Longest identifier a `@Random(N)` directive may ask for.
pub const RANDOM_MAX_LENGTH: usize = 1024;

/// Leading character of every generated identifier.
pub const RANDOM_VALUE_PREFIX: &str = "_";

/// Supported profile file names, tried in order inside a directory
pub const PROFILE_FILES: [&str; 3] = ["piranhito.json", "piranhito.yml", "piranhito.yaml"];

/// Piranhito's ignore file name
pub const IGNORE_FILE: &str = ".piranhitoignore";
