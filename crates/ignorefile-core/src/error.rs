//! Error types for ignorefile-core

use crate::results::RuleResult;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or repairing an ignore file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File rule path was empty after trimming
    #[error("path cannot be empty")]
    EmptyPath,

    /// Extension was empty after trimming and prefix stripping
    #[error("extension cannot be empty")]
    EmptyExtension,

    /// Directory name was empty after trimming and slash stripping
    #[error("directory cannot be empty")]
    EmptyDirectoryName,

    /// Glob pattern was empty after trimming
    #[error("glob pattern cannot be empty")]
    EmptyGlobPattern,

    /// Unrecognized action name
    #[error("invalid action: {value}")]
    InvalidAction { value: String },

    /// Unrecognized directory mode name
    #[error("invalid directory mode: {value}")]
    InvalidDirectoryMode { value: String },

    /// Unrecognized move direction name
    #[error("invalid direction: {value}")]
    InvalidDirection { value: String },

    /// Insertion rejected: an existing rule has the same pattern with the
    /// opposite action
    #[error("semantic conflict: same pattern with opposite actions")]
    SemanticConflict,

    /// Insertion rejected: an existing rule has the same pattern and action
    #[error("redundant rule: duplicate pattern and action")]
    RedundantRule,

    /// Insertion rejected: a broader rule with the same action already covers
    /// this pattern
    #[error("unreachable rule: broader pattern makes this rule meaningless")]
    UnreachableRule,

    /// No rule matched the deletion target
    #[error("rule not found")]
    RuleNotFound,

    /// The rule requested to move is not in the file
    #[error("rule to move not found")]
    RuleToMoveNotFound,

    /// The rule a move is positioned against is not in the file
    #[error("target rule not found")]
    TargetRuleNotFound,

    /// Source index passed to an index move is out of range
    #[error("source index {index} out of range")]
    SourceIndexOutOfRange { index: usize },

    /// Target index passed to an index move is out of range
    #[error("target index {index} out of range")]
    TargetIndexOutOfRange { index: usize },

    /// A repair step failed mid-run; `applied` holds the repairs that
    /// completed before the failure
    #[error("conflict repair halted: {source}")]
    FixHalted {
        applied: Vec<RuleResult>,
        #[source]
        source: Box<Error>,
    },
}
