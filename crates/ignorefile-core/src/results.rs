//! Operation results.
//!
//! Every mutating operation on an [`IgnoreFile`](crate::IgnoreFile) reports
//! what it did as [`RuleResult`] values: which rule was touched, what
//! happened to it, and why. Callers surface these to users verbatim.

use std::fmt;

use serde::Serialize;

use crate::rule::Rule;

/// What happened to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleOutcome {
    /// The situation needs a human decision; nothing was changed.
    ReviewRecommended,
    /// A conflict was resolved in place.
    Fixed,
    /// A new rule was inserted.
    Added,
    /// An existing rule was relocated.
    Moved,
    /// An existing rule was deleted.
    Removed,
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleOutcome::ReviewRecommended => "REVIEW_RECOMMENDED",
            RuleOutcome::Fixed => "FIXED",
            RuleOutcome::Added => "ADDED",
            RuleOutcome::Moved => "MOVED",
            RuleOutcome::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

/// Why an operation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionReason {
    /// The caller asked for it directly.
    Requested,
    /// The conflict fixer applied it.
    AutomatedFix,
    /// A conflict was found but no safe automatic repair exists.
    FixUnknown,
}

impl fmt::Display for ActionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionReason::Requested => "REQUESTED",
            ActionReason::AutomatedFix => "AUTOMATED_FIX",
            ActionReason::FixUnknown => "FIX_UNKNOWN",
        };
        f.write_str(name)
    }
}

/// The record of one operation on one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    pub rule: Rule,
    pub outcome: RuleOutcome,
    pub reason: ActionReason,
}

impl RuleResult {
    /// A one-line description suitable for logs and CLI output, e.g.
    /// `ADDED: Rule '*.log', Reason: REQUESTED`.
    pub fn log(&self) -> String {
        format!(
            "{}: Rule '{}', Reason: {}",
            self.outcome,
            self.rule.render(),
            self.reason
        )
    }
}

impl fmt::Display for RuleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log())
    }
}
