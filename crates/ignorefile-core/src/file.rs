//! The ordered rule container.
//!
//! An [`IgnoreFile`] owns the rule sequence of one ignore file. Order is
//! semantically significant: later rules override earlier ones, so every
//! mutation goes through operations that keep the sequence meaningful —
//! [`IgnoreFile::add`] rejects insertions that would be dead on arrival, and
//! [`IgnoreFile::fix_conflicts`] repairs what the detector finds.

use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::conflict::{check_conflict, subsumes, Conflict, ConflictKind};
use crate::error::{Error, Result};
use crate::results::{ActionReason, RuleOutcome, RuleResult};
use crate::rule::Rule;

/// Pass budget used by [`IgnoreFile::add`] for its post-insertion repair run.
const ADD_FIX_PASSES: usize = 20;

/// Where a moved rule lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Before,
    After,
}

impl FromStr for MoveDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "before" => Ok(MoveDirection::Before),
            "after" => Ok(MoveDirection::After),
            other => Err(Error::InvalidDirection {
                value: other.to_string(),
            }),
        }
    }
}

/// An ordered sequence of ignore rules.
///
/// Rules are value objects; the container is the only thing that mutates.
/// Lookups use structural equality (pattern key + action), so callers can
/// reconstruct a rule from user input and still address the stored one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IgnoreFile {
    rules: Vec<Rule>,
}

impl IgnoreFile {
    /// Create an empty ignore file.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules in file order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the file holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a rule without any conflict checking or placement logic.
    ///
    /// This is the parser's path: parsed files are reproduced verbatim,
    /// conflicts included, so that analysis reports what is actually on
    /// disk. Everything else should go through [`IgnoreFile::add`].
    pub fn push_raw(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Index of the first rule structurally equal to `target`.
    fn find_index(&self, target: &Rule) -> Option<usize> {
        self.rules.iter().position(|rule| rule == target)
    }

    /// Insert a rule with conflict rejection and smart placement.
    ///
    /// Each existing rule is classified against the newcomer. A semantic,
    /// redundant, or unreachable verdict rejects the insertion with the
    /// matching error and leaves the file untouched. An ineffective verdict
    /// pulls the insertion point before the offending rule, and a broader
    /// newcomer is pulled before the same-action rules it subsumes so the
    /// file reads broad-to-narrow.
    ///
    /// After insertion the conflict fixer runs with a bound of 20 passes;
    /// the returned results start with the `ADDED` record followed by any
    /// repairs the fixer applied.
    pub fn add(&mut self, rule: Rule) -> Result<Vec<RuleResult>> {
        let mut insertion_point = self.rules.len();

        for (i, existing) in self.rules.iter().enumerate() {
            // The newcomer has no position yet, so everything after the
            // existing rule counts as intervening.
            let intervening = &self.rules[i + 1..];

            if let Some(conflict) = check_conflict(existing, &rule, intervening) {
                match conflict.kind {
                    ConflictKind::SemanticConflict => return Err(Error::SemanticConflict),
                    ConflictKind::RedundantRule => return Err(Error::RedundantRule),
                    ConflictKind::UnreachableRule => return Err(Error::UnreachableRule),
                    ConflictKind::IneffectiveRule => insertion_point = i,
                }
            }

            if rule_should_come_before(&rule, existing) && i < insertion_point {
                insertion_point = i;
            }
        }

        debug!(rule = %rule, index = insertion_point, "inserting rule");
        self.rules.insert(insertion_point, rule.clone());

        let mut results = vec![RuleResult {
            rule,
            outcome: RuleOutcome::Added,
            reason: ActionReason::Requested,
        }];
        results.extend(self.fix_conflicts(ADD_FIX_PASSES)?);

        Ok(results)
    }

    /// Delete the first rule structurally equal to `target`.
    pub fn delete(&mut self, target: &Rule) -> Result<RuleResult> {
        self.delete_matching(target, ActionReason::Requested)
    }

    fn delete_matching(&mut self, target: &Rule, reason: ActionReason) -> Result<RuleResult> {
        let index = self.find_index(target).ok_or(Error::RuleNotFound)?;
        self.rules.remove(index);

        Ok(RuleResult {
            rule: target.clone(),
            outcome: RuleOutcome::Removed,
            reason,
        })
    }

    /// Move the rule at `from` so it ends up at position `to` of the
    /// original sequence.
    ///
    /// `to` is interpreted against the pre-removal indices and adjusted for
    /// the removal when it lies past `from`. `from == to` is a no-op.
    pub fn move_by_index(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.rules.len() {
            return Err(Error::SourceIndexOutOfRange { index: from });
        }

        if from == to {
            return Ok(());
        }

        let adjusted = if to > from { to - 1 } else { to };
        if adjusted >= self.rules.len() {
            return Err(Error::TargetIndexOutOfRange { index: to });
        }

        let rule = self.rules.remove(from);
        self.rules.insert(adjusted, rule);

        Ok(())
    }

    /// Move `rule_to_move` directly before or after `target`.
    ///
    /// Returns `Ok(None)` without touching the file when the rule already
    /// sits in the requested position.
    pub fn move_rule(
        &mut self,
        rule_to_move: &Rule,
        target: &Rule,
        direction: MoveDirection,
        reason: ActionReason,
    ) -> Result<Option<RuleResult>> {
        let move_idx = self.find_index(rule_to_move).ok_or(Error::RuleToMoveNotFound)?;
        let target_idx = self.find_index(target).ok_or(Error::TargetRuleNotFound)?;

        let new_idx = match direction {
            MoveDirection::Before => {
                if move_idx + 1 == target_idx {
                    return Ok(None);
                }
                target_idx
            }
            MoveDirection::After => {
                if move_idx == target_idx + 1 {
                    return Ok(None);
                }
                target_idx + 1
            }
        };

        if move_idx == new_idx {
            return Ok(None);
        }

        self.move_by_index(move_idx, new_idx)?;

        Ok(Some(RuleResult {
            rule: rule_to_move.clone(),
            outcome: RuleOutcome::Moved,
            reason,
        }))
    }

    /// Classify every ordered pair of rules and collect the conflicts.
    ///
    /// Pairs are visited in `(i, j)` lexicographic order with the rules
    /// strictly between them as the intervening slice, so the output is
    /// deterministic and stable across repeated calls on an unchanged file.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for i in 0..self.rules.len() {
            for j in (i + 1)..self.rules.len() {
                if let Some(conflict) =
                    check_conflict(&self.rules[i], &self.rules[j], &self.rules[i + 1..j])
                {
                    conflicts.push(conflict);
                }
            }
        }

        conflicts
    }

    /// Repair conflicts in up to `max_passes` detect-and-fix passes.
    ///
    /// Each pass snapshots the current conflicts and applies one repair per
    /// conflict: redundant rules lose their earlier copy, unreachable rules
    /// are deleted (when adjacent to the rule shadowing them) or pulled next
    /// to it, and ineffective exceptions move past the rule they override.
    /// Semantic conflicts are never repaired — each pass reports them with a
    /// `REVIEW_RECOMMENDED` result and leaves them in place, which is why the
    /// loop is bounded instead of running to a fixpoint.
    ///
    /// Repairs shift indices and can expose new conflicts, hence the
    /// re-detection between passes. Conflicts still present when the budget
    /// runs out are left as they are; the fixer is best-effort. A repair
    /// failure halts the run with [`Error::FixHalted`] carrying the results
    /// accumulated so far.
    pub fn fix_conflicts(&mut self, max_passes: usize) -> Result<Vec<RuleResult>> {
        let mut applied = Vec::new();

        for _ in 0..max_passes {
            let conflicts = self.find_conflicts();
            if conflicts.is_empty() {
                break;
            }

            for conflict in conflicts {
                match self.fix_conflict(&conflict) {
                    Ok(Some(result)) => {
                        debug!(fix = %result, kind = %conflict.kind, "applied repair");
                        applied.push(result);
                    }
                    Ok(None) => {}
                    Err(source) => {
                        return Err(Error::FixHalted {
                            applied,
                            source: Box::new(source),
                        });
                    }
                }
            }
        }

        Ok(applied)
    }

    fn fix_conflict(&mut self, conflict: &Conflict) -> Result<Option<RuleResult>> {
        match conflict.kind {
            ConflictKind::RedundantRule => self
                .delete_matching(&conflict.left, ActionReason::AutomatedFix)
                .map(Some),
            ConflictKind::UnreachableRule => {
                let left_idx = self.find_index(&conflict.left);
                let right_idx = self.find_index(&conflict.right);

                if let (Some(left), Some(right)) = (left_idx, right_idx) {
                    if right == left + 1 {
                        // Adjacent with the broader rule first: the specific
                        // rule is truly unreachable, delete it.
                        return self
                            .delete_matching(&conflict.right, ActionReason::AutomatedFix)
                            .map(Some);
                    }
                }

                self.move_rule(
                    &conflict.right,
                    &conflict.left,
                    MoveDirection::After,
                    ActionReason::AutomatedFix,
                )
            }
            ConflictKind::IneffectiveRule => self.move_rule(
                &conflict.left,
                &conflict.right,
                MoveDirection::After,
                ActionReason::AutomatedFix,
            ),
            ConflictKind::SemanticConflict => Ok(Some(RuleResult {
                rule: conflict.left.clone(),
                outcome: RuleOutcome::ReviewRecommended,
                reason: ActionReason::FixUnknown,
            })),
        }
    }
}

/// Broader rules come first among same-action rules.
fn rule_should_come_before(new_rule: &Rule, existing: &Rule) -> bool {
    new_rule.action() == existing.action() && subsumes(new_rule, existing)
}
