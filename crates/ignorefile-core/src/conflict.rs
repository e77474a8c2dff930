//! Conflict classification between pairs of rules.
//!
//! The classifier compares two rules in file order together with the slice of
//! rules between them and reports one of four conflict kinds, or nothing.
//! Its substrate is the *subsumption* relation: `subsumes(a, b)` holds when
//! every path `b` matches is also matched by `a`. The relation is directional
//! and deliberately conservative — for globs only the `*.ext` shape is
//! recognized, and no general glob containment is attempted.

use std::fmt;

use serde::Serialize;

use crate::rule::{Action, DirectoryMode, Rule, RuleKind};

/// The four ways two rules can conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// Same pattern, opposite actions.
    SemanticConflict,
    /// Same pattern, same action.
    RedundantRule,
    /// A broader same-action rule covers the specific one entirely.
    UnreachableRule,
    /// An exception placed before the broader rule it is meant to override.
    IneffectiveRule,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictKind::SemanticConflict => "SEMANTIC_CONFLICT",
            ConflictKind::RedundantRule => "REDUNDANT_RULE",
            ConflictKind::UnreachableRule => "UNREACHABLE_RULE",
            ConflictKind::IneffectiveRule => "INEFFECTIVE_RULE",
        };
        f.write_str(name)
    }
}

/// A detected conflict between two rules.
///
/// For [`ConflictKind::UnreachableRule`] the broader rule is always `left`,
/// regardless of which of the pair appeared first in the file; the fixer
/// relies on that orientation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub left: Rule,
    pub right: Rule,
    pub kind: ConflictKind,
}

/// Classify a pair of rules, `left` appearing before `right` in the file.
///
/// `intervening` is the slice of rules strictly between the two; an exception
/// in it can rescue an otherwise-unreachable pair (see
/// [`has_intervening_exceptions`]).
pub(crate) fn check_conflict(left: &Rule, right: &Rule, intervening: &[Rule]) -> Option<Conflict> {
    if left.pattern() == right.pattern() {
        let kind = if left.action() != right.action() {
            ConflictKind::SemanticConflict
        } else {
            ConflictKind::RedundantRule
        };

        return Some(Conflict {
            left: left.clone(),
            right: right.clone(),
            kind,
        });
    }

    if left.action() == right.action() {
        if subsumes(left, right) {
            if has_intervening_exceptions(left, right, intervening) {
                return None;
            }

            return Some(Conflict {
                left: left.clone(),
                right: right.clone(),
                kind: ConflictKind::UnreachableRule,
            });
        }

        if subsumes(right, left) {
            if has_intervening_exceptions(right, left, intervening) {
                return None;
            }

            // Swap sides so the fixer always sees the broader rule on the left.
            return Some(Conflict {
                left: right.clone(),
                right: left.clone(),
                kind: ConflictKind::UnreachableRule,
            });
        }
    }

    if left.action() == Action::Exclude
        && right.action() == Action::Include
        && subsumes(right, left)
    {
        // The exception precedes the broader rule it overrides; an exception
        // only takes effect after the rule it carves a hole into.
        return Some(Conflict {
            left: left.clone(),
            right: right.clone(),
            kind: ConflictKind::IneffectiveRule,
        });
    }

    None
}

/// Does `broader` match a superset of the paths `specific` matches?
///
/// Not symmetric and not reflexive; identical patterns are handled by the
/// pattern-equality branch of the classifier, never here.
pub(crate) fn subsumes(broader: &Rule, specific: &Rule) -> bool {
    match &broader.kind {
        RuleKind::Directory { name, mode } => directory_subsumes(name, *mode, broader, specific),
        RuleKind::Glob { pattern } => glob_subsumes(pattern, specific),
        RuleKind::Extension { ext } => extension_subsumes(ext, specific),
        // A single exact path cannot contain another pattern.
        RuleKind::File { .. } => false,
    }
}

fn directory_subsumes(name: &str, mode: DirectoryMode, broader: &Rule, specific: &Rule) -> bool {
    match &specific.kind {
        RuleKind::Directory {
            name: other_name,
            mode: other_mode,
        } => {
            if name == other_name {
                return mode_subsumes(mode, *other_mode);
            }

            // Different names: containment by prefix on the pattern keys.
            specific.pattern().starts_with(&broader.pattern())
        }
        RuleKind::File { path } => path.starts_with(&format!("{name}/")),
        RuleKind::Glob { pattern } => {
            if mode != DirectoryMode::Recursive {
                return false;
            }

            let key = broader.pattern();
            let base = key.strip_suffix("/**").unwrap_or(&key);
            pattern.starts_with(base)
        }
        RuleKind::Extension { .. } => false,
    }
}

/// Mode containment for two directory rules naming the same directory.
fn mode_subsumes(broader: DirectoryMode, narrower: DirectoryMode) -> bool {
    // name/** covers both name/ and name/*
    if broader == DirectoryMode::Recursive
        && matches!(narrower, DirectoryMode::Directory | DirectoryMode::Children)
    {
        return true;
    }

    // name/* covers name/
    broader == DirectoryMode::Children && narrower == DirectoryMode::Directory
}

fn glob_subsumes(pattern: &str, specific: &Rule) -> bool {
    // Only the `*.ext` shape is recognized; anything else is opaque.
    let Some(ext) = pattern.strip_prefix("*.") else {
        return false;
    };

    match &specific.kind {
        RuleKind::File { path } => path.ends_with(&format!(".{ext}")),
        _ => false,
    }
}

fn extension_subsumes(ext: &str, specific: &Rule) -> bool {
    let dotted = format!(".{ext}");
    match &specific.kind {
        RuleKind::File { path } => path.ends_with(&dotted),
        RuleKind::Glob { pattern } => pattern.ends_with(&dotted),
        // Extensions subsume neither directories nor other extensions.
        _ => false,
    }
}

/// Does an intervening exception rescue a subsumed pair?
///
/// An exception is any intervening rule whose action opposes the broader
/// rule's and whose pattern lies inside the broader pattern's domain while
/// still being able to affect the specific rule's matches. When one exists,
/// the narrower rule is not redundant: it re-establishes the pattern after
/// the exception carved a hole into the broader one.
fn has_intervening_exceptions(broader: &Rule, specific: &Rule, intervening: &[Rule]) -> bool {
    intervening.iter().any(|rule| {
        rule.action() != broader.action() && affects_pattern_space(rule, broader, specific)
    })
}

fn affects_pattern_space(exception: &Rule, broader: &Rule, specific: &Rule) -> bool {
    let broader_key = broader.pattern();
    let broader_base = broader_key.strip_suffix("/**").unwrap_or(&broader_key);

    // The exception must sit inside the broader pattern's domain.
    if !exception.pattern().starts_with(broader_base) {
        return false;
    }

    match &specific.kind {
        RuleKind::Directory {
            name,
            mode: DirectoryMode::Directory,
        } => exception.pattern().starts_with(name.as_str()),
        RuleKind::File { path } => path.starts_with(&exception.pattern()),
        // For every other shape the domain check above already decides.
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Action, DirectoryMode, Rule};

    fn file(path: &str, action: Action) -> Rule {
        Rule::file(path, action).unwrap()
    }

    fn ext(ext: &str, action: Action) -> Rule {
        Rule::extension(ext, action).unwrap()
    }

    fn dir(name: &str, mode: DirectoryMode, action: Action) -> Rule {
        Rule::directory(name, mode, action).unwrap()
    }

    fn glob(pattern: &str, action: Action) -> Rule {
        Rule::glob(pattern, action).unwrap()
    }

    #[test]
    fn check_conflict_cases() {
        use Action::*;
        use DirectoryMode::*;

        struct Case {
            name: &'static str,
            left: Rule,
            right: Rule,
            intervening: Vec<Rule>,
            expected: Option<ConflictKind>,
        }

        let cases = [
            Case {
                name: "unrelated rules pass",
                left: file("todo.md", Include),
                right: dir("build", Directory, Include),
                intervening: vec![],
                expected: None,
            },
            Case {
                name: "intervening exception rescues",
                left: dir("build", Directory, Include),
                right: dir("build", Recursive, Include),
                intervening: vec![file("build/important.txt", Exclude)],
                expected: None,
            },
            Case {
                name: "exception before its include is ineffective",
                left: file("build/important.txt", Exclude),
                right: dir("build", Recursive, Include),
                intervening: vec![],
                expected: Some(ConflictKind::IneffectiveRule),
            },
            Case {
                name: "same pattern opposite actions is semantic",
                left: file("todo.md", Include),
                right: file("todo.md", Exclude),
                intervening: vec![],
                expected: Some(ConflictKind::SemanticConflict),
            },
            Case {
                name: "same pattern same action is redundant",
                left: file("todo.md", Include),
                right: file("todo.md", Include),
                intervening: vec![],
                expected: Some(ConflictKind::RedundantRule),
            },
            Case {
                name: "children mode shadows directory mode",
                left: dir("build", Children, Include),
                right: dir("build", Directory, Include),
                intervening: vec![],
                expected: Some(ConflictKind::UnreachableRule),
            },
            Case {
                name: "parent directory shadows nested directory",
                left: dir("build", Directory, Include),
                right: dir("build/logs", Directory, Include),
                intervening: vec![],
                expected: Some(ConflictKind::UnreachableRule),
            },
            Case {
                name: "star-ext glob shadows matching file",
                left: glob("*.txt", Include),
                right: file("build/todo.txt", Include),
                intervening: vec![],
                expected: Some(ConflictKind::UnreachableRule),
            },
            Case {
                name: "extension shadows matching file",
                left: ext("txt", Include),
                right: file("todo.txt", Include),
                intervening: vec![],
                expected: Some(ConflictKind::UnreachableRule),
            },
            Case {
                name: "extension shadows matching glob",
                left: ext("txt", Include),
                right: glob("logs*.txt", Include),
                intervening: vec![],
                expected: Some(ConflictKind::UnreachableRule),
            },
        ];

        for case in cases {
            let conflict = check_conflict(&case.left, &case.right, &case.intervening);
            assert_eq!(
                conflict.as_ref().map(|c| c.kind),
                case.expected,
                "case: {}",
                case.name
            );
        }
    }

    #[test]
    fn conflict_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ConflictKind::SemanticConflict).unwrap();
        assert_eq!(json, "\"SEMANTIC_CONFLICT\"");
        assert_eq!(ConflictKind::UnreachableRule.to_string(), "UNREACHABLE_RULE");
    }

    #[test]
    fn reversed_subsumption_swaps_sides() {
        // The broader rule appears later in the file; the emitted conflict
        // must still carry it on the left.
        let narrow = file("debug.log", Action::Include);
        let broad = ext("log", Action::Include);

        let conflict = check_conflict(&narrow, &broad, &[]).unwrap();
        assert_eq!(conflict.kind, ConflictKind::UnreachableRule);
        assert_eq!(conflict.left, broad);
        assert_eq!(conflict.right, narrow);
    }

    #[test]
    fn correct_exception_order_is_not_a_conflict() {
        // Broader include first, narrower exclude after: that is the one
        // arrangement where an exception works.
        let broad = dir("build", DirectoryMode::Recursive, Action::Include);
        let exception = file("build/important.txt", Action::Exclude);

        assert_eq!(check_conflict(&broad, &exception, &[]), None);
    }

    #[test]
    fn files_never_subsume() {
        let a = file("build/important.txt", Action::Include);
        let b = file("build", Action::Include);
        assert!(!subsumes(&a, &b));
        assert!(!subsumes(&b, &a));
    }

    #[test]
    fn extension_subsumes_file_and_glob_only() {
        let log = ext("log", Action::Include);
        assert!(subsumes(&log, &file("debug.log", Action::Include)));
        assert!(subsumes(&log, &glob("build/*.log", Action::Include)));
        assert!(!subsumes(&log, &ext("txt", Action::Include)));
        assert!(!subsumes(
            &log,
            &dir("log", DirectoryMode::Directory, Action::Include)
        ));
        assert!(!subsumes(&log, &file("changelog", Action::Include)));
    }

    #[test]
    fn glob_subsumption_is_limited_to_star_ext() {
        let star_ext = glob("*.txt", Action::Include);
        assert!(subsumes(&star_ext, &file("notes.txt", Action::Include)));
        assert!(!subsumes(&star_ext, &glob("docs/*.txt", Action::Include)));

        // Arbitrary glob containment is not computed.
        let broad = glob("build/**", Action::Include);
        assert!(!subsumes(&broad, &file("build/out.bin", Action::Include)));
    }

    #[test]
    fn directory_mode_lattice() {
        use DirectoryMode::*;

        assert!(mode_subsumes(Recursive, Directory));
        assert!(mode_subsumes(Recursive, Children));
        assert!(mode_subsumes(Children, Directory));

        assert!(!mode_subsumes(Directory, Recursive));
        assert!(!mode_subsumes(Children, Recursive));
        assert!(!mode_subsumes(Directory, Directory));
        assert!(!mode_subsumes(Anywhere, Directory));
        assert!(!mode_subsumes(RootOnly, Directory));
    }

    #[test]
    fn recursive_directory_subsumes_prefixed_glob() {
        let build = dir("build", DirectoryMode::Recursive, Action::Include);
        assert!(subsumes(&build, &glob("build/*.tmp", Action::Include)));

        let children = dir("build", DirectoryMode::Children, Action::Include);
        assert!(!subsumes(&children, &glob("build/*.tmp", Action::Include)));
    }

    #[test]
    fn directory_subsumes_file_under_it() {
        let build = dir("build", DirectoryMode::Recursive, Action::Include);
        assert!(subsumes(&build, &file("build/out.bin", Action::Include)));
        assert!(!subsumes(&build, &file("buildings/plan.txt", Action::Include)));
    }

    #[test]
    fn rescue_requires_exception_inside_broader_domain() {
        let broad = ext("log", Action::Include);
        let narrow = file("debug.log", Action::Include);

        // `!important.log` does not start with the broader key `*.log`, so it
        // cannot rescue the pair.
        let unrelated = file("important.log", Action::Exclude);
        assert!(check_conflict(&narrow, &broad, std::slice::from_ref(&unrelated)).is_some());
    }

    #[test]
    fn rescue_requires_opposite_action() {
        let left = dir("build", DirectoryMode::Directory, Action::Include);
        let right = dir("build", DirectoryMode::Recursive, Action::Include);

        // Same-action intervening rule is no exception.
        let same_action = file("build/keep.txt", Action::Include);
        let conflict = check_conflict(&left, &right, std::slice::from_ref(&same_action));
        assert_eq!(conflict.map(|c| c.kind), Some(ConflictKind::UnreachableRule));
    }

    #[test]
    fn rescue_for_specific_file_checks_path_prefix() {
        let broad = dir("build", DirectoryMode::Recursive, Action::Include);
        let narrow = file("build/cache/blob.bin", Action::Include);

        // Exception covering the specific file's path prefix rescues it.
        let exception = file("build/cache", Action::Exclude);
        assert_eq!(
            check_conflict(&broad, &narrow, std::slice::from_ref(&exception)),
            None
        );

        // Exception elsewhere under build/ does not affect the specific file.
        let elsewhere = file("build/other.txt", Action::Exclude);
        let conflict = check_conflict(&broad, &narrow, std::slice::from_ref(&elsewhere));
        assert_eq!(conflict.map(|c| c.kind), Some(ConflictKind::UnreachableRule));
    }
}
