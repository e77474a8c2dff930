//! End-to-end conflict detection and repair flows over whole rule sequences.

use ignorefile_core::{
    Action, ConflictKind, DirectoryMode, Error, IgnoreFile, Rule, RuleOutcome,
};
use pretty_assertions::assert_eq;

fn file(path: &str, action: Action) -> Rule {
    Rule::file(path, action).unwrap()
}

fn ext(e: &str, action: Action) -> Rule {
    Rule::extension(e, action).unwrap()
}

fn dir(name: &str, mode: DirectoryMode, action: Action) -> Rule {
    Rule::directory(name, mode, action).unwrap()
}

fn with_rules(rules: Vec<Rule>) -> IgnoreFile {
    let mut f = IgnoreFile::new();
    for rule in rules {
        f.push_raw(rule);
    }
    f
}

fn rendered(f: &IgnoreFile) -> Vec<String> {
    f.rules().iter().map(Rule::render).collect()
}

#[test]
fn redundant_duplicate_collapses_to_one() {
    let mut f = with_rules(vec![
        ext("log", Action::Include),
        ext("log", Action::Include),
        file("config.json", Action::Include),
    ]);

    let results = f.fix_conflicts(10).unwrap();

    assert_eq!(rendered(&f), ["*.log", "config.json"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, RuleOutcome::Removed);
}

#[test]
fn adjacent_unreachable_rule_is_deleted() {
    let mut f = with_rules(vec![
        dir("build", DirectoryMode::Recursive, Action::Include),
        dir("build", DirectoryMode::Directory, Action::Include),
    ]);

    let results = f.fix_conflicts(10).unwrap();

    assert_eq!(rendered(&f), ["build/**"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, RuleOutcome::Removed);
}

#[test]
fn misplaced_exception_moves_after_its_include() {
    let mut f = with_rules(vec![
        file("build/important.txt", Action::Exclude),
        dir("build", DirectoryMode::Recursive, Action::Include),
    ]);

    let results = f.fix_conflicts(10).unwrap();

    assert_eq!(rendered(&f), ["build/**", "!build/important.txt"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, RuleOutcome::Moved);
}

#[test]
fn intervening_exception_rescues_directory_pair() {
    let f = with_rules(vec![
        dir("build", DirectoryMode::Directory, Action::Include),
        file("build/important.txt", Action::Exclude),
        dir("build", DirectoryMode::Recursive, Action::Include),
    ]);

    let conflicts = f.find_conflicts();

    // The two same-action directory rules are rescued by the exception
    // between them; what remains is the exception itself sitting before the
    // recursive include it is supposed to override.
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::IneffectiveRule);
    assert_eq!(conflicts[0].left.render(), "!build/important.txt");
    assert_eq!(conflicts[0].right.render(), "build/**");
    assert!(!conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::UnreachableRule));
}

#[test]
fn add_rejection_leaves_container_untouched() {
    let mut f = with_rules(vec![ext("txt", Action::Include)]);
    let before = f.clone();

    let err = f.add(file("todo.txt", Action::Include)).unwrap_err();
    assert!(matches!(err, Error::UnreachableRule));
    assert_eq!(f, before);
    assert_eq!(rendered(&f), ["*.txt"]);
}

#[test]
fn complex_mixed_sequence_settles() {
    let mut f = with_rules(vec![
        file("ignorefile-cli", Action::Include),
        dir("build", DirectoryMode::Recursive, Action::Include),
        file("build/important.txt", Action::Exclude),
        file("debug.log", Action::Include),
        ext("log", Action::Include),
        file("important.log", Action::Exclude),
        ext("log", Action::Include),
    ]);

    let results = f.fix_conflicts(20).unwrap();

    assert_eq!(
        rendered(&f),
        [
            "ignorefile-cli",
            "build/**",
            "!build/important.txt",
            "*.log",
            "!important.log",
        ]
    );

    // The shadowed debug.log is first pulled next to *.log and then deleted;
    // the duplicate *.log loses its earlier copy; the exception moves back
    // behind the include it belongs to.
    let outcomes: Vec<_> = results.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        [
            RuleOutcome::Moved,
            RuleOutcome::Removed,
            RuleOutcome::Removed,
            RuleOutcome::Moved,
        ]
    );
    assert!(f.find_conflicts().is_empty());
}

#[test]
fn fixer_leaves_only_semantic_conflicts() {
    let mut f = with_rules(vec![
        dir("build", DirectoryMode::Directory, Action::Include),
        file("build/important.txt", Action::Exclude),
        dir("build", DirectoryMode::Recursive, Action::Include),
        file("todo.md", Action::Include),
        file("todo.md", Action::Exclude),
    ]);

    f.fix_conflicts(20).unwrap();

    let remaining = f.find_conflicts();
    assert!(!remaining.is_empty());
    assert!(remaining
        .iter()
        .all(|c| c.kind == ConflictKind::SemanticConflict));
}

#[test]
fn detector_is_order_stable_across_calls() {
    let f = with_rules(vec![
        ext("log", Action::Include),
        file("debug.log", Action::Include),
        ext("log", Action::Include),
        file("todo.md", Action::Include),
        file("todo.md", Action::Exclude),
    ]);

    let first = f.find_conflicts();
    let second = f.find_conflicts();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn add_then_fix_keeps_broader_rules_first() {
    // A rescued narrow rule exists behind an exception; the broader newcomer
    // is pulled in front of it instead of being appended.
    let mut f = with_rules(vec![
        dir("build", DirectoryMode::Directory, Action::Include),
        file("build/important.txt", Action::Exclude),
    ]);

    let results = f
        .add(dir("build", DirectoryMode::Recursive, Action::Include))
        .unwrap();

    assert_eq!(results[0].outcome, RuleOutcome::Added);
    assert_eq!(rendered(&f)[0], "build/**");
}

#[test]
fn fix_reports_each_unrepaired_semantic_conflict_per_pass() {
    let mut f = with_rules(vec![
        file("todo.md", Action::Include),
        file("todo.md", Action::Exclude),
    ]);

    let results = f.fix_conflicts(5).unwrap();
    assert_eq!(results.len(), 5);
    assert!(results
        .iter()
        .all(|r| r.outcome == RuleOutcome::ReviewRecommended));
}

#[test]
fn misordered_directory_trio_settles_to_broadest() {
    // Fixing the rescued trio moves the exception back, which exposes the
    // directory pair; further passes collapse it onto the recursive rule.
    let mut f = with_rules(vec![
        dir("build", DirectoryMode::Directory, Action::Include),
        file("build/important.txt", Action::Exclude),
        dir("build", DirectoryMode::Recursive, Action::Include),
    ]);

    f.fix_conflicts(20).unwrap();

    assert_eq!(rendered(&f), ["build/**", "!build/important.txt"]);
    assert!(f.find_conflicts().is_empty());
}
