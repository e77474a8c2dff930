//! Line-oriented parsing of ignore file content.
//!
//! One line becomes one rule. The classifier runs in a fixed order: comments
//! and blanks are skipped, a leading `!` flips the action, then the line is
//! tried as an extension pattern, a directory pattern (by its affix), a glob,
//! and finally an exact path. Lines that fail to produce a rule are logged
//! and skipped — a broken line in a hand-edited file should not make the
//! whole file unreadable.

use ignorefile_core::{Action, DirectoryMode, IgnoreFile, Rule};
use tracing::warn;

/// Parse ignore file content into an [`IgnoreFile`].
///
/// The rule sequence reproduces the file verbatim (minus comments, blanks,
/// and unparseable lines); no conflict checking or reordering happens here.
pub fn parse(content: &str) -> IgnoreFile {
    let mut file = IgnoreFile::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_rule(line) {
            Ok(rule) => file.push_raw(rule),
            Err(err) => {
                warn!(line = idx + 1, content = line, %err, "skipping unparseable line");
            }
        }
    }

    file
}

/// Parse a single pattern line into a typed rule.
///
/// # Errors
///
/// Returns the core validation error when the line normalizes to an empty
/// pattern (e.g. `!`, `/`, or whitespace after the prefix handling).
pub fn parse_rule(line: &str) -> ignorefile_core::Result<Rule> {
    let (action, line) = match line.strip_prefix('!') {
        Some(rest) => (Action::Exclude, rest),
        None => (Action::Include, line),
    };

    if is_extension_pattern(line) {
        return Rule::extension(line, action);
    }

    if let Some((name, mode)) = split_directory_pattern(line) {
        return Rule::directory(name, mode, action);
    }

    if is_glob_pattern(line) {
        return Rule::glob(line, action);
    }

    Rule::file(line, action)
}

/// `*.<token>` where the token holds no path separator and no further
/// wildcard; anything else is glob territory.
fn is_extension_pattern(line: &str) -> bool {
    match line.strip_prefix("*.") {
        Some(token) => !token.contains('/') && !token.contains('*'),
        None => false,
    }
}

/// Match a directory affix and strip it. Suffixes are tried longest first so
/// `build/**` is not mistaken for `build/` + garbage.
fn split_directory_pattern(line: &str) -> Option<(&str, DirectoryMode)> {
    if let Some(name) = line.strip_suffix("/**") {
        return Some((name, DirectoryMode::Recursive));
    }
    if let Some(name) = line.strip_suffix("/*") {
        return Some((name, DirectoryMode::Children));
    }
    if let Some(name) = line.strip_suffix('/') {
        return Some((name, DirectoryMode::Directory));
    }
    if let Some(name) = line.strip_prefix("**/") {
        return Some((name, DirectoryMode::Anywhere));
    }
    if let Some(name) = line.strip_prefix('/') {
        return Some((name, DirectoryMode::RootOnly));
    }
    None
}

fn is_glob_pattern(line: &str) -> bool {
    line.contains('*') || line.contains('?') || line.contains('[')
}
