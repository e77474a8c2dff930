//! The typed rule model.
//!
//! A [`Rule`] is an immutable value object describing one line of an ignore
//! file: an exact path, a file extension, a directory (with a matching mode),
//! or a free-form glob. Every rule carries an [`Action`] deciding whether the
//! pattern is ignored or re-included.
//!
//! Two rules are equal when their *pattern keys* (rendered text minus the
//! leading `!`) and actions match; the concrete variant does not participate
//! in equality. This is what lets the conflict engine treat `build/` written
//! by hand and `build/` produced by a constructor as the same rule.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Prefix that marks an exception rule in rendered form.
pub const EXCLUDE_PREFIX: &str = "!";

/// What a rule does to the paths it matches.
///
/// `Include` means "ignore this pattern". `Exclude` is an exception: it
/// re-includes paths that a broader `Include` earlier in the file would
/// otherwise ignore, and is only meaningful in that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Include,
    Exclude,
}

impl Action {
    /// The rendered prefix for this action (`!` for exceptions).
    pub fn prefix(self) -> &'static str {
        match self {
            Action::Include => "",
            Action::Exclude => EXCLUDE_PREFIX,
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "include" => Ok(Action::Include),
            "exclude" => Ok(Action::Exclude),
            other => Err(Error::InvalidAction {
                value: other.to_string(),
            }),
        }
    }
}

/// How a directory rule matches.
///
/// The mode decides the rendered decoration around the directory name:
///
/// | Mode | Rendered form |
/// |---|---|
/// | `Directory` | `name/` |
/// | `Children` | `name/*` |
/// | `Recursive` | `name/**` |
/// | `Anywhere` | `**/name` |
/// | `RootOnly` | `/name` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryMode {
    Directory,
    Children,
    Recursive,
    Anywhere,
    RootOnly,
}

impl DirectoryMode {
    /// Rendered prefix for this mode.
    pub fn prefix(self) -> &'static str {
        match self {
            DirectoryMode::Anywhere => "**/",
            DirectoryMode::RootOnly => "/",
            _ => "",
        }
    }

    /// Rendered suffix for this mode.
    pub fn suffix(self) -> &'static str {
        match self {
            DirectoryMode::Directory => "/",
            DirectoryMode::Children => "/*",
            DirectoryMode::Recursive => "/**",
            _ => "",
        }
    }
}

impl FromStr for DirectoryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "directory" => Ok(DirectoryMode::Directory),
            "children" => Ok(DirectoryMode::Children),
            "recursive" => Ok(DirectoryMode::Recursive),
            "anywhere" => Ok(DirectoryMode::Anywhere),
            "root_only" => Ok(DirectoryMode::RootOnly),
            other => Err(Error::InvalidDirectoryMode {
                value: other.to_string(),
            }),
        }
    }
}

/// The four rule shapes.
///
/// Kept private so every `Rule` in circulation went through a validating
/// constructor; the conflict engine does exhaustive case analysis on it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RuleKind {
    File { path: String },
    Extension { ext: String },
    Directory { name: String, mode: DirectoryMode },
    Glob { pattern: String },
}

/// One line of an ignore file.
///
/// Construct with [`Rule::file`], [`Rule::extension`], [`Rule::directory`],
/// or [`Rule::glob`]; each validates and normalizes its input. Rules never
/// mutate after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    #[serde(flatten)]
    pub(crate) kind: RuleKind,
    pub(crate) action: Action,
}

impl Rule {
    /// Create a rule matching one exact path.
    ///
    /// The path is trimmed; an empty result is rejected with
    /// [`Error::EmptyPath`].
    pub fn file(path: impl AsRef<str>, action: Action) -> Result<Self> {
        let path = path.as_ref().trim();
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }

        Ok(Rule {
            kind: RuleKind::File {
                path: path.to_string(),
            },
            action,
        })
    }

    /// Create a rule matching every path with the given extension.
    ///
    /// The extension is trimmed and any leading `*.` or `.` is stripped, so
    /// `log`, `.log`, and `*.log` all produce the same rule. An empty result
    /// is rejected with [`Error::EmptyExtension`].
    pub fn extension(ext: impl AsRef<str>, action: Action) -> Result<Self> {
        let ext = ext.as_ref().trim();
        let ext = ext.strip_prefix("*.").unwrap_or(ext);
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if ext.is_empty() {
            return Err(Error::EmptyExtension);
        }

        Ok(Rule {
            kind: RuleKind::Extension {
                ext: ext.to_string(),
            },
            action,
        })
    }

    /// Create a directory rule.
    ///
    /// The name is trimmed and stripped of one leading and one trailing `/`,
    /// so `build`, `/build`, and `build/` name the same directory. An empty
    /// result is rejected with [`Error::EmptyDirectoryName`].
    pub fn directory(name: impl AsRef<str>, mode: DirectoryMode, action: Action) -> Result<Self> {
        let name = name.as_ref().trim();
        let name = name.strip_prefix('/').unwrap_or(name);
        let name = name.strip_suffix('/').unwrap_or(name);
        if name.is_empty() {
            return Err(Error::EmptyDirectoryName);
        }

        Ok(Rule {
            kind: RuleKind::Directory {
                name: name.to_string(),
                mode,
            },
            action,
        })
    }

    /// Create a rule carrying an arbitrary glob pattern.
    ///
    /// The pattern is trimmed; an empty result is rejected with
    /// [`Error::EmptyGlobPattern`].
    pub fn glob(pattern: impl AsRef<str>, action: Action) -> Result<Self> {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() {
            return Err(Error::EmptyGlobPattern);
        }

        Ok(Rule {
            kind: RuleKind::Glob {
                pattern: pattern.to_string(),
            },
            action,
        })
    }

    /// The textual form of this rule, `!`-prefixed for exceptions.
    pub fn render(&self) -> String {
        let prefix = self.action.prefix();
        match &self.kind {
            RuleKind::File { path } => format!("{prefix}{path}"),
            RuleKind::Extension { ext } => format!("{prefix}*.{ext}"),
            RuleKind::Directory { name, mode } => {
                format!("{prefix}{}{name}{}", mode.prefix(), mode.suffix())
            }
            RuleKind::Glob { pattern } => format!("{prefix}{pattern}"),
        }
    }

    /// This rule's action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The pattern key: the rendered form minus any leading `!`.
    ///
    /// Equality and all subsumption arithmetic operate on this key, so two
    /// rules with the same shape but opposite actions share a key.
    pub fn pattern(&self) -> String {
        let rendered = self.render();
        match rendered.strip_prefix(EXCLUDE_PREFIX) {
            Some(rest) => rest.to_string(),
            None => rendered,
        }
    }
}

impl PartialEq for Rule {
    /// Structural equality: pattern keys match and actions match.
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action && self.pattern() == other.pattern()
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
