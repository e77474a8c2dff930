//! Load-modify-save facade over a [`Repository`].
//!
//! Every mutating operation loads the ignore file, applies one core
//! operation, and saves the result; nothing is written when the operation
//! fails. The sequence is not atomic across concurrent callers hitting the
//! same path — last writer wins.

use std::path::Path;

use ignorefile_core::{
    Action, ActionReason, Conflict, DirectoryMode, IgnoreFile, MoveDirection, Rule, RuleResult,
};

use crate::error::Result;
use crate::parser;
use crate::repository::Repository;

/// High-level operations on ignore files addressed by path.
#[derive(Debug)]
pub struct Service<R: Repository> {
    repo: R,
}

impl<R: Repository> Service<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create an empty ignore file at `path`.
    pub fn init(&self, path: &Path) -> Result<()> {
        self.repo.save(path, &IgnoreFile::new())
    }

    /// Add a rule for one exact path.
    pub fn add_file_rule(
        &self,
        path: &Path,
        file_path: &str,
        action: Action,
    ) -> Result<Vec<RuleResult>> {
        let rule = Rule::file(file_path, action)?;
        self.load_modify_save(path, |file| file.add(rule))
    }

    /// Add a rule for a file extension.
    pub fn add_extension_rule(
        &self,
        path: &Path,
        ext: &str,
        action: Action,
    ) -> Result<Vec<RuleResult>> {
        let rule = Rule::extension(ext, action)?;
        self.load_modify_save(path, |file| file.add(rule))
    }

    /// Add a directory rule.
    pub fn add_directory_rule(
        &self,
        path: &Path,
        name: &str,
        mode: DirectoryMode,
        action: Action,
    ) -> Result<Vec<RuleResult>> {
        let rule = Rule::directory(name, mode, action)?;
        self.load_modify_save(path, |file| file.add(rule))
    }

    /// Add a glob rule.
    pub fn add_glob_rule(
        &self,
        path: &Path,
        pattern: &str,
        action: Action,
    ) -> Result<Vec<RuleResult>> {
        let rule = Rule::glob(pattern, action)?;
        self.load_modify_save(path, |file| file.add(rule))
    }

    /// Add a rule given as a raw pattern line (leading `!` for exceptions).
    ///
    /// The line goes through the same classifier as file content, so
    /// `build/**`, `*.log`, and `!important.log` all land as their typed
    /// rule shapes.
    pub fn add_pattern(&self, path: &Path, pattern: &str) -> Result<Vec<RuleResult>> {
        let rule = parser::parse_rule(pattern)?;
        self.load_modify_save(path, |file| file.add(rule))
    }

    /// Delete the rule for one exact path.
    pub fn delete_file_rule(
        &self,
        path: &Path,
        file_path: &str,
        action: Action,
    ) -> Result<RuleResult> {
        let rule = Rule::file(file_path, action)?;
        self.load_modify_save(path, |file| file.delete(&rule))
    }

    /// Delete the rule for a file extension.
    pub fn delete_extension_rule(
        &self,
        path: &Path,
        ext: &str,
        action: Action,
    ) -> Result<RuleResult> {
        let rule = Rule::extension(ext, action)?;
        self.load_modify_save(path, |file| file.delete(&rule))
    }

    /// Delete a directory rule.
    pub fn delete_directory_rule(
        &self,
        path: &Path,
        name: &str,
        mode: DirectoryMode,
        action: Action,
    ) -> Result<RuleResult> {
        let rule = Rule::directory(name, mode, action)?;
        self.load_modify_save(path, |file| file.delete(&rule))
    }

    /// Delete a glob rule.
    pub fn delete_glob_rule(
        &self,
        path: &Path,
        pattern: &str,
        action: Action,
    ) -> Result<RuleResult> {
        let rule = Rule::glob(pattern, action)?;
        self.load_modify_save(path, |file| file.delete(&rule))
    }

    /// Delete the rule matching a raw pattern line.
    pub fn delete_pattern(&self, path: &Path, pattern: &str) -> Result<RuleResult> {
        let rule = parser::parse_rule(pattern)?;
        self.load_modify_save(path, |file| file.delete(&rule))
    }

    /// Move the rule matching `pattern` before or after the rule matching
    /// `target_pattern`.
    ///
    /// Returns `Ok(None)` when the rule already sits in the requested
    /// position.
    pub fn move_rule(
        &self,
        path: &Path,
        pattern: &str,
        target_pattern: &str,
        direction: MoveDirection,
    ) -> Result<Option<RuleResult>> {
        let rule = parser::parse_rule(pattern)?;
        let target = parser::parse_rule(target_pattern)?;

        self.load_modify_save(path, |file| {
            file.move_rule(&rule, &target, direction, ActionReason::Requested)
        })
    }

    /// Run the conflict fixer against the file at `path`.
    pub fn auto_fix(&self, path: &Path, max_passes: usize) -> Result<Vec<RuleResult>> {
        self.load_modify_save(path, |file| file.fix_conflicts(max_passes))
    }

    /// Report conflicts without modifying anything.
    pub fn analyze_conflicts(&self, path: &Path) -> Result<Vec<Conflict>> {
        Ok(self.repo.load(path)?.find_conflicts())
    }

    /// Render the file at `path` as it is currently stored.
    pub fn rules(&self, path: &Path) -> Result<IgnoreFile> {
        self.repo.load(path)
    }

    fn load_modify_save<T>(
        &self,
        path: &Path,
        modify: impl FnOnce(&mut IgnoreFile) -> ignorefile_core::Result<T>,
    ) -> Result<T> {
        let mut file = self.repo.load(path)?;
        let value = modify(&mut file)?;
        self.repo.save(path, &file)?;

        Ok(value)
    }
}
