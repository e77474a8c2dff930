//! Check and fix command implementations

use std::path::Path;

use colored::Colorize;

use crate::error::{CliError, Result};

/// Run the check command
///
/// Lists every detected conflict without modifying the file.
pub fn run_check(path: &Path, json: bool) -> Result<()> {
    let conflicts = super::service().analyze_conflicts(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("{} No conflicts detected.", "OK".green().bold());
        return Ok(());
    }

    println!(
        "{} Found {} conflict(s):",
        "=>".blue().bold(),
        conflicts.len()
    );
    for conflict in &conflicts {
        println!(
            "   {} {}: '{}' vs '{}'",
            "-".cyan(),
            conflict.kind.to_string().yellow(),
            conflict.left.render(),
            conflict.right.render()
        );
    }

    Ok(())
}

/// Run the fix command
///
/// Applies the multi-pass conflict fixer and reports every repair.
pub fn run_fix(path: &Path, max_passes: usize, json: bool) -> Result<()> {
    if max_passes == 0 {
        return Err(CliError::user("--max-passes must be at least 1"));
    }

    let results = super::service().auto_fix(path, max_passes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{} No conflicts found.", "OK".green().bold());
        return Ok(());
    }

    println!("{} Applied {} fix(es):", "=>".blue().bold(), results.len());
    for result in &results {
        println!("   {} {}", "-".cyan(), result.log());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ignore_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(".gitignore");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_check_clean_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "*.log\nbuild/\n");

        assert!(run_check(&path, false).is_ok());
    }

    #[test]
    fn test_check_does_not_modify() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "*.log\n*.log\n");
        let before = fs::read(&path).unwrap();

        run_check(&path, false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_check_json_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "*.log\n*.log\n");

        assert!(run_check(&path, true).is_ok());
    }

    #[test]
    fn test_check_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent");

        assert!(run_check(&path, false).is_err());
    }

    #[test]
    fn test_fix_removes_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "*.log\n*.log\nconfig.json\n");

        run_fix(&path, 10, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, ["*.log", "config.json"]);
    }

    #[test]
    fn test_fix_reorders_misplaced_exception() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "!build/important.txt\nbuild/**\n");

        run_fix(&path, 10, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, ["build/**", "!build/important.txt"]);
    }

    #[test]
    fn test_fix_rejects_zero_passes() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "*.log\n*.log\n");
        let before = fs::read(&path).unwrap();

        let result = run_fix(&path, 0, false);
        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_fix_clean_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = ignore_file(&temp_dir, "*.log\n");
        let before = fs::read(&path).unwrap();

        run_fix(&path, 10, false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
