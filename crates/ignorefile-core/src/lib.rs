//! Rule model and conflict engine for ignore-pattern files
//!
//! This crate holds the in-memory model behind `ignorefile`: typed rules,
//! the subsumption relation between patterns, the conflict classifier, and
//! the ordered [`IgnoreFile`] container with its detector and multi-pass
//! fixer. No I/O happens here — parsing, rendering, and persistence live in
//! `ignorefile-fs`.
//!
//! # Architecture
//!
//! ```text
//!        ignorefile-cli
//!              |
//!        ignorefile-fs      (parse / render / load / save)
//!              |
//!        ignorefile-core    (rules, conflicts, container)
//! ```
//!
//! # Example
//!
//! ```
//! use ignorefile_core::{Action, DirectoryMode, IgnoreFile, Rule};
//!
//! fn example() -> ignorefile_core::Result<()> {
//!     let mut file = IgnoreFile::new();
//!     file.add(Rule::directory("build", DirectoryMode::Recursive, Action::Include)?)?;
//!     file.add(Rule::file("build/important.txt", Action::Exclude)?)?;
//!
//!     assert!(file.find_conflicts().is_empty());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod conflict;
pub mod error;
pub mod file;
pub mod results;
pub mod rule;

pub use conflict::{Conflict, ConflictKind};
pub use error::{Error, Result};
pub use file::{IgnoreFile, MoveDirection};
pub use results::{ActionReason, RuleOutcome, RuleResult};
pub use rule::{Action, DirectoryMode, Rule, EXCLUDE_PREFIX};
