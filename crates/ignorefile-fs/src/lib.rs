//! Parsing, rendering, and persistence for ignore-pattern files
//!
//! This crate is the text and filesystem boundary around
//! `ignorefile-core`: a line-oriented parser, a renderer, the
//! [`Repository`] persistence trait with a file-backed implementation, and
//! the [`Service`] facade that wraps every core operation in a
//! load-modify-save round trip.

pub mod error;
pub mod parser;
pub mod renderer;
pub mod repository;
pub mod service;

pub use error::{Error, Result};
pub use parser::{parse, parse_rule};
pub use renderer::{render, RenderOptions};
pub use repository::{FileRepository, Repository};
pub use service::Service;
