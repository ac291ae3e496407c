//! covmerge CLI library
//!
//! Argument parsing, configuration and the merge handler behind the
//! `opencover-merge` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;

pub use commands::Cli;
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
