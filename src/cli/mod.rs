//! CLI module for mockrest
//!
//! Provides command-line interface for:
//! - serve: Load a JSON database and serve it over REST
//! - rewrite: Dry-run the path rewriter over a list of URLs

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{resolve_config, rewrite, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
