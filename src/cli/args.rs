//! CLI argument definitions using clap
//!
//! Commands:
//! - mockrest serve <DB_FILE> [flags]
//! - mockrest rewrite --routes <path> <URL>...

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mockrest - a deterministic mock REST API over a JSON file
#[derive(Parser, Debug)]
#[command(name = "mockrest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve a JSON database over REST
    Serve(ServeArgs),

    /// Print what each URL rewrites to, without serving
    Rewrite {
        /// JSON file of rewrite rules
        #[arg(long)]
        routes: PathBuf,

        /// URLs (path and query) to rewrite
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

/// Flags for `serve`. Every flag overrides the config file.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// JSON database file
    pub db_file: PathBuf,

    /// Path to configuration file (default: ./mockrest.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file of rewrite rules
    #[arg(long)]
    pub routes: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Identifier field name
    #[arg(long)]
    pub id: Option<String>,

    /// Foreign key suffix
    #[arg(long)]
    pub foreign_key_suffix: Option<String>,

    /// Delay every response, in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,

    /// Suppress per-request logs
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "mockrest", "serve", "db.json", "--port", "4000", "--id", "_id", "--quiet",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.db_file, PathBuf::from("db.json"));
                assert_eq!(args.port, Some(4000));
                assert_eq!(args.id.as_deref(), Some("_id"));
                assert!(args.quiet);
                assert!(args.routes.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rewrite() {
        let cli = Cli::try_parse_from([
            "mockrest", "rewrite", "--routes", "routes.json", "/api/posts", "/blog/1",
        ])
        .unwrap();

        match cli.command {
            Command::Rewrite { routes, urls } => {
                assert_eq!(routes, PathBuf::from("routes.json"));
                assert_eq!(urls, vec!["/api/posts", "/blog/1"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rewrite_requires_urls() {
        assert!(Cli::try_parse_from(["mockrest", "rewrite", "--routes", "r.json"]).is_err());
    }
}
