//! CLI command implementations
//!
//! `serve` resolves configuration (file, then flags), loads the database
//! and rewrite rules, and runs the HTTP server on a tokio runtime.
//! `rewrite` is a dry run of the path rewriter.

use std::io::{self, Write};
use std::path::Path;

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::rewrite::CompiledRuleset;

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args),
        Command::Rewrite { routes, urls } => rewrite(&routes, &urls, &mut io::stdout().lock()),
    }
}

/// Merge the config file with command-line overrides
pub fn resolve_config(args: &ServeArgs) -> CliResult<ServerConfig> {
    let mut config = ServerConfig::load_or_default(args.config.as_deref())?;

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(id) = &args.id {
        config.id_field = id.clone();
    }
    if let Some(suffix) = &args.foreign_key_suffix {
        config.foreign_key_suffix = suffix.clone();
    }
    if let Some(routes) = &args.routes {
        config.routes = Some(routes.clone());
    }
    if let Some(delay) = args.delay {
        config.delay_ms = delay;
    }
    if args.quiet {
        config.quiet = true;
    }

    config.validate()?;
    Ok(config)
}

/// Serve a JSON database until the process is stopped
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let config = resolve_config(&args)?;

    if config.quiet {
        Logger::set_min_severity(Severity::Warn);
    }

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.socket_addr()),
            ("foreign_key_suffix", &config.foreign_key_suffix),
            ("id_field", &config.id_field),
        ],
    );

    let server = HttpServer::from_config(config, &args.db_file)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    if let Err(e) = rt.block_on(server.start()) {
        log_event_with_fields(Event::ServerFailed, &[("error", &e.to_string())]);
        return Err(e.into());
    }

    Ok(())
}

/// Print `<url> -> <rewritten>` for each URL
pub fn rewrite<W: Write>(routes: &Path, urls: &[String], out: &mut W) -> CliResult<()> {
    let rules = CompiledRuleset::load(routes)?;

    for url in urls {
        writeln!(out, "{} -> {}", url, rules.rewrite(url))?;
    }

    Ok(())
}
