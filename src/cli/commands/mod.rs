//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod export;
pub mod validate;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::config::loader::{LoadWarning, LoaderOptions};
use crate::error::{Result, StyleCfgError};

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Export(args) => export::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loader options shared by commands that read configuration files.
fn loader_options(no_env: bool) -> LoaderOptions {
    LoaderOptions {
        expand_env: !no_env,
        ..LoaderOptions::default()
    }
}

/// Fails with an I/O error if `path` does not exist.
fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    Err(StyleCfgError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("file not found: {}", path.display()),
    )))
}

fn log_warnings(warnings: &[LoadWarning]) {
    for warning in warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}
