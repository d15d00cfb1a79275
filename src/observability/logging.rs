//! Log subscriber setup.
//!
//! Load warnings and command progress go to stderr through `tracing`, so
//! stdout stays reserved for reports and exported schemas. The filter
//! comes from `STYLECFG_LOG_LEVEL` when set, otherwise from `-v` count.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an explicit `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "STYLECFG_LOG_LEVEL";

/// Rendering of log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    #[default]
    Human,
    /// Newline-delimited JSON objects.
    Json,
}

/// Maps `-v` occurrences to a level directive; warnings always show.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)))
}

/// Resolves `--color` against the terminal and `NO_COLOR`.
fn ansi_enabled(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
        }
    }
}

/// Installs the global subscriber.
///
/// Module targets are only printed from `-vv` upwards. A second call is a
/// no-op.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Human => builder.with_ansi(ansi_enabled(color)).try_init(),
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
    };

    if installed.is_ok() {
        tracing::trace!(?format, verbosity, "logging initialized");
    }
}
