//! CLI argument definitions
//!
//! All Clap derive structs for `stylecfg` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Validate and export utility-CSS style configuration.
#[derive(Parser, Debug)]
#[command(name = "stylecfg", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "STYLECFG_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "STYLECFG_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration files.
    Validate(ValidateArgs),

    /// Merge configuration files and export the build tool schema.
    Export(ExportArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,

    /// Do not expand `${VAR}` references.
    #[arg(long)]
    pub no_env: bool,
}

/// Arguments for `export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Configuration files, merged left to right (later files win).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Export format.
    #[arg(short, long, default_value = "json")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long, env = "STYLECFG_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Do not expand `${VAR}` references.
    #[arg(long)]
    pub no_env: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Format of the exported build tool schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// CommonJS module (`module.exports = {...}`).
    Js,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_files() {
        let cli = Cli::try_parse_from(["stylecfg", "validate"]);
        assert!(cli.is_err(), "Expected missing files error");
    }

    #[test]
    fn test_validate_with_files() {
        let cli = Cli::try_parse_from(["stylecfg", "validate", "a.yaml", "b.json", "--strict"])
            .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.files.len(), 2);
                assert!(args.strict);
                assert_eq!(args.format, OutputFormat::Human);
            }
            other => panic!("Expected ValidateArgs, got {other:?}"),
        }
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["stylecfg", "export", "style.yaml"]).unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.format, ExportFormat::Json);
                assert!(!args.no_env);
            }
            other => panic!("Expected ExportArgs, got {other:?}"),
        }
    }

    #[test]
    fn test_export_js_with_output() {
        let cli = Cli::try_parse_from([
            "stylecfg",
            "export",
            "--format",
            "js",
            "-o",
            "tailwind.config.js",
            "base.yaml",
            "site.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.format, ExportFormat::Js);
                assert_eq!(args.output, Some(PathBuf::from("tailwind.config.js")));
                assert_eq!(args.files.len(), 2);
            }
            other => panic!("Expected ExportArgs, got {other:?}"),
        }
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["stylecfg", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["stylecfg", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_global_flags_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from([
                "stylecfg",
                "--color",
                variant,
                "--log-format",
                "json",
                "-vv",
                "version",
            ]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
            let cli = cli.unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.log_format, LogFormat::Json);
        }
    }
}
