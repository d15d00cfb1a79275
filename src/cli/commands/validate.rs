//! `validate` command
//!
//! Loads each file independently and reports errors and warnings, either
//! as log lines or as a single JSON report on stdout.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::loader::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, Result, StyleCfgError};

/// Per-file entry of the JSON report.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    valid: usize,
    invalid: usize,
    warnings: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

/// Validate configuration files.
///
/// Every file is loaded and reported, as one line per file (plus one line
/// per issue) or as a single JSON report; the first error is returned
/// afterwards.
///
/// # Errors
///
/// Returns an I/O error if a file does not exist, a config error if any
/// file fails validation, or a strict-mode error if `--strict` is set and
/// any warning was reported.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let mut files = Vec::with_capacity(args.files.len());
    let mut first_error: Option<ConfigError> = None;
    let mut warning_count = 0;

    for path in &args.files {
        super::ensure_exists(path)?;
        tracing::info!(file = %path.display(), "validating configuration");

        let mut loader = ConfigLoader::new(super::loader_options(args.no_env));
        match loader.load(path) {
            Ok(result) => {
                super::log_warnings(&result.warnings);
                warning_count += result.warnings.len();

                if args.format == OutputFormat::Human {
                    println!(
                        "{}: valid ({} warning(s))",
                        path.display(),
                        result.warnings.len()
                    );
                }

                files.push(FileReport {
                    path: path.display().to_string(),
                    valid: true,
                    errors: Vec::new(),
                    warnings: result.warnings.iter().map(format_warning).collect(),
                });
            }
            Err(e) => {
                let errors = error_messages(&e);
                if args.format == OutputFormat::Human {
                    println!("{}: invalid", path.display());
                    for message in &errors {
                        println!("  {message}");
                    }
                }
                files.push(FileReport {
                    path: path.display().to_string(),
                    valid: false,
                    errors,
                    warnings: Vec::new(),
                });
                first_error.get_or_insert(e);
            }
        }
    }

    if args.format == OutputFormat::Json {
        let valid = files.iter().filter(|f| f.valid).count();
        let report = Report {
            summary: Summary {
                valid,
                invalid: files.len() - valid,
                warnings: warning_count,
            },
            files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(e) = first_error {
        return Err(e.into());
    }

    if args.strict && warning_count > 0 {
        return Err(StyleCfgError::StrictWarnings {
            count: warning_count,
        });
    }

    Ok(())
}

fn format_warning(warning: &LoadWarning) -> String {
    match &warning.location {
        Some(location) => format!("{} at {location}", warning.message),
        None => warning.message.clone(),
    }
}

/// Expands a validation error into one message per issue.
fn error_messages(err: &ConfigError) -> Vec<String> {
    match err {
        ConfigError::ValidationError { errors, .. } => {
            errors.iter().map(ToString::to_string).collect()
        }
        other => vec![other.to_string()],
    }
}
