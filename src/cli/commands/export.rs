//! `export` command
//!
//! Loads the given files, merges them left to right and writes the build
//! tool schema as JSON or as a CommonJS module.

use std::path::{Path, PathBuf};

use crate::cli::args::{ExportArgs, ExportFormat};
use crate::config::export::{to_js_module, to_json};
use crate::config::loader::ConfigLoader;
use crate::config::model::{Configuration, merge, to_external_schema};
use crate::error::{Result, StyleCfgError};

/// Export the merged configuration.
///
/// # Errors
///
/// Returns an I/O error if an input is missing or the output cannot be
/// written, a config error if any input fails to load or the merged
/// configuration exceeds the loader limits, or a usage error if
/// `--output` names one of the inputs or their bases.
pub fn run(args: &ExportArgs) -> Result<()> {
    let mut loader = ConfigLoader::new(super::loader_options(args.no_env));
    let mut merged = Configuration::default();

    for path in &args.files {
        super::ensure_exists(path)?;
        tracing::info!(file = %path.display(), "loading configuration");

        let result = loader.load(path)?;
        super::log_warnings(&result.warnings);
        merged = merge(&merged, &result.config);
    }

    if args.files.len() > 1 {
        merged.check_limits(loader.limits(), "merged inputs")?;
    }

    if let Some(output) = &args.output {
        ensure_not_input(output, &loader)?;
    }

    let schema = to_external_schema(&merged);
    let rendered = match args.format {
        ExportFormat::Json => to_json(&schema)?,
        ExportFormat::Js => to_js_module(&schema)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(output = %path.display(), format = ?args.format, "schema written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Fails if `output` resolves to a file the loader read.
fn ensure_not_input(output: &Path, loader: &ConfigLoader) -> Result<()> {
    let Some(target) = resolve_output(output) else {
        return Ok(());
    };

    if loader.loaded_files().any(|loaded| loaded == target) {
        return Err(StyleCfgError::Usage(format!(
            "output file {} is also an input",
            output.display()
        )));
    }
    Ok(())
}

/// Canonical location `output` would be written to, if its directory exists.
fn resolve_output(output: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = output.canonicalize() {
        return Some(canonical);
    }

    let file_name = output.file_name()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent
        .canonicalize()
        .ok()
        .map(|dir| dir.join(file_name))
}
