//! Configuration loader
//!
//! This module implements the file loading pipeline:
//! 1. Size check and read (UTF-8 BOM stripped)
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML or JSON parsing into a [`StyleDocument`]
//! 4. Conversion to [`ConfigParts`], folding plugin option blocks in
//! 5. Validation and construction of the document's own [`Configuration`]
//! 6. `extends` resolution: bases are loaded and merged in order, then the
//!    document is merged on top
//! 7. Freeze with `Arc`

use crate::config::model::{ConfigParts, Configuration, PluginRef, merge};
use crate::config::schema::{PluginEntry, RESERVED_KEYS, StyleDocument};
use crate::error::ConfigError;

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Limits for configuration size.
    pub config_limits: ConfigLimits,

    /// Expand `${VAR}` references before parsing.
    pub expand_env: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            config_limits: ConfigLimits::default(),
            expand_env: true,
        }
    }
}

/// Limits for configuration size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum number of scan globs.
    pub max_scan_globs: usize,

    /// Maximum number of gradient stops.
    pub max_gradient_stops: usize,

    /// Maximum number of font tokens.
    pub max_font_tokens: usize,

    /// Maximum number of plugins.
    pub max_plugins: usize,

    /// Maximum `extends` nesting depth.
    pub max_extends_depth: usize,

    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl ConfigLimits {
    /// Built-in limits, ignoring the environment.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            max_scan_globs: 1000,
            max_gradient_stops: 1000,
            max_font_tokens: 500,
            max_plugins: 100,
            max_extends_depth: 10,
            max_config_size: 1024 * 1024,
        }
    }
}

/// Built-in limits, each overridable through a `STYLECFG_MAX_*` variable.
impl Default for ConfigLimits {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            max_scan_globs: env_or("STYLECFG_MAX_SCAN_GLOBS", builtin.max_scan_globs),
            max_gradient_stops: env_or("STYLECFG_MAX_GRADIENT_STOPS", builtin.max_gradient_stops),
            max_font_tokens: env_or("STYLECFG_MAX_FONT_TOKENS", builtin.max_font_tokens),
            max_plugins: env_or("STYLECFG_MAX_PLUGINS", builtin.max_plugins),
            max_extends_depth: env_or("STYLECFG_MAX_EXTENDS_DEPTH", builtin.max_extends_depth),
            max_config_size: env_or("STYLECFG_MAX_CONFIG_SIZE", builtin.max_config_size),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<Configuration>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Source syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (also accepts JSON, which is a YAML subset)
    Yaml,
    /// Strict JSON
    Json,
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `.json` is YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Configuration loader.
///
/// Loaded files are cached by canonical path, so a base shared by several
/// documents is read once per loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
    cache: HashMap<PathBuf, Arc<Configuration>>,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            cache: HashMap::new(),
        }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Limits this loader enforces.
    #[must_use]
    pub const fn limits(&self) -> &ConfigLimits {
        &self.options.config_limits
    }

    /// Canonical paths of every file loaded so far, bases included.
    pub fn loaded_files(&self) -> impl Iterator<Item = &Path> {
        self.cache.keys().map(PathBuf::as_path)
    }

    /// Loads a configuration file, resolving its `extends` chain.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file or one of its bases cannot be read
    /// - Parsing fails or the document is empty
    /// - `extends` forms a cycle or nests too deeply
    /// - Validation fails
    pub fn load(&mut self, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let mut stack = Vec::new();
        let config = self.load_recursive(path, &mut stack, &mut warnings)?;
        Ok(LoadResult { config, warnings })
    }

    /// Loads a configuration from in-memory YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails, or if the document
    /// declares `extends` (bases can only be resolved relative to a file).
    pub fn load_from_str(&mut self, text: &str) -> Result<LoadResult, ConfigError> {
        let origin = Path::new(crate::config::model::INLINE_ORIGIN);
        let mut warnings = Vec::new();
        let document = self.parse_document(text, origin, DocumentFormat::Yaml, &mut warnings)?;

        if !document.extends.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extends".to_string(),
                value: format!("{:?}", document.extends),
                expected: "no extends when loading from a string".to_string(),
            });
        }

        let config = self.build_document(document, origin, &mut warnings)?;
        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }

    fn load_recursive(
        &mut self,
        path: &Path,
        stack: &mut Vec<PathBuf>,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<Arc<Configuration>, ConfigError> {
        let canonical = path.canonicalize().map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        if stack.contains(&canonical) {
            let mut cycle = stack.clone();
            cycle.push(canonical);
            return Err(ConfigError::CircularExtends { cycle });
        }

        if stack.len() > self.options.config_limits.max_extends_depth {
            return Err(ConfigError::InvalidValue {
                field: "extends depth".to_string(),
                value: stack.len().to_string(),
                expected: format!(
                    "at most {} levels",
                    self.options.config_limits.max_extends_depth
                ),
            });
        }

        if let Some(cached) = self.cache.get(&canonical) {
            tracing::debug!(file = %path.display(), "configuration served from cache");
            return Ok(Arc::clone(cached));
        }

        tracing::debug!(file = %path.display(), depth = stack.len(), "loading configuration");

        let raw = self.read_checked(path)?;
        let format = DocumentFormat::from_path(path);
        let mut document = self.parse_document(&raw, path, format, warnings)?;
        let extends = std::mem::take(&mut document.extends);
        let own = self.build_document(document, path, warnings)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut merged = Configuration::default();

        stack.push(canonical.clone());
        for base in &extends {
            let base_path = base_dir.join(base);
            let base_config = self.load_recursive(&base_path, stack, warnings)?;
            merged = merge(&merged, &base_config);
        }
        stack.pop();

        let config = if extends.is_empty() {
            own
        } else {
            let combined = merge(&merged, &own);
            combined.check_limits(&self.options.config_limits, &path.display().to_string())?;
            combined
        };

        let config = Arc::new(config);
        self.cache.insert(canonical, Arc::clone(&config));
        Ok(config)
    }

    /// Reads a file after checking it against the size limit.
    fn read_checked(&self, path: &Path) -> Result<String, ConfigError> {
        let max = self.options.config_limits.max_config_size;
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > max {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {max} bytes"),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: format!("Failed to read file: {e}"),
        })?;

        // Handle UTF-8 BOM
        match raw.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(raw),
        }
    }

    /// Expands environment references and parses the document.
    fn parse_document(
        &self,
        raw: &str,
        origin: &Path,
        format: DocumentFormat,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<StyleDocument, ConfigError> {
        let text = if self.options.expand_env {
            let mut expander = EnvExpander::new(origin);
            let expanded = expander.expand(raw)?;
            warnings.extend(expander.warnings);
            expanded
        } else {
            raw.to_string()
        };

        if is_blank_document(&text) {
            return Err(ConfigError::ParseError {
                path: origin.to_path_buf(),
                line: None,
                message: "Configuration file is empty".to_string(),
            });
        }

        match format {
            DocumentFormat::Yaml => {
                serde_yaml::from_str(&text).map_err(|e| ConfigError::ParseError {
                    path: origin.to_path_buf(),
                    line: e.location().map(|l| l.line()),
                    message: e.to_string(),
                })
            }
            DocumentFormat::Json => {
                serde_json::from_str(&text).map_err(|e| ConfigError::ParseError {
                    path: origin.to_path_buf(),
                    line: Some(e.line()),
                    message: format!("Invalid JSON: {e}"),
                })
            }
        }
    }

    /// Turns a parsed document into a validated configuration.
    fn build_document(
        &self,
        document: StyleDocument,
        origin: &Path,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<Configuration, ConfigError> {
        let parts = document_parts(document, origin, warnings)?;
        let origin_label = origin.display().to_string();
        let (config, issues) =
            Configuration::from_parts(parts, &self.options.config_limits, &origin_label)?;

        warnings.extend(issues.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        Ok(config)
    }
}

// ============================================================================
// Document Conversion
// ============================================================================

/// Flattens a document into construction parts.
///
/// Top-level option blocks named after a declared plugin are merged over
/// that plugin's inline options. Any other unknown key is dropped with a
/// warning suggesting the closest known key.
fn document_parts(
    document: StyleDocument,
    origin: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<ConfigParts, ConfigError> {
    let location = origin.display().to_string();

    let mut plugins: Vec<PluginRef> = document
        .plugins
        .into_iter()
        .map(|entry| match entry {
            PluginEntry::Name(id) => PluginRef::new(id),
            PluginEntry::Detailed { name, options } => PluginRef { id: name, options },
        })
        .collect();

    for (key, value) in document.extra.0 {
        let Some(plugin) = plugins.iter_mut().find(|p| p.id == key) else {
            let mut candidates: Vec<&str> = RESERVED_KEYS.to_vec();
            candidates.extend(plugins.iter().map(|p| p.id.as_str()));
            warnings.push(unknown_key_warning(&key, &candidates, &location));
            continue;
        };

        match value {
            Value::Object(block) => {
                for (option, option_value) in block {
                    plugin.options.insert(option, option_value);
                }
            }
            other => {
                return Err(ConfigError::InvalidValue {
                    field: key,
                    value: other.to_string(),
                    expected: "a mapping of plugin options".to_string(),
                });
            }
        }
    }

    for (key, _) in document.theme.other.0 {
        warnings.push(unknown_key_warning(&format!("theme.{key}"), &["theme.extend"], &location));
    }

    for (key, _) in document.theme.extend.other.0 {
        warnings.push(unknown_key_warning(
            &format!("theme.extend.{key}"),
            &["theme.extend.backgroundImage", "theme.extend.fontFamily"],
            &location,
        ));
    }

    Ok(ConfigParts {
        scan_globs: document.content,
        gradient_stops: document.theme.extend.background_image.0,
        font_tokens: document
            .theme
            .extend
            .font_family
            .0
            .into_iter()
            .map(|(key, value)| (key, value.into_families()))
            .collect(),
        plugins,
    })
}

/// Builds the warning for a key the model does not represent.
fn unknown_key_warning(key: &str, candidates: &[&str], location: &str) -> LoadWarning {
    let hint = suggest_key(key, candidates)
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default();
    LoadWarning {
        message: format!("Unknown key '{key}' ignored{hint}"),
        location: Some(location.to_string()),
    }
}

/// Suggests the closest candidate if its Damerau-Levenshtein distance is ≤ 3.
fn suggest_key<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (*c, strsim::damerau_levenshtein(input, c)))
        .filter(|(_, dist)| *dist > 0 && *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(c, _)| c)
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Pre-parse environment variable expansion.
///
/// Runs on raw text BEFORE parsing so substituted values get normal
/// YAML/JSON type inference. Supports:
/// - `${VAR}` - value, or empty string with a warning if unset
/// - `${VAR:-default}` - `default` if unset
/// - `${VAR:?message}` - fail with `message` if unset
/// - `$$` - literal `$`
///
/// A `$` followed by anything else is kept verbatim.
struct EnvExpander<'a> {
    origin: &'a Path,
    warnings: Vec<LoadWarning>,
}

impl<'a> EnvExpander<'a> {
    const fn new(origin: &'a Path) -> Self {
        Self {
            origin,
            warnings: Vec::new(),
        }
    }

    fn expand(&mut self, raw: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(idx) = rest.find('$') {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx + 1..];

            if let Some(after) = tail.strip_prefix('$') {
                out.push('$');
                rest = after;
            } else if let Some(body) = tail.strip_prefix('{') {
                let end = body.find('}').ok_or_else(|| self.parse_error(
                    "Unclosed environment variable reference",
                ))?;
                out.push_str(&self.resolve(&body[..end])?);
                rest = &body[end + 1..];
            } else {
                out.push('$');
                rest = tail;
            }
        }

        out.push_str(rest);
        Ok(out)
    }

    fn resolve(&mut self, reference: &str) -> Result<String, ConfigError> {
        let (name, fallback) = if let Some((name, default)) = reference.split_once(":-") {
            (name, Fallback::Default(default))
        } else if let Some((name, message)) = reference.split_once(":?") {
            (name, Fallback::Required(message))
        } else {
            (reference, Fallback::Empty)
        };

        if name.is_empty() {
            return Err(self.parse_error("Empty environment variable name"));
        }

        if let Ok(value) = std::env::var(name) {
            return Ok(value);
        }

        match fallback {
            Fallback::Default(default) => Ok(default.to_string()),
            Fallback::Required(message) => Err(ConfigError::EnvVarNotSet {
                var: name.to_string(),
                message: message.to_string(),
            }),
            Fallback::Empty => {
                self.warnings.push(LoadWarning {
                    message: format!(
                        "Environment variable '{name}' is not set, using empty string"
                    ),
                    location: Some(self.origin.display().to_string()),
                });
                Ok(String::new())
            }
        }
    }

    fn parse_error(&self, message: &str) -> ConfigError {
        ConfigError::ParseError {
            path: self.origin.to_path_buf(),
            line: None,
            message: message.to_string(),
        }
    }
}

/// What to do when a referenced variable is unset.
enum Fallback<'a> {
    Default(&'a str),
    Required(&'a str),
    Empty,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns `true` if the text holds no document content at all.
fn is_blank_document(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn origin() -> &'static Path {
        Path::new("test.yaml")
    }

    #[test]
    fn test_env_expansion_set_var() {
        // PATH is always set on Unix/Windows
        let mut exp = EnvExpander::new(origin());
        let result = exp.expand("path: ${PATH}").unwrap();
        assert!(!result.contains("${PATH}"));
        assert!(result.len() > "path: ".len());
        assert!(exp.warnings.is_empty());
    }

    #[test]
    fn test_env_expansion_default() {
        let mut exp = EnvExpander::new(origin());
        let result = exp
            .expand("theme: ${STYLECFG_TEST_SURELY_UNSET_VAR:-fantasy}")
            .unwrap();
        assert_eq!(result, "theme: fantasy");
    }

    #[test]
    fn test_env_expansion_unset_warns() {
        let mut exp = EnvExpander::new(origin());
        let result = exp.expand("x: '${STYLECFG_TEST_SURELY_UNSET_VAR}'").unwrap();
        assert_eq!(result, "x: ''");
        assert_eq!(exp.warnings.len(), 1);
        assert!(exp.warnings[0].message.contains("STYLECFG_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_env_expansion_required() {
        let mut exp = EnvExpander::new(origin());
        let err = exp
            .expand("x: ${STYLECFG_TEST_SURELY_UNSET_VAR:?brand font required}")
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotSet { .. }));
        assert!(err.to_string().contains("brand font required"));
    }

    #[test]
    fn test_env_expansion_escapes_and_passthrough() {
        let mut exp = EnvExpander::new(origin());
        let result = exp.expand("a: $$HOME b: $x c: var(--tw-gradient-stops)").unwrap();
        assert_eq!(result, "a: $HOME b: $x c: var(--tw-gradient-stops)");
    }

    #[test]
    fn test_env_expansion_unclosed() {
        let mut exp = EnvExpander::new(origin());
        assert!(matches!(
            exp.expand("x: ${OPEN"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
content: ["./**/*.py"]
theme:
  extend:
    fontFamily:
      sans: ['"Open Sans"', system-ui, sans-serif]
plugins: [daisyui]
daisyui:
  themes: [fantasy]
"#;
        let result = ConfigLoader::with_defaults().load_from_str(yaml).unwrap();
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        let daisy = result.config.plugin("daisyui").unwrap();
        assert_eq!(daisy.options["themes"], serde_json::json!(["fantasy"]));
        assert_eq!(result.config.font_tokens()["sans"][0], "\"Open Sans\"");
    }

    #[test]
    fn test_load_from_str_rejects_empty() {
        let err = ConfigLoader::with_defaults()
            .load_from_str("# nothing here\n---\n")
            .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_load_from_str_rejects_extends() {
        let err = ConfigLoader::with_defaults()
            .load_from_str("extends: [base.yaml]\ncontent: [a]\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_duplicate_gradient_key_is_validation_error() {
        let yaml = "theme:\n  extend:\n    backgroundImage:\n      x: g1\n      x: g2\n";
        let err = ConfigLoader::with_defaults().load_from_str(yaml).unwrap_err();
        match err {
            ConfigError::ValidationError { errors, .. } => {
                assert_eq!(errors[0].path, "theme.extend.backgroundImage.x");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_suggestion() {
        let yaml = "content: [a]\nplugin: [daisyui]\n";
        let result = ConfigLoader::with_defaults().load_from_str(yaml).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("did you mean 'plugins'"));
    }

    #[test]
    fn test_non_mapping_option_block_rejected() {
        let yaml = "plugins: [daisyui]\ndaisyui: fantasy\n";
        let err = ConfigLoader::with_defaults().load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_option_block_overrides_inline_options() {
        let yaml = r"
plugins:
  - name: daisyui
    options:
      themes: [light]
      logs: false
daisyui:
  themes: [fantasy]
";
        let result = ConfigLoader::with_defaults().load_from_str(yaml).unwrap();
        let daisy = result.config.plugin("daisyui").unwrap();
        assert_eq!(daisy.options["themes"], serde_json::json!(["fantasy"]));
        assert_eq!(daisy.options["logs"], serde_json::json!(false));
    }

    #[test]
    fn test_load_file_with_extends() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.yaml"),
            "content: [\"./**/*.py\"]\ntheme:\n  extend:\n    fontFamily:\n      heading: [serif]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("site.yaml"),
            "extends: [base.yaml]\ntheme:\n  extend:\n    fontFamily:\n      heading: ['\"Lora\"', serif]\n      sans: [system-ui]\n",
        )
        .unwrap();

        let result = ConfigLoader::with_defaults()
            .load(&dir.path().join("site.yaml"))
            .unwrap();
        let config = &result.config;
        assert_eq!(config.scan_globs(), &["./**/*.py".to_string()]);
        let keys: Vec<&str> = config.font_tokens().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["heading", "sans"]);
        assert_eq!(config.font_tokens()["heading"][0], "\"Lora\"");
    }

    #[test]
    fn test_circular_extends() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), "extends: [b.yaml]\ncontent: [a]\n").unwrap();
        fs::write(dir.path().join("b.yaml"), "extends: [a.yaml]\ncontent: [b]\n").unwrap();

        let err = ConfigLoader::with_defaults()
            .load(&dir.path().join("a.yaml"))
            .unwrap_err();
        match err {
            ConfigError::CircularExtends { cycle } => assert_eq!(cycle.len(), 3),
            other => panic!("expected circular extends, got {other:?}"),
        }
    }

    #[test]
    fn test_extends_depth_limit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("c.yaml"), "content: [c]\n").unwrap();
        fs::write(dir.path().join("b.yaml"), "extends: [c.yaml]\n").unwrap();
        fs::write(dir.path().join("a.yaml"), "extends: [b.yaml]\n").unwrap();

        let options = LoaderOptions {
            config_limits: ConfigLimits {
                max_extends_depth: 1,
                ..ConfigLimits::default()
            },
            ..LoaderOptions::default()
        };
        let err = ConfigLoader::new(options)
            .load(&dir.path().join("a.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("extends depth"));
    }

    #[test]
    fn test_missing_base_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), "extends: [missing.yaml]\n").unwrap();
        let err = ConfigLoader::with_defaults()
            .load(&dir.path().join("a.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_extends_merged_limit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.yaml"), "content: [a/**/*.py, b/**/*.py]\n").unwrap();
        fs::write(
            dir.path().join("site.yaml"),
            "extends: [base.yaml]\ncontent: [c/**/*.html]\n",
        )
        .unwrap();

        let options = LoaderOptions {
            config_limits: ConfigLimits {
                max_scan_globs: 2,
                ..ConfigLimits::builtin()
            },
            ..LoaderOptions::default()
        };
        let mut loader = ConfigLoader::new(options);
        assert!(loader.load(&dir.path().join("base.yaml")).is_ok());

        let err = loader.load(&dir.path().join("site.yaml")).unwrap_err();
        match err {
            ConfigError::ValidationError { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "content");
                assert!(errors[0].message.contains("3 exceeds limit of 2"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_loaded_files_include_bases() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.yaml"), "content: [a]\n").unwrap();
        fs::write(dir.path().join("site.yaml"), "extends: [base.yaml]\n").unwrap();

        let mut loader = ConfigLoader::with_defaults();
        loader.load(&dir.path().join("site.yaml")).unwrap();

        let base = dir.path().join("base.yaml").canonicalize().unwrap();
        let mut loaded: Vec<&Path> = loader.loaded_files().collect();
        loaded.sort();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains(&base.as_path()));
    }

    #[test]
    fn test_builtin_limits() {
        let limits = ConfigLimits::builtin();
        assert_eq!(limits.max_scan_globs, 1000);
        assert_eq!(limits.max_gradient_stops, 1000);
        assert_eq!(limits.max_font_tokens, 500);
        assert_eq!(limits.max_plugins, 100);
        assert_eq!(limits.max_extends_depth, 10);
        assert_eq!(limits.max_config_size, 1024 * 1024);
    }

    #[test]
    fn test_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        fs::write(
            &path,
            r#"{"content": ["src/**/*.rs"], "plugins": ["daisyui"], "daisyui": {"themes": ["fantasy"]}}"#,
        )
        .unwrap();
        let result = ConfigLoader::with_defaults().load(&path).unwrap();
        assert_eq!(result.config.scan_globs(), &["src/**/*.rs".to_string()]);
        assert!(result.config.plugin("daisyui").is_some());
    }

    #[test]
    fn test_file_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.yaml");
        fs::write(&path, "content: [\"./**/*.py\"]\n").unwrap();
        let options = LoaderOptions {
            config_limits: ConfigLimits {
                max_config_size: 4,
                ..ConfigLimits::default()
            },
            ..LoaderOptions::default()
        };
        let err = ConfigLoader::new(options).load(&path).unwrap_err();
        assert!(err.to_string().contains("file_size"));
    }

    #[test]
    fn test_document_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_suggest_key() {
        assert_eq!(suggest_key("contnet", RESERVED_KEYS), Some("content"));
        assert_eq!(suggest_key("darkMode", RESERVED_KEYS), None);
    }
}
