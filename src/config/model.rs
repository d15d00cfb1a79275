//! The style configuration model.
//!
//! A [`Configuration`] is built once from literal parts or a loaded
//! document and never mutated afterwards. Two configurations combine with
//! [`merge`]; [`to_external_schema`] produces the nested mapping the
//! external build tool reads.

use crate::config::loader::ConfigLimits;
use crate::config::schema::{ExtendSchema, SchemaObject, ThemeSchema};
use crate::config::validation::{EntryCounts, Validator};
use crate::error::{ConfigError, ValidationIssue};

use indexmap::IndexMap;
use serde_json::Value;

/// Origin label used for configurations built from literals.
pub const INLINE_ORIGIN: &str = "<inline>";

/// Reference to an external styling plugin plus its options.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRef {
    /// Plugin identifier, e.g. `daisyui`
    pub id: String,
    /// Plugin-specific options, e.g. `themes: ["fantasy"]`
    pub options: IndexMap<String, Value>,
}

impl PluginRef {
    /// Creates a plugin reference without options.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: IndexMap::new(),
        }
    }

    /// Adds an option, returning the updated reference for chaining.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Unvalidated inputs to [`Configuration`] construction.
///
/// Mappings are ordered pairs so duplicate keys can be detected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigParts {
    /// Content scan globs
    pub scan_globs: Vec<String>,
    /// Gradient utility name -> CSS gradient expression
    pub gradient_stops: Vec<(String, String)>,
    /// Font token name -> family fallback chain
    pub font_tokens: Vec<(String, Vec<String>)>,
    /// Plugins in load order
    pub plugins: Vec<PluginRef>,
}

/// A validated, immutable style configuration.
///
/// `Default` is the empty configuration, the identity element of [`merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    scan_globs: Vec<String>,
    gradient_stops: IndexMap<String, String>,
    font_tokens: IndexMap<String, Vec<String>>,
    plugins: Vec<PluginRef>,
}

impl Configuration {
    /// Builds a configuration from literal parts.
    ///
    /// Warnings are logged and do not fail construction. Size limits are
    /// the built-in [`ConfigLimits::builtin`] values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] listing every problem if any
    /// scan glob is empty or malformed, a gradient key or font token is
    /// duplicated, a font token has no families, or a plugin identifier is
    /// empty, reserved or duplicated.
    pub fn build(
        scan_globs: Vec<String>,
        gradient_stops: Vec<(String, String)>,
        font_tokens: Vec<(String, Vec<String>)>,
        plugins: Vec<PluginRef>,
    ) -> Result<Self, ConfigError> {
        let parts = ConfigParts {
            scan_globs,
            gradient_stops,
            font_tokens,
            plugins,
        };
        let (config, warnings) =
            Self::from_parts(parts, &ConfigLimits::builtin(), INLINE_ORIGIN)?;

        for warning in &warnings {
            tracing::warn!(location = %warning.path, "{}", warning.message);
        }

        Ok(config)
    }

    /// Validates `parts` and builds a configuration, returning it together
    /// with any warnings.
    ///
    /// Duplicate scan globs are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if validation reports any
    /// error; `origin` labels the error.
    pub fn from_parts(
        parts: ConfigParts,
        limits: &ConfigLimits,
        origin: &str,
    ) -> Result<(Self, Vec<ValidationIssue>), ConfigError> {
        let result = Validator::new().validate(&parts, limits);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: origin.to_string(),
                errors: result.errors,
            });
        }

        let mut scan_globs: Vec<String> = Vec::with_capacity(parts.scan_globs.len());
        for glob in parts.scan_globs {
            if !scan_globs.contains(&glob) {
                scan_globs.push(glob);
            }
        }

        let config = Self {
            scan_globs,
            gradient_stops: parts.gradient_stops.into_iter().collect(),
            font_tokens: parts.font_tokens.into_iter().collect(),
            plugins: parts.plugins,
        };

        tracing::debug!(
            origin,
            scan_globs = config.scan_globs.len(),
            gradient_stops = config.gradient_stops.len(),
            font_tokens = config.font_tokens.len(),
            plugins = config.plugins.len(),
            "configuration built"
        );

        Ok((config, result.warnings))
    }

    /// Content scan globs, without duplicates, in declaration order.
    #[must_use]
    pub fn scan_globs(&self) -> &[String] {
        &self.scan_globs
    }

    /// Gradient utilities in declaration order.
    #[must_use]
    pub const fn gradient_stops(&self) -> &IndexMap<String, String> {
        &self.gradient_stops
    }

    /// Font tokens in declaration order.
    #[must_use]
    pub const fn font_tokens(&self) -> &IndexMap<String, Vec<String>> {
        &self.font_tokens
    }

    /// Plugins in load order.
    #[must_use]
    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }

    /// Returns the plugin with the given identifier.
    #[must_use]
    pub fn plugin(&self, id: &str) -> Option<&PluginRef> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Number of entries in each section.
    #[must_use]
    pub fn counts(&self) -> EntryCounts {
        EntryCounts {
            scan_globs: self.scan_globs.len(),
            gradient_stops: self.gradient_stops.len(),
            font_tokens: self.font_tokens.len(),
            plugins: self.plugins.len(),
        }
    }

    /// Checks the entry counts against `limits`.
    ///
    /// [`merge`] never fails, so a merged configuration is checked here
    /// after the fact.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming every section over
    /// its limit; `origin` labels the error.
    pub fn check_limits(&self, limits: &ConfigLimits, origin: &str) -> Result<(), ConfigError> {
        let result = Validator::new().validate_counts(&self.counts(), limits);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: origin.to_string(),
                errors: result.errors,
            });
        }
        Ok(())
    }

    /// Returns `true` if nothing is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scan_globs.is_empty()
            && self.gradient_stops.is_empty()
            && self.font_tokens.is_empty()
            && self.plugins.is_empty()
    }
}

/// Merges `overlay` on top of `base`.
///
/// - gradient stops and font tokens: key-wise union, `overlay` wins on
///   collision; a colliding key keeps its position from `base`
/// - scan globs: concatenated, duplicates removed
/// - plugins: concatenated in first-seen order; a plugin present in both
///   keeps its `base` position and takes `overlay`'s options key by key
#[must_use]
pub fn merge(base: &Configuration, overlay: &Configuration) -> Configuration {
    let mut merged = base.clone();

    for glob in &overlay.scan_globs {
        if !merged.scan_globs.contains(glob) {
            merged.scan_globs.push(glob.clone());
        }
    }

    for (key, value) in &overlay.gradient_stops {
        merged.gradient_stops.insert(key.clone(), value.clone());
    }

    for (key, families) in &overlay.font_tokens {
        merged.font_tokens.insert(key.clone(), families.clone());
    }

    for plugin in &overlay.plugins {
        match merged.plugins.iter_mut().find(|p| p.id == plugin.id) {
            Some(existing) => {
                for (key, value) in &plugin.options {
                    existing.options.insert(key.clone(), value.clone());
                }
            }
            None => merged.plugins.push(plugin.clone()),
        }
    }

    tracing::trace!(
        gradient_stops = merged.gradient_stops.len(),
        font_tokens = merged.font_tokens.len(),
        plugins = merged.plugins.len(),
        "configurations merged"
    );

    merged
}

/// Produces the nested mapping the external build tool consumes.
///
/// Option blocks are emitted only for plugins that carry options.
#[must_use]
pub fn to_external_schema(config: &Configuration) -> SchemaObject {
    let plugin_options = config
        .plugins
        .iter()
        .filter(|p| !p.options.is_empty())
        .map(|p| (p.id.clone(), p.options.clone()))
        .collect();

    SchemaObject {
        content: config.scan_globs.clone(),
        theme: ThemeSchema {
            extend: ExtendSchema {
                background_image: config.gradient_stops.clone(),
                font_family: config.font_tokens.clone(),
            },
        },
        plugins: config.plugins.iter().map(|p| p.id.clone()).collect(),
        plugin_options,
    }
}

// ============================================================================
// Tests
// ============================================================================
