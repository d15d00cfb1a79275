//! Configuration validation
//!
//! Validation runs on the raw [`ConfigParts`] before they are folded into a
//! [`Configuration`](crate::config::model::Configuration), so duplicate keys
//! are still visible. It collects ALL issues instead of stopping at the
//! first one.
//!
//! Gradient expressions and font family names are opaque: only their
//! presence is checked, never their CSS syntax.

use crate::config::loader::ConfigLimits;
use crate::config::model::{ConfigParts, PluginRef};
use crate::config::schema::RESERVED_KEYS;
use crate::error::{Severity, ValidationIssue};

use std::collections::HashSet;
use std::path::{Component, Path};

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent construction).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Number of entries per section of a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryCounts {
    /// Scan globs
    pub scan_globs: usize,
    /// Gradient stops
    pub gradient_stops: usize,
    /// Font tokens
    pub font_tokens: usize,
    /// Plugins
    pub plugins: usize,
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates configuration parts and returns every issue found.
    pub fn validate(&mut self, parts: &ConfigParts, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_scan_globs(&parts.scan_globs);
        self.validate_gradient_stops(&parts.gradient_stops);
        self.validate_font_tokens(&parts.font_tokens);
        self.validate_plugins(&parts.plugins);
        self.validate_limits(parts, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Scan Globs
    // ========================================================================

    fn validate_scan_globs(&mut self, globs: &[String]) {
        let mut seen = HashSet::new();
        for (idx, glob) in globs.iter().enumerate() {
            let path = format!("content[{idx}]");

            if glob.trim().is_empty() {
                self.add_error(&path, "Scan glob cannot be empty");
                continue;
            }

            if let Err(e) = glob::Pattern::new(glob) {
                self.add_error(&path, &format!("Invalid glob pattern '{glob}': {e}"));
                continue;
            }

            let as_path = Path::new(glob);
            if as_path.is_absolute() || glob.starts_with('/') {
                self.add_warning(
                    &path,
                    &format!("Scan glob '{glob}' is absolute; globs are resolved relative to the project root"),
                );
            }

            if as_path.components().any(|c| c == Component::ParentDir) {
                self.add_warning(
                    &path,
                    &format!("Scan glob '{glob}' reaches outside the project root via '..'"),
                );
            }

            if !seen.insert(glob.as_str()) {
                self.add_warning(
                    &path,
                    &format!("Duplicate scan glob '{glob}' will be ignored"),
                );
            }
        }
    }

    // ========================================================================
    // Theme Extensions
    // ========================================================================

    fn validate_gradient_stops(&mut self, stops: &[(String, String)]) {
        let mut seen = HashSet::new();
        for (idx, (key, value)) in stops.iter().enumerate() {
            if key.is_empty() {
                self.add_error(
                    &format!("theme.extend.backgroundImage[{idx}]"),
                    "Gradient utility name cannot be empty",
                );
                continue;
            }

            let path = format!("theme.extend.backgroundImage.{key}");
            if !seen.insert(key.as_str()) {
                self.add_error(&path, &format!("Duplicate gradient key: '{key}'"));
            }

            if value.trim().is_empty() {
                self.add_warning(&path, "Gradient expression is empty");
            }
        }
    }

    fn validate_font_tokens(&mut self, tokens: &[(String, Vec<String>)]) {
        let mut seen = HashSet::new();
        for (idx, (key, families)) in tokens.iter().enumerate() {
            if key.is_empty() {
                self.add_error(
                    &format!("theme.extend.fontFamily[{idx}]"),
                    "Font token name cannot be empty",
                );
                continue;
            }

            let path = format!("theme.extend.fontFamily.{key}");
            if !seen.insert(key.as_str()) {
                self.add_error(&path, &format!("Duplicate font token: '{key}'"));
            }

            if families.is_empty() {
                self.add_error(
                    &path,
                    &format!("Font token '{key}' must list at least one family"),
                );
            }

            for (i, family) in families.iter().enumerate() {
                if family.trim().is_empty() {
                    self.add_error(&format!("{path}[{i}]"), "Font family name cannot be empty");
                }
            }
        }
    }

    // ========================================================================
    // Plugins
    // ========================================================================

    fn validate_plugins(&mut self, plugins: &[PluginRef]) {
        let mut seen = HashSet::new();
        for (idx, plugin) in plugins.iter().enumerate() {
            let path = format!("plugins[{idx}]");

            if plugin.id.trim().is_empty() {
                self.add_error(&path, "Plugin identifier cannot be empty");
                continue;
            }

            if RESERVED_KEYS.contains(&plugin.id.as_str()) {
                self.add_error(
                    &path,
                    &format!(
                        "Plugin identifier '{}' collides with a reserved top-level key",
                        plugin.id
                    ),
                );
            }

            if !seen.insert(plugin.id.as_str()) {
                self.add_error(&path, &format!("Duplicate plugin: '{}'", plugin.id));
            }
        }
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Checks entry counts alone, e.g. of a merged configuration.
    pub fn validate_counts(&mut self, counts: &EntryCounts, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();
        self.check_counts(counts, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_limits(&mut self, parts: &ConfigParts, limits: &ConfigLimits) {
        let counts = EntryCounts {
            scan_globs: parts.scan_globs.len(),
            gradient_stops: parts.gradient_stops.len(),
            font_tokens: parts.font_tokens.len(),
            plugins: parts.plugins.len(),
        };
        self.check_counts(&counts, limits);
    }

    fn check_counts(&mut self, counts: &EntryCounts, limits: &ConfigLimits) {
        let checks = [
            ("content", counts.scan_globs, limits.max_scan_globs, "scan globs"),
            (
                "theme.extend.backgroundImage",
                counts.gradient_stops,
                limits.max_gradient_stops,
                "gradient stops",
            ),
            (
                "theme.extend.fontFamily",
                counts.font_tokens,
                limits.max_font_tokens,
                "font tokens",
            ),
            ("plugins", counts.plugins, limits.max_plugins, "plugins"),
        ];

        for (path, count, max, what) in checks {
            if count > max {
                self.add_error(
                    path,
                    &format!("Too many {what}: {count} exceeds limit of {max}"),
                );
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
