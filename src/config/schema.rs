//! Configuration schema types
//!
//! Two families of serde types live here:
//! - the *document* types deserialized from a static YAML/JSON file, and
//! - the [`SchemaObject`] produced for the external build tool.
//!
//! Both follow the build tool's layout (`content`, `theme.extend.*`,
//! `plugins`, per-plugin option blocks), so an exported schema can be fed
//! back to the loader unchanged.

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

/// Top-level keys owned by the schema itself. Plugin identifiers may not
/// reuse them, since plugin option blocks sit next to these keys.
pub const RESERVED_KEYS: &[&str] = &["content", "theme", "plugins", "extends"];

// ============================================================================
// Ordered Entries
// ============================================================================

/// An ordered list of `key: value` pairs read from a mapping.
///
/// Unlike a map type, duplicate keys are kept so that validation can
/// report them instead of the parser silently keeping one.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries<V>(pub Vec<(String, V)>);

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> Entries<V> {
    /// Returns the keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Returns `true` if no entries were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

// ============================================================================
// Document Types
// ============================================================================

/// A style configuration document as written on disk.
///
/// ```yaml
/// extends: [base.yaml]
/// content: ["./**/*.py"]
/// theme:
///   extend:
///     backgroundImage:
///       linear-to-r: "linear-gradient(to right in oklab, var(--tw-gradient-stops))"
///     fontFamily:
///       sans: ['"Open Sans"', system-ui, sans-serif]
/// plugins: [daisyui]
/// daisyui:
///   themes: [fantasy]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleDocument {
    /// Base documents this one is merged on top of, relative to this file
    #[serde(default)]
    pub extends: Vec<PathBuf>,

    /// Scan globs
    #[serde(default)]
    pub content: Vec<String>,

    /// Theme section
    #[serde(default)]
    pub theme: ThemeDocument,

    /// Plugins, in load order
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,

    /// Every other top-level key; option blocks of declared plugins live here
    #[serde(flatten)]
    pub extra: Entries<Value>,
}

/// The `theme` section of a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeDocument {
    /// Extensions to the build tool's default theme
    #[serde(default)]
    pub extend: ExtendDocument,

    /// Unsupported theme keys, reported as warnings
    #[serde(flatten)]
    pub other: Entries<Value>,
}

/// The `theme.extend` section of a document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendDocument {
    /// Gradient utility name -> CSS gradient expression
    #[serde(default)]
    pub background_image: Entries<String>,

    /// Font token name -> family fallback chain
    #[serde(default)]
    pub font_family: Entries<FontFamilyValue>,

    /// Unsupported extension keys, reported as warnings
    #[serde(flatten)]
    pub other: Entries<Value>,
}

/// A font family declaration: either a fallback list or a single family.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FontFamilyValue {
    /// Ordered fallback chain
    List(Vec<String>),
    /// A single family name
    Single(String),
}

impl FontFamilyValue {
    /// Returns the fallback chain, first entry preferred.
    #[must_use]
    pub fn into_families(self) -> Vec<String> {
        match self {
            Self::List(families) => families,
            Self::Single(family) => vec![family],
        }
    }
}

/// A plugin reference as written in `plugins`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PluginEntry {
    /// Bare identifier, e.g. `daisyui`
    Name(String),
    /// Identifier with inline options
    Detailed {
        /// Plugin identifier
        name: String,
        /// Plugin options
        #[serde(default)]
        options: IndexMap<String, Value>,
    },
}

impl PluginEntry {
    /// Returns the plugin identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { name, .. } => name,
        }
    }
}

// ============================================================================
// External Schema
// ============================================================================

/// The nested mapping consumed by the external build tool.
///
/// Plugin option blocks are flattened next to `plugins`, keyed by plugin
/// identifier, e.g. `daisyui: { themes: ["fantasy"] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    /// Scan globs
    pub content: Vec<String>,

    /// Theme section
    pub theme: ThemeSchema,

    /// Plugin identifiers in load order
    pub plugins: Vec<String>,

    /// Option block per plugin with options
    #[serde(flatten)]
    pub plugin_options: IndexMap<String, IndexMap<String, Value>>,
}

/// `theme` in the external schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSchema {
    /// `theme.extend`
    pub extend: ExtendSchema,
}

/// `theme.extend` in the external schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendSchema {
    /// `theme.extend.backgroundImage`
    pub background_image: IndexMap<String, String>,

    /// `theme.extend.fontFamily`
    pub font_family: IndexMap<String, Vec<String>>,
}

// ============================================================================
// Tests
// ============================================================================
