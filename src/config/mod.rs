//! Configuration module
//!
//! Builds, validates, merges, loads and exports style configurations:
//! content scan globs, theme extensions (gradient utilities and font
//! tokens) and plugins with their option blocks.

pub mod export;
pub mod loader;
pub mod model;
pub mod schema;
pub mod validation;

pub use export::{to_js_module, to_json};
pub use loader::{ConfigLimits, ConfigLoader, DocumentFormat, LoadResult, LoadWarning, LoaderOptions};
pub use model::{ConfigParts, Configuration, PluginRef, merge, to_external_schema};
pub use schema::*;
pub use validation::{EntryCounts, ValidationResult, Validator};
