//! `stylecfg` - typed loader, validator and exporter for utility-CSS style
//! configuration
//!
//! A [`Configuration`](config::Configuration) holds content scan globs,
//! theme extensions and plugins. It is built from literals or a static
//! YAML/JSON file, merged with other configurations, and exported in the
//! nested shape the external CSS build tool reads.
//!
//! ```
//! use stylecfg::config::{Configuration, PluginRef, to_external_schema};
//!
//! let config = Configuration::build(
//!     vec!["./**/*.py".to_string()],
//!     vec![],
//!     vec![("sans".to_string(), vec!["system-ui".to_string()])],
//!     vec![PluginRef::new("daisyui").with_option("themes", serde_json::json!(["fantasy"]))],
//! )?;
//! let schema = to_external_schema(&config);
//! assert_eq!(schema.plugins, vec!["daisyui"]);
//! # Ok::<(), stylecfg::error::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
