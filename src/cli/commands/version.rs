//! `version` command

use crate::cli::args::{OutputFormat, VersionArgs};

/// Print the package name, version and the schema layout it exports.
pub fn run(args: &VersionArgs) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => println!("{name} {version}"),
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": name,
                "version": version,
                "formats": ["yaml", "json"],
                "exports": ["json", "js"],
            });
            println!("{info}");
        }
    }
}
