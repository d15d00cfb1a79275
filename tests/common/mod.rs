//! Shared integration-test harness for running the `stylecfg` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helpers for invoking the `stylecfg` binary as a child process.
pub struct StyleCfgProcess;

impl StyleCfgProcess {
    /// Runs the binary with `args` and captures its output.
    ///
    /// Inherited `STYLECFG_*` settings are cleared so the host environment
    /// cannot change results.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_command_with_env(args, &[])
    }

    /// Like [`Self::spawn_command`], with extra environment variables set.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn spawn_command_with_env(args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_stylecfg"))
            .args(args)
            .env_remove("STYLECFG_LOG_LEVEL")
            .env_remove("STYLECFG_LOG_FORMAT")
            .env_remove("STYLECFG_OUTPUT")
            .env("STYLECFG_COLOR", "never")
            .envs(envs.iter().copied())
            .output()
            .expect("failed to run stylecfg")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Returns a fixture path as a `String` for use in argument lists.
    #[must_use]
    pub fn fixture_arg(name: &str) -> String {
        Self::fixture_path(name).display().to_string()
    }
}
