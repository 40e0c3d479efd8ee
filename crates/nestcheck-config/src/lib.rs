//! Layered configuration for the `nestcheck` tool.
//!
//! Values are merged from built-in defaults, a `nestcheck.toml` file
//! (discovered automatically or named with `--config-path` /
//! `NESTCHECK_CONFIG_PATH`), `NESTCHECK_*` environment variables and
//! command-line flags, later layers winning. The [`profiles`] module loads
//! optional user-defined language profiles referenced by `profiles_path`.

mod defaults;
mod logging;
pub mod profiles;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_INPUT_BYTES, default_log_filter, default_log_filter_string,
    default_log_format, default_max_input_bytes,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use profiles::{ProfileDefinition, ProfileFileError, load_registry};

/// Resolved settings for one `nestcheck` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "NESTCHECK",
    discovery(
        app_name = "nestcheck",
        env_var = "NESTCHECK_CONFIG_PATH",
        config_file_name = "nestcheck.toml",
        dotfile_name = ".nestcheck.toml",
        project_file_name = "nestcheck.toml",
        config_cli_long = "config-path",
        config_cli_visible = true,
    )
)]
pub struct Config {
    /// Tracing filter expression, for example `warn` or `nestcheck=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
    /// JSON file of additional language profiles.
    #[serde(default)]
    profiles_path: Option<Utf8PathBuf>,
    /// Largest input accepted, in bytes.
    #[serde(default = "default_max_input_bytes")]
    #[ortho_config(default = default_max_input_bytes())]
    max_input_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            profiles_path: None,
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Path of the user profile definitions, if configured.
    #[must_use]
    pub fn profiles_path(&self) -> Option<&Utf8Path> {
        self.profiles_path.as_deref()
    }

    /// Input size ceiling in bytes.
    #[must_use]
    pub const fn max_input_bytes(&self) -> u64 {
        self.max_input_bytes
    }

    /// Input size ceiling as an in-memory length, saturating on narrow targets.
    #[must_use]
    pub fn max_input_len(&self) -> usize {
        usize::try_from(self.max_input_bytes).unwrap_or(usize::MAX)
    }

    /// Replaces the profile definitions path.
    #[must_use]
    pub fn with_profiles_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.profiles_path = Some(path.into());
        self
    }

    /// Replaces the tracing filter expression.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Replaces the input size ceiling.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = limit;
        self
    }
}
