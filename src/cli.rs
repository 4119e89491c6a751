//! CLI argument types and layered configuration for the `mashq` binary.
//! Loads from CLI args, environment (prefix `MASHQ_`), and optional config
//! files.

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use ortho_config::OrthoError;
use serde::Deserialize;
use std::path::PathBuf;

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_owned()
}

fn default_dsid() -> u32 {
    1
}

/// Command-line arguments for the `mashq` binary.
///
/// Configuration values are loaded from command line arguments,
/// environment variables (prefixed with `MASHQ_`), and an optional
/// configuration file.
///
/// # Examples
///
/// Parse flags directly:
/// ```
/// use mashq::cli::MashqArgs;
/// use ortho_config::OrthoConfig;
///
/// let args = MashqArgs::load_from_iter(["mashq", "--dry-run=true"])
///     .expect("load args from CLI iterator");
/// assert!(args.dry_run);
/// ```
///
/// Load from a configuration file:
/// ```
/// use mashq::cli::MashqArgs;
/// use ortho_config::OrthoConfig;
/// use std::io::Write;
/// use tempfile::NamedTempFile;
///
/// let mut file = NamedTempFile::new().expect("create temp file");
/// writeln!(file, "dsid = 7").expect("write config");
/// let path = file.path().to_str().expect("path str");
/// let args = MashqArgs::load_from_iter(["mashq", "--config-path", path])
///     .expect("load args from config path");
/// assert_eq!(args.dsid, 7);
/// ```
#[derive(Debug, Deserialize, ortho_config::OrthoConfig)]
#[ortho_config(prefix = "MASHQ")]
pub struct MashqArgs {
    /// Base URL of the ML service.
    #[ortho_config(default = String::from("http://127.0.0.1:8000"))]
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Dataset namespace to operate on.
    #[ortho_config(default = 1)]
    #[serde(default = "default_dsid")]
    pub dsid: u32,

    /// Run without performing any side effects.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub dry_run: bool,

    /// Optional path to a configuration file.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl MashqArgs {
    /// Load configuration solely from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if any variable cannot be parsed.
    pub fn load_from_env() -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Env::prefixed("MASHQ_"))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if the file cannot be read or parsed.
    pub fn load_from_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from environment variables and a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if either source contains invalid values.
    pub fn load_from_env_and_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("MASHQ_"))
            .extract()
            .map_err(Into::into)
    }
}
