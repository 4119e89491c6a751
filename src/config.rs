//! Client session configuration: server address, timeout classes, feature
//! dimension, and API flavour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Port the training service listens on by convention.
pub const DEFAULT_PORT: u16 = 8000;

/// Canonical feature dimension (32×32 tiles).
pub const DEFAULT_DIMENSION: usize = 1024;

const DEFAULT_SHORT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LONG_TIMEOUT_SECS: u64 = 300;

/// Which generation of the server API to speak.
///
/// Two incompatible endpoint families coexisted on the server
/// (`/predict_sklearn/` vs `/predict/`). The flavour is fixed per
/// deployment at configuration time, never auto-detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFlavour {
    /// `/train_model_sklearn/{dsid}` and `/predict_sklearn/`, with an
    /// explicit `model_type`.
    #[default]
    Sklearn,
    /// `/train_model/{dsid}` and `/predict/`.
    Plain,
}

/// Configuration for an [`MlaasClient`](crate::MlaasClient) session.
///
/// Two timeout classes are configured independently: `short` bounds
/// dataset preparation, uploads, prediction, and comparison; `long` bounds
/// training, which can legitimately run for minutes. Conflating them makes
/// long training calls fail spuriously.
///
/// # Examples
///
/// ```
/// use mashq::ClientConfig;
///
/// let config = ClientConfig::for_host("192.168.1.92");
/// assert_eq!(config.base_url, "http://192.168.1.92:8000");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the ML service, e.g. `http://192.168.1.92:8000`.
    pub base_url: String,
    /// Timeout in seconds for lightweight calls.
    #[serde(default = "default_short_timeout")]
    pub short_timeout_secs: u64,
    /// Timeout in seconds for training calls.
    #[serde(default = "default_long_timeout")]
    pub long_timeout_secs: u64,
    /// Required feature vector length for uploads and prediction.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default)]
    pub flavour: ApiFlavour,
}

fn default_short_timeout() -> u64 {
    DEFAULT_SHORT_TIMEOUT_SECS
}

fn default_long_timeout() -> u64 {
    DEFAULT_LONG_TIMEOUT_SECS
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_host("127.0.0.1")
    }
}

impl ClientConfig {
    /// Configuration for a server reachable at `host` on the conventional
    /// port.
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        Self::for_base_url(format!("http://{host}:{DEFAULT_PORT}"))
    }

    /// Configuration for an explicit base URL.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            short_timeout_secs: DEFAULT_SHORT_TIMEOUT_SECS,
            long_timeout_secs: DEFAULT_LONG_TIMEOUT_SECS,
            dimension: DEFAULT_DIMENSION,
            flavour: ApiFlavour::default(),
        }
    }

    /// Ensure the configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if either timeout or the dimension is zero, or if
    /// the long timeout is shorter than the short one.
    #[must_use = "Validation should not be ignored"]
    pub fn validate(self) -> Result<Self, String> {
        if self.short_timeout_secs == 0 || self.long_timeout_secs == 0 {
            Err("timeouts must be greater than 0".into())
        } else if self.long_timeout_secs < self.short_timeout_secs {
            Err("long timeout must not be shorter than the short timeout".into())
        } else if self.dimension == 0 {
            Err("dimension must be greater than 0".into())
        } else {
            Ok(self)
        }
    }

    #[must_use]
    pub fn short_timeout(&self) -> Duration {
        Duration::from_secs(self.short_timeout_secs)
    }

    #[must_use]
    pub fn long_timeout(&self) -> Duration {
        Duration::from_secs(self.long_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_separate_timeout_classes() {
        let config = ClientConfig::default();
        assert_eq!(config.short_timeout(), Duration::from_secs(60));
        assert_eq!(config.long_timeout(), Duration::from_secs(300));
        assert_eq!(config.dimension, 1024);
        assert_eq!(config.flavour, ApiFlavour::Sklearn);
    }

    #[rstest]
    fn deserialise_with_defaults() {
        let json = r#"{"base_url":"http://10.0.0.5:8000","flavour":"plain"}"#;
        #[expect(clippy::expect_used, reason = "test should fail loudly")]
        let config: ClientConfig = serde_json::from_str(json).expect("deserialise ClientConfig");
        assert_eq!(config.flavour, ApiFlavour::Plain);
        assert_eq!(config.short_timeout_secs, 60);
        assert_eq!(config.dimension, 1024);
    }

    #[rstest]
    fn deserialise_rejects_unknown_fields() {
        let json = r#"{"base_url":"http://x:8000","retries":3}"#;
        let config: Result<ClientConfig, _> = serde_json::from_str(json);
        assert!(config.is_err());
    }

    #[rstest]
    #[case(0, 300, 1024)]
    #[case(60, 0, 1024)]
    #[case(60, 30, 1024)]
    #[case(60, 300, 0)]
    fn validate_rejects_bad_values(
        #[case] short: u64,
        #[case] long: u64,
        #[case] dimension: usize,
    ) {
        let config = ClientConfig {
            short_timeout_secs: short,
            long_timeout_secs: long,
            dimension,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn validate_accepts_defaults() {
        assert!(ClientConfig::default().validate().is_ok());
    }
}
