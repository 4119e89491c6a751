//! Error taxonomy for the ML service client.
//!
//! Every client operation resolves to exactly one of these kinds; transport
//! failures are always wrapped, never leaked raw. Each variant's `Display`
//! message is suitable for direct display to a learner. Nothing here is
//! fatal: callers may retry, re-prompt, or abandon the flow.

use thiserror::Error;

/// Classified failure of a client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured server address and endpoint path could not form a
    /// valid URL.
    #[error("invalid server URL {base:?}: {source}")]
    InvalidUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
    /// Caller-supplied data failed a precondition checked before any
    /// network call.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    /// A batch operation had zero valid items after filtering.
    #[error("no valid samples to upload")]
    NoValidData,
    /// The underlying connection failed: DNS, refused connection, or
    /// timeout expiry.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// An HTTP response arrived but was unusable: a non-200 status, or a
    /// body that did not parse into the expected shape.
    #[error("server error: {detail}")]
    Server { detail: String },
    /// The server returned a prediction outside the known alphabet.
    #[error("prediction {raw:?} does not map to a known letter")]
    UnmappablePrediction { raw: String },
}

impl ClientError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn status(status: reqwest::StatusCode) -> Self {
        Self::Server {
            detail: format!("unexpected status {status}"),
        }
    }

    pub(crate) fn malformed(what: &str) -> Self {
        Self::Server {
            detail: format!("malformed {what}"),
        }
    }
}

impl PartialEq for ClientError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::InvalidUrl { .. }, Self::InvalidUrl { .. })
                | (Self::InvalidInput { .. }, Self::InvalidInput { .. })
                | (Self::NoValidData, Self::NoValidData)
                | (Self::Transport(_), Self::Transport(_))
                | (Self::Server { .. }, Self::Server { .. })
                | (Self::UnmappablePrediction { .. }, Self::UnmappablePrediction { .. })
        )
    }
}

impl Eq for ClientError {}
