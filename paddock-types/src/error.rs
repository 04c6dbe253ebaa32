use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the paddock workspace.
///
/// Absence of data is never an error here: a CSV query that fails for any
/// reason other than missing configuration collapses to an empty result set
/// inside the connector. Only missing credentials, exhausted JSON endpoints,
/// and invalid caller input escape to the caller.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaddockError {
    /// A required setting (the upstream API key) is missing.
    #[error("missing configuration: {0}")]
    Configuration(String),

    /// One authentication strategy was rejected with 401/403.
    ///
    /// Soft: connectors record it and move on to the next strategy.
    #[error("upstream rejected credentials ({status}): {msg}")]
    UpstreamAuth {
        /// HTTP status returned by the upstream.
        status: u16,
        /// Leading part of the response body.
        msg: String,
    },

    /// Every attempt against a JSON endpoint failed.
    #[error("upstream fetch failed for {url}: {last_error}")]
    UpstreamFetch {
        /// Endpoint that was queried.
        url: String,
        /// Text of the last recorded failure.
        last_error: String,
    },

    /// A 200 response whose body could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Transport-level failure reported by a connector.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl PaddockError {
    /// Helper: build a `Configuration` error.
    pub fn configuration(what: impl Into<String>) -> Self {
        Self::Configuration(what.into())
    }

    /// Helper: build an `UpstreamFetch` error for `url`.
    pub fn upstream_fetch(url: impl Into<String>, last_error: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            url: url.into(),
            last_error: last_error.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if a connector should fall through to its next attempt
    /// instead of treating this error as final.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::UpstreamAuth { .. })
    }

    /// Returns true for errors caused by local setup rather than the upstream.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
