use std::time::Duration;

use paddock_core::PaddockError;

use crate::PfConnector;
use crate::strategy::AuthStrategy;

/// Builder for [`PfConnector`].
///
/// Without an explicit `http_client`, a `reqwest::Client` is created with the
/// configured timeout and user agent.
#[derive(Clone)]
pub struct PfConnectorBuilder {
    api_key: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
    strategies: Vec<AuthStrategy>,
}

impl std::fmt::Debug for PfConnectorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PfConnectorBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("strategies", &self.strategies)
            .finish_non_exhaustive()
    }
}

impl Default for PfConnectorBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout: PfConnector::DEFAULT_TIMEOUT,
            user_agent: None,
            http: None,
            strategies: AuthStrategy::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl PfConnectorBuilder {
    /// Set the API key. Blank keys count as missing.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Read the API key from `PF_API_KEY`, leaving it unset when absent.
    #[must_use]
    pub fn api_key_from_env(self) -> Self {
        match std::env::var(PfConnector::API_KEY_ENV) {
            Ok(key) => self.api_key(key),
            Err(_) => self,
        }
    }

    /// Per-request timeout. Ignored when an `http_client` is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// User-Agent header. Ignored when an `http_client` is supplied.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Use a preconfigured `reqwest::Client`.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Replace the ordered list of authentication strategies.
    #[must_use]
    pub fn auth_strategies(mut self, strategies: &[AuthStrategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }

    /// Build the connector.
    ///
    /// A missing API key is not a build error; requests fail with
    /// `Configuration` instead.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty strategy list or a zero timeout, and a
    /// `Connector` error when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<PfConnector, PaddockError> {
        if self.strategies.is_empty() {
            return Err(PaddockError::InvalidArg(
                "auth_strategies must not be empty".into(),
            ));
        }
        let http = match self.http {
            Some(http) => http,
            None => {
                if self.timeout.is_zero() {
                    return Err(PaddockError::InvalidArg("timeout must be > 0".into()));
                }
                let mut b = reqwest::Client::builder().timeout(self.timeout);
                if let Some(ua) = self.user_agent {
                    b = b.user_agent(ua);
                }
                let key = PfConnector::KEY.as_str();
                b.build()
                    .map_err(|e| PaddockError::connector(key, e.to_string()))?
            }
        };
        Ok(PfConnector {
            http,
            api_key: self.api_key,
            strategies: self.strategies,
        })
    }
}
