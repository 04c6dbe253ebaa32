//! paddock-pf
//!
//! Punting Form connector implementing `FeedConnector` on top of `reqwest`.
//!
//! Every request is tried once per authentication strategy, in order: first
//! with the key in an `X-Api-Key` header, then with the key as the `apiKey`
//! query parameter. JSON payloads have their `payLoad` envelope removed and
//! CSV bodies are decoded into raw records.
#![warn(missing_docs)]

/// Connector builder.
pub mod builder;
/// Authentication strategies and the request plans derived from them.
pub mod strategy;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use paddock_core::{
    ConnectorKey, CsvProbe, FeedConnector, PaddockError, Params, ProbeAttempt, RawRecord,
    parse_csv, unwrap_envelope,
};
use serde_json::Value;

pub use builder::PfConnectorBuilder;
pub use strategy::{Attempt, AuthStrategy};

use strategy::{ACCEPT_CSV, ACCEPT_JSON, plan};

/// Characters of a failed response body kept in probe previews.
const PREVIEW_CHARS: usize = 400;
/// Characters of a failed response body kept in error messages.
const ERROR_BODY_CHARS: usize = 220;

/// Punting Form API client.
#[derive(Clone)]
pub struct PfConnector {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: Option<String>,
    pub(crate) strategies: Vec<AuthStrategy>,
}

impl std::fmt::Debug for PfConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PfConnector")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("strategies", &self.strategies)
            .finish_non_exhaustive()
    }
}

/// A response that came back, successful or not.
struct Reply {
    status: u16,
    body: String,
}

impl PfConnector {
    /// Static connector key used in logs and errors.
    pub const KEY: ConnectorKey = ConnectorKey::new("paddock-pf");
    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &'static str = "PF_API_KEY";
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Start a builder with default timeout and strategies.
    #[must_use]
    pub fn builder() -> PfConnectorBuilder {
        PfConnectorBuilder::default()
    }

    /// Connector with the given key and defaults for everything else.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PaddockError> {
        Self::builder().api_key(api_key).build()
    }

    /// Connector keyed from `PF_API_KEY`.
    ///
    /// An unset variable still yields a connector; its requests fail with
    /// `Configuration` before touching the network.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, PaddockError> {
        Self::builder().api_key_from_env().build()
    }

    /// True when an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn require_key(&self) -> Result<&str, PaddockError> {
        let missing = || PaddockError::configuration(format!("{} not set", Self::API_KEY_ENV));
        self.api_key.as_deref().ok_or_else(missing)
    }

    async fn send(&self, url: &str, attempt: &Attempt) -> Result<Reply, PaddockError> {
        let mut req = self.http.get(url).query(&attempt.query);
        for (name, value) in &attempt.headers {
            req = req.header(*name, value);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| PaddockError::connector(Self::KEY.as_str(), e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| PaddockError::connector(Self::KEY.as_str(), e.to_string()))?;
        Ok(Reply { status, body })
    }

    fn status_error(reply: &Reply) -> PaddockError {
        let msg = preview(&reply.body, ERROR_BODY_CHARS);
        match reply.status {
            401 | 403 => PaddockError::UpstreamAuth {
                status: reply.status,
                msg,
            },
            status => {
                PaddockError::connector(Self::KEY.as_str(), format!("status {status}: {msg}"))
            }
        }
    }

    async fn try_json(&self, url: &str, attempt: &Attempt) -> Result<Value, PaddockError> {
        let reply = self.send(url, attempt).await?;
        if reply.status != 200 {
            return Err(Self::status_error(&reply));
        }
        serde_json::from_str(&reply.body)
            .map_err(|e| PaddockError::MalformedResponse(format!("json: {e}")))
    }

    async fn try_csv(&self, url: &str, attempt: &Attempt) -> Result<Vec<RawRecord>, PaddockError> {
        let reply = self.send(url, attempt).await?;
        if reply.status != 200 {
            return Err(Self::status_error(&reply));
        }
        Ok(parse_csv(&reply.body)?.rows)
    }
}

/// First `max` characters of `s`.
fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[async_trait]
impl FeedConnector for PfConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "paddock_pf::fetch_json",
            skip(self, url, params),
            fields(url = %url),
        )
    )]
    async fn fetch_json(&self, url: &str, params: &Params) -> Result<Value, PaddockError> {
        let key = self.require_key()?;
        let mut last: Option<PaddockError> = None;
        for attempt in plan(&self.strategies, ACCEPT_JSON, key, params) {
            match self.try_json(url, &attempt).await {
                Ok(body) => return Ok(unwrap_envelope(body)),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    if e.is_soft() {
                        tracing::debug!(
                            strategy = ?attempt.strategy,
                            error = %e,
                            "credentials rejected; trying next strategy"
                        );
                    } else {
                        tracing::warn!(
                            strategy = ?attempt.strategy,
                            error = %e,
                            "json attempt failed"
                        );
                    }
                    last = Some(e);
                }
            }
        }
        let last_error = match last {
            Some(e) => e.to_string(),
            None => "no attempts made".to_string(),
        };
        #[cfg(feature = "tracing")]
        tracing::warn!(url, last_error = %last_error, "all json attempts failed");
        Err(PaddockError::upstream_fetch(url, last_error))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "paddock_pf::fetch_csv",
            skip(self, url, params),
            fields(url = %url),
        )
    )]
    async fn fetch_csv(&self, url: &str, params: &Params) -> Result<Vec<RawRecord>, PaddockError> {
        let key = self.require_key()?;
        for attempt in plan(&self.strategies, ACCEPT_CSV, key, params) {
            match self.try_csv(url, &attempt).await {
                Ok(rows) => return Ok(rows),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        strategy = ?attempt.strategy,
                        error = %_e,
                        "csv attempt failed"
                    );
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(url, "csv endpoint yielded nothing; treating as empty");
        Ok(Vec::new())
    }

    async fn probe_csv(&self, url: &str, params: &Params) -> CsvProbe {
        let key = match self.require_key() {
            Ok(key) => key,
            Err(_) => {
                return CsvProbe {
                    error: Some(format!("{} not set", Self::API_KEY_ENV)),
                    ..CsvProbe::default()
                };
            }
        };

        let mut tries = Vec::new();
        for attempt in plan(&self.strategies, ACCEPT_CSV, key, params) {
            let reply = match self.send(url, &attempt).await {
                Ok(reply) => reply,
                Err(e) => {
                    tries.push(ProbeAttempt {
                        attempt_headers: attempt.header_names(),
                        status_code: None,
                        preview: preview(&e.to_string(), PREVIEW_CHARS),
                    });
                    continue;
                }
            };
            if reply.status != 200 {
                tries.push(ProbeAttempt {
                    attempt_headers: attempt.header_names(),
                    status_code: Some(reply.status),
                    preview: preview(&reply.body, PREVIEW_CHARS),
                });
                continue;
            }
            return match parse_csv(&reply.body) {
                Ok(table) => {
                    let first_row = table.rows.first().map(|row| {
                        row.iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect::<BTreeMap<_, _>>()
                    });
                    CsvProbe {
                        ok: true,
                        status_code: Some(reply.status),
                        columns: table.columns,
                        first_row,
                        tries,
                        error: None,
                    }
                }
                Err(e) => CsvProbe {
                    ok: false,
                    status_code: Some(reply.status),
                    tries,
                    error: Some(format!("CSV parse error: {e}")),
                    ..CsvProbe::default()
                },
            };
        }
        CsvProbe {
            ok: false,
            tries,
            ..CsvProbe::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_char_safe() {
        let s = "é".repeat(500);
        assert_eq!(preview(&s, PREVIEW_CHARS).chars().count(), 400);
        assert_eq!(preview("short", PREVIEW_CHARS), "short");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let c = PfConnector::builder().api_key("   ").build().unwrap();
        assert!(!c.has_api_key());
        assert!(c.require_key().unwrap_err().is_configuration());
    }

    #[test]
    fn debug_output_hides_key() {
        let c = PfConnector::new("sekrit").unwrap();
        let shown = format!("{c:?}");
        assert!(!shown.contains("sekrit"), "{shown}");
    }

    #[test]
    fn name_is_the_connector_key() {
        let c = PfConnector::new("k").unwrap();
        assert_eq!(c.name(), PfConnector::KEY.as_str());
        assert_eq!(c.name(), "paddock-pf");
    }

    #[test]
    fn empty_strategy_list_rejected() {
        let err = PfConnector::builder()
            .auth_strategies(&[])
            .build()
            .unwrap_err();
        assert!(matches!(err, PaddockError::InvalidArg(_)));
    }
}
