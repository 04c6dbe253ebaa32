//! paddock-mock
//!
//! Connectors for tests and demos that never touch the network.
//!
//! - [`MockConnector`] serves a fixed fixture day (`2025-06-01`) keyed by
//!   endpoint path, so it works with the default [`paddock_core::Endpoints`].
//! - [`DynamicMockConnector`] is scripted per request from a test through its
//!   [`DynamicMockController`] and logs every call.
#![warn(missing_docs)]

use std::collections::BTreeMap;

use async_trait::async_trait;
use paddock_core::{CsvProbe, FeedConnector, PaddockError, Params, RawRecord};
use serde_json::Value;

mod dynamic;
mod fixtures;

pub use dynamic::{
    CallKind, DynamicMockConnector, DynamicMockController, LoggedCall, MockBehavior, MockRequest,
};
pub use fixtures::meetings::DATE as FIXTURE_DATE;

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create the fixture connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    fn csv_rows(url: &str, params: &Params) -> Vec<RawRecord> {
        if url.ends_with("/form/meeting/csv") {
            return params
                .first()
                .map(|(k, v)| fixtures::meetings::listing(k, v))
                .unwrap_or_default();
        }
        if url.ends_with("/form/form/csv") {
            let meeting = Self::param(params, "meetingId").unwrap_or("");
            return match Self::param(params, "raceNumber") {
                Some("0") => fixtures::form::probe(meeting),
                Some(race) => fixtures::form::race(meeting, race),
                None => Vec::new(),
            };
        }
        Vec::new()
    }
}

/// Describe already-decoded rows the way a successful CSV probe does.
pub(crate) fn probe_from_rows(rows: &[RawRecord]) -> CsvProbe {
    let columns = rows
        .first()
        .map(|r| r.iter().map(|(k, _)| k.to_string()).collect())
        .unwrap_or_default();
    let first_row = rows.first().map(|r| {
        r.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>()
    });
    CsvProbe {
        ok: true,
        status_code: Some(200),
        columns,
        first_row,
        ..CsvProbe::default()
    }
}

#[async_trait]
impl FeedConnector for MockConnector {
    fn name(&self) -> &'static str {
        "paddock-mock"
    }

    async fn fetch_json(&self, url: &str, _params: &Params) -> Result<Value, PaddockError> {
        let body = if url.ends_with("/Updates/Scratchings") {
            fixtures::updates::scratchings()
        } else if url.ends_with("/Updates/Conditions") {
            fixtures::updates::conditions()
        } else {
            return Err(PaddockError::upstream_fetch(url, "status 404: not found"));
        };
        Ok(paddock_core::unwrap_envelope(body))
    }

    async fn fetch_csv(&self, url: &str, params: &Params) -> Result<Vec<RawRecord>, PaddockError> {
        Ok(Self::csv_rows(url, params))
    }

    async fn probe_csv(&self, url: &str, params: &Params) -> CsvProbe {
        probe_from_rows(&Self::csv_rows(url, params))
    }
}
