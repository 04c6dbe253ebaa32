use async_trait::async_trait;
use paddock_types::{CsvProbe, PaddockError};
use serde_json::Value;

use crate::record::RawRecord;

/// Ordered query parameters for one upstream request.
///
/// Connectors append their own credentials; callers never pass the API key.
pub type Params = [(&'static str, String)];

/// Upstream client contract consumed by discovery and extraction.
///
/// Implementations decide how credentials are presented and how many
/// strategies are tried. The contract each method must honor:
///
/// - `fetch_json` fails only when every strategy failed (`UpstreamFetch`) or
///   credentials are missing (`Configuration`).
/// - `fetch_csv` treats every upstream failure as "no rows"; only missing
///   credentials are an error, so callers can tell the two apart.
/// - `probe_csv` never fails and reports what happened on the wire.
#[async_trait]
pub trait FeedConnector: Send + Sync {
    /// Stable connector name used in logs and errors.
    fn name(&self) -> &'static str;

    /// GET a JSON endpoint, returning the payload with any envelope removed.
    async fn fetch_json(&self, url: &str, params: &Params) -> Result<Value, PaddockError>;

    /// GET a CSV endpoint, returning one raw record per data row.
    async fn fetch_csv(&self, url: &str, params: &Params) -> Result<Vec<RawRecord>, PaddockError>;

    /// GET a CSV endpoint and describe the outcome for troubleshooting.
    async fn probe_csv(&self, url: &str, params: &Params) -> CsvProbe;
}
