use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use paddock_core::{CsvProbe, FeedConnector, PaddockError, Params, RawRecord};

/// Instruction for how a call should behave for a given request.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after a delay.
    Delayed(Duration, T),
    /// Fail immediately with the provided error.
    Fail(PaddockError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

/// Which connector method was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `fetch_csv`
    Csv,
    /// `fetch_json`
    Json,
    /// `probe_csv`
    Probe,
}

/// A request as seen by the mock: endpoint plus ordered params.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockRequest {
    /// Endpoint URL.
    pub url: String,
    /// Query parameters in send order.
    pub params: Vec<(String, String)>,
}

impl MockRequest {
    /// Build a request key from a URL and `(name, value)` pairs.
    pub fn new<K, V>(url: impl Into<String>, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            url: url.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn from_call(url: &str, params: &Params) -> Self {
        Self::new(url, params.iter().map(|(k, v)| (*k, v.clone())))
    }

    /// Value of the first parameter named `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One logged call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedCall {
    /// Method that was invoked.
    pub kind: CallKind,
    /// Request it was invoked with.
    pub request: MockRequest,
}

struct InternalState {
    has_credentials: bool,
    csv_rules: HashMap<MockRequest, MockBehavior<Vec<RawRecord>>>,
    csv_url_rules: HashMap<String, MockBehavior<Vec<RawRecord>>>,
    json_rules: HashMap<MockRequest, MockBehavior<Value>>,
    json_url_rules: HashMap<String, MockBehavior<Value>>,
    calls: Vec<LoggedCall>,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            has_credentials: true,
            csv_rules: HashMap::new(),
            csv_url_rules: HashMap::new(),
            json_rules: HashMap::new(),
            json_url_rules: HashMap::new(),
            calls: Vec::new(),
        }
    }
}

impl InternalState {
    fn csv_rule(&self, req: &MockRequest) -> Option<MockBehavior<Vec<RawRecord>>> {
        lookup(&self.csv_rules, &self.csv_url_rules, req)
    }

    fn json_rule(&self, req: &MockRequest) -> Option<MockBehavior<Value>> {
        lookup(&self.json_rules, &self.json_url_rules, req)
    }
}

/// Exact request rule first, then the per-URL rule.
fn lookup<T: Clone>(
    exact: &HashMap<MockRequest, MockBehavior<T>>,
    by_url: &HashMap<String, MockBehavior<T>>,
    req: &MockRequest,
) -> Option<MockBehavior<T>> {
    exact.get(req).or_else(|| by_url.get(&req.url)).cloned()
}

async fn play<T>(behavior: Option<MockBehavior<T>>, default: T) -> Result<T, PaddockError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Delayed(d, v)) => {
            tokio::time::sleep(d).await;
            Ok(v)
        }
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        None => Ok(default),
    }
}

fn missing_key() -> PaddockError {
    PaddockError::configuration("PF_API_KEY not set")
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior of `fetch_csv` for an exact request.
    pub async fn set_csv_behavior(&self, req: MockRequest, behavior: MockBehavior<Vec<RawRecord>>) {
        let mut guard = self.state.lock().await;
        guard.csv_rules.insert(req, behavior);
    }

    /// Set the behavior of `fetch_csv` for any request to `url` without an exact rule.
    pub async fn set_csv_url_behavior(
        &self,
        url: impl Into<String>,
        behavior: MockBehavior<Vec<RawRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.csv_url_rules.insert(url.into(), behavior);
    }

    /// Set the behavior of `fetch_json` for an exact request.
    pub async fn set_json_behavior(&self, req: MockRequest, behavior: MockBehavior<Value>) {
        let mut guard = self.state.lock().await;
        guard.json_rules.insert(req, behavior);
    }

    /// Set the behavior of `fetch_json` for any request to `url` without an exact rule.
    pub async fn set_json_url_behavior(
        &self,
        url: impl Into<String>,
        behavior: MockBehavior<Value>,
    ) {
        let mut guard = self.state.lock().await;
        guard.json_url_rules.insert(url.into(), behavior);
    }

    /// Simulate a connector with (`true`) or without (`false`) an API key.
    ///
    /// Without one, every fetch fails with `Configuration` and nothing is logged.
    pub async fn set_credentials(&self, present: bool) {
        let mut guard = self.state.lock().await;
        guard.has_credentials = present;
    }

    /// Copy of every logged call, in call order.
    pub async fn calls(&self) -> Vec<LoggedCall> {
        let guard = self.state.lock().await;
        guard.calls.clone()
    }

    /// Requests of one kind made against `url`, in call order.
    pub async fn requests_for(&self, kind: CallKind, url: &str) -> Vec<MockRequest> {
        let guard = self.state.lock().await;
        guard
            .calls
            .iter()
            .filter(|c| c.kind == kind && c.request.url == url)
            .map(|c| c.request.clone())
            .collect()
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Requests without a matching rule succeed with no data: an empty row set
/// for CSV and an empty array for JSON.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn FeedConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn FeedConnector>, controller)
    }

    /// Log the call and snapshot its behavior without holding the lock across awaits.
    async fn record<T: Clone>(
        &self,
        kind: CallKind,
        req: MockRequest,
        pick: impl FnOnce(&InternalState, &MockRequest) -> Option<MockBehavior<T>>,
    ) -> Result<Option<MockBehavior<T>>, PaddockError> {
        let mut guard = self.state.lock().await;
        if !guard.has_credentials {
            return Err(missing_key());
        }
        let behavior = pick(&*guard, &req);
        guard.calls.push(LoggedCall { kind, request: req });
        Ok(behavior)
    }
}

#[async_trait]
impl FeedConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_json(&self, url: &str, params: &Params) -> Result<Value, PaddockError> {
        let req = MockRequest::from_call(url, params);
        let behavior = self
            .record(CallKind::Json, req, InternalState::json_rule)
            .await?;
        play(behavior, Value::Array(Vec::new())).await
    }

    async fn fetch_csv(&self, url: &str, params: &Params) -> Result<Vec<RawRecord>, PaddockError> {
        let req = MockRequest::from_call(url, params);
        let behavior = self
            .record(CallKind::Csv, req, InternalState::csv_rule)
            .await?;
        // CSV failures of any kind read as "no rows", same as the real connector.
        match behavior {
            Some(MockBehavior::Fail(e)) if e.is_configuration() => Err(e),
            Some(MockBehavior::Fail(_)) => Ok(Vec::new()),
            other => play(other, Vec::new()).await,
        }
    }

    async fn probe_csv(&self, url: &str, params: &Params) -> CsvProbe {
        let req = MockRequest::from_call(url, params);
        let recorded = self
            .record(CallKind::Probe, req, InternalState::csv_rule)
            .await;
        let behavior = match recorded {
            Ok(behavior) => behavior,
            Err(_) => {
                return CsvProbe {
                    error: Some("PF_API_KEY not set".into()),
                    ..CsvProbe::default()
                };
            }
        };
        match play(behavior, Vec::new()).await {
            Ok(rows) => crate::probe_from_rows(&rows),
            Err(e) => CsvProbe {
                error: Some(e.to_string()),
                ..CsvProbe::default()
            },
        }
    }
}
