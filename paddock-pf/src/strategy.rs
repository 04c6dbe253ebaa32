use paddock_core::Params;

/// Header carrying the API key under [`AuthStrategy::Header`].
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Query parameter carrying the API key under [`AuthStrategy::QueryParam`].
pub const API_KEY_PARAM: &str = "apiKey";

/// `accept` value for JSON endpoints.
pub const ACCEPT_JSON: &str = "application/json";
/// `accept` value for CSV endpoints.
pub const ACCEPT_CSV: &str = "text/csv";

/// How the API key is presented on one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStrategy {
    /// `X-Api-Key` header, caller params unchanged.
    Header,
    /// No auth header; `apiKey` appended to the query string.
    QueryParam,
}

impl AuthStrategy {
    /// Default order: header first, query parameter as fallback.
    pub const DEFAULT_ORDER: &'static [Self] = &[Self::Header, Self::QueryParam];

    /// Build the request descriptor for this strategy.
    #[must_use]
    pub fn attempt(self, accept: &'static str, api_key: &str, params: &Params) -> Attempt {
        let mut headers = vec![("accept", accept.to_string())];
        let mut query: Vec<(&'static str, String)> = params.to_vec();
        match self {
            Self::Header => headers.push((API_KEY_HEADER, api_key.to_string())),
            Self::QueryParam => query.push((API_KEY_PARAM, api_key.to_string())),
        }
        Attempt {
            strategy: self,
            headers,
            query,
        }
    }
}

/// One fully specified request: headers plus query overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Strategy this attempt was built from.
    pub strategy: AuthStrategy,
    /// Request headers, in send order.
    pub headers: Vec<(&'static str, String)>,
    /// Query parameters, in send order.
    pub query: Vec<(&'static str, String)>,
}

impl Attempt {
    /// Header names only; safe to surface in diagnostics.
    #[must_use]
    pub fn header_names(&self) -> Vec<String> {
        self.headers.iter().map(|(k, _)| (*k).to_string()).collect()
    }
}

/// Expand an ordered strategy list into concrete attempts.
#[must_use]
pub fn plan(
    strategies: &[AuthStrategy],
    accept: &'static str,
    api_key: &str,
    params: &Params,
) -> Vec<Attempt> {
    strategies
        .iter()
        .map(|s| s.attempt(accept, api_key, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_query_param() {
        let params = [("meetingId", "101".to_string())];
        let attempts = plan(AuthStrategy::DEFAULT_ORDER, ACCEPT_CSV, "k", &params);
        assert_eq!(attempts.len(), 2);

        assert_eq!(attempts[0].header_names(), vec!["accept", API_KEY_HEADER]);
        assert_eq!(attempts[0].query, vec![("meetingId", "101".to_string())]);

        assert_eq!(attempts[1].header_names(), vec!["accept"]);
        assert_eq!(
            attempts[1].query,
            vec![
                ("meetingId", "101".to_string()),
                (API_KEY_PARAM, "k".to_string())
            ]
        );
    }
}
