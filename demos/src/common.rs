use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Australia::Melbourne;
use paddock_core::{FeedConnector, PaddockError, to_ymd};

/// Set to any value to run the demos against the offline fixture connector.
pub const USE_MOCK_ENV: &str = "PADDOCK_DEMOS_USE_MOCK";

/// True when the demos should stay offline.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var(USE_MOCK_ENV).is_ok()
}

/// Return a connector for demos.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn get_connector() -> Result<Arc<dyn FeedConnector>, PaddockError> {
    if use_mock() {
        println!("--- (Using Mock Connector for CI) ---");
        Ok(Arc::new(paddock_mock::MockConnector::new()))
    } else {
        Ok(Arc::new(paddock_pf::PfConnector::from_env()?))
    }
}

/// Calendar day in Melbourne at `now`.
#[must_use]
pub fn melbourne_day(now: chrono::DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Melbourne).date_naive()
}

/// Date to query: the first CLI argument, else the fixture day when mocked,
/// else today in Melbourne.
#[must_use]
pub fn requested_date() -> String {
    if let Some(arg) = std::env::args().nth(1) {
        return arg;
    }
    if use_mock() {
        return paddock_mock::FIXTURE_DATE.to_string();
    }
    to_ymd(melbourne_day(Utc::now()))
}
