pub(crate) mod aggregate;
pub(crate) mod discovery;
pub(crate) mod extraction;

use chrono::NaiveDate;
use paddock_core::{PaddockError, normalize_date, parse_day};

/// Parse a caller-supplied `YYYY-MM-DD` date. Other shapes are rejected even
/// when the normalizer would accept them.
pub(crate) fn parse_request_date(date: &str) -> Result<NaiveDate, PaddockError> {
    match (normalize_date(date), parse_day(date)) {
        (Some(ymd), Some(day)) if ymd == date => Ok(day),
        _ => Err(PaddockError::InvalidArg(format!(
            "date must be YYYY-MM-DD, got {date:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_date_is_strict() {
        assert!(parse_request_date("2025-06-01").is_ok());
        for bad in ["01-06-2025", "2025-06-01T00:00:00", "2025-02-30", " 2025-06-01", ""] {
            assert!(
                matches!(parse_request_date(bad), Err(PaddockError::InvalidArg(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
