use chrono::{TimeZone, Utc};
use paddock_demos::common::melbourne_day;

#[test]
fn melbourne_is_ahead_of_utc() {
    // 2025-05-31 20:00 UTC is already 1 June in Melbourne (UTC+10 in winter).
    let now = Utc.with_ymd_and_hms(2025, 5, 31, 20, 0, 0).unwrap();
    assert_eq!(melbourne_day(now).to_string(), "2025-06-01");

    // 2025-01-15 12:59 UTC is 23:59 in Melbourne (UTC+11 in summer).
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 59, 0).unwrap();
    assert_eq!(melbourne_day(now).to_string(), "2025-01-15");
}
