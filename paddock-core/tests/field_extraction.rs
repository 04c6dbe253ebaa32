use paddock_core::normalize::{self, keys};
use paddock_core::{RawRecord, Scalar, extract_day, extract_first, extract_int, normalize_date};
use serde_json::json;

#[test]
fn runner_number_alias_priority_is_list_order() {
    // Both `No` and `runnerNumber` populated: `runnernumber` precedes `no`.
    let c = RawRecord::from_pairs([("No", "3"), ("runnerNumber", "8")]).canonicalize();
    assert_eq!(
        extract_first(&c, keys::RUNNER_NUMBER),
        Some(&Scalar::from("8"))
    );
    assert_eq!(normalize::runner_number(&c), Some(8));

    // Same record, reversed column order: same answer.
    let c = RawRecord::from_pairs([("runnerNumber", "8"), ("No", "3")]).canonicalize();
    assert_eq!(normalize::runner_number(&c), Some(8));
}

#[test]
fn zero_is_absent() {
    let c = RawRecord::from_pairs([("Race Number", "0")]).canonicalize();
    assert_eq!(extract_int(&c, &["race_number"]), None);

    let c = RawRecord::from_pairs([("runner_number", Scalar::Int(0))]).canonicalize();
    assert_eq!(normalize::runner_number(&c), None);

    let c = RawRecord::from_pairs([("runner_number", " 12 ")]).canonicalize();
    assert_eq!(normalize::runner_number(&c), Some(12));
}

#[test]
fn date_shapes_normalize() {
    assert_eq!(normalize_date("2025-03-15").as_deref(), Some("2025-03-15"));
    assert_eq!(normalize_date("15-03-2025").as_deref(), Some("2025-03-15"));
    assert_eq!(
        normalize_date("2025-03-15T08:30:00").as_deref(),
        Some("2025-03-15")
    );
    assert_eq!(
        normalize_date("2025-03-15 08:30:00").as_deref(),
        Some("2025-03-15")
    );
    assert_eq!(normalize_date("garbage"), None);
    assert_eq!(normalize_date("2025/03/15"), None);
    assert_eq!(normalize_date("2025-02-30"), None);
    assert_eq!(normalize_date(""), None);
}

#[test]
fn extract_day_tries_aliases_in_order() {
    let raw = RawRecord::from_json(&json!({
        "meetingDate": "not a date",
        "timestamp": "2025-06-01T21:04:00Z"
    }))
    .unwrap();
    let c = raw.canonicalize();
    let day = extract_day(&c, keys::SCRATCHINGS_DATE).unwrap();
    assert_eq!(paddock_core::to_ymd(day), "2025-06-01");
}

#[test]
fn historical_gear_column_is_not_current_gear() {
    let c = RawRecord::from_pairs([
        ("Forms[0].GearChanges", "Blinkers OFF"),
        ("HorseName", "Old Timer"),
    ])
    .canonicalize();
    assert_eq!(normalize::gear_change(&c), None);
    assert_eq!(normalize::horse_name(&c).as_deref(), Some("Old Timer"));

    let c = RawRecord::from_pairs([
        ("GearChanges", "  Tongue tie ON "),
        ("Forms[0].GearChanges", "Blinkers OFF"),
    ])
    .canonicalize();
    assert_eq!(normalize::gear_change(&c).as_deref(), Some("Tongue tie ON"));
}

#[test]
fn json_scalars_map_cleanly() {
    let raw = RawRecord::from_json(&json!({
        "meetingId": 501,
        "track": "Flemington",
        "rating": 1.5,
        "forms": [{"GearChanges": "x"}],
        "scratched": true
    }))
    .unwrap();
    let c = raw.canonicalize();
    assert_eq!(normalize::meeting_id(&c), Some(501));
    assert_eq!(c.get("rating"), Some(&Scalar::from("1.5")));
    assert_eq!(c.get("forms"), Some(&Scalar::Null));
    assert!(normalize::is_scratched(&c));
}
