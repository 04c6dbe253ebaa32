use paddock_types::{
    CsvProbe, GearReport, GearRow, Meeting, MeetingGear, PaddockError, ProbeAttempt, RaceGear,
    RunnerGear,
};
use serde_json::json;

#[test]
fn gear_report_serializes_with_snake_case_fields() {
    let report = GearReport {
        date: "2025-06-01".into(),
        meetings: vec![MeetingGear {
            meeting_id: Some(101),
            meeting: Some("Caulfield".into()),
            races: vec![RaceGear {
                race_number: 1,
                runners: vec![RunnerGear {
                    runner_number: Some(4),
                    horse_name: Some("Fast Deer".into()),
                    runner_id: None,
                    gear_change: "Blinkers ON".into(),
                }],
            }],
        }],
    };

    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(
        v,
        json!({
            "date": "2025-06-01",
            "meetings": [{
                "meeting_id": 101,
                "meeting": "Caulfield",
                "races": [{
                    "race_number": 1,
                    "runners": [{
                        "runner_number": 4,
                        "horse_name": "Fast Deer",
                        "runner_id": null,
                        "gear_change": "Blinkers ON"
                    }]
                }]
            }]
        })
    );

    let back: GearReport = serde_json::from_value(v).unwrap();
    assert_eq!(back, report);
}

#[test]
fn meeting_identity_ignores_venue_case() {
    let a = Meeting::new(Some(501), Some("Flemington".into()));
    let b = Meeting::new(Some(501), Some("FLEMINGTON".into()));
    assert_eq!(a.identity(), b.identity());

    let unresolved = Meeting::new(None, None);
    assert_eq!(unresolved.identity(), (0, String::new()));
}

#[test]
fn gear_row_identity_requires_name_or_id() {
    let mut row = GearRow {
        race_number: 3,
        runner_number: Some(7),
        horse_name: None,
        runner_id: None,
        gear_change: "Tongue tie ON".into(),
    };
    assert!(!row.has_identity());
    row.runner_id = Some(99);
    assert!(row.has_identity());

    let runner = RunnerGear::from(row);
    assert_eq!(runner.runner_number, Some(7));
    assert_eq!(runner.runner_id, Some(99));
}

#[test]
fn csv_probe_omits_empty_sections() {
    let probe = CsvProbe {
        ok: false,
        tries: vec![ProbeAttempt {
            attempt_headers: vec!["accept".into(), "X-Api-Key".into()],
            status_code: Some(401),
            preview: "unauthorised".into(),
        }],
        ..CsvProbe::default()
    };
    let v = serde_json::to_value(&probe).unwrap();
    assert_eq!(
        v,
        json!({
            "ok": false,
            "tries": [{
                "attempt_headers": ["accept", "X-Api-Key"],
                "status_code": 401,
                "preview": "unauthorised"
            }]
        })
    );
}

#[test]
fn error_helpers_classify() {
    let auth = PaddockError::UpstreamAuth {
        status: 403,
        msg: "forbidden".into(),
    };
    assert!(auth.is_soft());
    assert!(!PaddockError::upstream_fetch("u", "boom").is_soft());
    assert!(PaddockError::configuration("PF_API_KEY not set").is_configuration());
    assert_eq!(
        PaddockError::upstream_fetch("https://x/y", "500 oops").to_string(),
        "upstream fetch failed for https://x/y: 500 oops"
    );
}
