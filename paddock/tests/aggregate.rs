mod helpers;

use std::sync::Arc;
use std::time::Duration;

use paddock::{Paddock, PaddockError};
use paddock_mock::{CallKind, FIXTURE_DATE, MockBehavior, MockConnector};
use serde_json::json;

use helpers::*;

#[tokio::test]
async fn end_to_end_single_meeting() {
    let (b, ctl) = mock_builder();
    set_listing(
        &ctl,
        "meetingDate",
        DATE,
        vec![record(&[("Meeting Id", "101"), ("Venue", "Caulfield")])],
    )
    .await;
    set_race(&ctl, 101, 1, vec![runner("4", "Fast Deer", "Blinkers ON")]).await;
    let p = b.build().unwrap();

    let report = p.fetch_gear_for_date(DATE).await.unwrap();
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
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

    // Race 3 completes the empty streak; race 4 is never requested.
    let races = ctl.requests_for(CallKind::Csv, &form_url()).await;
    assert_eq!(races.len(), 3);
}

#[tokio::test]
async fn zero_meetings_is_an_empty_report() {
    let (b, _ctl) = mock_builder();
    let p = b.build().unwrap();
    let report = p.fetch_gear_for_date(DATE).await.unwrap();
    assert_eq!(report.date, DATE);
    assert!(report.meetings.is_empty());
}

#[tokio::test]
async fn missing_key_fails_before_any_call() {
    let (b, ctl) = mock_builder();
    ctl.set_credentials(false).await;
    let p = b.build().unwrap();

    let err = p.fetch_gear_for_date(DATE).await.unwrap_err();
    assert!(matches!(err, PaddockError::Configuration(_)));
    assert!(ctl.calls().await.is_empty());
}

#[tokio::test]
async fn invalid_date_is_rejected_without_calls() {
    let (b, ctl) = mock_builder();
    let p = b.build().unwrap();

    for bad in ["01-06-2025", "2025-13-01", "today"] {
        let err = p.fetch_gear_for_date(bad).await.unwrap_err();
        assert!(matches!(err, PaddockError::InvalidArg(_)), "{bad}");
    }
    assert!(ctl.calls().await.is_empty());
}

#[tokio::test]
async fn unresolvable_meeting_passes_through_empty() {
    let (b, ctl) = mock_builder();
    set_listing(
        &ctl,
        "meetingDate",
        DATE,
        vec![record(&[("Venue", "Mystery Downs")])],
    )
    .await;
    let p = b.build().unwrap();

    let report = p.fetch_gear_for_date(DATE).await.unwrap();
    assert_eq!(report.meetings.len(), 1);
    let m = &report.meetings[0];
    assert_eq!(m.meeting_id, None);
    assert_eq!(m.meeting.as_deref(), Some("Mystery Downs"));
    assert!(m.races.is_empty());
    let form_calls = ctl.requests_for(CallKind::Csv, &form_url()).await;
    assert!(form_calls.is_empty());
}

#[tokio::test]
async fn label_prefers_track_name_then_venue() {
    let (b, ctl) = mock_builder();
    set_listing(
        &ctl,
        "meetingDate",
        DATE,
        vec![
            record(&[("Meeting Id", "1"), ("Venue", "Listing Name")]),
            record(&[("Meeting Id", "2"), ("Venue", "Venue Only")]),
        ],
    )
    .await;
    let row = record(&[
        ("Track Name", "Form Name"),
        ("Horse Name", "A"),
        ("GearChanges", "Blinkers ON"),
    ]);
    set_race(&ctl, 1, 1, vec![row]).await;
    let p = b.build().unwrap();

    let report = p.fetch_gear_for_date(DATE).await.unwrap();
    let labels: Vec<_> = report
        .meetings
        .iter()
        .map(|m| m.meeting.as_deref())
        .collect();
    assert_eq!(labels, vec![Some("Form Name"), Some("Venue Only")]);
    // Meeting 2 was known but had no races.
    assert!(report.meetings[1].races.is_empty());
}

#[tokio::test]
async fn concurrency_keeps_discovery_order() {
    let (b, ctl) = mock_builder();
    set_listing(
        &ctl,
        "meetingDate",
        DATE,
        vec![
            record(&[("Meeting Id", "1"), ("Venue", "Slow")]),
            record(&[("Meeting Id", "2"), ("Venue", "Fast")]),
            record(&[("Meeting Id", "3"), ("Venue", "Medium")]),
        ],
    )
    .await;
    for (id, delay) in [(1u64, 60u64), (2, 0), (3, 20)] {
        ctl.set_csv_behavior(
            race_request(id, 1),
            MockBehavior::Delayed(
                Duration::from_millis(delay),
                vec![runner("1", "A", "Blinkers ON")],
            ),
        )
        .await;
    }
    let p = b.meeting_concurrency(3).build().unwrap();

    let report = p.fetch_gear_for_date(DATE).await.unwrap();
    let ids: Vec<_> = report.meetings.iter().map(|m| m.meeting_id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    assert!(report.meetings.iter().all(|m| m.races.len() == 1));
}

#[tokio::test]
async fn fixture_connector_day() {
    let p = Paddock::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let report = p.fetch_gear_for_date(FIXTURE_DATE).await.unwrap();
    let ids: Vec<_> = report.meetings.iter().map(|m| m.meeting_id).collect();
    assert_eq!(ids, vec![Some(101), Some(202), Some(404)]);
    // Ascot only appears, undated, on the conditions feed and has no form.
    assert_eq!(report.meetings[2].meeting.as_deref(), Some("Ascot"));
    assert!(report.meetings[2].races.is_empty());

    let caulfield = &report.meetings[0];
    assert_eq!(caulfield.races.len(), 2);
    let race_1 = &caulfield.races[0].runners;
    let r1: Vec<_> = race_1.iter().map(|r| r.horse_name.as_deref()).collect();
    assert_eq!(r1, vec![Some("Fast Deer")]);

    let probe = p.debug_form_csv(101).await;
    assert!(probe.ok);
}

#[test]
fn builder_validates() {
    let missing = Paddock::builder().build();
    assert!(matches!(missing, Err(PaddockError::InvalidArg(_))));
    let c = Arc::new(MockConnector::new());
    let with_mock = || Paddock::builder().with_connector(c.clone());
    for b in [
        with_mock().max_races(0),
        with_mock().empty_race_streak(0),
        with_mock().meeting_concurrency(0),
    ] {
        assert!(matches!(b.build(), Err(PaddockError::InvalidArg(_))));
    }
    let p = Paddock::builder().with_connector(c).build().unwrap();
    assert_eq!(p.connector_name(), "paddock-mock");
    assert_eq!(p.config().max_races, 15);
}
