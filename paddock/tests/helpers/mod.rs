// Shared fixtures for orchestrator tests; `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use paddock::{Endpoints, FeedConnector, Paddock, PaddockBuilder};
use paddock_core::RawRecord;
use paddock_mock::{DynamicMockConnector, DynamicMockController, MockBehavior, MockRequest};

pub const BASE: &str = "https://pf.test/v2";
pub const DATE: &str = "2025-06-01";

pub fn endpoints() -> Endpoints {
    Endpoints::with_base(BASE)
}

pub fn form_url() -> String {
    endpoints().form_csv
}

pub fn meeting_url() -> String {
    endpoints().meeting_csv
}

pub fn scratchings_url() -> String {
    endpoints().scratchings
}

pub fn conditions_url() -> String {
    endpoints().conditions
}

/// Fresh dynamic mock plus a builder already pointed at the mock endpoints.
pub fn mock_builder() -> (PaddockBuilder, DynamicMockController) {
    let (mock, controller) = DynamicMockConnector::new_with_controller("mock");
    (builder_for(mock), controller)
}

pub fn builder_for(c: Arc<dyn FeedConnector>) -> PaddockBuilder {
    Paddock::builder().with_connector(c).endpoints(endpoints())
}

pub fn record(pairs: &[(&str, &str)]) -> RawRecord {
    RawRecord::from_pairs(pairs.iter().copied())
}

pub fn race_request(meeting_id: u64, race: u32) -> MockRequest {
    MockRequest::new(
        form_url(),
        [
            ("meetingId", meeting_id.to_string()),
            ("raceNumber", race.to_string()),
        ],
    )
}

/// Script one race of form rows for a meeting.
pub async fn set_race(
    ctl: &DynamicMockController,
    meeting_id: u64,
    race: u32,
    rows: Vec<RawRecord>,
) {
    ctl.set_csv_behavior(race_request(meeting_id, race), MockBehavior::Return(rows))
        .await;
}

/// Script the meeting listing for one parameter spelling.
pub async fn set_listing(
    ctl: &DynamicMockController,
    param: &str,
    value: &str,
    rows: Vec<RawRecord>,
) {
    ctl.set_csv_behavior(
        MockRequest::new(meeting_url(), [(param, value)]),
        MockBehavior::Return(rows),
    )
    .await;
}

/// A form row with a gear change.
pub fn runner(number: &str, name: &str, gear: &str) -> RawRecord {
    record(&[
        ("Tab No", number),
        ("Horse Name", name),
        ("GearChanges", gear),
    ])
}
