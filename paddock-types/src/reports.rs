//! Report envelopes produced by the orchestrator and its debug helpers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A race meeting discovered for a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Meeting {
    /// Upstream meeting identifier, when one could be resolved.
    pub meeting_id: Option<u64>,
    /// Venue / track name.
    pub meeting: Option<String>,
}

impl Meeting {
    /// Construct a meeting from its parts.
    #[must_use]
    pub const fn new(meeting_id: Option<u64>, meeting: Option<String>) -> Self {
        Self {
            meeting_id,
            meeting,
        }
    }

    /// Deduplication key: `(meeting_id or 0, lowercased venue or "")`.
    #[must_use]
    pub fn identity(&self) -> (u64, String) {
        (
            self.meeting_id.unwrap_or(0),
            self.meeting.as_deref().unwrap_or("").to_lowercase(),
        )
    }
}

/// One current-race gear change for one runner, as extracted from a form row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearRow {
    /// Race the row was queried for.
    pub race_number: u32,
    /// Saddle-cloth / TAB number.
    pub runner_number: Option<u32>,
    /// Horse name as published.
    pub horse_name: Option<String>,
    /// Upstream runner identifier.
    pub runner_id: Option<u64>,
    /// Non-empty gear change text.
    pub gear_change: String,
}

impl GearRow {
    /// Rows must carry a horse name or a runner id to be reported.
    #[must_use]
    pub const fn has_identity(&self) -> bool {
        self.horse_name.is_some() || self.runner_id.is_some()
    }
}

/// Runner entry inside a [`RaceGear`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerGear {
    /// Saddle-cloth / TAB number.
    pub runner_number: Option<u32>,
    /// Horse name as published.
    pub horse_name: Option<String>,
    /// Upstream runner identifier.
    pub runner_id: Option<u64>,
    /// Gear change text.
    pub gear_change: String,
}

impl From<GearRow> for RunnerGear {
    fn from(row: GearRow) -> Self {
        Self {
            runner_number: row.runner_number,
            horse_name: row.horse_name,
            runner_id: row.runner_id,
            gear_change: row.gear_change,
        }
    }
}

/// Gear changes for a single race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceGear {
    /// Race number within the meeting.
    pub race_number: u32,
    /// Runners ordered by number (numbered first), then name.
    pub runners: Vec<RunnerGear>,
}

/// Gear changes for one meeting, races ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingGear {
    /// Upstream meeting identifier; `None` when discovery could not resolve one.
    pub meeting_id: Option<u64>,
    /// Track name from the form rows, falling back to the discovered venue.
    pub meeting: Option<String>,
    /// Races that carry at least one gear change.
    pub races: Vec<RaceGear>,
}

/// Terminal artifact: all gear changes for a date, meetings in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearReport {
    /// Requested date, `YYYY-MM-DD`.
    pub date: String,
    /// One entry per discovered meeting.
    pub meetings: Vec<MeetingGear>,
}

/// Raw discovery results, kept apart for troubleshooting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// Requested date, `YYYY-MM-DD`.
    pub date: String,
    /// Meetings found through the meeting listing endpoint.
    pub from_meeting_csv: Vec<Meeting>,
    /// Meetings found through the scratchings/conditions feeds.
    pub from_updates: Vec<Meeting>,
}

/// One attempt recorded by a CSV probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeAttempt {
    /// Header names sent with the attempt (values withheld).
    pub attempt_headers: Vec<String>,
    /// Status code; `None` if the request never completed.
    pub status_code: Option<u16>,
    /// Up to the first 400 characters of the body, or the transport error.
    pub preview: String,
}

/// Diagnostic view of a single CSV endpoint query. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CsvProbe {
    /// True when a 200 response was decoded as CSV.
    pub ok: bool,
    /// Status of the successful attempt, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Header row of the decoded CSV.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// First data row keyed by column name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_row: Option<BTreeMap<String, String>>,
    /// Failed attempts, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tries: Vec<ProbeAttempt>,
    /// Configuration or decode error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
