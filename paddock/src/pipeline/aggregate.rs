use std::collections::BTreeMap;

use futures::{StreamExt, TryStreamExt, stream};
use paddock_core::{
    GearReport, GearRow, Meeting, MeetingGear, PaddockError, RaceGear, RunnerGear, to_ymd,
};

use crate::core::Paddock;

/// Runner order: numbered runners first by number, then case-insensitive name.
fn runner_key(r: &RunnerGear) -> (bool, u32, String) {
    (
        r.runner_number.is_none(),
        r.runner_number.unwrap_or(0),
        r.horse_name.as_deref().unwrap_or("").to_lowercase(),
    )
}

/// Group rows by race (ascending) and sort each race's runners.
pub(crate) fn group_races(rows: Vec<GearRow>) -> Vec<RaceGear> {
    let mut by_race: BTreeMap<u32, Vec<RunnerGear>> = BTreeMap::new();
    for row in rows {
        by_race.entry(row.race_number).or_default().push(row.into());
    }
    by_race
        .into_iter()
        .map(|(race_number, mut runners)| {
            runners.sort_by_cached_key(runner_key);
            RaceGear {
                race_number,
                runners,
            }
        })
        .collect()
}

impl Paddock {
    /// All current-race gear changes for `date` (`YYYY-MM-DD`).
    ///
    /// Meetings appear in discovery order. A meeting without a resolvable id
    /// is kept with an empty race list; its label is the discovered venue.
    /// Otherwise the label is the track name from the form rows, falling back
    /// to the venue.
    ///
    /// # Errors
    /// - `InvalidArg` when `date` is not `YYYY-MM-DD`.
    /// - `Configuration` when the connector has no credentials; raised before
    ///   any upstream request is made.
    /// - `UpstreamFetch` when an updates feed could not be read.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "paddock::fetch_gear_for_date",
            skip(self),
            fields(
                connector = self.connector.name(),
                meeting_concurrency = self.cfg.meeting_concurrency,
            ),
        )
    )]
    pub async fn fetch_gear_for_date(&self, date: &str) -> Result<GearReport, PaddockError> {
        let day = super::parse_request_date(date)?;
        let meetings = self.meetings_for_date(day).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count = meetings.len(), "meetings discovered");

        let meetings = stream::iter(meetings)
            .map(|m| self.meeting_gear(m))
            .buffered(self.cfg.meeting_concurrency)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(GearReport {
            date: to_ymd(day),
            meetings,
        })
    }

    async fn meeting_gear(&self, meeting: Meeting) -> Result<MeetingGear, PaddockError> {
        let Some(id) = meeting.meeting_id else {
            return Ok(MeetingGear {
                meeting_id: None,
                meeting: meeting.meeting,
                races: Vec::new(),
            });
        };
        let (rows, track) = self.gear_for_meeting(id).await?;
        Ok(MeetingGear {
            meeting_id: Some(id),
            meeting: track.or(meeting.meeting),
            races: group_races(rows),
        })
    }
}
