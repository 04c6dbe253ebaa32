use paddock_core::normalize::{
    gear_change, horse_name, is_scratched, runner_id, runner_number, track_name,
};
use paddock_core::{CanonicalRecord, CsvProbe, GearRow, PaddockError, RawRecord};

use crate::core::Paddock;

/// Gear row for one form record, or `None` when it carries no current-race
/// gear change or the runner is scratched.
pub(crate) fn gear_row(race_number: u32, c: &CanonicalRecord) -> Option<GearRow> {
    let gear = gear_change(c)?;
    if is_scratched(c) {
        return None;
    }
    Some(GearRow {
        race_number,
        runner_number: runner_number(c),
        horse_name: horse_name(c),
        runner_id: runner_id(c),
        gear_change: gear,
    })
}

impl Paddock {
    /// Current-race gear changes for one meeting, plus the track name printed
    /// on its form rows.
    ///
    /// Races are requested one at a time from 1 up to `max_races`. The loop
    /// stops once `empty_race_streak` consecutive races come back empty; the
    /// race after the one that completes the streak is never requested.
    /// Rows without a horse name or runner id are dropped.
    ///
    /// # Errors
    /// Returns `Configuration` when the connector has no credentials. Every
    /// other upstream failure reads as an empty race.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "paddock::extraction",
            skip(self),
            fields(max_races = self.cfg.max_races),
        )
    )]
    pub async fn gear_for_meeting(
        &self,
        meeting_id: u64,
    ) -> Result<(Vec<GearRow>, Option<String>), PaddockError> {
        let url = self.cfg.endpoints.form_csv.as_str();
        let mut rows = Vec::new();
        let mut meeting_name: Option<String> = None;
        let mut empty_streak = 0u32;

        for race in 1..=self.cfg.max_races {
            let params = [
                ("meetingId", meeting_id.to_string()),
                ("raceNumber", race.to_string()),
            ];
            let batch = self.connector.fetch_csv(url, &params).await?;
            if batch.is_empty() {
                empty_streak += 1;
                if empty_streak >= self.cfg.empty_race_streak {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        target: "paddock::extraction",
                        race,
                        "empty streak reached; stopping"
                    );
                    break;
                }
                continue;
            }
            empty_streak = 0;

            let canon: Vec<CanonicalRecord> = batch.iter().map(RawRecord::canonicalize).collect();
            if meeting_name.is_none() {
                meeting_name = canon.iter().find_map(track_name);
            }
            rows.extend(canon.iter().filter_map(|c| gear_row(race, c)));
        }

        rows.retain(GearRow::has_identity);
        Ok((rows, meeting_name))
    }

    /// Probe the form endpoint for `meeting_id` with `raceNumber=0` and report
    /// status, columns, and the first row. Never fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "paddock::debug", skip(self))
    )]
    pub async fn debug_form_csv(&self, meeting_id: u64) -> CsvProbe {
        let params = [
            ("meetingId", meeting_id.to_string()),
            ("raceNumber", "0".to_string()),
        ];
        self.connector
            .probe_csv(&self.cfg.endpoints.form_csv, &params)
            .await
    }
}
