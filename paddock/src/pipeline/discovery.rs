use std::collections::HashSet;

use chrono::NaiveDate;
use futures::future::{try_join, try_join_all};
use paddock_core::normalize::{extract_first, extract_str, keys, meeting_id};
use paddock_core::{
    CanonicalRecord, DiscoveryReport, Meeting, PaddockError, RawRecord, parse_day,
    records_from_json, to_dmy, to_ymd,
};

use crate::core::Paddock;

/// Meeting listing query permutations, in the order they are folded.
///
/// The listing silently returns nothing for spellings it does not understand,
/// so every known spelling is tried.
pub(crate) fn listing_permutations(day: NaiveDate) -> [(&'static str, String); 5] {
    let ymd = to_ymd(day);
    let dmy = to_dmy(day);
    [
        ("meetingDate", ymd.clone()),
        ("date", ymd.clone()),
        ("meeting_date", ymd),
        ("meetingDate", dmy.clone()),
        ("date", dmy),
    ]
}

/// Meeting day of an updates record.
///
/// Only the first populated date alias is read. When it does not parse, the
/// `meeting_date` field decides; a record without one is taken to be on
/// `day`.
pub(crate) fn updates_day(
    c: &CanonicalRecord,
    date_keys: &[&str],
    day: NaiveDate,
) -> Option<NaiveDate> {
    let first = extract_first(c, date_keys).map(ToString::to_string);
    if let Some(d) = first.as_deref().and_then(parse_day) {
        return Some(d);
    }
    match extract_first(c, keys::MEETING_DATE) {
        Some(v) => parse_day(&v.to_string()),
        None => Some(day),
    }
}

/// Insertion-ordered meeting set keyed by [`Meeting::identity`].
#[derive(Default)]
pub(crate) struct MeetingSet {
    seen: HashSet<(u64, String)>,
    out: Vec<Meeting>,
}

impl MeetingSet {
    /// Add `m` unless a meeting with the same identity is already present.
    pub(crate) fn insert(&mut self, m: Meeting) -> bool {
        let fresh = self.seen.insert(m.identity());
        if fresh {
            self.out.push(m);
        }
        fresh
    }

    pub(crate) fn into_vec(self) -> Vec<Meeting> {
        self.out
    }
}

impl Paddock {
    /// Meetings from the listing endpoint, tried under every date spelling.
    ///
    /// Rows with neither a meeting id nor a venue collapse into a single
    /// anonymous meeting, which aggregation passes through with no races.
    ///
    /// # Errors
    /// Returns `Configuration` when the connector has no credentials.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "paddock::discovery",
            skip(self, day),
            fields(day = %day),
        )
    )]
    pub async fn meetings_from_listing(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<Meeting>, PaddockError> {
        let url = self.cfg.endpoints.meeting_csv.as_str();
        let calls = listing_permutations(day).into_iter().map(|p| async move {
            let params = std::slice::from_ref(&p);
            self.connector.fetch_csv(url, params).await
        });
        let batches = try_join_all(calls).await?;

        let mut set = MeetingSet::default();
        for raw in batches.iter().flatten() {
            let c = raw.canonicalize();
            let venue = extract_str(&c, keys::LISTING_VENUE);
            set.insert(Meeting::new(meeting_id(&c), venue));
        }
        let out = set.into_vec();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "paddock::discovery", count = out.len(), "listing meetings");
        Ok(out)
    }

    /// Meetings seen in the scratchings and conditions feeds for `day`.
    ///
    /// Both feeds are provider-wide; records are kept only when their meeting
    /// day matches and they carry a meeting id. A record with no date at all
    /// counts as being on `day`. The first venue seen for an id wins,
    /// scratchings before conditions.
    ///
    /// # Errors
    /// Returns `UpstreamFetch` when either feed could not be read and
    /// `Configuration` when the connector has no credentials.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "paddock::discovery",
            skip(self, day),
            fields(day = %day),
        )
    )]
    pub async fn meetings_from_updates(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<Meeting>, PaddockError> {
        let ep = &self.cfg.endpoints;
        let (scratchings, conditions) = try_join(
            self.updates_feed(&ep.scratchings),
            self.updates_feed(&ep.conditions),
        )
        .await?;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (records, date_keys) in [
            (scratchings, keys::SCRATCHINGS_DATE),
            (conditions, keys::CONDITIONS_DATE),
        ] {
            for raw in &records {
                let c = raw.canonicalize();
                if updates_day(&c, date_keys, day) != Some(day) {
                    continue;
                }
                let Some(id) = meeting_id(&c) else {
                    continue;
                };
                if seen.insert(id) {
                    let venue = extract_str(&c, keys::UPDATES_VENUE);
                    out.push(Meeting::new(Some(id), venue));
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "paddock::discovery", count = out.len(), "updates meetings");
        Ok(out)
    }

    async fn updates_feed(&self, url: &str) -> Result<Vec<RawRecord>, PaddockError> {
        let body = self.connector.fetch_json(url, &[]).await?;
        Ok(records_from_json(&body))
    }

    /// Union of both discovery sources, listing entries first.
    ///
    /// # Errors
    /// Propagates errors from either source.
    pub async fn meetings_for_date(&self, day: NaiveDate) -> Result<Vec<Meeting>, PaddockError> {
        let (listing, updates) = try_join(
            self.meetings_from_listing(day),
            self.meetings_from_updates(day),
        )
        .await?;
        let mut set = MeetingSet::default();
        for m in listing.into_iter().chain(updates) {
            set.insert(m);
        }
        Ok(set.into_vec())
    }

    /// Both discovery results, kept apart for troubleshooting.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a date that is not `YYYY-MM-DD`, and propagates
    /// discovery errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "paddock::debug", skip(self))
    )]
    pub async fn debug_meetings(&self, date: &str) -> Result<DiscoveryReport, PaddockError> {
        let day = super::parse_request_date(date)?;
        let (from_meeting_csv, from_updates) = try_join(
            self.meetings_from_listing(day),
            self.meetings_from_updates(day),
        )
        .await?;
        Ok(DiscoveryReport {
            date: to_ymd(day),
            from_meeting_csv,
            from_updates,
        })
    }
}
