use std::collections::BTreeMap;

use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::record::{CanonicalRecord, Scalar};

/// Ordered alias lists for the logical fields the pipeline reads.
///
/// Order is the tie-break: when several aliases are populated,
/// [`extract_first`] returns the value of the earliest one in the list.
pub mod keys {
    /// Saddle-cloth / TAB number.
    pub const RUNNER_NUMBER: &[&str] = &[
        "runner_number",
        "runnernumber",
        "tab_no",
        "tabno",
        "saddle_number",
        "saddlenumber",
        "saddle_no",
        "cloth_number",
        "cloth",
        "program_number",
        "number",
        "no",
    ];
    /// Horse name.
    pub const HORSE_NAME: &[&str] = &[
        "horse_name",
        "horsename",
        "runnername",
        "runner_name",
        "horse",
        "name",
    ];
    /// Upstream runner id.
    pub const RUNNER_ID: &[&str] = &["runner_id", "runnerid"];
    /// Upstream meeting id.
    pub const MEETING_ID: &[&str] = &["meeting_id", "meetingid"];
    /// Venue columns on the meeting listing.
    pub const LISTING_VENUE: &[&str] = &["venue", "track", "course", "meeting"];
    /// Venue fields on the updates feeds.
    pub const UPDATES_VENUE: &[&str] = &["track", "venue"];
    /// Track name carried by form rows.
    pub const TRACK_NAME: &[&str] = &["track_name", "trackname"];
    /// Current-race gear change.
    ///
    /// Top-level columns only. The historical `Forms[n].GearChanges` columns
    /// canonicalize to `forms_<n>_gearchanges` and never match.
    pub const GEAR_CHANGE: &[&str] = &["gearchanges", "gear_changes"];
    /// Scratching flag.
    pub const SCRATCHED: &[&str] = &["scratched", "is_scratched", "scratch"];
    /// Fallback date field on both updates feeds.
    pub const MEETING_DATE: &[&str] = &["meeting_date"];
    /// Embedded meeting date on scratchings records.
    pub const SCRATCHINGS_DATE: &[&str] =
        &["meeting_date", "meetingdate", "meetingdateutc", "timestamp"];
    /// Embedded meeting date on conditions records.
    pub const CONDITIONS_DATE: &[&str] =
        &["meeting_date", "meetingdate", "last_update", "timestamp"];
}

const TRUTHY: &[&str] = &["1", "true", "y", "yes", "t"];

/// Canonical key: lowercase, every run of non-alphanumeric characters
/// collapsed to one `_`, no leading or trailing `_`.
#[must_use]
pub fn snake_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Re-key fields by [`snake_key`]. Values are untouched.
///
/// Collisions resolve last-write-wins in iteration order: for `RawRecord`s that
/// is upstream column order.
pub fn canonicalize<I, K>(fields: I) -> CanonicalRecord
where
    I: IntoIterator<Item = (K, Scalar)>,
    K: AsRef<str>,
{
    let mut out = BTreeMap::new();
    for (k, v) in fields {
        out.insert(snake_key(k.as_ref()), v);
    }
    CanonicalRecord::from_map(out)
}

/// First populated value among `aliases`, in alias order.
#[must_use]
pub fn extract_first<'a>(record: &'a CanonicalRecord, aliases: &[&str]) -> Option<&'a Scalar> {
    aliases
        .iter()
        .filter_map(|k| record.get(k))
        .find(|v| !v.is_missing())
}

/// Positive integer from the first populated alias.
///
/// Zero is "no value" in this domain (no race, runner, or meeting is numbered 0);
/// negative numbers are rejected alongside it. A populated but unparseable
/// value yields `None` without consulting later aliases.
#[must_use]
pub fn extract_int(record: &CanonicalRecord, aliases: &[&str]) -> Option<i64> {
    let n = match extract_first(record, aliases)? {
        Scalar::Int(n) => *n,
        Scalar::Str(s) => s.trim().parse::<i64>().ok()?,
        Scalar::Bool(_) | Scalar::Null => return None,
    };
    (n > 0).then_some(n)
}

/// Trimmed, non-empty text from the first populated alias.
#[must_use]
pub fn extract_str(record: &CanonicalRecord, aliases: &[&str]) -> Option<String> {
    let s = extract_first(record, aliases)?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Boolean flag from the first populated alias; absent means `false`.
#[must_use]
pub fn extract_bool(record: &CanonicalRecord, aliases: &[&str]) -> bool {
    match extract_first(record, aliases) {
        Some(Scalar::Bool(b)) => *b,
        Some(Scalar::Int(n)) => *n == 1,
        Some(Scalar::Str(s)) => {
            let t = s.trim().to_ascii_lowercase();
            TRUTHY.contains(&t.as_str())
        }
        Some(Scalar::Null) | None => false,
    }
}

/// First alias whose value parses as a date (see [`crate::date::parse_day`]).
#[must_use]
pub fn extract_day(record: &CanonicalRecord, aliases: &[&str]) -> Option<NaiveDate> {
    aliases
        .iter()
        .filter_map(|k| record.get(k)?.as_str())
        .find_map(crate::date::parse_day)
}

/// Fold a horse name for fuzzy comparison: diacritics stripped, lowercase,
/// punctuation to spaces, whitespace collapsed.
#[must_use]
pub fn normalize_name(name: &str) -> Option<String> {
    let folded: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let out = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!out.is_empty()).then_some(out)
}

/// Runner (saddle-cloth) number.
#[must_use]
pub fn runner_number(record: &CanonicalRecord) -> Option<u32> {
    extract_int(record, keys::RUNNER_NUMBER).and_then(|n| u32::try_from(n).ok())
}

/// Horse name.
#[must_use]
pub fn horse_name(record: &CanonicalRecord) -> Option<String> {
    extract_str(record, keys::HORSE_NAME)
}

/// Upstream runner id.
#[must_use]
pub fn runner_id(record: &CanonicalRecord) -> Option<u64> {
    extract_int(record, keys::RUNNER_ID).and_then(|n| u64::try_from(n).ok())
}

/// Upstream meeting id.
#[must_use]
pub fn meeting_id(record: &CanonicalRecord) -> Option<u64> {
    extract_int(record, keys::MEETING_ID).and_then(|n| u64::try_from(n).ok())
}

/// Track name printed on a form row.
#[must_use]
pub fn track_name(record: &CanonicalRecord) -> Option<String> {
    extract_str(record, keys::TRACK_NAME)
}

/// Current-race gear change text, trimmed.
#[must_use]
pub fn gear_change(record: &CanonicalRecord) -> Option<String> {
    extract_str(record, keys::GEAR_CHANGE)
}

/// Whether the runner has been scratched.
#[must_use]
pub fn is_scratched(record: &CanonicalRecord) -> bool {
    extract_bool(record, keys::SCRATCHED)
}
