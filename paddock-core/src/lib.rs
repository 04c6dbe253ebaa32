//! paddock-core
//!
//! Record model, field normalization, and connector contracts shared across
//! the paddock workspace.
//!
//! - `record`: the raw/canonical record model and its scalar values.
//! - `normalize`: key canonicalization and typed, alias-driven extraction.
//! - `date`: tolerant date parsing for the shapes the upstream emits.
//! - `codec`: CSV and JSON body decoding into raw records.
//! - `connector`: the `FeedConnector` trait implemented by upstream clients.
#![warn(missing_docs)]

/// CSV/JSON response decoding.
pub mod codec;
/// The `FeedConnector` trait and request parameter types.
pub mod connector;
/// Date normalization helpers.
pub mod date;
/// Field normalizer: canonical keys and typed extractors.
pub mod normalize;
/// Raw and canonical record types.
pub mod record;

pub use codec::{CsvTable, parse_csv, records_from_json, strip_preamble, unwrap_envelope};
pub use connector::{FeedConnector, Params};
pub use date::{normalize_date, parse_day, to_dmy, to_ymd};
pub use normalize::{
    canonicalize, extract_bool, extract_day, extract_first, extract_int, extract_str, keys,
    normalize_name, snake_key,
};
pub use record::{CanonicalRecord, RawRecord, Scalar};

pub use paddock_types::{
    ConnectorKey, CsvProbe, DiscoveryReport, Endpoints, GearReport, GearRow, Meeting,
    MeetingGear, PaddockConfig, PaddockError, ProbeAttempt, RaceGear, RunnerGear,
};
