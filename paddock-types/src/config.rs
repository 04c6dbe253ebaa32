//! Configuration types shared across the orchestrator and connectors.

use serde::{Deserialize, Serialize};

/// Upstream endpoint URLs consumed by the pipeline.
///
/// Defaults point at the Punting Form v2 API. Tests substitute a local mock
/// server or a scripted connector keyed by these URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Per-race form listing (CSV).
    pub form_csv: String,
    /// Meeting listing for a date (CSV).
    pub meeting_csv: String,
    /// Provider-wide scratchings feed (JSON).
    pub scratchings: String,
    /// Provider-wide track conditions feed (JSON).
    pub conditions: String,
}

impl Endpoints {
    /// Default upstream host.
    pub const PF_BASE: &'static str = "https://api.puntingform.com.au/v2";

    /// Build the endpoint set relative to `base` (no trailing slash).
    ///
    /// Useful when pointing the pipeline at a mock HTTP server.
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            form_csv: format!("{base}/form/form/csv"),
            meeting_csv: format!("{base}/form/meeting/csv"),
            scratchings: format!("{base}/Updates/Scratchings"),
            conditions: format!("{base}/Updates/Conditions"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base(Self::PF_BASE)
    }
}

/// Global configuration for the `Paddock` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddockConfig {
    /// Upstream endpoints.
    pub endpoints: Endpoints,
    /// Highest race number probed per meeting.
    pub max_races: u32,
    /// Consecutive empty races that end the per-meeting loop.
    pub empty_race_streak: u32,
    /// Meetings extracted concurrently. `1` keeps extraction fully sequential.
    ///
    /// Output order is discovery order regardless of this value.
    pub meeting_concurrency: usize,
}

impl PaddockConfig {
    /// Default race upper bound per meeting.
    pub const DEFAULT_MAX_RACES: u32 = 15;
    /// Default number of consecutive empty races that stops extraction.
    pub const DEFAULT_EMPTY_RACE_STREAK: u32 = 2;
}

impl Default for PaddockConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            max_races: Self::DEFAULT_MAX_RACES,
            empty_race_streak: Self::DEFAULT_EMPTY_RACE_STREAK,
            meeting_concurrency: 1,
        }
    }
}
