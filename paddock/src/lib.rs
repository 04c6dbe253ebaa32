//! Paddock aggregates horse-racing gear changes for a calendar date.
//!
//! Overview
//! - Discovers the day's meetings from two unreliable sources: the meeting
//!   listing (queried under several parameter spellings) and the provider-wide
//!   scratchings/conditions feeds filtered to the date.
//! - Extracts current-race gear changes per meeting by querying the form
//!   endpoint one race at a time, stopping after a run of empty races.
//! - Assembles a `date -> meeting -> race -> runner` report with deterministic
//!   ordering, whatever order the upstream answers in.
//!
//! The orchestrator is connector-agnostic: anything implementing
//! [`paddock_core::FeedConnector`] can be registered. The production connector
//! lives in `paddock-pf`; `paddock-mock` provides scripted and fixture
//! connectors.
//!
//! Absence is not an error. A day without meetings yields an empty report and
//! a meeting without races yields an empty race list. Only missing
//! credentials, exhausted JSON feeds, and invalid input reach the caller.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use paddock::Paddock;
//! use paddock_pf::PfConnector;
//!
//! let paddock = Paddock::builder()
//!     .with_connector(Arc::new(PfConnector::from_env()?))
//!     .meeting_concurrency(4)
//!     .build()?;
//!
//! let report = paddock.fetch_gear_for_date("2025-06-01").await?;
//! for meeting in &report.meetings {
//!     println!("{:?}: {} races with gear changes", meeting.meeting, meeting.races.len());
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod pipeline;

pub use core::{Paddock, PaddockBuilder};

// Re-export the report and configuration types for convenience
pub use paddock_core::{
    CsvProbe, DiscoveryReport, Endpoints, FeedConnector, GearReport, GearRow, Meeting, MeetingGear,
    PaddockConfig, PaddockError, ProbeAttempt, RaceGear, RunnerGear,
};
