//! Paddock-specific data transfer objects, configuration primitives, and the
//! shared error taxonomy.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod reports;

pub use config::{Endpoints, PaddockConfig};
pub use connector::ConnectorKey;
pub use error::PaddockError;
pub use reports::{
    CsvProbe, DiscoveryReport, GearReport, GearRow, Meeting, MeetingGear, ProbeAttempt, RaceGear,
    RunnerGear,
};
