//! Shared plumbing for the runnable demos under `examples/`.
#![warn(missing_docs)]

/// Connector selection and date defaults.
pub mod common;
