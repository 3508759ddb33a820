//! Health self-assessment scoring and rule-based recommendation engine.
//!
//! The [`assessment`] module owns the domain: question catalog, score aggregation,
//! level classification, catalog matching, and the orchestrating service. The
//! remaining modules carry the configuration, error, and telemetry plumbing shared
//! with the HTTP host in `services/api`.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
