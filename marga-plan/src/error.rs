//! Error types for the marga planner.
//!
//! Startup-time problems (bad tables, bad configuration) are [`ConfigError`]
//! and abort planner construction — there is no degraded mode. Request-level
//! failures are carried by `finder::PlanError` and never abort anything.

use thiserror::Error;

/// Fatal startup error: the planner must not start with an unusable
/// model or primitive table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Parse(String),

    #[error("invalid primitive table magic")]
    BadMagic,

    #[error("unsupported primitive table version {0}")]
    BadVersion(u16),

    #[error("corrupt primitive table: {0}")]
    CorruptRecord(String),

    #[error("primitive table resolution {found} does not match configured {expected}")]
    ResolutionMismatch { expected: f32, found: f32 },

    #[error("primitive table heading count {found} does not match configured {expected}")]
    HeadingCountMismatch { expected: u16, found: u16 },

    #[error("primitive table is for model '{found}', expected '{expected}'")]
    ModelMismatch { expected: String, found: String },

    #[error("unknown vehicle model '{0}'")]
    UnknownModel(String),

    #[error("model '{model}' produced no feasible primitives for heading {heading}")]
    DegenerateTable { model: String, heading: u16 },
}
