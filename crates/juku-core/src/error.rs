//! Error types surfaced by simulation operations.
//!
//! Every fallible operation on [`Simulation`](crate::campaign::Simulation)
//! returns a [`SimError`]. Player actions (start, open, hire, schedule,
//! load) report failures before any state is mutated. A failed monthly
//! tick may leave the month partly applied.

use std::fmt;

use juku_ledger::LedgerError;
use juku_types::CampusId;

use crate::calendar::CalendarError;

/// Kind of entity a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A campus, either in the catalog or among the player's campuses.
    Campus,
    /// A teacher template in the catalog.
    TeacherTemplate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campus => f.write_str("campus"),
            Self::TeacherTemplate => f.write_str("teacher template"),
        }
    }
}

/// Errors produced by the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The template catalogs are missing, empty, or malformed.
    #[error("configuration error: {reason}")]
    Configuration {
        /// What is wrong with the catalog.
        reason: String,
    },

    /// An id did not resolve.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was being looked up.
        kind: EntityKind,
        /// The id that failed to resolve.
        id: String,
    },

    /// The player cannot afford an opening cost.
    #[error("insufficient funds: need {required} yen, have {available} yen")]
    InsufficientFunds {
        /// Opening cost in yen.
        required: i64,
        /// Current cash in yen.
        available: i64,
    },

    /// An unknown ad plan id was requested.
    #[error("unknown ad plan: {plan_id}")]
    InvalidPlan {
        /// The rejected plan id.
        plan_id: String,
    },

    /// A snapshot could not be decoded or restored.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// Why the snapshot was rejected.
        reason: String,
    },

    /// The operation needs a campaign in progress.
    #[error("no active game")]
    NoActiveGame,

    /// The player already owns this campus.
    #[error("campus already owned: {0}")]
    DuplicateCampus(CampusId),

    /// Financial arithmetic failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The campaign calendar could not advance.
    #[error("calendar error: {source}")]
    Calendar {
        /// The underlying calendar error.
        #[from]
        source: CalendarError,
    },

    /// Reading or writing a file failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding a snapshot as JSON failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl SimError {
    /// Shorthand for a campus lookup failure.
    pub fn campus_not_found(id: &CampusId) -> Self {
        Self::NotFound {
            kind: EntityKind::Campus,
            id: id.to_string(),
        }
    }
}
