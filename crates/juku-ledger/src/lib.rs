//! Monthly campus statements and aggregate ledger for the Juku franchise
//! simulation.
//!
//! Every yen that moves during a tick is accounted for here. Each campus
//! produces one [`CampusFinancials`] statement per month, and the
//! [`MonthLedger`] sums those statements into the aggregate totals that are
//! appended to the player's revenue history.
//!
//! # Architecture
//!
//! - [`statement`] -- Per-campus revenue and cost lines for one month.
//! - [`ledger`] -- The [`MonthLedger`] accumulator and its balance check.
//!
//! # Balance Law
//!
//! For every month:
//!
//! ```text
//! total_profit == total_revenue - (rent + salary + ad + royalty + misc)
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]. All arithmetic is checked; the
//! ledger never panics, it returns errors.
//!
//! # Usage
//!
//! ```
//! use juku_ledger::{MonthLedger, StatementInput, campus_statement};
//! use juku_ledger::ledger::BalanceResult;
//!
//! let statement = campus_statement(&StatementInput {
//!     students_before: 100,
//!     tuition_per_student: 30_000,
//!     salary_cost: 400_000,
//!     rent_cost: 350_000,
//!     ad_cost: 0,
//!     royalty_cost: 200_000,
//! })
//! .ok();
//!
//! let mut ledger = MonthLedger::new(1, 4);
//! if let Some(statement) = statement {
//!     ledger.record(&statement).ok();
//! }
//! assert_eq!(ledger.verify_balance(), BalanceResult::Balanced);
//! ```
//!
//! [`CampusFinancials`]: juku_types::CampusFinancials

pub mod ledger;
pub mod statement;

// Re-export primary types at crate root.
pub use ledger::{BalanceResult, MonthLedger};
pub use statement::{StatementInput, campus_statement, misc_cost, rent_cost, salary_total};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while computing statements or aggregating them.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A checked arithmetic operation overflowed.
    #[error("ledger arithmetic overflow: {context}")]
    Overflow {
        /// Which quantity was being computed.
        context: &'static str,
    },

    /// An input that must not be negative was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeInput {
        /// Which input field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A balance-law violation detected when verifying a month's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// Campaign year of the month.
    pub year: u32,
    /// Calendar month.
    pub month: u32,
    /// Profit implied by `revenue - cost`.
    pub expected_profit: i64,
    /// Profit accumulated from the individual statements.
    pub recorded_profit: i64,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
