//! The month ledger: aggregate revenue and cost across every campus.
//!
//! A [`MonthLedger`] is created at the start of a tick, receives one
//! [`CampusFinancials`] statement per campus, and is then turned into the
//! aggregate totals of the month summary and a [`RevenueRecord`] for the
//! player's history.
//!
//! # Design
//!
//! - **Append-only**: statements are added, never edited.
//! - **Checked**: every accumulation uses checked arithmetic.
//! - **Balanced**: profit recorded per campus must equal revenue minus cost
//!   in aggregate; [`MonthLedger::verify_balance`] checks this.

use juku_types::{CampusFinancials, CostBreakdown, RevenueRecord};
use tracing::warn;

use crate::{LedgerAnomaly, LedgerError};

/// The result of a balance check for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceResult {
    /// Profit equals revenue minus cost.
    Balanced,
    /// The accumulated profit disagrees with revenue minus cost.
    Anomaly(LedgerAnomaly),
}

/// Aggregate ledger for one simulated month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLedger {
    /// Campaign year being recorded.
    year: u32,
    /// Calendar month being recorded.
    month: u32,
    /// Number of statements recorded.
    statements: usize,
    /// Total revenue.
    revenue: i64,
    /// Total profit as reported by the statements.
    profit: i64,
    /// Cost totals by category.
    breakdown: CostBreakdown,
}

impl MonthLedger {
    /// Create an empty ledger for the given month.
    pub const fn new(year: u32, month: u32) -> Self {
        Self {
            year,
            month,
            statements: 0,
            revenue: 0,
            profit: 0,
            breakdown: CostBreakdown {
                rent_cost: 0,
                salary_cost: 0,
                ad_cost: 0,
                royalty_cost: 0,
                misc_cost: 0,
            },
        }
    }

    /// Add one campus statement to the aggregate.
    ///
    /// The ledger is left untouched if any accumulation overflows.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if a running total overflows.
    pub fn record(&mut self, statement: &CampusFinancials) -> Result<(), LedgerError> {
        let add = |total: i64, line: i64, context: &'static str| {
            total.checked_add(line).ok_or(LedgerError::Overflow { context })
        };

        let next = Self {
            year: self.year,
            month: self.month,
            statements: self.statements.saturating_add(1),
            revenue: add(self.revenue, statement.revenue, "aggregate revenue")?,
            profit: add(self.profit, statement.profit, "aggregate profit")?,
            breakdown: CostBreakdown {
                rent_cost: add(self.breakdown.rent_cost, statement.rent_cost, "aggregate rent")?,
                salary_cost: add(
                    self.breakdown.salary_cost,
                    statement.salary_cost,
                    "aggregate salary",
                )?,
                ad_cost: add(self.breakdown.ad_cost, statement.ad_cost, "aggregate ad")?,
                royalty_cost: add(
                    self.breakdown.royalty_cost,
                    statement.royalty_cost,
                    "aggregate royalty",
                )?,
                misc_cost: add(self.breakdown.misc_cost, statement.misc_cost, "aggregate misc")?,
            },
        };
        *self = next;
        Ok(())
    }

    /// Number of statements recorded so far.
    pub const fn len(&self) -> usize {
        self.statements
    }

    /// Whether no statement has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.statements == 0
    }

    /// Aggregate revenue.
    pub const fn revenue(&self) -> i64 {
        self.revenue
    }

    /// Aggregate cost by category.
    pub const fn breakdown(&self) -> CostBreakdown {
        self.breakdown
    }

    /// Aggregate cost across every category.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum overflows.
    pub fn total_cost(&self) -> Result<i64, LedgerError> {
        let b = &self.breakdown;
        [b.rent_cost, b.salary_cost, b.ad_cost, b.royalty_cost, b.misc_cost]
            .into_iter()
            .try_fold(0_i64, i64::checked_add)
            .ok_or(LedgerError::Overflow { context: "aggregate cost" })
    }

    /// Aggregate profit, computed as revenue minus total cost.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the subtraction overflows.
    pub fn total_profit(&self) -> Result<i64, LedgerError> {
        self.revenue
            .checked_sub(self.total_cost()?)
            .ok_or(LedgerError::Overflow { context: "aggregate profit" })
    }

    /// Build the history record for this month.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the totals overflow.
    pub fn to_revenue_record(&self) -> Result<RevenueRecord, LedgerError> {
        Ok(RevenueRecord {
            year: self.year,
            month: self.month,
            revenue: self.revenue,
            cost: self.total_cost()?,
            profit: self.total_profit()?,
        })
    }

    /// Check that the profit reported by the statements equals aggregate
    /// revenue minus aggregate cost.
    pub fn verify_balance(&self) -> BalanceResult {
        let expected = match self.total_profit() {
            Ok(profit) => profit,
            Err(err) => {
                return BalanceResult::Anomaly(self.anomaly(
                    self.profit,
                    format!("cannot verify {}/{}: {err}", self.year, self.month),
                ));
            }
        };

        if expected == self.profit {
            return BalanceResult::Balanced;
        }

        let anomaly = self.anomaly(
            expected,
            format!(
                "ledger imbalance in {}/{}: revenue - cost = {expected}, statements report {}",
                self.year, self.month, self.profit
            ),
        );
        warn!(
            year = self.year,
            month = self.month,
            expected,
            recorded = self.profit,
            "Ledger imbalance detected"
        );
        BalanceResult::Anomaly(anomaly)
    }

    fn anomaly(&self, expected_profit: i64, message: String) -> LedgerAnomaly {
        LedgerAnomaly {
            year: self.year,
            month: self.month,
            expected_profit,
            recorded_profit: self.profit,
            message,
        }
    }
}
