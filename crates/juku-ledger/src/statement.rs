//! Per-campus monthly statement.
//!
//! Revenue is billed on the enrollment at the *start* of the month, before
//! student flow runs. Cost lines:
//!
//! | Line | Rule |
//! |------|------|
//! | salary | sum of every teacher's base salary |
//! | rent | `round(rent_level * 10_000)` |
//! | ad | flat cost of the active plan |
//! | royalty | flat per-campus fee |
//! | misc | `round(revenue * 3%)` |
//!
//! `profit = revenue - (rent + salary + ad + royalty + misc)`.

use juku_types::{CampusFinancials, Teacher};

use crate::LedgerError;

/// Yen per unit of catalog rent level.
const RENT_UNIT_YEN: f64 = 10_000.0;

/// Miscellaneous expense rate, in percent of revenue.
const MISC_EXPENSE_PERCENT: i64 = 3;

/// Inputs for one campus statement. Cost lines that depend on catalog data
/// or the ad plan are resolved by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementInput {
    /// Enrollment at the start of the month.
    pub students_before: u32,
    /// Monthly tuition per student.
    pub tuition_per_student: i64,
    /// Sum of teacher salaries (see [`salary_total`]).
    pub salary_cost: i64,
    /// Rent (see [`rent_cost`]).
    pub rent_cost: i64,
    /// Active ad plan cost.
    pub ad_cost: i64,
    /// Franchise royalty.
    pub royalty_cost: i64,
}

/// Compute one campus's statement for the month.
///
/// # Errors
///
/// Returns [`LedgerError::NegativeInput`] for a negative tuition, or
/// [`LedgerError::Overflow`] if any line overflows `i64`.
pub fn campus_statement(input: &StatementInput) -> Result<CampusFinancials, LedgerError> {
    if input.tuition_per_student < 0 {
        return Err(LedgerError::NegativeInput {
            field: "tuition_per_student",
            value: input.tuition_per_student,
        });
    }

    let revenue = i64::from(input.students_before)
        .checked_mul(input.tuition_per_student)
        .ok_or(LedgerError::Overflow { context: "revenue" })?;
    let misc = misc_cost(revenue)?;

    let total_cost = [
        input.rent_cost,
        input.salary_cost,
        input.ad_cost,
        input.royalty_cost,
        misc,
    ]
    .into_iter()
    .try_fold(0_i64, i64::checked_add)
    .ok_or(LedgerError::Overflow { context: "total cost" })?;

    let profit = revenue
        .checked_sub(total_cost)
        .ok_or(LedgerError::Overflow { context: "profit" })?;

    Ok(CampusFinancials {
        revenue,
        salary_cost: input.salary_cost,
        rent_cost: input.rent_cost,
        ad_cost: input.ad_cost,
        royalty_cost: input.royalty_cost,
        misc_cost: misc,
        profit,
    })
}

/// Sum of base salaries across `teachers`.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the sum overflows `i64`.
pub fn salary_total(teachers: &[Teacher]) -> Result<i64, LedgerError> {
    teachers
        .iter()
        .try_fold(0_i64, |sum, teacher| sum.checked_add(teacher.base_salary))
        .ok_or(LedgerError::Overflow { context: "salary total" })
}

/// Monthly rent in yen for a catalog rent level.
///
/// Non-finite or negative levels are treated as zero rent.
#[allow(clippy::cast_possible_truncation)]
pub fn rent_cost(rent_level: f64) -> i64 {
    let yen = (rent_level * RENT_UNIT_YEN).round();
    if !yen.is_finite() || yen <= 0.0 {
        return 0;
    }
    // Saturating float-to-int cast; catalog rents are far below i64::MAX.
    yen as i64
}

/// Miscellaneous expenses: 3% of revenue rounded half up.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the intermediate product overflows.
pub fn misc_cost(revenue: i64) -> Result<i64, LedgerError> {
    revenue
        .checked_mul(MISC_EXPENSE_PERCENT)
        .and_then(|scaled| scaled.checked_add(50))
        .and_then(|scaled| scaled.checked_div_euclid(100))
        .ok_or(LedgerError::Overflow { context: "misc cost" })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use juku_types::{Rank, TeacherId};

    use super::*;

    fn teacher(salary: i64) -> Teacher {
        Teacher {
            id: TeacherId::from("t"),
            template_id: None,
            name: String::from("講師"),
            rank: Rank::Mid,
            base_salary: salary,
            satisfaction_impact: 0.0,
            gender: None,
            specialty: None,
            personality: None,
        }
    }

    #[test]
    fn statement_matches_hand_computation() {
        let statement = campus_statement(&StatementInput {
            students_before: 100,
            tuition_per_student: 30_000,
            salary_cost: 400_000,
            rent_cost: 355_000,
            ad_cost: 200_000,
            royalty_cost: 200_000,
        })
        .unwrap();

        assert_eq!(statement.revenue, 3_000_000);
        assert_eq!(statement.misc_cost, 90_000);
        // 3,000,000 - (355,000 + 400,000 + 200,000 + 200,000 + 90,000)
        assert_eq!(statement.profit, 1_755_000);
    }

    #[test]
    fn empty_campus_still_pays_fixed_costs() {
        let statement = campus_statement(&StatementInput {
            students_before: 0,
            tuition_per_student: 30_000,
            salary_cost: 0,
            rent_cost: 100_000,
            ad_cost: 0,
            royalty_cost: 200_000,
        })
        .unwrap();
        assert_eq!(statement.revenue, 0);
        assert_eq!(statement.misc_cost, 0);
        assert_eq!(statement.profit, -300_000);
    }

    #[test]
    fn negative_tuition_is_rejected() {
        let result = campus_statement(&StatementInput {
            students_before: 10,
            tuition_per_student: -1,
            salary_cost: 0,
            rent_cost: 0,
            ad_cost: 0,
            royalty_cost: 0,
        });
        assert!(matches!(result, Err(LedgerError::NegativeInput { .. })));
    }

    #[test]
    fn revenue_overflow_is_an_error() {
        let result = campus_statement(&StatementInput {
            students_before: u32::MAX,
            tuition_per_student: i64::MAX,
            salary_cost: 0,
            rent_cost: 0,
            ad_cost: 0,
            royalty_cost: 0,
        });
        assert!(matches!(result, Err(LedgerError::Overflow { .. })));
    }

    #[test]
    fn misc_cost_rounds_half_up() {
        // 3% of 50 = 1.5 -> 2
        assert_eq!(misc_cost(50).unwrap(), 2);
        // 3% of 49 = 1.47 -> 1
        assert_eq!(misc_cost(49).unwrap(), 1);
        assert_eq!(misc_cost(0).unwrap(), 0);
    }

    #[test]
    fn rent_cost_scales_and_rounds() {
        assert_eq!(rent_cost(35.5), 355_000);
        assert_eq!(rent_cost(12.34567), 123_457);
        assert_eq!(rent_cost(-3.0), 0);
        assert_eq!(rent_cost(f64::NAN), 0);
    }

    #[test]
    fn salary_total_sums_every_teacher() {
        let teachers = vec![teacher(300_000), teacher(450_000), teacher(250_000)];
        assert_eq!(salary_total(&teachers).unwrap(), 1_000_000);
        assert_eq!(salary_total(&[]).unwrap(), 0);
    }
}
