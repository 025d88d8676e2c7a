//! Month summary payload returned to the presentation layer after each tick.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::CampusId;

/// Cost totals by category for one month, in yen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CostBreakdown {
    /// Rent.
    #[ts(type = "number")]
    pub rent_cost: i64,
    /// Teacher salaries.
    #[ts(type = "number")]
    pub salary_cost: i64,
    /// Advertising.
    #[ts(type = "number")]
    pub ad_cost: i64,
    /// Franchise royalties.
    #[ts(type = "number")]
    pub royalty_cost: i64,
    /// Miscellaneous expenses.
    #[ts(type = "number")]
    pub misc_cost: i64,
}

/// Per-campus slice of a [`MonthSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CampusMonthSummary {
    /// Campus id.
    pub id: CampusId,
    /// Campus display name.
    pub name: String,
    /// Tuition revenue.
    #[ts(type = "number")]
    pub revenue: i64,
    /// Rent.
    #[ts(type = "number")]
    pub rent_cost: i64,
    /// Salaries.
    #[ts(type = "number")]
    pub salary_cost: i64,
    /// Advertising.
    #[ts(type = "number")]
    pub ad_cost: i64,
    /// Royalty.
    #[ts(type = "number")]
    pub royalty_cost: i64,
    /// Miscellaneous.
    #[ts(type = "number")]
    pub misc_cost: i64,
    /// Sum of every cost line.
    #[ts(type = "number")]
    pub cost: i64,
    /// Revenue minus cost.
    #[ts(type = "number")]
    pub profit: i64,
    /// Enrollment after the tick.
    pub student_count: u32,
    /// Enrollment change over the tick.
    pub student_delta: i64,
    /// Satisfaction after the tick.
    pub satisfaction: f64,
    /// Satisfaction change over the tick.
    pub satisfaction_delta: f64,
    /// Label of the ad plan that ran this month.
    pub ad_plan_label: String,
    /// Intake ceiling, if any.
    pub intake_capacity: Option<u32>,
}

/// Everything that happened in one simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MonthSummary {
    /// Year of the month that was simulated.
    pub year: u32,
    /// Month that was simulated (1-12).
    pub month: u32,
    /// Aggregate revenue.
    #[ts(type = "number")]
    pub total_revenue: i64,
    /// Aggregate cost.
    #[ts(type = "number")]
    pub total_cost: i64,
    /// Aggregate profit.
    #[ts(type = "number")]
    pub total_profit: i64,
    /// Cash before the month.
    #[ts(type = "number")]
    pub funds_before: i64,
    /// Cash after the month.
    #[ts(type = "number")]
    pub funds_after: i64,
    /// Aggregate cost by category.
    pub breakdown: CostBreakdown,
    /// Total enrollment before the month.
    pub students_before: u32,
    /// Total enrollment after the month.
    pub students_after: u32,
    /// `students_after - students_before`.
    pub student_delta: i64,
    /// Mean satisfaction before the month (0 with no campuses).
    pub avg_satisfaction_before: f64,
    /// Mean satisfaction after the month (0 with no campuses).
    pub avg_satisfaction_after: f64,
    /// `avg_satisfaction_after - avg_satisfaction_before`.
    pub avg_satisfaction_delta: f64,
    /// Per-campus breakdown in ownership order.
    pub campuses: Vec<CampusMonthSummary>,
    /// Set when this month completed the campaign.
    pub is_campaign_end: bool,
}

/// A campus whose enrollment has outgrown its teaching staff.
///
/// Drives the "must hire now" prompt in the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TeacherShortage {
    /// Campus id.
    pub campus_id: CampusId,
    /// Campus display name.
    pub campus_name: String,
    /// Teachers missing to seat every student.
    pub deficit: u32,
}
