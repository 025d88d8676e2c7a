//! Ad plan scheduling.
//!
//! A plan change always takes effect one month late: scheduling stores a
//! pending plan on the campus, and the next tick swaps it in before flow
//! and financials are computed.

use juku_types::AdPlan;
use serde::Serialize;

use crate::error::SimError;
use crate::model::Campus;

/// Active and pending plan of a campus after a scheduling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSchedule {
    /// Plan running this month.
    pub active_plan: AdPlan,
    /// Plan that takes over next month, if any.
    pub next_plan: Option<AdPlan>,
}

/// Resolve a requested plan id. Absent or blank means no advertising.
///
/// # Errors
///
/// Returns [`SimError::InvalidPlan`] for an unknown id.
pub fn resolve_plan(plan_id: Option<&str>) -> Result<AdPlan, SimError> {
    match plan_id.map(str::trim) {
        None | Some("") => Ok(AdPlan::NoAdvertising),
        Some(id) => AdPlan::from_id(id).ok_or_else(|| SimError::InvalidPlan {
            plan_id: id.to_owned(),
        }),
    }
}

/// Schedule `plan` for next month. Requesting the plan that is already
/// active cancels any pending change.
pub fn schedule_plan(campus: &mut Campus, plan: AdPlan) -> PlanSchedule {
    campus.next_ad_plan = (plan != campus.ad_plan).then_some(plan);
    PlanSchedule {
        active_plan: campus.ad_plan,
        next_plan: campus.next_ad_plan,
    }
}

/// Swap a pending plan in. Returns the newly active plan when one was
/// pending.
pub const fn apply_pending_plan(campus: &mut Campus) -> Option<AdPlan> {
    match campus.next_ad_plan.take() {
        Some(plan) => {
            campus.ad_plan = plan;
            Some(plan)
        }
        None => None,
    }
}
