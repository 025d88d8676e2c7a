//! Student flow model: monthly inflow, attrition, and noise.
//!
//! ```text
//! base_inflow = round(market * 0.002)
//! ad_effect   = 1 + plan_effect * (1 + station_traffic * 0.005)
//! inflow      = max(0, round(base_inflow * flow_factor(satisfaction) * ad_effect))
//! attrition   = round(students * 0.035)
//! shake       = round(uniform(-1, 1) * 4)
//! next        = clamp_to_intake(max(0, students - attrition + inflow + shake))
//! ```
//!
//! Rounding is half-up throughout.

use rand::Rng;
use tracing::debug;

use crate::model::Campus;
use crate::satisfaction::flow_factor;

const BASE_INFLOW_RATE: f64 = 0.002;
const ATTRITION_RATE: f64 = 0.035;
const STATION_TRAFFIC_AD_RATE: f64 = 0.005;
const RANDOM_SHAKE: f64 = 4.0;

/// What one month of flow did to a campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Enrollment before the month.
    pub previous: u32,
    /// New students.
    pub inflow: u32,
    /// Students who left.
    pub attrition: u32,
    /// Random adjustment in `-4..=4`.
    pub shake: i64,
    /// Enrollment after the month, after the intake ceiling.
    pub next: u32,
}

impl FlowOutcome {
    /// `next - previous`.
    pub fn delta(&self) -> i64 {
        i64::from(self.next).saturating_sub(i64::from(self.previous))
    }
}

/// Apply one month of flow to `campus`, drawing the noise from `rng`.
pub fn apply_monthly_flow<R: Rng + ?Sized>(campus: &mut Campus, rng: &mut R) -> FlowOutcome {
    let roll = rng.random_range(-1.0..=1.0);
    let outcome = project_flow(campus, roll);
    campus.student_count = outcome.next;
    debug!(
        campus = %campus.id(),
        previous = outcome.previous,
        inflow = outcome.inflow,
        attrition = outcome.attrition,
        shake = outcome.shake,
        next = outcome.next,
        "Student flow applied"
    );
    outcome
}

/// Deterministic core of [`apply_monthly_flow`]; `roll` is the noise draw
/// in `[-1, 1]`. The campus is not modified.
pub fn project_flow(campus: &Campus, roll: f64) -> FlowOutcome {
    let profile = &campus.profile;
    let previous = campus.student_count;

    let base_inflow = round_half_up(f64::from(profile.market_students) * BASE_INFLOW_RATE);
    let station_boost = 1.0 + profile.station_traffic * STATION_TRAFFIC_AD_RATE;
    let ad_effect = 1.0 + campus.ad_plan.effect() * station_boost;
    let inflow = to_count(round_half_up(
        base_inflow * flow_factor(campus.satisfaction) * ad_effect,
    ));
    let attrition = to_count(round_half_up(f64::from(previous) * ATTRITION_RATE));
    let shake = to_shake(round_half_up(roll.clamp(-1.0, 1.0) * RANDOM_SHAKE));

    let raw = i64::from(previous)
        .saturating_sub(i64::from(attrition))
        .saturating_add(i64::from(inflow))
        .saturating_add(shake);
    let floored = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);

    FlowOutcome {
        previous,
        inflow,
        attrition,
        shake,
        next: campus.clamp_to_intake(floored),
    }
}

/// Round half up (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Non-negative whole number of students; NaN and negatives become 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    // Saturating float-to-int cast.
    value as u32
}

#[allow(clippy::cast_possible_truncation)]
fn to_shake(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(-RANDOM_SHAKE, RANDOM_SHAKE) as i64
}
