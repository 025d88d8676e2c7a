//! Satisfaction model.
//!
//! Satisfaction lives on `-100..=100` with 0 as neutral. Each month it moves
//! by the sum of four components:
//!
//! | Component | Rule |
//! |-----------|------|
//! | teachers | sum of every teacher's satisfaction impact |
//! | crowding | `-5 * (load - 1)` when students exceed seats |
//! | noise | uniform in `[-2, 2]` |
//! | growth | `clamp(delta * 0.1, -4, 4)` |
//!
//! Positive components are damped once satisfaction climbs past 20, so a
//! well-run campus plateaus instead of pinning at the ceiling. Negative
//! components always apply in full.

use rand::Rng;
use tracing::debug;

use crate::model::Campus;

/// Lowest satisfaction.
pub const SATISFACTION_MIN: f64 = -100.0;

/// Highest satisfaction.
pub const SATISFACTION_MAX: f64 = 100.0;

/// Satisfaction of a freshly opened campus.
pub const SATISFACTION_NEUTRAL: f64 = 0.0;

const RANDOM_SHAKE_RANGE: f64 = 2.0;
const CROWDING_PENALTY_RATE: f64 = 5.0;
const GROWTH_FACTOR: f64 = 0.1;
const GROWTH_MAX: f64 = 4.0;
const DAMP_THRESHOLD: f64 = 20.0;
const DAMP_DECAY: f64 = 18.0;
const DAMP_FLOOR: f64 = 0.05;
const MIN_FLOW_FACTOR: f64 = 0.3;
const MAX_FLOW_FACTOR: f64 = 1.7;

/// Every term of one satisfaction update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatisfactionUpdate {
    /// Sum of teacher impacts.
    pub teacher_bonus: f64,
    /// Crowding penalty, zero or negative.
    pub load_penalty: f64,
    /// Random noise.
    pub random_shake: f64,
    /// Enrollment growth adjustment.
    pub growth_bonus: f64,
    /// Multiplier applied to the positive terms.
    pub damping: f64,
    /// Resulting satisfaction.
    pub next: f64,
}

/// Compute next month's satisfaction for `campus`, drawing the noise term
/// from `rng`. The campus is not modified.
pub fn next_satisfaction<R: Rng + ?Sized>(campus: &Campus, student_delta: i64, rng: &mut R) -> f64 {
    let roll = rng.random_range(-1.0..=1.0);
    let update = project_satisfaction(campus, student_delta, roll);
    debug!(
        campus = %campus.id(),
        teacher_bonus = update.teacher_bonus,
        load_penalty = update.load_penalty,
        growth_bonus = update.growth_bonus,
        damping = update.damping,
        next = update.next,
        "Satisfaction updated"
    );
    update.next
}

/// Deterministic core of [`next_satisfaction`]; `roll` is the noise draw
/// in `[-1, 1]`.
pub fn project_satisfaction(campus: &Campus, student_delta: i64, roll: f64) -> SatisfactionUpdate {
    let teacher_bonus: f64 = campus.teachers.iter().map(|t| t.satisfaction_impact).sum();

    let capacity = campus.total_capacity();
    let load_factor = if capacity == 0 {
        1.0
    } else {
        f64::from(campus.student_count) / f64::from(capacity)
    };
    let load_penalty = if load_factor > 1.0 {
        -CROWDING_PENALTY_RATE * (load_factor - 1.0)
    } else {
        0.0
    };

    let random_shake = roll.clamp(-1.0, 1.0) * RANDOM_SHAKE_RANGE;
    let growth_bonus = growth_adjustment(student_delta);

    let (positive, negative) = [teacher_bonus, load_penalty, random_shake, growth_bonus]
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(pos, neg), value| {
            if value > 0.0 {
                (pos + value, neg)
            } else {
                (pos, neg + value)
            }
        });

    let damping = growth_damping(campus.satisfaction);
    let next = clamp_satisfaction(campus.satisfaction + positive * damping + negative);

    SatisfactionUpdate {
        teacher_bonus,
        load_penalty,
        random_shake,
        growth_bonus,
        damping,
        next,
    }
}

/// Multiplier satisfaction applies to monthly inflow, in `[0.3, 1.7]`.
pub fn flow_factor(satisfaction: f64) -> f64 {
    let factor = 1.0 + satisfaction / 100.0;
    if factor.is_nan() {
        return 1.0;
    }
    factor.clamp(MIN_FLOW_FACTOR, MAX_FLOW_FACTOR)
}

/// Satisfaction change caused by an enrollment change of `student_delta`.
pub fn growth_adjustment(student_delta: i64) -> f64 {
    if student_delta == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let delta = student_delta as f64;
    (delta * GROWTH_FACTOR).clamp(-GROWTH_MAX, GROWTH_MAX)
}

/// Multiplier on positive satisfaction gains at the current level.
///
/// 1 up to 20, then `exp(-(s - 20) / 18)`, floored at 0.05. A non-finite
/// input yields 1.
pub fn growth_damping(satisfaction: f64) -> f64 {
    if !satisfaction.is_finite() {
        return 1.0;
    }
    let above = (satisfaction - DAMP_THRESHOLD).max(0.0);
    (-above / DAMP_DECAY).exp().clamp(DAMP_FLOOR, 1.0)
}

/// Clamp to `[-100, 100]`; NaN becomes neutral.
pub fn clamp_satisfaction(value: f64) -> f64 {
    if value.is_nan() {
        return SATISFACTION_NEUTRAL;
    }
    value.clamp(SATISFACTION_MIN, SATISFACTION_MAX)
}
