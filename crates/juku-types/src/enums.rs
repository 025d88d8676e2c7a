//! Enumeration types for the Juku franchise simulation.
//!
//! String ids (`"listing"`, `"senior"`, `"B"`) are the wire format used by
//! catalogs and save data. Inside the engine they resolve to these variants
//! through the static lookups defined here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Teacher rank
// ---------------------------------------------------------------------------

/// Seniority of a teacher. Presentation-only: salary and satisfaction
/// impact are carried explicitly on each teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Rank {
    /// Veteran lecturer.
    Senior,
    /// Mid-career lecturer.
    Mid,
    /// Newly hired lecturer.
    Junior,
}

// ---------------------------------------------------------------------------
// Advertising plans
// ---------------------------------------------------------------------------

/// One of the four fixed advertising options a campus can run.
///
/// Each plan trades a flat monthly cost for a proportional boost to
/// enrollment inflow. Plans are immutable and referenced by [`AdPlan::id`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum AdPlan {
    /// No advertising.
    #[default]
    #[serde(rename = "none")]
    NoAdvertising,
    /// Neighbourhood flyer posting.
    #[serde(rename = "flyer")]
    Flyer,
    /// Search listing ads.
    #[serde(rename = "listing")]
    Listing,
    /// Train-carriage hanging posters.
    #[serde(rename = "poster")]
    Poster,
}

impl AdPlan {
    /// Every plan in catalog order.
    pub const ALL: [Self; 4] = [Self::NoAdvertising, Self::Flyer, Self::Listing, Self::Poster];

    /// Wire id of the plan.
    pub const fn id(self) -> &'static str {
        match self {
            Self::NoAdvertising => "none",
            Self::Flyer => "flyer",
            Self::Listing => "listing",
            Self::Poster => "poster",
        }
    }

    /// Display label shown to players.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoAdvertising => "広告なし",
            Self::Flyer => "ポスティング",
            Self::Listing => "リスティング広告",
            Self::Poster => "中吊り広告",
        }
    }

    /// Short description shown next to the label.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoAdvertising => "広告費は発生しません。",
            Self::Flyer => "地域密着型のチラシ配布。",
            Self::Listing => "検索連動型広告で効率的に集客。",
            Self::Poster => "鉄道中吊りで広域訴求。",
        }
    }

    /// Flat monthly cost in yen.
    pub const fn monthly_cost(self) -> i64 {
        match self {
            Self::NoAdvertising => 0,
            Self::Flyer => 50_000,
            Self::Listing => 200_000,
            Self::Poster => 500_000,
        }
    }

    /// Inflow boost coefficient, scaled by station traffic.
    pub const fn effect(self) -> f64 {
        match self {
            Self::NoAdvertising => 0.0,
            Self::Flyer => 0.05,
            Self::Listing => 0.12,
            Self::Poster => 0.25,
        }
    }

    /// Resolve a wire id to a plan. Returns `None` for unknown ids.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.id() == id)
    }
}

// ---------------------------------------------------------------------------
// Campaign phase
// ---------------------------------------------------------------------------

/// Lifecycle of a campaign.
///
/// `NotStarted -> Active -> Complete`. The last transition is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CampaignPhase {
    /// No player exists yet.
    NotStarted,
    /// Months can be advanced.
    Active,
    /// The calendar reached the end date; ticks are no-ops.
    Complete,
}

// ---------------------------------------------------------------------------
// Save slots
// ---------------------------------------------------------------------------

/// One of the three named save slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SaveSlot {
    /// Slot A (also the fallback for unrecognized ids).
    A,
    /// Slot B.
    B,
    /// Slot C.
    C,
}

impl SaveSlot {
    /// All slots in display order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Single-letter slot id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Normalize a user-supplied slot id: trimmed, case-insensitive, and
    /// falling back to [`SaveSlot::A`] for anything unrecognized.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "B" => Self::B,
            "C" => Self::C,
            _ => Self::A,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ad_plan_ids_resolve() {
        for plan in AdPlan::ALL {
            assert_eq!(AdPlan::from_id(plan.id()), Some(plan));
        }
        assert_eq!(AdPlan::from_id("billboard"), None);
    }

    #[test]
    fn ad_plan_serializes_as_wire_id() {
        let json = serde_json::to_string(&AdPlan::Listing).ok();
        assert_eq!(json.as_deref(), Some("\"listing\""));
        let json = serde_json::to_string(&AdPlan::NoAdvertising).ok();
        assert_eq!(json.as_deref(), Some("\"none\""));
    }

    #[test]
    fn rank_is_lowercase_on_the_wire() {
        let rank: Result<Rank, _> = serde_json::from_str("\"senior\"");
        assert_eq!(rank.ok(), Some(Rank::Senior));
    }

    #[test]
    fn listing_costs_two_hundred_thousand() {
        assert_eq!(AdPlan::Listing.monthly_cost(), 200_000);
        assert_eq!(AdPlan::default(), AdPlan::NoAdvertising);
    }

    #[test]
    fn save_slot_normalization() {
        assert_eq!(SaveSlot::normalize(" b "), SaveSlot::B);
        assert_eq!(SaveSlot::normalize("c"), SaveSlot::C);
        assert_eq!(SaveSlot::normalize(""), SaveSlot::A);
        assert_eq!(SaveSlot::normalize("Z"), SaveSlot::A);
    }
}
