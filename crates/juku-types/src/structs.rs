//! Core entity structs for the Juku franchise simulation.
//!
//! Covers the static catalog templates (`CampusTemplate`, `TeacherTemplate`),
//! the staff records owned by a campus (`Teacher`, `Classroom`), and the
//! monthly financial records (`CampusFinancials`, `RevenueRecord`).
//!
//! All records use `camelCase` field names on the wire so catalogs and save
//! data stay compatible with the presentation layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Rank;
use crate::ids::{CampusId, ClassroomId, TeacherId, TeacherTemplateId};

/// Seats in every classroom.
pub const CLASS_CAPACITY: u32 = 80;

/// Flat monthly royalty paid to the franchisor per campus, in yen.
pub const ROYALTY_PER_CAMPUS: i64 = 200_000;

/// Opening cost applied when a catalog entry does not specify one, in yen.
pub const DEFAULT_OPENING_COST: i64 = 5_000_000;

// ---------------------------------------------------------------------------
// Catalog templates
// ---------------------------------------------------------------------------

/// Static catalog entry describing a campus location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CampusTemplate {
    /// Catalog id, also the campus id once opened.
    pub id: CampusId,
    /// Display name.
    pub name: String,
    /// Addressable market of potential students around the campus.
    pub market_students: u32,
    /// Monthly rent level in units of 10,000 yen.
    pub rent: f64,
    /// Foot-traffic index of the nearest station.
    pub station_traffic: f64,
    /// Monthly tuition per enrolled student, in yen.
    #[ts(type = "number")]
    pub tuition_per_student: i64,
    /// One-off cost to open the campus, in yen.
    #[serde(default = "default_opening_cost")]
    #[ts(type = "number")]
    pub opening_cost: i64,
    /// Hard ceiling on enrollment. `None` means unbounded.
    #[serde(default)]
    pub intake_capacity: Option<u32>,
}

const fn default_opening_cost() -> i64 {
    DEFAULT_OPENING_COST
}

/// Static catalog entry describing a hireable teacher profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TeacherTemplate {
    /// Catalog id.
    pub id: TeacherTemplateId,
    /// Display name.
    pub name: String,
    /// Seniority.
    pub rank: Rank,
    /// Monthly salary in yen.
    #[ts(type = "number")]
    pub base_salary: i64,
    /// Signed monthly contribution to campus satisfaction.
    pub satisfaction_impact: f64,
    /// Presentation-only attribute.
    #[serde(default)]
    pub gender: Option<String>,
    /// Presentation-only attribute.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Presentation-only attribute.
    #[serde(default)]
    pub personality: Option<String>,
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// A hired teacher, owned by exactly one campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Teacher {
    /// Unique instance id.
    pub id: TeacherId,
    /// Template this teacher was issued from, if known.
    #[serde(default)]
    pub template_id: Option<TeacherTemplateId>,
    /// Display name.
    pub name: String,
    /// Seniority.
    pub rank: Rank,
    /// Monthly salary in yen.
    #[ts(type = "number")]
    pub base_salary: i64,
    /// Signed monthly contribution to campus satisfaction.
    pub satisfaction_impact: f64,
    /// Presentation-only attribute.
    #[serde(default)]
    pub gender: Option<String>,
    /// Presentation-only attribute.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Presentation-only attribute.
    #[serde(default)]
    pub personality: Option<String>,
}

impl Teacher {
    /// Instantiate a teacher from a catalog template under a fresh id.
    pub fn from_template(template: &TeacherTemplate, id: TeacherId) -> Self {
        Self {
            id,
            template_id: Some(template.id.clone()),
            name: template.name.clone(),
            rank: template.rank,
            base_salary: template.base_salary,
            satisfaction_impact: template.satisfaction_impact,
            gender: template.gender.clone(),
            specialty: template.specialty.clone(),
            personality: template.personality.clone(),
        }
    }
}

/// A classroom bound 1:1 to the teacher hired alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Classroom {
    /// Classroom id (`{campus}-cls-{n}`).
    pub id: ClassroomId,
    /// Owning campus.
    pub campus_id: CampusId,
    /// Assigned teacher.
    pub teacher_id: TeacherId,
    /// Seat count.
    #[serde(default = "default_class_capacity")]
    pub capacity: u32,
    /// Students currently seated.
    #[serde(default)]
    pub student_count: u32,
}

const fn default_class_capacity() -> u32 {
    CLASS_CAPACITY
}

impl Classroom {
    /// Whether more students are seated than the room holds.
    pub const fn is_over_capacity(&self) -> bool {
        self.student_count > self.capacity
    }
}

// ---------------------------------------------------------------------------
// Finances
// ---------------------------------------------------------------------------

/// One campus's revenue and cost breakdown for a single month, in yen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CampusFinancials {
    /// Tuition collected from the pre-tick enrollment.
    #[ts(type = "number")]
    pub revenue: i64,
    /// Sum of teacher salaries.
    #[ts(type = "number")]
    pub salary_cost: i64,
    /// Rent.
    #[ts(type = "number")]
    pub rent_cost: i64,
    /// Active advertising plan cost.
    #[ts(type = "number")]
    pub ad_cost: i64,
    /// Franchise royalty.
    #[ts(type = "number")]
    pub royalty_cost: i64,
    /// Miscellaneous operating expenses.
    #[ts(type = "number")]
    pub misc_cost: i64,
    /// Revenue minus every cost line.
    #[ts(type = "number")]
    pub profit: i64,
}

/// Aggregate result of one elapsed month, appended to the player's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RevenueRecord {
    /// Campaign year of the month.
    pub year: u32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Total revenue across campuses.
    #[ts(type = "number")]
    pub revenue: i64,
    /// Total cost across campuses.
    #[ts(type = "number")]
    pub cost: i64,
    /// Total profit across campuses.
    #[ts(type = "number")]
    pub profit: i64,
}
