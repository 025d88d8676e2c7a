//! Persisted snapshot wire format.
//!
//! The snapshot is the versioned JSON document written by save actions and
//! read back by load actions. Version 2 stores satisfaction on the
//! `-100..=100` scale; version 1 (or a missing version tag) stored it on the
//! legacy `0..=100` scale centered at 50. Migration happens in the codec,
//! these types only describe the shape.
//!
//! Fields that older saves may lack carry serde defaults so that decoding
//! stays lenient; structural problems (no player object) are detected by
//! the codec rather than by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::SaveSlot;
use crate::ids::CampusId;
use crate::structs::{Classroom, RevenueRecord, Teacher};

/// Version written by the current codec.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Version assumed when a snapshot carries no version tag.
pub const LEGACY_SNAPSHOT_VERSION: u32 = 1;

/// Top-level persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// Format version.
    #[serde(default = "legacy_version")]
    pub version: u32,
    /// When the snapshot was written.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Round-robin hiring cursor of the staffing pool.
    #[serde(default)]
    #[ts(type = "number")]
    pub teacher_cursor: u64,
    /// Campaign state. Required; absence makes the snapshot invalid.
    #[serde(default)]
    pub player: Option<PlayerRecord>,
}

const fn legacy_version() -> u32 {
    LEGACY_SNAPSHOT_VERSION
}

const fn default_year() -> u32 {
    1
}

const fn default_month() -> u32 {
    4
}

/// Persisted campaign state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlayerRecord {
    /// Player name. Blank in hand-edited or truncated saves.
    #[serde(default)]
    pub name: String,
    /// School brand name.
    #[serde(default)]
    pub school_name: String,
    /// Cash balance in yen.
    #[serde(default)]
    #[ts(type = "number")]
    pub funds: i64,
    /// Campaign year.
    #[serde(default = "default_year")]
    pub year: u32,
    /// Calendar month (1-12).
    #[serde(default = "default_month")]
    pub month: u32,
    /// Months elapsed since the campaign started.
    #[serde(default)]
    pub elapsed_months: u32,
    /// Whether the campaign end date has been reached.
    #[serde(default)]
    pub is_campaign_complete: bool,
    /// Aggregate monthly results, oldest first.
    #[serde(default)]
    pub revenue_history: Vec<RevenueRecord>,
    /// Owned campuses in opening order.
    #[serde(default)]
    pub campuses: Vec<CampusRecord>,
}

/// Persisted mutable state of one campus. Static attributes are restored
/// from the catalog by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CampusRecord {
    /// Catalog id.
    pub id: CampusId,
    /// Enrolled students.
    #[serde(default)]
    pub student_count: u32,
    /// Satisfaction on the scale of the snapshot's version.
    #[serde(default)]
    pub satisfaction: Option<f64>,
    /// Active ad plan id. Unknown ids load as `none`.
    #[serde(default)]
    pub ad_plan_id: Option<String>,
    /// Ad plan scheduled for next month, if any.
    #[serde(default)]
    pub next_ad_plan_id: Option<String>,
    /// Teachers in hiring order.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Classrooms in creation order.
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
}

/// Lightweight description of a snapshot for save-slot listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SnapshotSummary {
    /// Player name, or a placeholder.
    pub player_name: String,
    /// School name, or a placeholder.
    pub school_name: String,
    /// Cash balance in yen.
    #[ts(type = "number")]
    pub funds: i64,
    /// Campaign year.
    pub year: u32,
    /// Calendar month.
    pub month: u32,
    /// Months elapsed.
    pub elapsed_months: u32,
    /// Number of owned campuses.
    pub campus_count: usize,
    /// When the snapshot was written, if recorded.
    pub saved_at: Option<DateTime<Utc>>,
}

/// Save-slot listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SlotInfo {
    /// Slot id.
    pub id: SaveSlot,
    /// Whether the slot holds any data.
    pub has_data: bool,
    /// Summary of the stored snapshot, when it could be read.
    pub summary: Option<SnapshotSummary>,
    /// Set when the slot exists but could not be read or decoded.
    pub error: bool,
}
