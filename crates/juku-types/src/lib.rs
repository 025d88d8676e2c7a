//! Shared type definitions for the Juku franchise simulation.
//!
//! This crate is the single source of truth for the records exchanged
//! between the simulation engine and the presentation layer. Wire types
//! flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for catalog and instance ids
//! - [`enums`] -- Rank, advertising plan, campaign phase, save slot
//! - [`structs`] -- Catalog templates, teachers, classrooms, financial records
//! - [`summary`] -- Month summary returned after every tick
//! - [`snapshot`] -- Versioned save-data document

pub mod enums;
pub mod ids;
pub mod snapshot;
pub mod structs;
pub mod summary;

// Re-export all public types at crate root for convenience.
pub use enums::{AdPlan, CampaignPhase, Rank, SaveSlot};
pub use ids::{CampusId, ClassroomId, TeacherId, TeacherTemplateId};
pub use snapshot::{
    CampusRecord, LEGACY_SNAPSHOT_VERSION, PlayerRecord, SNAPSHOT_VERSION, SlotInfo, Snapshot,
    SnapshotSummary,
};
pub use structs::{
    CLASS_CAPACITY, CampusFinancials, CampusTemplate, Classroom, DEFAULT_OPENING_COST,
    ROYALTY_PER_CAMPUS, RevenueRecord, Teacher, TeacherTemplate,
};
pub use summary::{CampusMonthSummary, CostBreakdown, MonthSummary, TeacherShortage};
