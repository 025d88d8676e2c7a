//! Snapshot codec: converts between the live campaign and the persisted
//! [`Snapshot`] document.
//!
//! Capture always writes [`SNAPSHOT_VERSION`]. Restore accepts older
//! documents: version 1 stored satisfaction on a `0..=100` scale centered
//! at 50, so it is shifted by -50 and clamped. Restoring is all-or-nothing;
//! the caller only swaps the live game once [`restore`] has succeeded.

use chrono::{DateTime, Utc};
use juku_types::{
    AdPlan, CampusRecord, LEGACY_SNAPSHOT_VERSION, PlayerRecord, SNAPSHOT_VERSION, Snapshot,
    SnapshotSummary,
};

use tracing::warn;

use crate::calendar::CampaignCalendar;
use crate::capacity;
use crate::catalog::Catalog;
use crate::error::SimError;
use crate::model::{Campus, Player};
use crate::satisfaction::{SATISFACTION_NEUTRAL, clamp_satisfaction};

/// Placeholder shown for a save without a player name.
pub const UNKNOWN_PLAYER: &str = "不明なプレイヤー";

/// Placeholder shown for a save without a school name.
pub const UNNAMED_SCHOOL: &str = "名称未設定";

/// Satisfaction offset between the legacy and current scales.
const LEGACY_SATISFACTION_OFFSET: f64 = 50.0;

/// A decoded snapshot, ready to replace the live game.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// The restored player.
    pub player: Player,
    /// The staffing pool cursor at save time.
    pub teacher_cursor: u64,
}

/// Capture `player` and the staffing cursor as a current-version snapshot.
pub fn capture(player: &Player, teacher_cursor: u64, saved_at: DateTime<Utc>) -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION,
        saved_at: Some(saved_at),
        teacher_cursor,
        player: Some(PlayerRecord {
            name: player.name.clone(),
            school_name: player.school_name.clone(),
            funds: player.funds,
            year: player.calendar.year(),
            month: player.calendar.month(),
            elapsed_months: player.calendar.elapsed_months(),
            is_campaign_complete: player.is_campaign_complete,
            revenue_history: player.revenue_history.clone(),
            campuses: player.campuses.iter().map(capture_campus).collect(),
        }),
    }
}

fn capture_campus(campus: &Campus) -> CampusRecord {
    CampusRecord {
        id: campus.id().clone(),
        student_count: campus.student_count,
        satisfaction: Some(campus.satisfaction),
        ad_plan_id: Some(campus.ad_plan.id().to_owned()),
        next_ad_plan_id: campus.next_ad_plan.map(|plan| plan.id().to_owned()),
        teachers: campus.teachers.clone(),
        classrooms: campus.classrooms.clone(),
    }
}

/// Rebuild the campaign described by `snapshot`. Campus profiles come from
/// `catalog`; unknown ad plan ids fall back to no advertising.
///
/// # Errors
///
/// Returns [`SimError::InvalidSnapshot`] if the player is missing or the
/// calendar is out of range, or [`SimError::NotFound`] if a campus id is
/// not in the catalog.
pub fn restore(snapshot: &Snapshot, catalog: &Catalog) -> Result<Restored, SimError> {
    let record = snapshot.player.as_ref().ok_or_else(|| invalid("no player"))?;
    let calendar = CampaignCalendar::from_parts(record.year, record.month, record.elapsed_months)
        .map_err(|e| invalid(e.to_string()))?;

    let campuses = record
        .campuses
        .iter()
        .map(|campus| restore_campus(campus, snapshot.version, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    let player = Player {
        name: record.name.clone(),
        school_name: record.school_name.clone(),
        funds: record.funds,
        calendar,
        revenue_history: record.revenue_history.clone(),
        campuses,
        is_campaign_complete: record.is_campaign_complete,
    };

    Ok(Restored {
        player,
        teacher_cursor: snapshot.teacher_cursor,
    })
}

fn restore_campus(
    record: &CampusRecord,
    version: u32,
    catalog: &Catalog,
) -> Result<Campus, SimError> {
    let profile = catalog
        .campus(&record.id)
        .ok_or_else(|| SimError::campus_not_found(&record.id))?;

    let mut campus = Campus::new(profile.clone());
    campus.student_count = record.student_count;
    campus.satisfaction = migrate_satisfaction(record.satisfaction, version);
    campus.ad_plan = record
        .ad_plan_id
        .as_deref()
        .and_then(AdPlan::from_id)
        .unwrap_or_default();
    campus.next_ad_plan = record.next_ad_plan_id.as_deref().and_then(AdPlan::from_id);
    campus.teachers.clone_from(&record.teachers);
    campus.classrooms.clone_from(&record.classrooms);
    if capacity::has_overfilled_classroom(&campus) {
        warn!(campus = %campus.id(), "Saved classroom over capacity, reseating");
        capacity::reassign_students(&mut campus);
    }
    Ok(campus)
}

/// Bring a stored satisfaction onto the current scale.
///
/// Missing or NaN values load as neutral. Legacy versions are shifted by
/// -50. The result is clamped to `-100..=100`.
pub fn migrate_satisfaction(value: Option<f64>, version: u32) -> f64 {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return SATISFACTION_NEUTRAL;
    };
    let migrated = if version <= LEGACY_SNAPSHOT_VERSION {
        value - LEGACY_SATISFACTION_OFFSET
    } else {
        value
    };
    clamp_satisfaction(migrated)
}

/// Serialize a snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SimError::Json`] if serialization fails.
pub fn encode(snapshot: &Snapshot) -> Result<String, SimError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a snapshot from JSON.
///
/// # Errors
///
/// Returns [`SimError::InvalidSnapshot`] if the text is not a snapshot
/// document.
pub fn decode(json: &str) -> Result<Snapshot, SimError> {
    serde_json::from_str(json).map_err(|e| invalid(e.to_string()))
}

/// Listing summary of a snapshot, or `None` when it has no player.
pub fn summarize(snapshot: &Snapshot) -> Option<SnapshotSummary> {
    let player = snapshot.player.as_ref()?;
    Some(SnapshotSummary {
        player_name: or_placeholder(&player.name, UNKNOWN_PLAYER),
        school_name: or_placeholder(&player.school_name, UNNAMED_SCHOOL),
        funds: player.funds,
        year: player.year,
        month: player.month,
        elapsed_months: player.elapsed_months,
        campus_count: player.campuses.len(),
        saved_at: snapshot.saved_at,
    })
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_owned()
    } else {
        value.to_owned()
    }
}

fn invalid(reason: impl Into<String>) -> SimError {
    SimError::InvalidSnapshot {
        reason: reason.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use juku_types::CampusId;

    use super::*;
    use crate::model::tests::profile;
    use crate::staffing::tests::template;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![profile(20_000, None)],
            vec![template("sato", 450_000, 1.2)],
        )
        .unwrap()
    }

    fn legacy_document(satisfaction: &str) -> String {
        format!(
            r#"{{
                "player": {{
                    "name": "山田", "schoolName": "山田塾", "funds": 4200000,
                    "year": 2, "month": 7,
                    "campuses": [{{ "id": "shibuya", "studentCount": 90,
                                    "satisfaction": {satisfaction}, "adPlanId": "billboard" }}]
                }}
            }}"#
        )
    }

    #[test]
    fn legacy_satisfaction_is_shifted() {
        let snapshot = decode(&legacy_document("70")).unwrap();
        assert_eq!(snapshot.version, LEGACY_SNAPSHOT_VERSION);
        let restored = restore(&snapshot, &catalog()).unwrap();
        let campus = restored.player.campuses.first().unwrap();
        assert!((campus.satisfaction - 20.0).abs() < f64::EPSILON);
        assert_eq!(campus.ad_plan, AdPlan::NoAdvertising);
        assert_eq!(restored.player.calendar.elapsed_months(), 0);
        assert_eq!(restored.teacher_cursor, 0);
    }

    #[test]
    fn missing_satisfaction_loads_neutral() {
        let snapshot = decode(&legacy_document("null")).unwrap();
        let restored = restore(&snapshot, &catalog()).unwrap();
        let campus = restored.player.campuses.first().unwrap();
        assert!(campus.satisfaction.abs() < f64::EPSILON);
    }

    #[test]
    fn migration_clamps() {
        assert!((migrate_satisfaction(Some(-20.0), 1) - (-70.0)).abs() < f64::EPSILON);
        assert!((migrate_satisfaction(Some(180.0), 2) - 100.0).abs() < f64::EPSILON);
        assert!((migrate_satisfaction(Some(f64::NAN), 2)).abs() < f64::EPSILON);
        assert!((migrate_satisfaction(Some(55.0), 2) - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_player_is_invalid() {
        let snapshot = decode(r#"{"version": 2}"#).unwrap();
        assert!(matches!(
            restore(&snapshot, &catalog()),
            Err(SimError::InvalidSnapshot { .. })
        ));
        assert!(summarize(&snapshot).is_none());
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(decode("not json"), Err(SimError::InvalidSnapshot { .. })));
    }

    #[test]
    fn unknown_campus_is_not_found() {
        let json = legacy_document("50").replace("shibuya", "osaka");
        let snapshot = decode(&json).unwrap();
        assert!(matches!(
            restore(&snapshot, &catalog()),
            Err(SimError::NotFound { .. })
        ));
    }

    #[test]
    fn out_of_range_month_is_invalid() {
        let json = legacy_document("50").replace("\"month\": 7", "\"month\": 13");
        let snapshot = decode(&json).unwrap();
        assert!(matches!(
            restore(&snapshot, &catalog()),
            Err(SimError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn summary_fills_placeholders() {
        let json = legacy_document("50")
            .replace("\"name\": \"山田\", ", "")
            .replace("\"schoolName\": \"山田塾\", ", "\"schoolName\": \"\", ");
        let snapshot = decode(&json).unwrap();
        let summary = summarize(&snapshot).unwrap();
        assert_eq!(summary.player_name, UNKNOWN_PLAYER);
        assert_eq!(summary.school_name, UNNAMED_SCHOOL);
        assert_eq!(summary.funds, 4_200_000);
        assert_eq!(summary.year, 2);
        assert_eq!(summary.month, 7);
        assert_eq!(summary.campus_count, 1);
        assert!(summary.saved_at.is_none());
    }

    #[test]
    fn overfilled_saved_classroom_is_reseated() {
        let json = legacy_document("50").replace(
            r#""adPlanId": "billboard""#,
            r#""adPlanId": "billboard",
               "teachers": [{"id": "t1", "name": "佐藤", "rank": "senior",
                             "baseSalary": 450000, "satisfactionImpact": 1.2}],
               "classrooms": [{"id": "shibuya-cls-1", "campusId": "shibuya",
                               "teacherId": "t1", "capacity": 80, "studentCount": 90}]"#,
        );
        let restored = restore(&decode(&json).unwrap(), &catalog()).unwrap();
        let campus = restored.player.campuses.first().unwrap();
        let room = campus.classrooms.first().unwrap();
        assert_eq!(room.student_count, 80);
        assert!(!room.is_over_capacity());
        assert_eq!(campus.unseated_students(), 10);
    }

    #[test]
    fn capture_writes_current_version() {
        let snapshot = decode(&legacy_document("70")).unwrap();
        let restored = restore(&snapshot, &catalog()).unwrap();
        let captured = capture(&restored.player, 5, Utc::now());
        assert_eq!(captured.version, SNAPSHOT_VERSION);
        assert_eq!(captured.teacher_cursor, 5);
        let campus = captured.player.unwrap().campuses.into_iter().next().unwrap();
        assert_eq!(campus.id, CampusId::from("shibuya"));
        assert_eq!(campus.ad_plan_id.as_deref(), Some("none"));
        assert!(campus.next_ad_plan_id.is_none());
    }
}
