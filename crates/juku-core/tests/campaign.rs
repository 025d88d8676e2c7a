//! Integration tests for full campaigns driven through [`Simulation`].
//!
//! Every test builds its own catalog and seeded RNG, so runs are
//! reproducible and independent of the data files shipped with the repo
//! (except `shipped_catalogs_parse`, which checks those files directly).

#![allow(clippy::unwrap_used)]

use std::path::Path;

use chrono::{TimeZone, Utc};
use juku_core::calendar::CalendarDate;
use juku_core::config::{CampaignConfig, CatalogConfig};
use juku_core::snapshot;
use juku_core::{Catalog, OpenOptions, SimError, Simulation};
use juku_types::{AdPlan, CampaignPhase, CampusId, TeacherTemplateId};

const CAMPUSES: &str = r#"[
    {"id": "shibuya", "name": "渋谷校", "marketStudents": 20000, "rent": 35.5,
     "stationTraffic": 300, "tuitionPerStudent": 30000, "openingCost": 5000000},
    {"id": "kichijoji", "name": "吉祥寺校", "marketStudents": 12000, "rent": 18,
     "stationTraffic": 140, "tuitionPerStudent": 26000, "openingCost": 3000000,
     "intakeCapacity": 90}
]"#;

const TEACHERS: &str = r#"[
    {"id": "sato", "name": "佐藤", "rank": "senior", "baseSalary": 450000, "satisfactionImpact": 1.2},
    {"id": "suzuki", "name": "鈴木", "rank": "mid", "baseSalary": 320000, "satisfactionImpact": 0.8},
    {"id": "takahashi", "name": "高橋", "rank": "junior", "baseSalary": 240000, "satisfactionImpact": 0.3}
]"#;

fn settings(seed: u64) -> CampaignConfig {
    CampaignConfig {
        seed: Some(seed),
        ..CampaignConfig::default()
    }
}

fn simulation_with(settings: &CampaignConfig) -> Simulation {
    let catalog = Catalog::from_json(CAMPUSES, TEACHERS).unwrap();
    Simulation::new(catalog, settings).unwrap()
}

fn started(seed: u64) -> Simulation {
    let mut sim = simulation_with(&settings(seed));
    sim.start_campaign(
        "山田",
        "山田塾",
        Some(&CampusId::from("shibuya")),
        &OpenOptions::default(),
    )
    .unwrap();
    sim
}

fn shibuya() -> CampusId {
    CampusId::from("shibuya")
}

#[test]
fn opening_campus_seeds_from_market_size() {
    let sim = started(1);
    let player = sim.player().unwrap();
    assert_eq!(player.funds, 5_000_000);
    assert_eq!(player.calendar.date(), CalendarDate { year: 1, month: 4 });

    let campus = sim.campus(&shibuya()).unwrap();
    assert_eq!(campus.student_count, 100);
    assert!(campus.satisfaction.abs() < f64::EPSILON);
    assert_eq!(campus.ad_plan, AdPlan::NoAdvertising);
    // Every student is seated, one classroom per teacher.
    assert_eq!(campus.classrooms.len(), campus.teachers.len());
    assert_eq!(campus.classrooms.len(), 2);
    assert_eq!(campus.seated_students(), 100);
    assert_eq!(sim.teacher_deficit(&shibuya()), 0);
}

#[test]
fn listing_plan_costs_nothing_until_next_month() {
    let mut sim = started(2);
    sim.schedule_ad_plan(&shibuya(), Some("listing")).unwrap();

    let first = sim.advance_month().unwrap().unwrap();
    assert_eq!(first.campuses.first().unwrap().ad_cost, 0);
    assert_eq!(first.breakdown.ad_cost, 0);
    assert_eq!(sim.campus(&shibuya()).unwrap().ad_plan, AdPlan::Listing);

    let second = sim.advance_month().unwrap().unwrap();
    assert_eq!(second.campuses.first().unwrap().ad_cost, 200_000);
    assert_eq!(second.breakdown.ad_cost, 200_000);
    assert_eq!(second.campuses.first().unwrap().ad_plan_label, AdPlan::Listing.label());
}

#[test]
fn december_wraps_into_next_year() {
    let mut sim = started(3);
    let mut last = None;
    for _ in 0..9 {
        last = sim.advance_month().unwrap();
    }
    let december = last.unwrap();
    assert_eq!((december.year, december.month), (1, 12));
    let calendar = sim.player().unwrap().calendar;
    assert_eq!(calendar.date(), CalendarDate { year: 2, month: 1 });
    assert_eq!(calendar.elapsed_months(), 9);
}

#[test]
fn full_campaign_completes_after_sixty_months() {
    let mut sim = started(4);
    let mut months = 0;
    while let Some(summary) = sim.advance_month().unwrap() {
        months += 1;
        if summary.is_campaign_end {
            assert_eq!((summary.year, summary.month), (6, 3));
        }
    }
    assert_eq!(months, 60);
    assert_eq!(sim.phase(), CampaignPhase::Complete);
    let player = sim.player().unwrap();
    assert_eq!(player.revenue_history.len(), 60);
    assert_eq!(player.calendar.date(), CalendarDate { year: 6, month: 4 });
}

#[test]
fn completed_campaign_ignores_ticks() {
    let short = CampaignConfig {
        end_year: 1,
        end_month: 5,
        ..settings(5)
    };
    let mut sim = simulation_with(&short);
    sim.start_campaign(
        "山田",
        "山田塾",
        Some(&shibuya()),
        &OpenOptions::default(),
    )
    .unwrap();

    assert!(!sim.advance_month().unwrap().unwrap().is_campaign_end);
    assert!(sim.advance_month().unwrap().unwrap().is_campaign_end);
    assert!(sim.is_campaign_complete());

    let before = sim.player().unwrap().clone();
    assert!(sim.advance_month().unwrap().is_none());
    assert!(sim.advance_month().unwrap().is_none());
    assert_eq!(sim.player().unwrap(), &before);
}

#[test]
fn enrollment_and_satisfaction_stay_in_bounds() {
    let mut sim = started(6);
    sim.open_campus(&CampusId::from("kichijoji"), &OpenOptions::default())
        .unwrap();
    sim.schedule_ad_plan(&CampusId::from("kichijoji"), Some("poster"))
        .unwrap();

    while let Some(summary) = sim.advance_month().unwrap() {
        for campus in &summary.campuses {
            if let Some(ceiling) = campus.intake_capacity {
                assert!(campus.student_count <= ceiling);
            }
            assert!((-100.0..=100.0).contains(&campus.satisfaction));
        }
        let sum: u32 = summary.campuses.iter().map(|c| c.student_count).sum();
        assert_eq!(summary.students_after, sum);
        assert_eq!(summary.funds_after, summary.funds_before + summary.total_profit);
    }
}

#[test]
fn unstaffed_growth_shows_up_as_shortage() {
    let mut sim = started(7);
    // Poster advertising with no new hires outgrows the two opening classrooms.
    sim.schedule_ad_plan(&shibuya(), Some("poster")).unwrap();
    for _ in 0..12 {
        sim.advance_month().unwrap();
    }
    let campus = sim.campus(&shibuya()).unwrap();
    assert_eq!(campus.teachers.len(), 2);
    assert!(campus.student_count > 160);
    assert!(campus.unseated_students() > 0);

    let shortages = sim.teacher_shortages();
    assert_eq!(shortages.len(), 1);
    let shortage = shortages.first().unwrap();
    assert_eq!(shortage.campus_id, shibuya());
    assert_eq!(shortage.deficit, sim.teacher_deficit(&shibuya()));

    while sim.teacher_deficit(&shibuya()) > 0 {
        sim.hire_teacher(&shibuya(), None).unwrap();
    }
    assert!(sim.teacher_shortages().is_empty());
    assert_eq!(sim.campus(&shibuya()).unwrap().unseated_students(), 0);
}

#[test]
fn snapshot_round_trip_preserves_state() {
    let mut sim = started(8);
    sim.open_campus(&CampusId::from("kichijoji"), &OpenOptions::default())
        .unwrap();
    sim.schedule_ad_plan(&shibuya(), Some("flyer")).unwrap();
    for _ in 0..5 {
        sim.advance_month().unwrap();
    }
    sim.schedule_ad_plan(&shibuya(), Some("poster")).unwrap();

    let saved_at = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
    let original = sim.to_snapshot(saved_at).unwrap();
    let mut restored = simulation_with(&settings(99));
    restored.load_snapshot(&original).unwrap();
    assert_eq!(restored.to_snapshot(saved_at).unwrap(), original);

    // Everything but the display-only last statement comes back.
    let before = sim.player().unwrap();
    let after = restored.player().unwrap();
    assert_eq!(after.name, before.name);
    assert_eq!(after.school_name, before.school_name);
    assert_eq!(after.funds, before.funds);
    assert_eq!(after.calendar, before.calendar);
    assert_eq!(after.revenue_history, before.revenue_history);
    assert_eq!(after.is_campaign_complete, before.is_campaign_complete);
    assert_eq!(after.campuses.len(), before.campuses.len());
    for (a, b) in after.campuses.iter().zip(&before.campuses) {
        assert!(b.last_financials.is_some());
        assert!(a.last_financials.is_none());
        let mut expected = b.clone();
        expected.last_financials = None;
        assert_eq!(a, &expected);
    }

    let decoded = snapshot::decode(&snapshot::encode(&original).unwrap()).unwrap();
    assert_eq!(decoded.saved_at, Some(saved_at));
    assert_eq!(snapshot::summarize(&decoded), snapshot::summarize(&original));
    assert_eq!(restored.staffing().cursor(), sim.staffing().cursor());
    let campus = restored.campus(&shibuya()).unwrap();
    assert_eq!(campus.next_ad_plan, Some(AdPlan::Poster));
}

#[test]
fn restored_cursor_continues_round_robin() {
    let mut sim = started(9);
    let snapshot = sim.to_snapshot(Utc::now()).unwrap();

    let expected = sim.hire_teacher(&shibuya(), None).unwrap().template_id.clone();

    let mut restored = simulation_with(&settings(10));
    restored.load_snapshot(&snapshot).unwrap();
    let actual = restored.hire_teacher(&shibuya(), None).unwrap().template_id.clone();
    assert_eq!(actual, expected);
    assert_eq!(actual, Some(TeacherTemplateId::from("takahashi")));
}

#[test]
fn failed_load_keeps_current_game() {
    let mut sim = started(11);
    sim.advance_month().unwrap();
    let before = sim.player().unwrap().clone();

    let mut snapshot = sim.to_snapshot(Utc::now()).unwrap();
    if let Some(player) = snapshot.player.as_mut() {
        player.name = String::from("別人");
        if let Some(campus) = player.campuses.first_mut() {
            campus.id = CampusId::from("osaka");
        }
    }
    assert!(matches!(
        sim.load_snapshot(&snapshot),
        Err(SimError::NotFound { .. })
    ));
    assert_eq!(sim.player().unwrap(), &before);
}

#[test]
fn legacy_save_is_migrated_on_load() {
    let json = r#"{
        "teacherCursor": 1,
        "player": {
            "name": "山田", "schoolName": "山田塾", "funds": 3000000, "year": 3, "month": 2,
            "elapsedMonths": 22,
            "campuses": [{
                "id": "shibuya", "studentCount": 140, "satisfaction": 70,
                "adPlanId": "flyer", "nextAdPlanId": null,
                "teachers": [{"id": "sato-1", "templateId": "sato", "name": "佐藤", "rank": "senior",
                              "baseSalary": 450000, "satisfactionImpact": 1.2}],
                "classrooms": [{"id": "shibuya-cls-1", "campusId": "shibuya",
                                "teacherId": "sato-1", "capacity": 80, "studentCount": 80}]
            }]
        }
    }"#;
    let mut sim = simulation_with(&settings(12));
    sim.load_snapshot(&snapshot::decode(json).unwrap()).unwrap();

    assert_eq!(sim.phase(), CampaignPhase::Active);
    assert_eq!(sim.staffing().cursor(), 1);
    let campus = sim.campus(&shibuya()).unwrap();
    assert!((campus.satisfaction - 20.0).abs() < f64::EPSILON);
    assert_eq!(campus.ad_plan, AdPlan::Flyer);
    assert_eq!(sim.teacher_deficit(&shibuya()), 1);
    assert_eq!(sim.player().unwrap().calendar.elapsed_months(), 22);
}

#[test]
fn same_seed_same_campaign() {
    let run = |seed| {
        let mut sim = started(seed);
        let mut funds = Vec::new();
        while let Some(summary) = sim.advance_month().unwrap() {
            funds.push(summary.funds_after);
        }
        funds
    };
    assert_eq!(run(13), run(13));
}

#[test]
fn shipped_catalogs_parse() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let mut config = CatalogConfig::default();
    config.rebase(&data);
    let catalog = Catalog::load(&config).unwrap();
    assert!(catalog.campus(&shibuya()).is_some());
    assert!(!catalog.teachers().is_empty());
}
