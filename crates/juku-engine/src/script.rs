//! Scripted campaign policy for headless runs.
//!
//! The `engine` section of `juku-config.yaml` describes a fixed player: who
//! they are, where they open, which ad plan they run, and when they expand.
//! [`run_campaign`] plays that policy month by month until the campaign
//! completes.

use juku_core::{Catalog, OpenOptions, SimError, Simulation};
use juku_types::{AdPlan, CampusId, SaveSlot, TeacherTemplateId};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::EngineError;

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// The `engine` section of `juku-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptConfig {
    /// Player name.
    #[serde(default = "default_player_name")]
    pub player_name: String,

    /// School brand name.
    #[serde(default = "default_school_name")]
    pub school_name: String,

    /// Campus opened at campaign start, if any.
    #[serde(default)]
    pub initial_campus: Option<CampusId>,

    /// Teacher template hired first at the initial campus.
    #[serde(default)]
    pub initial_teacher_template: Option<TeacherTemplateId>,

    /// Ad plan id scheduled at every campus when it opens.
    #[serde(default)]
    pub ad_plan: Option<String>,

    /// Hire round-robin teachers whenever a campus runs short.
    #[serde(default = "default_auto_hire")]
    pub auto_hire: bool,

    /// Campuses to open later in the campaign.
    #[serde(default)]
    pub expansion: Vec<Expansion>,

    /// Slot the finished campaign is written to.
    #[serde(default = "default_save_slot")]
    pub save_slot: String,
}

/// One scheduled campus opening.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Expansion {
    /// Elapsed campaign months before the opening.
    pub month: u32,
    /// Campus to open.
    pub campus: CampusId,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            school_name: default_school_name(),
            initial_campus: None,
            initial_teacher_template: None,
            ad_plan: None,
            auto_hire: default_auto_hire(),
            expansion: Vec::new(),
            save_slot: default_save_slot(),
        }
    }
}

fn default_player_name() -> String {
    String::from("プレイヤー")
}

fn default_school_name() -> String {
    String::from("未来塾")
}

const fn default_auto_hire() -> bool {
    true
}

fn default_save_slot() -> String {
    String::from("A")
}

impl ScriptConfig {
    /// Extract the `engine` section from a full config document. A document
    /// without one yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Script`] if the YAML or the section is
    /// malformed.
    pub fn from_yaml(contents: &str) -> Result<Self, EngineError> {
        let raw: serde_yml::Value =
            serde_yml::from_str(contents).map_err(|e| EngineError::Script {
                message: format!("failed to parse config YAML: {e}"),
            })?;

        match raw.get("engine") {
            Some(section) => {
                serde_yml::from_value(section.clone()).map_err(|e| EngineError::Script {
                    message: format!("failed to parse engine config: {e}"),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Normalized save slot.
    pub fn slot(&self) -> SaveSlot {
        SaveSlot::normalize(&self.save_slot)
    }

    /// Check every id against the catalogs before anything runs.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Script`] naming the first unknown campus,
    /// teacher template, or ad plan.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), EngineError> {
        let campuses = self
            .initial_campus
            .iter()
            .chain(self.expansion.iter().map(|e| &e.campus));
        for id in campuses {
            if catalog.campus(id).is_none() {
                return Err(script_error(format!("unknown campus '{id}'")));
            }
        }
        if let Some(id) = self
            .initial_teacher_template
            .as_ref()
            .filter(|id| catalog.teacher(id).is_none())
        {
            return Err(script_error(format!("unknown teacher template '{id}'")));
        }
        let plan = self.ad_plan.as_deref().map_or("", str::trim);
        if !plan.is_empty() && AdPlan::from_id(plan).is_none() {
            return Err(script_error(format!("unknown ad plan '{plan}'")));
        }
        Ok(())
    }
}

fn script_error(message: String) -> EngineError {
    EngineError::Script { message }
}

// -----------------------------------------------------------------------
// Policy
// -----------------------------------------------------------------------

/// Tally of a scripted run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Months simulated.
    pub months: u32,
    /// Teachers hired by the shortage policy.
    pub hires: u32,
    /// Scheduled expansions that opened.
    pub openings: u32,
    /// Scheduled expansions skipped for lack of funds.
    pub skipped_openings: u32,
}

/// Start a campaign and play `script` until the campaign completes.
///
/// Each month, before the tick: due expansions open when affordable (and
/// get the scripted ad plan), then shortages are hired away if
/// `auto_hire` is set.
///
/// # Errors
///
/// Returns [`EngineError::Script`] for ids the catalogs do not contain, or
/// [`EngineError::Simulation`] if an action or tick fails.
pub fn run_campaign(
    simulation: &mut Simulation,
    script: &ScriptConfig,
) -> Result<ScriptOutcome, EngineError> {
    script.validate(simulation.catalog())?;

    let options = OpenOptions {
        initial_teacher_template: script.initial_teacher_template.clone(),
        student_count: None,
    };
    simulation.start_campaign(
        &script.player_name,
        &script.school_name,
        script.initial_campus.as_ref(),
        &options,
    )?;
    if let Some(id) = &script.initial_campus {
        simulation.schedule_ad_plan(id, script.ad_plan.as_deref())?;
    }

    let mut outcome = ScriptOutcome::default();
    while !simulation.is_campaign_complete() {
        expand(simulation, script, &mut outcome)?;
        if script.auto_hire {
            outcome.hires = outcome.hires.saturating_add(hire_for_shortages(simulation)?);
        }
        if simulation.advance_month()?.is_none() {
            break;
        }
        outcome.months = outcome.months.saturating_add(1);
    }

    info!(
        months = outcome.months,
        hires = outcome.hires,
        openings = outcome.openings,
        skipped_openings = outcome.skipped_openings,
        "Scripted campaign finished"
    );
    Ok(outcome)
}

/// Open every expansion due this month.
fn expand(
    simulation: &mut Simulation,
    script: &ScriptConfig,
    outcome: &mut ScriptOutcome,
) -> Result<(), EngineError> {
    let Some(elapsed) = simulation.player().map(|p| p.calendar.elapsed_months()) else {
        return Ok(());
    };
    for expansion in script.expansion.iter().filter(|e| e.month == elapsed) {
        let opened = simulation
            .open_campus(&expansion.campus, &OpenOptions::default())
            .map(|campus| campus.student_count);
        match opened {
            Ok(students) => {
                info!(campus = %expansion.campus, students, "Scheduled expansion opened");
                outcome.openings = outcome.openings.saturating_add(1);
                simulation.schedule_ad_plan(&expansion.campus, script.ad_plan.as_deref())?;
            }
            Err(SimError::InsufficientFunds {
                required,
                available,
            }) => {
                warn!(
                    campus = %expansion.campus,
                    required,
                    available,
                    "Expansion skipped, not enough funds"
                );
                outcome.skipped_openings = outcome.skipped_openings.saturating_add(1);
            }
            Err(SimError::DuplicateCampus(id)) => {
                warn!(campus = %id, "Expansion skipped, campus already open");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Hire round-robin teachers until no campus is short. Returns the number
/// hired.
fn hire_for_shortages(simulation: &mut Simulation) -> Result<u32, EngineError> {
    let mut hired = 0_u32;
    for shortage in simulation.teacher_shortages() {
        for _ in 0..shortage.deficit {
            simulation.hire_teacher(&shortage.campus_id, None)?;
            hired = hired.saturating_add(1);
        }
    }
    Ok(hired)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use juku_core::config::CampaignConfig;

    use super::*;

    const CAMPUSES: &str = r#"[
        {"id": "shibuya", "name": "渋谷校", "marketStudents": 20000, "rent": 35.5,
         "stationTraffic": 300, "tuitionPerStudent": 30000, "openingCost": 5000000},
        {"id": "kichijoji", "name": "吉祥寺校", "marketStudents": 12000, "rent": 18,
         "stationTraffic": 140, "tuitionPerStudent": 26000, "openingCost": 3000000},
        {"id": "ginza", "name": "銀座校", "marketStudents": 30000, "rent": 60,
         "stationTraffic": 400, "tuitionPerStudent": 40000, "openingCost": 900000000}
    ]"#;

    const TEACHERS: &str = r#"[
        {"id": "sato", "name": "佐藤", "rank": "senior", "baseSalary": 450000, "satisfactionImpact": 1.2},
        {"id": "tanaka", "name": "田中", "rank": "junior", "baseSalary": 240000, "satisfactionImpact": 0.3}
    ]"#;

    fn simulation() -> Simulation {
        let catalog = Catalog::from_json(CAMPUSES, TEACHERS).unwrap();
        let settings = CampaignConfig {
            seed: Some(7),
            ..CampaignConfig::default()
        };
        Simulation::new(catalog, &settings).unwrap()
    }

    fn script() -> ScriptConfig {
        ScriptConfig::from_yaml(
            r"
engine:
  player_name: 山田
  school_name: 山田塾
  initial_campus: shibuya
  initial_teacher_template: tanaka
  ad_plan: flyer
  expansion:
    - month: 6
      campus: kichijoji
    - month: 12
      campus: ginza
  save_slot: b
",
        )
        .unwrap()
    }

    #[test]
    fn missing_section_uses_defaults() {
        let config = ScriptConfig::from_yaml("campaign:\n  seed: 1\n").unwrap();
        assert_eq!(config, ScriptConfig::default());
        assert!(config.auto_hire);
        assert_eq!(config.slot(), SaveSlot::A);
    }

    #[test]
    fn section_is_parsed() {
        let config = script();
        assert_eq!(config.initial_campus, Some(CampusId::from("shibuya")));
        assert_eq!(config.expansion.len(), 2);
        assert_eq!(config.slot(), SaveSlot::B);
    }

    #[test]
    fn malformed_section_is_a_script_error() {
        let result = ScriptConfig::from_yaml("engine:\n  auto_hire: maybe\n");
        assert!(matches!(result, Err(EngineError::Script { .. })));
    }

    #[test]
    fn unknown_ids_are_rejected_up_front() {
        let catalog = Catalog::from_json(CAMPUSES, TEACHERS).unwrap();
        let mut config = script();
        config.ad_plan = Some(String::from("tv"));
        assert!(matches!(
            config.validate(&catalog),
            Err(EngineError::Script { .. })
        ));

        let mut sim = simulation();
        config = script();
        config.expansion.push(Expansion {
            month: 3,
            campus: CampusId::from("osaka"),
        });
        assert!(run_campaign(&mut sim, &config).is_err());
        assert!(!sim.has_active_game());
    }

    #[test]
    fn scripted_run_completes() {
        let mut sim = simulation();
        let outcome = run_campaign(&mut sim, &script()).unwrap();

        assert_eq!(outcome.months, 60);
        assert_eq!(outcome.openings, 1);
        assert_eq!(outcome.skipped_openings, 1);
        assert!(sim.is_campaign_complete());

        let player = sim.player().unwrap();
        assert_eq!(player.campuses.len(), 2);
        let first = player.campuses.first().unwrap();
        assert_eq!(first.ad_plan, AdPlan::Flyer);
        assert_eq!(
            first.teachers.first().unwrap().template_id,
            Some(TeacherTemplateId::from("tanaka"))
        );
    }
}
