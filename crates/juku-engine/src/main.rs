//! Headless driver for the Juku franchise simulation.
//!
//! Loads configuration and catalogs, plays the scripted policy from the
//! `engine` section of the config until the campaign completes, writes the
//! result to a save slot, and logs the final standing.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `juku-config.yaml` (or the path given as the
//!    first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Load the campus and teacher catalogs
//! 4. Create the simulation from the campaign settings
//! 5. Run the scripted campaign
//! 6. Save to the configured slot
//! 7. Log the result

mod error;
mod script;

use std::path::{Path, PathBuf};

use juku_core::config::LoggingConfig;
use juku_core::{Catalog, Simulation, SimulationConfig, SlotStore};
use juku_types::CampusId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::script::ScriptConfig;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "juku-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, catalogs, the scripted run, or the
/// final save fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    // 1. Load configuration.
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(config = %config_path.display(), "juku-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        starting_funds = config.campaign.starting_funds,
        seed = config.campaign.seed,
        start_year = config.campaign.start_year,
        start_month = config.campaign.start_month,
        end_year = config.campaign.end_year,
        end_month = config.campaign.end_month,
        "Configuration loaded"
    );

    // 3. Load catalogs.
    let catalog = Catalog::load(&config.catalog).map_err(EngineError::from)?;

    // 4. Create the simulation.
    let mut simulation =
        Simulation::new(catalog, &config.campaign).map_err(EngineError::from)?;

    // 5. Run the scripted campaign.
    let script = load_script_config(&config_path)?;
    info!(
        player = script.player_name.as_str(),
        initial_campus = script.initial_campus.as_ref().map(CampusId::as_str),
        ad_plan = script.ad_plan.as_deref(),
        auto_hire = script.auto_hire,
        expansions = script.expansion.len(),
        "Script loaded"
    );
    let outcome = script::run_campaign(&mut simulation, &script)?;

    // 6. Save.
    let store = SlotStore::new(config.storage.save_dir.clone());
    let slot = script.slot();
    let saved = store.save(&simulation, slot).map_err(EngineError::from)?;

    // 7. Log results.
    if let Some(player) = simulation.player() {
        info!(
            school = player.school_name.as_str(),
            funds = player.funds,
            campuses = player.campuses.len(),
            students = player.total_students(),
            avg_satisfaction = player.average_satisfaction(),
            months = outcome.months,
            hires = outcome.hires,
            saved,
            slot = slot.id(),
            "juku-engine finished"
        );
    }

    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the simulation configuration. A missing file yields the defaults
/// (with env overrides still applied) and `false`.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        return Ok((SimulationConfig::from_file(path)?, true));
    }
    let mut config = SimulationConfig::default();
    config.catalog.apply_env_overrides();
    config.storage.apply_env_overrides();
    Ok((config, false))
}

/// Load the `engine` section of the config file. A missing file or section
/// yields the default script.
fn load_script_config(path: &Path) -> Result<ScriptConfig, EngineError> {
    if !path.exists() {
        return Ok(ScriptConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Script {
        message: format!("failed to read config file: {e}"),
    })?;
    ScriptConfig::from_yaml(&contents)
}
