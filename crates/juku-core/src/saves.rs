//! Save slots: one JSON snapshot file per slot under a directory.
//!
//! Slots are `A`, `B`, and `C`. Slot files are named
//! `cram_school_save_slot_{id}.json`. Reads and writes log failures with
//! `tracing` before returning them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use juku_types::{SaveSlot, SlotInfo};
use tracing::{info, warn};

use crate::campaign::Simulation;
use crate::error::SimError;
use crate::snapshot;

const SLOT_FILE_PREFIX: &str = "cram_school_save_slot_";

/// File-backed save-slot store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `slot`.
    pub fn path(&self, slot: SaveSlot) -> PathBuf {
        self.dir.join(format!("{SLOT_FILE_PREFIX}{}.json", slot.id()))
    }

    /// Write the current game to `slot`. Returns `false` without an active
    /// game.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] or [`SimError::Json`] if the file cannot be
    /// written.
    pub fn save(&self, simulation: &Simulation, slot: SaveSlot) -> Result<bool, SimError> {
        let Some(snapshot) = simulation.to_snapshot(Utc::now()) else {
            return Ok(false);
        };
        let path = self.path(slot);
        let result = snapshot::encode(&snapshot).and_then(|json| {
            std::fs::create_dir_all(&self.dir)?;
            std::fs::write(&path, json)?;
            Ok(())
        });
        match result {
            Ok(()) => {
                info!(slot = slot.id(), path = %path.display(), "Game saved");
                Ok(true)
            }
            Err(err) => {
                warn!(slot = slot.id(), path = %path.display(), %err, "Save failed");
                Err(err)
            }
        }
    }

    /// Replace the current game with the one stored in `slot`. Returns
    /// `false` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, or the restore
    /// errors of [`Simulation::load_snapshot`]. The current game is
    /// untouched on error.
    pub fn load(&self, simulation: &mut Simulation, slot: SaveSlot) -> Result<bool, SimError> {
        let path = self.path(slot);
        let result = read_slot(&path).and_then(|raw| {
            let Some(raw) = raw else {
                return Ok(false);
            };
            let snapshot = snapshot::decode(&raw)?;
            simulation.load_snapshot(&snapshot)?;
            Ok(true)
        });
        if let Err(err) = &result {
            warn!(slot = slot.id(), path = %path.display(), %err, "Load failed");
        }
        result
    }

    /// Describe the contents of `slot` without loading it.
    pub fn slot_info(&self, slot: SaveSlot) -> SlotInfo {
        let path = self.path(slot);
        let decoded = read_slot(&path)
            .and_then(|raw| raw.map(|json| snapshot::decode(&json)).transpose());
        match decoded {
            Ok(None) => SlotInfo {
                id: slot,
                has_data: false,
                summary: None,
                error: false,
            },
            Ok(Some(snapshot)) => SlotInfo {
                id: slot,
                has_data: true,
                summary: snapshot::summarize(&snapshot),
                error: false,
            },
            Err(err) => {
                warn!(slot = slot.id(), path = %path.display(), %err, "Slot unreadable");
                SlotInfo {
                    id: slot,
                    has_data: false,
                    summary: None,
                    error: true,
                }
            }
        }
    }

    /// Every slot, in `A`, `B`, `C` order.
    pub fn list(&self) -> Vec<SlotInfo> {
        SaveSlot::ALL.iter().map(|slot| self.slot_info(*slot)).collect()
    }

    /// Whether any slot holds readable data.
    pub fn has_any(&self) -> bool {
        self.list().iter().any(|slot| slot.has_data)
    }
}

/// Contents of a slot file, `None` when it does not exist.
fn read_slot(path: &Path) -> Result<Option<String>, SimError> {
    match std::fs::read_to_string(path) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
