//! Static template catalogs: campus locations and teacher templates.
//!
//! Both catalogs are JSON arrays read once at startup. An unreadable or
//! malformed file, an empty catalog, or a duplicated id is a fatal
//! [`SimError::Configuration`].

use std::collections::BTreeSet;
use std::path::Path;

use juku_types::{CampusId, CampusTemplate, TeacherTemplate, TeacherTemplateId};
use tracing::info;

use crate::config::CatalogConfig;
use crate::error::SimError;

/// The campus and teacher template catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    campuses: Vec<CampusTemplate>,
    teachers: Vec<TeacherTemplate>,
}

impl Catalog {
    /// Build a catalog from already-parsed templates.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if either list is empty or
    /// contains a duplicated id.
    pub fn new(
        campuses: Vec<CampusTemplate>,
        teachers: Vec<TeacherTemplate>,
    ) -> Result<Self, SimError> {
        if campuses.is_empty() {
            return Err(configuration("campus catalog is empty"));
        }
        if teachers.is_empty() {
            return Err(configuration("teacher catalog is empty"));
        }
        if let Some(id) = first_duplicate(campuses.iter().map(|c| c.id.as_str())) {
            return Err(configuration(format!("duplicate campus id: {id}")));
        }
        if let Some(id) = first_duplicate(teachers.iter().map(|t| t.id.as_str())) {
            return Err(configuration(format!("duplicate teacher template id: {id}")));
        }
        Ok(Self { campuses, teachers })
    }

    /// Parse both catalogs from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if either document is malformed
    /// or fails [`Catalog::new`] validation.
    pub fn from_json(campuses_json: &str, teachers_json: &str) -> Result<Self, SimError> {
        let campuses: Vec<CampusTemplate> = serde_json::from_str(campuses_json)
            .map_err(|e| configuration(format!("malformed campus catalog: {e}")))?;
        let teachers: Vec<TeacherTemplate> = serde_json::from_str(teachers_json)
            .map_err(|e| configuration(format!("malformed teacher catalog: {e}")))?;
        Self::new(campuses, teachers)
    }

    /// Read both catalogs from the files named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if a file cannot be read or
    /// fails [`Catalog::from_json`].
    pub fn load(config: &CatalogConfig) -> Result<Self, SimError> {
        let campuses = read_catalog_file(&config.campuses_path)?;
        let teachers = read_catalog_file(&config.teachers_path)?;
        let catalog = Self::from_json(&campuses, &teachers)?;
        info!(
            campuses = catalog.campuses.len(),
            teachers = catalog.teachers.len(),
            "Catalogs loaded"
        );
        Ok(catalog)
    }

    /// Every campus template, in catalog order.
    pub fn campuses(&self) -> &[CampusTemplate] {
        &self.campuses
    }

    /// Every teacher template, in catalog order.
    pub fn teachers(&self) -> &[TeacherTemplate] {
        &self.teachers
    }

    /// Look up a campus template by id.
    pub fn campus(&self, id: &CampusId) -> Option<&CampusTemplate> {
        self.campuses.iter().find(|c| &c.id == id)
    }

    /// Look up a teacher template by id.
    pub fn teacher(&self, id: &TeacherTemplateId) -> Option<&TeacherTemplate> {
        self.teachers.iter().find(|t| &t.id == id)
    }
}

fn read_catalog_file(path: &Path) -> Result<String, SimError> {
    std::fs::read_to_string(path)
        .map_err(|e| configuration(format!("cannot read {}: {e}", path.display())))
}

fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = BTreeSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

fn configuration(reason: impl Into<String>) -> SimError {
    SimError::Configuration {
        reason: reason.into(),
    }
}
