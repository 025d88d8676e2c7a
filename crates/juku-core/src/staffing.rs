//! Staffing pool: issues teachers from the template catalog.
//!
//! Automatic hires walk the template list round-robin. The cursor is
//! explicit state owned by the pool and persisted in snapshots, so hiring
//! continues identically after a save/load cycle.

use juku_types::{Teacher, TeacherId, TeacherTemplate, TeacherTemplateId};
use tracing::debug;

use crate::error::{EntityKind, SimError};

/// Round-robin teacher issuer.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffingPool {
    templates: Vec<TeacherTemplate>,
    cursor: u64,
}

impl StaffingPool {
    /// A pool over `templates` with the cursor at zero.
    pub const fn new(templates: Vec<TeacherTemplate>) -> Self {
        Self {
            templates,
            cursor: 0,
        }
    }

    /// Current round-robin cursor.
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Restore a persisted cursor.
    pub const fn set_cursor(&mut self, cursor: u64) {
        self.cursor = cursor;
    }

    /// Rewind the cursor to the first template.
    pub const fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Every template, in catalog order.
    pub fn templates(&self) -> &[TeacherTemplate] {
        &self.templates
    }

    /// Look up a template by id.
    pub fn template(&self, id: &TeacherTemplateId) -> Option<&TeacherTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    /// Move the cursor to just after template `id`. Returns whether the
    /// template exists; the cursor is untouched when it does not.
    pub fn skip_past(&mut self, id: &TeacherTemplateId) -> bool {
        let Some(index) = self.templates.iter().position(|t| &t.id == id) else {
            return false;
        };
        self.cursor = u64::try_from(index)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        true
    }

    /// Issue a teacher from the template at `cursor mod len` and advance.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if the pool has no templates.
    pub fn issue_next(&mut self) -> Result<Teacher, SimError> {
        let len = u64::try_from(self.templates.len()).unwrap_or(u64::MAX);
        let template = self
            .cursor
            .checked_rem(len)
            .and_then(|slot| usize::try_from(slot).ok())
            .and_then(|slot| self.templates.get(slot))
            .ok_or_else(|| SimError::Configuration {
                reason: "teacher catalog is empty".to_owned(),
            })?;

        let teacher = hire(template);
        self.cursor = self.cursor.wrapping_add(1);
        debug!(
            template = %template.id,
            teacher = %teacher.id,
            cursor = self.cursor,
            "Teacher issued"
        );
        Ok(teacher)
    }

    /// Issue a teacher from a named template. The cursor is not moved.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotFound`] if no template has that id.
    pub fn issue_from_template(&self, id: &TeacherTemplateId) -> Result<Teacher, SimError> {
        self.template(id)
            .map(hire)
            .ok_or_else(|| SimError::NotFound {
                kind: EntityKind::TeacherTemplate,
                id: id.to_string(),
            })
    }
}

fn hire(template: &TeacherTemplate) -> Teacher {
    Teacher::from_template(template, TeacherId::generate(&template.id))
}
