//! Type-safe identifier wrappers around [`String`].
//!
//! Catalog entities (campuses, teacher templates) are keyed by the ids that
//! appear in the static JSON catalogs, and runtime entities (teachers,
//! classrooms) carry ids that must survive a save/load round-trip unchanged.
//! Every identifier is therefore a plain string on the wire, wrapped in a
//! distinct newtype so the compiler rejects accidental mixing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key! {
    /// Identifier of a campus, taken from the static campus catalog.
    CampusId
}

define_key! {
    /// Identifier of a teacher template in the static teacher catalog.
    TeacherTemplateId
}

define_key! {
    /// Unique identifier of a hired teacher instance.
    TeacherId
}

define_key! {
    /// Identifier of a classroom, scoped to its owning campus.
    ClassroomId
}

impl TeacherId {
    /// Generate a fresh teacher id for an instance of `template`.
    ///
    /// The id is `{template}-{uuid}` where the UUID is v7 (time-ordered),
    /// so two hires from the same template never collide.
    pub fn generate(template: &TeacherTemplateId) -> Self {
        Self(format!("{template}-{}", Uuid::now_v7().simple()))
    }
}

impl ClassroomId {
    /// Build the id of the classroom at 1-based `position` within `campus`.
    pub fn for_position(campus: &CampusId, position: usize) -> Self {
        Self(format!("{campus}-cls-{position}"))
    }
}
