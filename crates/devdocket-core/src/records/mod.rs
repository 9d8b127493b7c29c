//! Widget records and the generic controller that manages them.
//!
//! Each widget (coding practice, journal, bug vault, tech plans) is a
//! [`Record`] implementation plugged into the same [`CrudController`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Declares a closed set of labelled choices (difficulty, priority, ...).
///
/// The label is both the persisted form and the accepted CLI spelling
/// (matched case-insensitively).
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| $crate::error::ValidationError::InvalidValue {
                        field: $field,
                        message: format!(
                            "'{wanted}' is not one of {}",
                            [$($label),+].join(", ")
                        ),
                    })
            }
        }
    };
}

mod bug;
mod controller;
mod journal;
mod plan;
mod problem;
mod query;

pub use bug::{Bug, BugDraft, BugFlag, BugStats, BugStatus, ErrorType, TechStack};
pub use controller::{CrudController, EditSession};
pub use journal::{JournalDraft, JournalEntry, JournalStats, DEFAULT_CHAR_LIMIT};
pub use plan::{Plan, PlanDraft, PlanFlag, PlanStats, Priority};
pub use problem::{Difficulty, Problem, ProblemDraft, ProblemFlag, ProblemStats};
pub use query::Query;

/// Identifier assigned at creation.
///
/// Derived from the creation time in epoch milliseconds and bumped past the
/// largest id already in the list, so ids stay unique and increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Next id for a list whose largest id is `last`.
    pub fn next_after(last: Option<RecordId>, now: DateTime<Utc>) -> RecordId {
        let from_clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match last {
            Some(RecordId(last)) => RecordId(from_clock.max(last.saturating_add(1))),
            None => RecordId(from_clock),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RecordId)
            .map_err(|e| ValidationError::InvalidValue {
                field: "id",
                message: e.to_string(),
            })
    }
}

/// One widget's record schema.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// User-submitted fields for create and update.
    type Draft;
    /// Status fields that can be flipped after creation.
    type Flag: Copy;

    /// Storage key of this widget's list.
    const NAMESPACE: &'static str;
    /// Human name used in notices ("problem", "plan", ...).
    const LABEL: &'static str;

    fn id(&self) -> RecordId;

    /// Check required fields without touching any list.
    fn validate(draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Build a fresh record from an already validated draft.
    fn create(id: RecordId, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    /// Overwrite the mutable fields from an already validated draft.
    fn apply(&mut self, draft: Self::Draft, edited_at: DateTime<Utc>);

    fn toggle(&mut self, flag: Self::Flag);

    /// Text matched by free-text search.
    fn search_text(&self) -> &str;
}

/// Trimmed text or a [`ValidationError::MissingField`].
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}
