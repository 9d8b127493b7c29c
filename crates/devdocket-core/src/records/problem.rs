//! Coding practice log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Record, RecordId};
use crate::error::ValidationError;

choice_enum! {
    /// How hard a practice problem was.
    #[derive(Default)]
    pub enum Difficulty as "difficulty" {
        Easy => "Easy",
        #[default]
        Medium => "Medium",
        Hard => "Hard",
    }
}

/// One solved practice problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: RecordId,
    pub name: String,
    /// Minutes spent.
    pub time: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ProblemDraft {
    pub name: String,
    pub time: Option<u32>,
    pub difficulty: Difficulty,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFlag {
    Completed,
}

impl Record for Problem {
    type Draft = ProblemDraft;
    type Flag = ProblemFlag;

    const NAMESPACE: &'static str = "devdocket_coding_problems";
    const LABEL: &'static str = "problem";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(draft: &ProblemDraft) -> Result<(), ValidationError> {
        require_text("name", &draft.name)?;
        if draft.time.is_none() {
            return Err(ValidationError::MissingField { field: "time" });
        }
        Ok(())
    }

    fn create(id: RecordId, created_at: DateTime<Utc>, draft: ProblemDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            time: draft.time.unwrap_or_default(),
            difficulty: draft.difficulty,
            link: draft.link.trim().to_string(),
            completed: false,
            created_at,
        }
    }

    fn apply(&mut self, draft: ProblemDraft, _edited_at: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.time = draft.time.unwrap_or(self.time);
        self.difficulty = draft.difficulty;
        self.link = draft.link.trim().to_string();
    }

    fn toggle(&mut self, flag: ProblemFlag) {
        match flag {
            ProblemFlag::Completed => self.completed = !self.completed,
        }
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

/// Header chips of the practice tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemStats {
    pub total: usize,
    pub total_minutes: u64,
    /// Mean minutes per problem, rounded half away from zero.
    pub average_minutes: u64,
}

impl ProblemStats {
    pub fn of(problems: &[Problem]) -> Self {
        let total = problems.len();
        let total_minutes: u64 = problems.iter().map(|p| u64::from(p.time)).sum();
        let average_minutes = if total == 0 {
            0
        } else {
            (total_minutes as f64 / total as f64).round() as u64
        };
        Self {
            total,
            total_minutes,
            average_minutes,
        }
    }
}
