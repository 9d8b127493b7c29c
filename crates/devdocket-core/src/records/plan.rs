//! Tech stack switch planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Record, RecordId};
use crate::error::ValidationError;

choice_enum! {
    #[derive(Default)]
    pub enum Priority as "priority" {
        Low => "Low",
        #[default]
        Medium => "Medium",
        High => "High",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: RecordId,
    pub stack: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub goal: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct PlanDraft {
    pub stack: String,
    pub resource: String,
    pub goal: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFlag {
    Completed,
}

impl Record for Plan {
    type Draft = PlanDraft;
    type Flag = PlanFlag;

    const NAMESPACE: &'static str = "devdocket_tech_plans";
    const LABEL: &'static str = "plan";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(draft: &PlanDraft) -> Result<(), ValidationError> {
        require_text("stack", &draft.stack)
    }

    fn create(id: RecordId, created_at: DateTime<Utc>, draft: PlanDraft) -> Self {
        Self {
            id,
            stack: draft.stack.trim().to_string(),
            resource: draft.resource,
            goal: draft.goal,
            priority: draft.priority,
            completed: false,
            created_at,
        }
    }

    fn apply(&mut self, draft: PlanDraft, _edited_at: DateTime<Utc>) {
        self.stack = draft.stack.trim().to_string();
        self.resource = draft.resource;
        self.goal = draft.goal;
        self.priority = draft.priority;
    }

    fn toggle(&mut self, flag: PlanFlag) {
        match flag {
            PlanFlag::Completed => self.completed = !self.completed,
        }
    }

    fn search_text(&self) -> &str {
        &self.stack
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
}

impl PlanStats {
    pub fn of(plans: &[Plan]) -> Self {
        let done = plans.iter().filter(|p| p.completed).count();
        Self {
            total: plans.len(),
            done,
            pending: plans.len() - done,
        }
    }
}
