//! Bug vault: errors hit and how they were fixed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Record, RecordId};
use crate::error::ValidationError;

choice_enum! {
    #[derive(Default)]
    pub enum TechStack as "techStack" {
        #[default]
        React => "React",
        JavaScript => "JavaScript",
        NodeJs => "Node.js",
        Python => "Python",
        Css => "CSS",
    }
}

choice_enum! {
    #[derive(Default)]
    pub enum ErrorType as "errorType" {
        #[default]
        Runtime => "Runtime",
        Syntax => "Syntax",
        Logic => "Logic",
        Network => "Network",
        Other => "Other",
    }
}

choice_enum! {
    pub enum BugStatus as "status" {
        Pending => "Pending",
        Resolved => "Resolved",
    }
}

impl BugStatus {
    pub fn flipped(self) -> Self {
        match self {
            BugStatus::Pending => BugStatus::Resolved,
            BugStatus::Resolved => BugStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: RecordId,
    pub title: String,
    pub tech_stack: TechStack,
    pub error_type: ErrorType,
    #[serde(default)]
    pub solution: String,
    pub status: BugStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BugDraft {
    pub title: String,
    pub tech_stack: TechStack,
    pub error_type: ErrorType,
    pub solution: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugFlag {
    Status,
}

impl Record for Bug {
    type Draft = BugDraft;
    type Flag = BugFlag;

    const NAMESPACE: &'static str = "devdocket_bug_vault";
    const LABEL: &'static str = "bug";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(draft: &BugDraft) -> Result<(), ValidationError> {
        require_text("title", &draft.title)
    }

    fn create(id: RecordId, created_at: DateTime<Utc>, draft: BugDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            tech_stack: draft.tech_stack,
            error_type: draft.error_type,
            solution: draft.solution,
            status: BugStatus::Pending,
            created_at,
        }
    }

    fn apply(&mut self, draft: BugDraft, _edited_at: DateTime<Utc>) {
        self.title = draft.title.trim().to_string();
        self.tech_stack = draft.tech_stack;
        self.error_type = draft.error_type;
        self.solution = draft.solution;
    }

    fn toggle(&mut self, flag: BugFlag) {
        match flag {
            BugFlag::Status => self.status = self.status.flipped(),
        }
    }

    fn search_text(&self) -> &str {
        &self.title
    }
}

impl Bug {
    /// Example entries a fresh session-only vault opens with.
    pub fn samples(created_at: DateTime<Utc>) -> Vec<Bug> {
        vec![
            Bug {
                id: RecordId(1),
                title: "TypeError: undefined is not a function".into(),
                tech_stack: TechStack::React,
                error_type: ErrorType::Runtime,
                solution: "Checked method call and fixed the binding.".into(),
                status: BugStatus::Pending,
                created_at,
            },
            Bug {
                id: RecordId(2),
                title: "Cannot read property \"map\" of undefined".into(),
                tech_stack: TechStack::JavaScript,
                error_type: ErrorType::Logic,
                solution: "Added null check before mapping.".into(),
                status: BugStatus::Resolved,
                created_at,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugStats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
}

impl BugStats {
    pub fn of(bugs: &[Bug]) -> Self {
        let pending = bugs.iter().filter(|b| b.status == BugStatus::Pending).count();
        Self {
            total: bugs.len(),
            pending,
            resolved: bugs.len() - pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bugs_start_pending_and_toggle_back_and_forth() {
        let mut bug = Bug::create(
            RecordId(1),
            Utc::now(),
            BugDraft {
                title: "Cannot read property \"map\" of undefined".into(),
                ..BugDraft::default()
            },
        );
        assert_eq!(bug.status, BugStatus::Pending);
        bug.toggle(BugFlag::Status);
        assert_eq!(bug.status, BugStatus::Resolved);
        bug.toggle(BugFlag::Status);
        assert_eq!(bug.status, BugStatus::Pending);
    }

    #[test]
    fn edit_keeps_status() {
        let mut bug = Bug::create(RecordId(1), Utc::now(), BugDraft {
            title: "flaky".into(),
            ..BugDraft::default()
        });
        bug.toggle(BugFlag::Status);
        bug.apply(
            BugDraft {
                title: "flaky fetch".into(),
                error_type: ErrorType::Network,
                ..BugDraft::default()
            },
            Utc::now(),
        );
        assert_eq!(bug.status, BugStatus::Resolved);
        assert_eq!(bug.error_type, ErrorType::Network);
    }

    #[test]
    fn persisted_layout_uses_camel_case_labels() {
        let bug = Bug::create(RecordId(9), Utc::now(), BugDraft {
            title: "EADDRINUSE".into(),
            tech_stack: TechStack::NodeJs,
            error_type: ErrorType::Network,
            solution: "kill the stale server".into(),
        });
        let json = serde_json::to_value(&bug).unwrap();
        assert_eq!(json["techStack"], "Node.js");
        assert_eq!(json["errorType"], "Network");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn samples_cover_both_statuses_with_distinct_ids() {
        let samples = Bug::samples(Utc::now());
        assert_eq!(samples.len(), 2);
        assert_ne!(samples[0].id, samples[1].id);
        let stats = BugStats::of(&samples);
        assert_eq!((stats.pending, stats.resolved), (1, 1));
        assert!(samples.iter().all(|b| Bug::validate(&BugDraft {
            title: b.title.clone(),
            ..BugDraft::default()
        })
        .is_ok()));
    }

    #[test]
    fn stats_split_pending_and_resolved() {
        let mut bugs: Vec<Bug> = (1..=3)
            .map(|i| Bug::create(RecordId(i), Utc::now(), BugDraft {
                title: format!("bug {i}"),
                ..BugDraft::default()
            }))
            .collect();
        bugs[1].toggle(BugFlag::Status);
        assert_eq!(
            BugStats::of(&bugs),
            BugStats {
                total: 3,
                pending: 2,
                resolved: 1
            }
        );
    }
}
