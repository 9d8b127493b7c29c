//! Micro journal: short timestamped notes.

use std::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Record, RecordId};
use crate::error::ValidationError;

pub const DEFAULT_CHAR_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: RecordId,
    pub text: String,
    /// Last written, bumped on every edit.
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct JournalDraft {
    pub text: String,
    pub char_limit: usize,
}

impl JournalDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }

    pub fn with_limit(mut self, char_limit: usize) -> Self {
        self.char_limit = char_limit;
        self
    }
}

impl Record for JournalEntry {
    type Draft = JournalDraft;
    type Flag = Infallible;

    const NAMESPACE: &'static str = "devdocket_micro_journal";
    const LABEL: &'static str = "journal entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(draft: &JournalDraft) -> Result<(), ValidationError> {
        require_text("text", &draft.text)?;
        let len = draft.text.chars().count();
        if len > draft.char_limit {
            return Err(ValidationError::TooLong {
                field: "text",
                limit: draft.char_limit,
                len,
            });
        }
        Ok(())
    }

    fn create(id: RecordId, created_at: DateTime<Utc>, draft: JournalDraft) -> Self {
        Self {
            id,
            text: draft.text,
            date: created_at,
            created_at,
        }
    }

    fn apply(&mut self, draft: JournalDraft, edited_at: DateTime<Utc>) {
        self.text = draft.text;
        self.date = edited_at;
    }

    fn toggle(&mut self, flag: Infallible) {
        match flag {}
    }

    fn search_text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalStats {
    pub total: usize,
    /// Text of the newest entry.
    pub latest: Option<String>,
}

impl JournalStats {
    pub fn of(entries: &[JournalEntry]) -> Self {
        Self {
            total: entries.len(),
            latest: entries.first().map(|e| e.text.clone()),
        }
    }
}
