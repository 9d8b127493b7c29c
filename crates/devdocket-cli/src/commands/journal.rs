use clap::Subcommand;
use devdocket_core::records::{JournalDraft, JournalEntry, JournalStats};
use devdocket_core::{Notice, Query, Record, RecordId};

use super::{show_list, show_removed, show_saved};
use crate::shell::{CliResult, Shell};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write a short entry
    Add { text: String },
    /// List entries, newest first
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Rewrite an entry
    Update { id: RecordId, text: String },
    /// Delete an entry
    Delete { id: RecordId },
    /// Entry count and latest entry
    Stats,
}

fn render(e: &JournalEntry) {
    println!("{}  {}  {}", e.id, e.date.format("%Y-%m-%d %H:%M"), e.text);
}

pub fn run(shell: &Shell, action: JournalAction) -> CliResult {
    let limit = shell.config.journal.char_limit;
    let mut journal = shell.mount::<JournalEntry>();
    match action {
        JournalAction::Add { text } => {
            let added = shell.check(journal.add(JournalDraft::new(text).with_limit(limit)))?;
            show_saved(shell, Notice::added(JournalEntry::LABEL), added, render)?;
        }
        JournalAction::List { search } => {
            let query = search.map_or_else(Query::new, |needle| Query::new().text(needle));
            show_list(shell, &journal.query(&query), render)?;
        }
        JournalAction::Update { id, text } => {
            let draft = JournalDraft::new(text).with_limit(limit);
            let updated = shell.check(journal.update(id, draft))?;
            show_saved(shell, Notice::updated(JournalEntry::LABEL), updated, render)?;
        }
        JournalAction::Delete { id } => {
            let removed = journal.remove(id)?;
            show_removed(shell, id, removed)?;
        }
        JournalAction::Stats => {
            let stats = JournalStats::of(journal.records());
            shell.emit(&stats, |s| {
                println!("Entries: {}", s.total);
                if let Some(latest) = &s.latest {
                    println!("Latest:  {latest}");
                }
            })?;
        }
    }
    Ok(())
}
