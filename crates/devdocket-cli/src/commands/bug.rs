use clap::Subcommand;
use devdocket_core::records::{Bug, BugDraft, BugFlag, BugStats, BugStatus, ErrorType, TechStack};
use devdocket_core::{Notice, Persistence, Query, Record, RecordId};

use super::{show_list, show_removed, show_saved};
use crate::shell::{CliResult, Shell};

#[derive(Subcommand)]
pub enum BugAction {
    /// Record a bug and its fix
    Add {
        /// Error message or short title
        title: String,
        /// React, JavaScript, Node.js, Python or CSS
        #[arg(long)]
        stack: Option<TechStack>,
        /// Runtime, Syntax, Logic, Network or Other
        #[arg(long)]
        error_type: Option<ErrorType>,
        #[arg(long, default_value = "")]
        solution: String,
    },
    /// List bugs, newest first
    List {
        #[arg(long)]
        stack: Option<TechStack>,
        #[arg(long)]
        error_type: Option<ErrorType>,
        /// Pending or Resolved
        #[arg(long)]
        status: Option<BugStatus>,
        /// Case-insensitive match on the title
        #[arg(long)]
        search: Option<String>,
    },
    /// Edit a bug; omitted fields keep their value
    Update {
        id: RecordId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        stack: Option<TechStack>,
        #[arg(long)]
        error_type: Option<ErrorType>,
        #[arg(long)]
        solution: Option<String>,
    },
    /// Delete a bug
    Delete { id: RecordId },
    /// Flip between Pending and Resolved
    Toggle { id: RecordId },
    /// Pending and resolved counts
    Stats,
}

fn render(b: &Bug) {
    println!(
        "{}  [{}] {}  ({} / {})",
        b.id, b.status, b.title, b.tech_stack, b.error_type
    );
    if !b.solution.is_empty() {
        println!("    fix: {}", b.solution);
    }
}

pub fn run(shell: &Shell, action: BugAction) -> CliResult {
    if shell.config.storage.bug_vault == Persistence::SessionOnly {
        shell.notify(Notice::info("bug vault is session-only; nothing is kept after exit"));
    }
    let mut bugs = shell.mount_bugs()?;
    match action {
        BugAction::Add {
            title,
            stack,
            error_type,
            solution,
        } => {
            let draft = BugDraft {
                title,
                tech_stack: stack.unwrap_or_default(),
                error_type: error_type.unwrap_or_default(),
                solution,
            };
            let added = shell.check(bugs.add(draft))?;
            show_saved(shell, Notice::added(Bug::LABEL), added, render)?;
        }
        BugAction::List {
            stack,
            error_type,
            status,
            search,
        } => {
            let mut query = Query::new()
                .eq_opt(|b: &Bug| b.tech_stack, stack)
                .eq_opt(|b: &Bug| b.error_type, error_type)
                .eq_opt(|b: &Bug| b.status, status);
            if let Some(needle) = &search {
                query = query.text(needle);
            }
            show_list(shell, &bugs.query(&query), render)?;
        }
        BugAction::Update {
            id,
            title,
            stack,
            error_type,
            solution,
        } => {
            let current = shell.check(bugs.get(id))?;
            let draft = BugDraft {
                title: title.unwrap_or_else(|| current.title.clone()),
                tech_stack: stack.unwrap_or(current.tech_stack),
                error_type: error_type.unwrap_or(current.error_type),
                solution: solution.unwrap_or_else(|| current.solution.clone()),
            };
            let updated = shell.check(bugs.update(id, draft))?;
            show_saved(shell, Notice::updated(Bug::LABEL), updated, render)?;
        }
        BugAction::Delete { id } => {
            let removed = bugs.remove(id)?;
            show_removed(shell, id, removed)?;
        }
        BugAction::Toggle { id } => {
            let toggled = shell.check(bugs.toggle(id, BugFlag::Status))?;
            show_saved(shell, Notice::updated(Bug::LABEL), toggled, render)?;
        }
        BugAction::Stats => {
            let stats = BugStats::of(bugs.records());
            shell.emit(&stats, |s| {
                println!("Total:    {}", s.total);
                println!("Pending:  {}", s.pending);
                println!("Resolved: {}", s.resolved);
            })?;
        }
    }
    Ok(())
}
