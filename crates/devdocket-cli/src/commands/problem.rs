use clap::Subcommand;
use devdocket_core::records::{Difficulty, Problem, ProblemDraft, ProblemFlag, ProblemStats};
use devdocket_core::{Notice, Query, Record, RecordId};

use super::{check_mark, show_list, show_removed, show_saved};
use crate::shell::{CliResult, Shell};

#[derive(Subcommand)]
pub enum ProblemAction {
    /// Log a solved practice problem
    Add {
        /// Problem name
        name: String,
        /// Minutes spent
        #[arg(long)]
        time: Option<u32>,
        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Link to the problem
        #[arg(long, default_value = "")]
        link: String,
    },
    /// List problems, newest first
    List {
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Case-insensitive match on the name
        #[arg(long)]
        search: Option<String>,
    },
    /// Edit a problem; omitted fields keep their value
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        time: Option<u32>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Delete a problem
    Delete { id: RecordId },
    /// Toggle the completed mark
    Done { id: RecordId },
    /// Totals and average time
    Stats,
}

fn render(p: &Problem) {
    let mut line = format!(
        "{}  {} {}  [{}] {} min",
        p.id,
        check_mark(p.completed),
        p.name,
        p.difficulty,
        p.time
    );
    if !p.link.is_empty() {
        line.push_str("  ");
        line.push_str(&p.link);
    }
    println!("{line}");
}

pub fn run(shell: &Shell, action: ProblemAction) -> CliResult {
    let mut problems = shell.mount::<Problem>();
    match action {
        ProblemAction::Add {
            name,
            time,
            difficulty,
            link,
        } => {
            let draft = ProblemDraft {
                name,
                time,
                difficulty: difficulty.unwrap_or_default(),
                link,
            };
            let added = shell.check(problems.add(draft))?;
            show_saved(shell, Notice::added(Problem::LABEL), added, render)?;
        }
        ProblemAction::List { difficulty, search } => {
            let mut query = Query::new().eq_opt(|p: &Problem| p.difficulty, difficulty);
            if let Some(needle) = &search {
                query = query.text(needle);
            }
            show_list(shell, &problems.query(&query), render)?;
        }
        ProblemAction::Update {
            id,
            name,
            time,
            difficulty,
            link,
        } => {
            let current = shell.check(problems.get(id))?;
            let draft = ProblemDraft {
                name: name.unwrap_or_else(|| current.name.clone()),
                time: time.or(Some(current.time)),
                difficulty: difficulty.unwrap_or(current.difficulty),
                link: link.unwrap_or_else(|| current.link.clone()),
            };
            let updated = shell.check(problems.update(id, draft))?;
            show_saved(shell, Notice::updated(Problem::LABEL), updated, render)?;
        }
        ProblemAction::Delete { id } => {
            let removed = problems.remove(id)?;
            show_removed(shell, id, removed)?;
        }
        ProblemAction::Done { id } => {
            let toggled = shell.check(problems.toggle(id, ProblemFlag::Completed))?;
            show_saved(shell, Notice::updated(Problem::LABEL), toggled, render)?;
        }
        ProblemAction::Stats => {
            let stats = ProblemStats::of(problems.records());
            shell.emit(&stats, |s| {
                println!("Total solved:  {}", s.total);
                println!("Total minutes: {}", s.total_minutes);
                println!("Average time:  {} min", s.average_minutes);
            })?;
        }
    }
    Ok(())
}
