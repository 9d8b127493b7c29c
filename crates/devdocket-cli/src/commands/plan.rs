use clap::Subcommand;
use devdocket_core::records::{Plan, PlanDraft, PlanFlag, PlanStats, Priority};
use devdocket_core::{Notice, Query, Record, RecordId};

use super::{check_mark, show_list, show_removed, show_saved};
use crate::shell::{CliResult, Shell};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Plan a stack to learn
    Add {
        /// Technology or stack name
        stack: String,
        /// Course, book or docs to learn from
        #[arg(long, default_value = "")]
        resource: String,
        #[arg(long, default_value = "")]
        goal: String,
        /// Low, Medium or High
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// List plans, newest first
    List {
        #[arg(long)]
        priority: Option<Priority>,
        /// Case-insensitive match on the stack
        #[arg(long)]
        search: Option<String>,
    },
    /// Edit a plan; omitted fields keep their value
    Update {
        id: RecordId,
        #[arg(long)]
        stack: Option<String>,
        #[arg(long)]
        resource: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Delete a plan
    Delete { id: RecordId },
    /// Toggle the done mark
    Toggle { id: RecordId },
    /// Done and pending counts
    Stats,
}

fn render(p: &Plan) {
    println!(
        "{}  {} {}  [{}]",
        p.id,
        check_mark(p.completed),
        p.stack,
        p.priority
    );
    if !p.goal.is_empty() {
        println!("    goal: {}", p.goal);
    }
    if !p.resource.is_empty() {
        println!("    via:  {}", p.resource);
    }
}

pub fn run(shell: &Shell, action: PlanAction) -> CliResult {
    let mut plans = shell.mount::<Plan>();
    match action {
        PlanAction::Add {
            stack,
            resource,
            goal,
            priority,
        } => {
            let draft = PlanDraft {
                stack,
                resource,
                goal,
                priority: priority.unwrap_or_default(),
            };
            let added = shell.check(plans.add(draft))?;
            show_saved(shell, Notice::added(Plan::LABEL), added, render)?;
        }
        PlanAction::List { priority, search } => {
            let mut query = Query::new().eq_opt(|p: &Plan| p.priority, priority);
            if let Some(needle) = &search {
                query = query.text(needle);
            }
            show_list(shell, &plans.query(&query), render)?;
        }
        PlanAction::Update {
            id,
            stack,
            resource,
            goal,
            priority,
        } => {
            let current = shell.check(plans.get(id))?;
            let draft = PlanDraft {
                stack: stack.unwrap_or_else(|| current.stack.clone()),
                resource: resource.unwrap_or_else(|| current.resource.clone()),
                goal: goal.unwrap_or_else(|| current.goal.clone()),
                priority: priority.unwrap_or(current.priority),
            };
            let updated = shell.check(plans.update(id, draft))?;
            show_saved(shell, Notice::updated(Plan::LABEL), updated, render)?;
        }
        PlanAction::Delete { id } => {
            let removed = plans.remove(id)?;
            show_removed(shell, id, removed)?;
        }
        PlanAction::Toggle { id } => {
            let toggled = shell.check(plans.toggle(id, PlanFlag::Completed))?;
            show_saved(shell, Notice::updated(Plan::LABEL), toggled, render)?;
        }
        PlanAction::Stats => {
            let stats = PlanStats::of(plans.records());
            shell.emit(&stats, |s| {
                println!("Total:   {}", s.total);
                println!("Done:    {}", s.done);
                println!("Pending: {}", s.pending);
            })?;
        }
    }
    Ok(())
}
