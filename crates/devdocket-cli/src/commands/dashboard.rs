use devdocket_core::records::{JournalEntry, Plan, Problem};
use devdocket_core::timer::TIMER_KEY;
use devdocket_core::{DashboardSummary, TimerSession};

use crate::shell::{CliResult, Shell};

fn breaks_taken(shell: &Shell) -> u64 {
    shell
        .db
        .kv_get(TIMER_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str::<TimerSession>(&json).ok())
        .map_or(0, |session| session.completed_sessions)
}

pub fn run(shell: &Shell) -> CliResult {
    let problems = shell.mount::<Problem>();
    let journal = shell.mount::<JournalEntry>();
    let bugs = shell.mount_bugs()?;
    let plans = shell.mount::<Plan>();

    let summary = DashboardSummary::collect(
        problems.records(),
        journal.records(),
        bugs.records(),
        plans.records(),
        breaks_taken(shell),
    );

    shell.emit(&summary, |s| {
        println!("DevDocket ({} mode)", if shell.config.ui.dark_mode { "dark" } else { "light" });
        println!();
        println!(
            "Coding practice  {} solved, {} min total, {} min avg",
            s.coding.total, s.coding.total_minutes, s.coding.average_minutes
        );
        println!("Micro journal    {} entries", s.journal.total);
        if let Some(latest) = &s.journal.latest {
            println!("                 latest: {latest}");
        }
        println!(
            "Bug vault        {} bugs, {} pending, {} resolved",
            s.bugs.total, s.bugs.pending, s.bugs.resolved
        );
        println!(
            "Tech plans       {} plans, {} done, {} pending",
            s.plans.total, s.plans.done, s.plans.pending
        );
        if let Some(focus) = &s.focus {
            println!("                 focus: {focus}");
        }
        println!("Break Buddy      {} breaks taken", s.breaks_taken);
    })
}
