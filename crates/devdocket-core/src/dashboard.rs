//! Landing-page summary across every widget.

use serde::{Deserialize, Serialize};

use crate::records::{
    Bug, BugStats, JournalEntry, JournalStats, Plan, PlanStats, Priority, Problem, ProblemStats,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub coding: ProblemStats,
    pub journal: JournalStats,
    pub bugs: BugStats,
    pub plans: PlanStats,
    /// Breaks finished with Break Buddy.
    pub breaks_taken: u64,
    /// Stack currently being explored: the newest unfinished plan, preferring
    /// high priority.
    pub focus: Option<String>,
}

impl DashboardSummary {
    pub fn collect(
        problems: &[Problem],
        entries: &[JournalEntry],
        bugs: &[Bug],
        plans: &[Plan],
        breaks_taken: u64,
    ) -> Self {
        let open = || plans.iter().filter(|p| !p.completed);
        let focus = open()
            .find(|p| p.priority == Priority::High)
            .or_else(|| open().next())
            .map(|p| p.stack.clone());
        Self {
            coding: ProblemStats::of(problems),
            journal: JournalStats::of(entries),
            bugs: BugStats::of(bugs),
            plans: PlanStats::of(plans),
            breaks_taken,
            focus,
        }
    }
}
