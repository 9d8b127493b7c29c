use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::CountdownState;

/// Every timer state change produces an Event.
/// The shell renders them; `SessionCompleted` also drives the chime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerConfigured {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_secs: u32,
        quote: String,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero, naturally or via skip. Emitted once per session.
    SessionCompleted {
        completed_sessions: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: CountdownState,
        remaining_secs: u32,
        total_secs: u32,
        progress: f64,
        completed_sessions: u64,
        quote: Option<String>,
        at: DateTime<Utc>,
    },
}
