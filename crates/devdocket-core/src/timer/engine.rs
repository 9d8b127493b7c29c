//! Break Buddy countdown engine.
//!
//! A tick-driven state machine. It owns no threads: something must call
//! `tick()` once per second while the engine is `Running`, either directly or
//! through [`CountdownEngine::run`] which pulls ticks from the engine's
//! [`TickSource`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running)* -> Expired -> Idle
//!           \-> skip --------------------/      (reset / configure)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::quotes::{pick_quote, QuotePicker};
use super::tick::TickSource;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    /// Not started, `remaining == total`.
    Idle,
    Running,
    /// Stopped mid-session, `remaining` frozen.
    Paused,
    /// Reached zero; only `reset` or `configure` leave this state.
    Expired,
}

/// Persistable view of a countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSession {
    pub total_secs: u32,
    pub remaining_secs: u32,
    pub state: CountdownState,
    #[serde(default)]
    pub completed_sessions: u64,
}

impl TimerSession {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            state: CountdownState::Idle,
            completed_sessions: 0,
        }
    }
}

/// Clamp user input into a duration. Seconds land in `0..=59`, minutes are
/// floored at zero.
pub fn clamp_duration(minutes: i64, seconds: i64) -> u32 {
    let minutes = u32::try_from(minutes.max(0)).unwrap_or(u32::MAX);
    let seconds = seconds.clamp(0, 59) as u32;
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// Core countdown engine.
pub struct CountdownEngine<T: TickSource, P: QuotePicker> {
    total_secs: u32,
    remaining_secs: u32,
    state: CountdownState,
    completed_sessions: u64,
    quote: Option<&'static str>,
    ticks: T,
    picker: P,
}

impl<T: TickSource, P: QuotePicker> CountdownEngine<T, P> {
    /// Idle engine configured for `minutes:seconds` (clamped).
    pub fn new(minutes: i64, seconds: i64, ticks: T, picker: P) -> Self {
        Self::restore(TimerSession::new(clamp_duration(minutes, seconds)), ticks, picker)
    }

    /// Rebuild an engine from a saved session.
    ///
    /// A session saved while `Running` comes back `Paused`: the process that
    /// owned its tick source is gone. Inconsistent counters are repaired.
    pub fn restore(session: TimerSession, mut ticks: T, picker: P) -> Self {
        ticks.disarm();
        let total_secs = session.total_secs;
        let remaining_secs = session.remaining_secs.min(total_secs);
        let state = if remaining_secs == 0 && total_secs > 0 {
            CountdownState::Expired
        } else if remaining_secs == total_secs {
            CountdownState::Idle
        } else {
            CountdownState::Paused
        };
        Self {
            total_secs,
            remaining_secs,
            state,
            completed_sessions: session.completed_sessions,
            quote: None,
            ticks,
            picker,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    /// Quote picked by the last `start`, shown while running.
    pub fn quote(&self) -> Option<&'static str> {
        self.quote.filter(|_| self.is_running())
    }

    /// Fraction of the session still remaining, `0.0` when total is zero.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.total_secs)
    }

    /// `MM:SS` of the remaining time.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn session(&self) -> TimerSession {
        TimerSession {
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            state: self.state,
            completed_sessions: self.completed_sessions,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress: self.progress(),
            completed_sessions: self.completed_sessions,
            quote: self.quote().map(str::to_string),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set a new duration. Ignored while running.
    pub fn configure(&mut self, minutes: i64, seconds: i64) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        self.total_secs = clamp_duration(minutes, seconds);
        self.remaining_secs = self.total_secs;
        self.state = CountdownState::Idle;
        self.quote = None;
        Some(Event::TimerConfigured {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() || self.remaining_secs == 0 {
            return None;
        }
        let quote = pick_quote(&mut self.picker);
        self.quote = Some(quote);
        self.state = CountdownState::Running;
        self.ticks.arm();
        debug!(remaining_secs = self.remaining_secs, "countdown started");
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            quote: quote.to_string(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.leave_running(CountdownState::Paused);
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Same as [`CountdownEngine::pause`].
    pub fn stop(&mut self) -> Option<Event> {
        self.pause()
    }

    /// End the running session now, through the normal expiry path.
    pub fn skip(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.remaining_secs = 0;
        Some(self.expire())
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.leave_running(CountdownState::Idle);
        self.remaining_secs = self.total_secs;
        self.quote = None;
        Some(Event::TimerReset {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Apply one second. Returns `Some(Event::SessionCompleted)` on the tick
    /// that reaches zero; every other tick, and any tick outside `Running`,
    /// returns `None`.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.expire());
        }
        None
    }

    /// Pull ticks from the tick source until it stops delivering (the
    /// session ended or was paused) or `max_ticks` have been applied.
    ///
    /// `on_tick` sees the engine after every applied tick. Returns the
    /// completion event if the session expired during the run.
    pub fn run(
        &mut self,
        max_ticks: Option<u64>,
        mut on_tick: impl FnMut(&Self),
    ) -> Option<Event> {
        let mut applied = 0u64;
        while max_ticks.map_or(true, |max| applied < max) && self.ticks.wait() {
            applied += 1;
            let event = self.tick();
            on_tick(self);
            if event.is_some() {
                return event;
            }
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn leave_running(&mut self, next: CountdownState) {
        self.ticks.disarm();
        self.state = next;
    }

    fn expire(&mut self) -> Event {
        self.leave_running(CountdownState::Expired);
        self.quote = None;
        self.completed_sessions += 1;
        info!(
            completed_sessions = self.completed_sessions,
            "break session complete"
        );
        Event::SessionCompleted {
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        }
    }
}

impl<T: TickSource, P: QuotePicker> Drop for CountdownEngine<T, P> {
    fn drop(&mut self) {
        self.ticks.disarm();
    }
}
