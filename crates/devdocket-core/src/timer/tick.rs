//! One-second tick sources for the countdown engine.
//!
//! The engine arms its source when it starts running and disarms it on every
//! way out of `Running`. A disarmed source delivers nothing, so a stale
//! session can never keep counting down.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Interval notification capability.
pub trait TickSource {
    /// Begin delivering ticks.
    fn arm(&mut self);

    /// Stop delivering ticks. Idempotent.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;

    /// Block until the next tick is due. Returns `false` once disarmed or
    /// out of ticks, which ends a driving loop.
    fn wait(&mut self) -> bool;
}

/// Wall-clock ticks on a fixed cadence.
///
/// Deadlines advance by exactly one period per tick, so sleep overshoot does
/// not accumulate into drift.
#[derive(Debug)]
pub struct IntervalTicks {
    period: Duration,
    next: Option<Instant>,
}

impl IntervalTicks {
    pub fn every(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn seconds() -> Self {
        Self::every(Duration::from_secs(1))
    }
}

impl Default for IntervalTicks {
    fn default() -> Self {
        Self::seconds()
    }
}

impl TickSource for IntervalTicks {
    fn arm(&mut self) {
        self.next = Some(Instant::now() + self.period);
    }

    fn disarm(&mut self) {
        self.next = None;
    }

    fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    fn wait(&mut self) -> bool {
        let Some(due) = self.next else {
            return false;
        };
        std::thread::sleep(due.saturating_duration_since(Instant::now()));
        self.next = Some(due + self.period);
        true
    }
}

/// Simulated clock: `wait` returns immediately while armed.
///
/// An optional budget caps how many ticks `wait` hands out, which lets tests
/// fast-forward a fixed number of seconds. State is shared with
/// [`TickProbe`]s so it stays observable after the engine takes ownership.
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    armed: Rc<Cell<bool>>,
    arms: Rc<Cell<u32>>,
    budget: Option<u64>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop handing out ticks after `ticks` calls to `wait`.
    pub fn with_budget(ticks: u64) -> Self {
        Self {
            budget: Some(ticks),
            ..Self::default()
        }
    }

    pub fn probe(&self) -> TickProbe {
        TickProbe {
            armed: Rc::clone(&self.armed),
            arms: Rc::clone(&self.arms),
        }
    }
}

impl TickSource for ManualTicks {
    fn arm(&mut self) {
        self.armed.set(true);
        self.arms.set(self.arms.get() + 1);
    }

    fn disarm(&mut self) {
        self.armed.set(false);
    }

    fn is_armed(&self) -> bool {
        self.armed.get()
    }

    fn wait(&mut self) -> bool {
        if !self.armed.get() {
            return false;
        }
        match self.budget.as_mut() {
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                true
            }
            None => true,
        }
    }
}

/// Read-only view of a [`ManualTicks`] source.
#[derive(Debug, Clone)]
pub struct TickProbe {
    armed: Rc<Cell<bool>>,
    arms: Rc<Cell<u32>>,
}

impl TickProbe {
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// How many times the source has been armed.
    pub fn arm_count(&self) -> u32 {
        self.arms.get()
    }
}
