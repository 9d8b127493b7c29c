use std::time::Duration;

use clap::Subcommand;
use devdocket_core::notify::announce;
use devdocket_core::storage::Database;
use devdocket_core::timer::{IntervalTicks, RandomPicker, TIMER_KEY};
use devdocket_core::{CountdownEngine, CountdownState, Event, Notice, TimerSession};
use tracing::warn;

use crate::shell::{CliResult, Reported, Shell, StderrSink, TerminalBell};

type Engine = CountdownEngine<IntervalTicks, RandomPicker>;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Set the break length (resets the countdown)
    Configure {
        /// Minutes, floored at zero
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
        /// Seconds, clamped to 0..=59
        #[arg(long, allow_negative_numbers = true)]
        seconds: Option<i64>,
    },
    /// Run the countdown in the foreground
    Start {
        /// Stop after this many seconds and keep the session paused
        #[arg(long)]
        ticks: Option<u64>,
        /// Tick period in milliseconds
        #[arg(long, default_value_t = 1000, hide = true)]
        tick_ms: u64,
    },
    /// End the current session now
    Skip,
    /// Back to the full duration
    Reset,
    /// Show the current countdown
    Status,
}

fn load_engine(shell: &Shell, tick_ms: u64) -> Engine {
    let ticks = IntervalTicks::every(Duration::from_millis(tick_ms));
    match shell.db.kv_get(TIMER_KEY) {
        Ok(Some(json)) => match serde_json::from_str::<TimerSession>(&json) {
            Ok(session) => return CountdownEngine::restore(session, ticks, RandomPicker),
            Err(e) => warn!(error = %e, "discarding unreadable timer session"),
        },
        Ok(None) => {}
        Err(e) => warn!(error = %e, "could not read timer session"),
    }
    let defaults = &shell.config.timer;
    CountdownEngine::new(
        i64::from(defaults.default_minutes),
        i64::from(defaults.default_seconds),
        ticks,
        RandomPicker,
    )
}

fn save_engine(db: &Database, engine: &Engine) -> CliResult {
    let json = serde_json::to_string(&engine.session())?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

fn state_label(state: CountdownState) -> &'static str {
    match state {
        CountdownState::Idle => "idle",
        CountdownState::Running => "running",
        CountdownState::Paused => "paused",
        CountdownState::Expired => "expired",
    }
}

fn print_status(engine: &Engine) {
    println!(
        "{}  {} ({:.0}% left)",
        state_label(engine.state()),
        engine.clock(),
        engine.progress() * 100.0
    );
    println!("Breaks taken: {}", engine.completed_sessions());
}

fn announce_completion(shell: &Shell, event: &Event) {
    announce(event, shell.config.timer.chime, &mut TerminalBell, &mut StderrSink);
}

pub fn run(shell: &Shell, action: TimerAction) -> CliResult {
    let tick_ms = match &action {
        TimerAction::Start { tick_ms, .. } => *tick_ms,
        _ => 1000,
    };
    let mut engine = load_engine(shell, tick_ms);

    match action {
        TimerAction::Configure { minutes, seconds } => {
            let defaults = &shell.config.timer;
            let minutes = minutes.unwrap_or(i64::from(defaults.default_minutes));
            let seconds = seconds.unwrap_or(i64::from(defaults.default_seconds));
            let event = engine.configure(minutes, seconds);
            save_engine(&shell.db, &engine)?;
            shell.emit(&event, |_| println!("Timer set to {}", engine.clock()))?;
        }
        TimerAction::Start { ticks, .. } => {
            let Some(started) = engine.start() else {
                let reason = match engine.state() {
                    CountdownState::Expired => {
                        "nothing to start: the break is over, run `devdocket timer reset`"
                    }
                    _ => "nothing to start: the timer is set to 00:00, run `devdocket timer configure`",
                };
                shell.notify(Notice::warning(reason));
                return Err(Box::new(Reported));
            };
            if let Event::TimerStarted { quote, .. } = &started {
                if !shell.json {
                    println!("{quote}");
                }
            }

            let live = !shell.json;
            let done = engine.run(ticks, |t| {
                if live {
                    eprint!("\r{}", t.clock());
                }
            });
            if live {
                eprintln!();
            }

            match &done {
                Some(event) => announce_completion(shell, event),
                None => {
                    engine.pause();
                    shell.notify(Notice::info(format!("paused at {}", engine.clock())));
                }
            }
            save_engine(&shell.db, &engine)?;
            shell.emit(&engine.snapshot(), |_| print_status(&engine))?;
        }
        TimerAction::Skip => {
            // Only an interrupted session resumes; idle and expired have nothing to skip.
            if engine.state() == CountdownState::Paused {
                engine.start();
            }
            match engine.skip() {
                Some(event) => announce_completion(shell, &event),
                None => shell.notify(Notice::info("no session to skip")),
            }
            save_engine(&shell.db, &engine)?;
            shell.emit(&engine.snapshot(), |_| print_status(&engine))?;
        }
        TimerAction::Reset => {
            engine.reset();
            save_engine(&shell.db, &engine)?;
            shell.emit(&engine.snapshot(), |_| print_status(&engine))?;
        }
        TimerAction::Status => {
            shell.emit(&engine.snapshot(), |_| print_status(&engine))?;
        }
    }
    Ok(())
}
