mod engine;
mod quotes;
mod tick;

pub use engine::{clamp_duration, CountdownEngine, CountdownState, TimerSession};
pub use quotes::{FixedPicker, QuotePicker, RandomPicker, QUOTES};
pub use tick::{IntervalTicks, ManualTicks, TickProbe, TickSource};

/// KV key holding the saved [`TimerSession`].
pub const TIMER_KEY: &str = "devdocket_break_buddy";
