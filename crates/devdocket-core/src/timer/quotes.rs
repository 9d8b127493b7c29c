//! Motivational lines shown while a break is running.

use rand::Rng;

pub const QUOTES: [&str; 5] = [
    "“Rest is productive too.”",
    "“Take a breath, then get back to it!”",
    "“Breaks fuel breakthroughs.”",
    "“You deserve this pause.”",
    "“Recharge your mind.”",
];

/// Chooses which quote to show. Injected so tests can pin the choice.
pub trait QuotePicker {
    /// Index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform pick from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl QuotePicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always the same index, clamped into range.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl QuotePicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

pub(crate) fn pick_quote(picker: &mut impl QuotePicker) -> &'static str {
    QUOTES[picker.pick(QUOTES.len()).min(QUOTES.len() - 1)]
}
