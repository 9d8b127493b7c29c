//! Shell-facing notification collaborators.
//!
//! The core never renders anything. It hands [`Notice`]s to a [`NoticeSink`]
//! (a toast or snackbar in a GUI, stderr in the CLI) and rings an
//! [`AudioCue`] when a break ends.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::events::Event;

pub const SESSION_COMPLETE_MESSAGE: &str = "🎉 Break time is over! Great job.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A dismissible one-line message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn added(label: &str) -> Self {
        Self::success(format!("Added {label}"))
    }

    pub fn updated(label: &str) -> Self {
        Self::success(format!("Updated {label}"))
    }

    pub fn removed(label: &str) -> Self {
        Self::info(format!("Removed {label}"))
    }

    /// Map a failed operation to what the user should see.
    ///
    /// Validation and stale ids are warnings; anything else is an error.
    pub fn from_error(err: &CoreError) -> Self {
        match err {
            CoreError::Validation(e) => Self::warning(e.to_string()),
            CoreError::NotFound { .. } => Self::warning(err.to_string()),
            other => Self::error(other.to_string()),
        }
    }
}

/// Plays the end-of-session sound.
pub trait AudioCue {
    fn play(&mut self);
}

/// Receives notices for display.
pub trait NoticeSink {
    fn notify(&mut self, notice: Notice);
}

impl NoticeSink for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Cue that makes no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self) {}
}

/// React to a timer event on behalf of the shell. Returns `true` if the
/// event was a session completion.
pub fn announce(
    event: &Event,
    chime: bool,
    cue: &mut impl AudioCue,
    sink: &mut impl NoticeSink,
) -> bool {
    match event {
        Event::SessionCompleted { .. } => {
            if chime {
                cue.play();
            }
            sink.notify(Notice::success(SESSION_COMPLETE_MESSAGE));
            true
        }
        _ => false,
    }
}
