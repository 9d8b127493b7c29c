//! Terminal shell: owns the config and database for one invocation and
//! renders notices, records and JSON.

use std::error::Error;
use std::fmt;
use std::io::Write;

use chrono::Utc;
use devdocket_core::error::Result as CoreResult;
use devdocket_core::records::Bug;
use devdocket_core::{
    AudioCue, Config, CoreError, CrudController, Database, MemoryStore, Notice, NoticeSink,
    Persistence, Record, RecordStore, Severity,
};
use serde::Serialize;

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

/// Marker error for failures already shown to the user as a notice.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation rejected")
    }
}

impl Error for Reported {}

pub struct Shell {
    pub config: Config,
    pub json: bool,
    pub db: Database,
}

impl Shell {
    pub fn open(json: bool) -> CliResult<Self> {
        let config = Config::load()?;
        let db = Database::open()?;
        Ok(Self { config, json, db })
    }

    /// Mount a widget on the SQLite store.
    pub fn mount<R: Record>(&self) -> CrudController<R, &Database> {
        CrudController::mount(&self.db)
    }

    /// Mount the bug vault on whichever backend the config selects. A
    /// session-only vault opens with the example bugs.
    pub fn mount_bugs(&self) -> CliResult<CrudController<Bug, Box<dyn RecordStore + '_>>> {
        let store: Box<dyn RecordStore + '_> = match self.config.storage.bug_vault {
            Persistence::Persistent => Box::new(&self.db),
            Persistence::SessionOnly => Box::new(MemoryStore::seeded(
                Bug::NAMESPACE,
                &Bug::samples(Utc::now()),
            )?),
        };
        Ok(CrudController::mount(store))
    }

    pub fn notify(&self, notice: Notice) {
        StderrSink.notify(notice);
    }

    /// Pass a core result through, turning user-facing failures into a
    /// warning notice.
    pub fn check<T>(&self, result: CoreResult<T>) -> CliResult<T> {
        result.map_err(|err| match err {
            CoreError::Validation(_) | CoreError::NotFound { .. } => {
                self.notify(Notice::from_error(&err));
                Box::new(Reported) as Box<dyn Error>
            }
            other => other.into(),
        })
    }

    /// Print `value` as pretty JSON in `--json` mode, otherwise via `render`.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, render: impl FnOnce(&T)) -> CliResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            render(value);
        }
        Ok(())
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "ok",
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

/// Notices go to stderr so stdout stays parseable.
pub struct StderrSink;

impl NoticeSink for StderrSink {
    fn notify(&mut self, notice: Notice) {
        eprintln!("{}: {}", severity_label(notice.severity), notice.message);
    }
}

/// ASCII BEL on stderr.
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&mut self) {
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}
