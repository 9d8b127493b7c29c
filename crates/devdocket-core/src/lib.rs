//! # DevDocket Core Library
//!
//! Business logic for the DevDocket developer dashboard. The CLI binary is a
//! thin shell over this crate: it mounts widgets, renders records and shows
//! notices, while everything stateful lives here.
//!
//! ## Architecture
//!
//! - **Record Store**: one JSON blob per widget namespace in SQLite, or in
//!   memory for session-only widgets
//! - **CRUD Controller**: a single generic controller instantiated per widget
//!   schema (problems, journal entries, bugs, plans)
//! - **Countdown Engine**: Break Buddy's tick-driven state machine with an
//!   injectable tick source and quote picker
//!
//! ## Key Components
//!
//! - [`CrudController`]: create/update/remove/toggle/query over a record list
//! - [`CountdownEngine`]: break timer state machine
//! - [`Database`]: durable namespace storage
//! - [`Config`]: application configuration management

pub mod dashboard;
pub mod error;
pub mod events;
pub mod notify;
pub mod records;
pub mod storage;
pub mod timer;

pub use dashboard::DashboardSummary;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{AudioCue, Notice, NoticeSink, Severity};
pub use records::{CrudController, EditSession, Query, Record, RecordId};
pub use storage::{Config, Database, MemoryStore, Persistence, RecordStore};
pub use timer::{CountdownEngine, CountdownState, TimerSession};
