pub mod bug;
pub mod config;
pub mod dashboard;
pub mod journal;
pub mod plan;
pub mod problem;
pub mod timer;

use devdocket_core::{Notice, Record, RecordId};

use crate::shell::{CliResult, Shell};

/// Announce a created or edited record and print it.
pub(crate) fn show_saved<R: Record>(
    shell: &Shell,
    notice: Notice,
    record: &R,
    render: fn(&R),
) -> CliResult {
    shell.notify(notice);
    shell.emit(record, render)
}

/// Report a delete. Deleting an id that is already gone is not an error.
pub(crate) fn show_removed<R: Record>(shell: &Shell, id: RecordId, removed: Option<R>) -> CliResult {
    match &removed {
        Some(_) => shell.notify(Notice::removed(R::LABEL)),
        None => shell.notify(Notice::info(format!("no {} with id {id}", R::LABEL))),
    }
    shell.emit(&removed, |_| {})
}

pub(crate) fn show_list<R: Record>(shell: &Shell, records: &[&R], render: fn(&R)) -> CliResult {
    shell.emit(records, |rows| {
        if rows.is_empty() {
            println!("(none)");
        }
        for &row in rows {
            render(row);
        }
    })
}

pub(crate) fn check_mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}
