//! `ji jobs --watch` specs
//!
//! Verify incremental polling: each poll asks for changes after the last
//! table seen, and unchanged polls stay quiet.

use crate::prelude::*;

use ji_core::{render_table, JobRecord, JobTable};
use ji_wire::{Request, Response};

fn table(last_update: u64, job_id: u32) -> JobTable {
    JobTable::new(last_update, vec![JobRecord::builder().job_id(job_id).build()])
}

#[test]
fn watch_advances_since_and_skips_unchanged_polls() {
    let controller = FakeController::serving(vec![
        Response::JobInfo(table(100, 1)),
        Response::ReturnCode { code: 0 },
        Response::JobInfo(table(200, 2)),
    ]);

    let expected = format!(
        "{}{}",
        render_table(&table(100, 1)),
        render_table(&table(200, 2))
    );
    controller
        .ji()
        .args(&["jobs", "--watch", "0", "--count", "3"])
        .passes()
        .stdout_eq(&expected);

    assert_eq!(
        controller.requests(),
        vec![
            Request::JobInfo { last_update: 0 },
            Request::JobInfo { last_update: 100 },
            Request::JobInfo { last_update: 100 },
        ]
    );
}

#[test]
fn watch_reports_no_change_on_first_poll() {
    let controller = FakeController::serving(vec![
        Response::ReturnCode { code: 0 },
        Response::ReturnCode { code: 0 },
    ]);

    controller
        .ji()
        .args(&["jobs", "--since", "50", "--watch", "0", "--count", "2"])
        .passes()
        .stdout_eq("No changes since 50\n");

    assert_eq!(
        controller.requests(),
        vec![
            Request::JobInfo { last_update: 50 },
            Request::JobInfo { last_update: 50 },
        ]
    );
}

#[test]
fn watch_stops_on_remote_error() {
    let controller = FakeController::serving(vec![
        Response::JobInfo(table(100, 1)),
        Response::ReturnCode { code: 4 },
    ]);

    controller
        .ji()
        .args(&["jobs", "--watch", "0", "--count", "5"])
        .fails()
        .stdout_eq(&render_table(&table(100, 1)))
        .stderr_has("controller returned error code 4");
}
