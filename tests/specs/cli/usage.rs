//! CLI usage specs
//!
//! Verify help output and argument validation.

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: ji")
        .stdout_has("jobs");
}

#[test]
fn jobs_help_lists_flags() {
    cli()
        .args(&["jobs", "--help"])
        .passes()
        .stdout_has("--since")
        .stdout_has("--job")
        .stdout_has("--watch")
        .stdout_has("--count");
}

#[test]
fn count_without_watch_is_rejected() {
    cli()
        .args(&["jobs", "--count", "2"])
        .fails()
        .code(2)
        .stderr_has("--watch");
}

#[test]
fn invalid_controller_address_is_rejected() {
    cli()
        .args(&["jobs", "--controller", "not-an-address"])
        .fails()
        .code(1)
        .stderr_has("invalid controller address");
}
