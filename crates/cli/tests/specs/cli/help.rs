//! Top-level help and argument errors

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let out = cli().args(&["--help"]).passes();
    for command in ["run", "init", "plan", "schedule", "daemon"] {
        assert!(out.stdout().contains(command), "missing {command}");
    }
}

#[test]
fn no_subcommand_prints_help() {
    cli().passes().stdout_has("Usage: devagent");
}

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("unrecognized subcommand");
}

#[test]
fn invalid_output_format_fails() {
    cli()
        .args(&["schedule", "list", "-o", "yaml"])
        .fails()
        .stderr_has("invalid value 'yaml'");
}
