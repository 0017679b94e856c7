//! `devagent daemon` runs in the foreground as a single instance

use std::process::Command;

use crate::prelude::*;

#[test]
fn second_daemon_refuses_to_start_and_first_cleans_up() {
    let project = Project::empty();
    let mut first = project.devagent().args(&["daemon"]).spawn();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || project.daemon_pid().is_some()),
        "daemon never wrote its pid"
    );
    assert_eq!(project.daemon_pid(), Some(first.id()));

    project
        .devagent()
        .args(&["daemon"])
        .fails()
        .stderr_has("already running");

    Command::new("kill")
        .args(["-TERM", &first.id().to_string()])
        .status()
        .unwrap();
    let status = first.wait().unwrap();
    assert!(status.success(), "daemon exited with {status:?}");
    assert!(!project.state_path().join("daemon.pid").exists());
}
