//! `devagent schedule list|add|remove`

use crate::prelude::*;

#[test]
fn empty_schedule() {
    let project = Project::empty();
    project
        .devagent()
        .args(&["schedule", "list"])
        .passes()
        .stdout_eq("no jobs scheduled\n");
}

#[test]
fn empty_schedule_json() {
    let project = Project::empty();
    let out = project
        .devagent()
        .args(&["schedule", "list", "-o", "json"])
        .passes();
    assert_eq!(out.json(), serde_json::json!([]));
}

#[test]
fn add_list_remove() {
    let project = Project::empty();
    project.init("nightly", &["true"]);

    project
        .devagent()
        .args(&["schedule", "add"])
        .passes()
        .stdout_eq("scheduled nightly (cron=0 7 * * *, timezone=UTC)\n");

    let out = project
        .devagent()
        .args(&["schedule", "list"])
        .passes()
        .stdout_has("NAME")
        .stdout_has("nightly")
        .stdout_has("never")
        .stdout_has("unknown");
    assert_eq!(out.stdout().lines().count(), 2);

    project
        .devagent()
        .args(&["schedule", "remove", "nightly"])
        .passes()
        .stdout_eq("removed nightly\n");

    project
        .devagent()
        .args(&["schedule", "list"])
        .passes()
        .stdout_eq("no jobs scheduled\n");
}

#[test]
fn list_json_includes_spec_path() {
    let project = Project::empty();
    project.init("nightly", &["true"]);
    project.devagent().args(&["schedule", "add", ".devagent.yml"]).passes();

    let out = project
        .devagent()
        .args(&["schedule", "list", "-o", "json"])
        .passes();
    let jobs = out.json();
    assert_eq!(jobs[0]["name"], "nightly");
    assert_eq!(jobs[0]["cron"], "0 7 * * *");
    let spec = jobs[0]["spec_path"].as_str().unwrap();
    assert!(spec.ends_with(".devagent.yml"), "{spec}");
    assert!(std::path::Path::new(spec).is_absolute());
}

#[test]
fn manual_run_updates_last_status() {
    let project = Project::empty();
    project.init("nightly", &["exit 1"]);
    project.devagent().args(&["schedule", "add"]).passes();
    project.devagent().args(&["run"]).passes();

    project
        .devagent()
        .args(&["schedule", "list"])
        .passes()
        .stdout_has("ago")
        .stdout_has("failed");
}

#[test]
fn remove_unknown_job_fails() {
    let project = Project::empty();
    project
        .devagent()
        .args(&["schedule", "remove", "ghost"])
        .fails()
        .stderr_has("no scheduled job named 'ghost'");
}

#[test]
fn corrupt_store_is_reported() {
    let project = Project::empty();
    std::fs::write(project.state_path().join("jobs.json"), "{not json").unwrap();
    project
        .devagent()
        .args(&["schedule", "list"])
        .fails()
        .stderr_has("Error:");
}
