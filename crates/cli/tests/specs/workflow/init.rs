//! `devagent init` writes workflow files

use crate::prelude::*;

#[test]
fn init_writes_workflow_in_current_directory() {
    let project = Project::empty();
    let path = project.path().join(".devagent.yml");

    project
        .init("nightly", &["make test"])
        .stdout_eq(&format!("workflow saved to {}\n", path.display()));

    let yaml = project.read(".devagent.yml");
    assert!(yaml.contains("name: nightly"), "{yaml}");
    assert!(yaml.contains("0 7 * * *"), "{yaml}");
    assert!(yaml.contains("make test"), "{yaml}");
}

#[test]
fn init_register_schedules_job() {
    let project = Project::empty();
    project
        .devagent()
        .args(&["init", "--name", "nightly", "--cron", "0 7 * * *", "--step", "true", "--register"])
        .passes()
        .stdout_has("and scheduled");

    project
        .devagent()
        .args(&["schedule", "list"])
        .passes()
        .stdout_has("nightly");
}

#[test]
fn init_rejects_invalid_cron() {
    let project = Project::empty();
    project
        .devagent()
        .args(&["init", "--name", "bad", "--cron", "every day"])
        .fails()
        .stderr_has("Error:");
    assert!(!project.path().join(".devagent.yml").exists());
}

#[test]
fn init_refuses_to_overwrite() {
    let project = Project::empty();
    project.init("first", &["true"]);
    project
        .devagent()
        .args(&["init", "--name", "second", "--cron", "0 7 * * *"])
        .fails()
        .stderr_has("--force");
}
