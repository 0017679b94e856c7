//! `devagent plan` and description-driven `devagent init`

use crate::prelude::*;

const DESCRIPTION: &str = "every weekday at 9am in repo ~/src/app; run make test";

#[test]
fn plan_prints_yaml_without_writing() {
    let project = Project::empty();

    let out = project.devagent().args(&["plan", DESCRIPTION]).passes();

    let yaml = out.stdout();
    assert!(yaml.contains("0 9 * * 1-5"), "{yaml}");
    assert!(yaml.contains("~/src/app"), "{yaml}");
    assert!(yaml.contains("make test"), "{yaml}");
    assert!(!project.path().join(".devagent.yml").exists());
}

#[test]
fn plan_json_output() {
    let project = Project::empty();

    let json = project
        .devagent()
        .args(&["-o", "json", "plan", "every hour; run date", "--name", "clock"])
        .passes()
        .json();

    assert_eq!(json["name"], "clock");
    assert_eq!(json["schedule"]["cron"], "0 * * * *");
    assert_eq!(json["repo"], project.path().display().to_string());
    assert_eq!(json["steps"][0]["run"], "date");
}

#[test]
fn plan_without_schedule_fails() {
    Project::empty()
        .devagent()
        .args(&["plan", "now and then; run date"])
        .fails()
        .stderr_has("provide --cron");
}

#[test]
fn init_from_description_registers_job() {
    let project = Project::empty();

    project
        .devagent()
        .args(&["init", "every day at 7am; run echo hi", "--name", "morning", "--register"])
        .passes()
        .stdout_has("and scheduled");

    let yaml = project.read(".devagent.yml");
    assert!(yaml.contains("every day at 7am"), "{yaml}");
    project
        .devagent()
        .args(&["schedule", "list"])
        .passes()
        .stdout_has("morning")
        .stdout_has("0 7 * * *");
}
