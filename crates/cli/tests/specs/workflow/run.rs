//! `devagent run` executes a workflow once in the foreground

use crate::prelude::*;

#[test]
fn run_echoes_commands_and_output() {
    let project = Project::empty();
    project.init("hello", &["echo hello"]);

    project
        .devagent()
        .args(&["run"])
        .passes()
        .stdout_has("$ echo hello\nhello\n")
        .stdout_has("run finished with status success");

    let dirs = project.run_dirs();
    assert_eq!(dirs.len(), 1);
    let log = std::fs::read_to_string(dirs[0].join("run.log")).unwrap();
    assert_eq!(log, "$ echo hello\nhello\n");
    assert!(dirs[0].join("summary.json").is_file());
}

#[test]
fn failing_step_stops_the_run() {
    let project = Project::empty();
    project.init("ff", &["echo A", "echo B; exit 2", "touch c_ran"]);

    project
        .devagent()
        .args(&["run"])
        .passes()
        .stdout_has("run finished with status failed");

    assert!(!project.path().join("c_ran").exists());
    let dirs = project.run_dirs();
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dirs[0].join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["status"], "failed");
    assert_eq!(summary["steps"].as_array().unwrap().len(), 2);
    assert_eq!(summary["steps"][1]["exit_code"], 2);
}

#[test]
fn secrets_are_redacted_everywhere() {
    let project = Project::empty();
    project.init("secrets", &["echo token=abc123 api_key=sk-test"]);

    let out = project
        .devagent()
        .args(&["run"])
        .passes()
        .stdout_lacks("abc123")
        .stdout_lacks("sk-test");
    assert!(out.stdout().contains("token=<redacted>"));

    let dir = &project.run_dirs()[0];
    for file in ["run.log", "summary.json"] {
        let text = std::fs::read_to_string(dir.join(file)).unwrap();
        assert!(!text.contains("abc123"), "{file}: {text}");
        assert!(!text.contains("sk-test"), "{file}: {text}");
    }
}

#[test]
fn secret_environment_is_scrubbed() {
    let project = Project::empty();
    project.init("env", &["echo value=${DEPLOY_TOKEN:-unset}"]);

    project
        .devagent()
        .args(&["run"])
        .env("DEPLOY_TOKEN", "hunter2")
        .passes()
        .stdout_has("value=unset");
}

#[test]
fn outputs_are_copied_into_run_dir() {
    let project = Project::empty();
    project
        .devagent()
        .args(&[
            "init", "--name", "report", "--cron", "0 7 * * *", "--step", "echo done > report.txt",
            "--copy", "report.txt", "--copy", "missing.txt",
        ])
        .passes();

    project.devagent().args(&["run"]).passes();

    let dir = &project.run_dirs()[0];
    assert_eq!(std::fs::read_to_string(dir.join("report.txt")).unwrap(), "done\n");
    assert!(!dir.join("missing.txt").exists());
}

#[test]
fn missing_workflow_fails() {
    let project = Project::empty();
    project
        .devagent()
        .args(&["run"])
        .fails()
        .stderr_has(".devagent.yml");
}

#[test]
fn missing_repo_creates_no_artifacts() {
    let project = Project::empty();
    project.file(
        "job.yml",
        "name: ghost\nrepo: /nonexistent/devagent/repo\nschedule:\n  cron: \"0 7 * * *\"\nsteps:\n  - run: echo hi\n",
    );

    project
        .devagent()
        .args(&["run", "--file", "job.yml"])
        .fails()
        .stderr_has("/nonexistent/devagent/repo");
    assert!(!project.path().join("devagent_runs").exists());
}

#[test]
fn json_output_reports_summary() {
    let project = Project::empty();
    project.init("quiet", &["echo hi"]);

    let out = project.devagent().args(&["run", "-o", "json"]).passes();
    let report = out.json();
    assert_eq!(report["name"], "quiet");
    assert_eq!(report["status"], "success");
    assert_eq!(report["summary"]["steps"][0]["cmd"], "echo hi");
}

#[test]
fn timeout_fails_the_run() {
    let project = Project::empty();
    project.init("slow", &["sleep 30"]);

    project
        .devagent()
        .args(&["run", "--timeout", "1"])
        .passes()
        .stdout_has("run finished with status failed");
}
