// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn request(spec: &str) -> PlanRequest {
    PlanRequest {
        spec: spec.to_string(),
        ..Default::default()
    }
}

#[parameterized(
    daily_morning = { "every day at 7am", "0 7 * * *" },
    daily_minutes = { "every day at 6:30 pm", "30 18 * * *" },
    daily_24h = { "Every Day at 23:15", "15 23 * * *" },
    noon = { "every day at 12pm", "0 12 * * *" },
    midnight = { "every day at 12am", "0 0 * * *" },
    weekday = { "every weekday at 9am", "0 9 * * 1-5" },
    weekday_minutes = { "every weekday at 8:05", "5 8 * * 1-5" },
    hourly = { "once an hour", "0 * * * *" },
)]
fn common_cron_phrases(spec: &str, cron: &str) {
    assert_eq!(parse_common_cron(spec).as_deref(), Some(cron));
}

#[test]
fn unknown_phrase_has_no_cron() {
    assert_eq!(parse_common_cron("whenever you feel like it"), None);
}

#[test]
fn full_description_is_planned() {
    let spec = "every weekday at 9am in repo ~/src/app; run make test; run 'make lint'";

    let plan = HeuristicPlanner.plan(&request(spec)).unwrap();

    assert_eq!(plan.cron, "0 9 * * 1-5");
    assert_eq!(plan.repo.as_deref(), Some("~/src/app"));
    assert_eq!(plan.steps, vec!["make test", "make lint"]);
    assert_eq!(plan.timezone, DEFAULT_TIMEZONE);
    assert_eq!(plan.natural, spec);
    assert_eq!(plan.name, "every-weekday-at-9am-in-repo-src-app-run");
}

#[test]
fn explicit_values_override_description() {
    let req = PlanRequest {
        spec: "every day at 7am in repo /srv/a; run make".to_string(),
        name: Some("nightly".to_string()),
        cron: Some("0 3 * * *".to_string()),
        repo: Some("/srv/b".to_string()),
        timezone: Some("UTC".to_string()),
        steps: vec!["cargo test".to_string()],
    };

    let plan = HeuristicPlanner.plan(&req).unwrap();

    assert_eq!(plan.name, "nightly");
    assert_eq!(plan.cron, "0 3 * * *");
    assert_eq!(plan.repo.as_deref(), Some("/srv/b"));
    assert_eq!(plan.timezone, "UTC");
    assert_eq!(plan.steps, vec!["cargo test"]);
}

#[test]
fn blank_hints_fall_back_to_description() {
    let mut req = request("every day at 7am; run make");
    req.name = Some("  ".to_string());
    req.cron = Some(String::new());

    let plan = HeuristicPlanner.plan(&req).unwrap();

    assert_eq!(plan.cron, "0 7 * * *");
    assert_eq!(plan.name, "every-day-at-7am-run-make");
}

#[test]
fn cron_hint_rescues_unrecognized_schedule() {
    let mut req = request("whenever; run make");
    req.cron = Some("*/5 * * * *".to_string());

    assert_eq!(HeuristicPlanner.plan(&req).unwrap().cron, "*/5 * * * *");
}

#[parameterized(
    empty = { "   ", PlanError::EmptySpec },
    no_schedule = { "run make", PlanError::NoCron },
    no_steps = { "every day at 7am in repo /srv/a", PlanError::NoSteps },
)]
fn unplannable_descriptions(spec: &str, expected: PlanError) {
    assert_eq!(HeuristicPlanner.plan(&request(spec)).unwrap_err(), expected);
}

#[test]
fn missing_repo_left_unset() {
    let plan = HeuristicPlanner.plan(&request("every hour; run date")).unwrap();
    assert_eq!(plan.repo, None);
}

#[test]
fn steps_need_run_prefix() {
    assert_eq!(
        extract_steps("run a; running b; Run c ;notes; run ''"),
        vec!["a", "c"]
    );
}

#[parameterized(
    long = { "every single day at seven in the morning please run the tests", "every-single-day-at-seven-in-the-morning" },
    punctuation = { "--Nightly Build!!", "nightly-build" },
    symbols_only = { "!!!", FALLBACK_NAME },
    trailing_dash_trimmed = { "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa b", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" },
)]
fn derived_names(spec: &str, name: &str) {
    assert_eq!(name_from_spec(spec), name);
}
