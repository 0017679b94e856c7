// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Workflow definitions, the YAML workflow loader and job planning

mod expand;
mod loader;
mod planner;
mod workflow;

pub use expand::{expand_repo_path, normalize_path, ExpandError};
pub use loader::{
    load_workflow, parse_workflow, render_workflow, save_workflow, LoadError, WorkflowLoader,
    YamlWorkflowLoader, WORKFLOW_FILE,
};
pub use planner::{
    HeuristicPlanner, Plan, PlanError, PlanRequest, Planner, DEFAULT_TIMEZONE, FALLBACK_NAME,
};
pub use workflow::{OutputSpec, Schedule, Step, Workflow};
