// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow file loading (YAML)

use crate::Workflow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional workflow file name at a repo root
pub const WORKFLOW_FILE: &str = ".devagent.yml";

/// Errors that can occur while loading or saving a workflow
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read workflow {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write workflow {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workflow YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("workflow {0} is required")]
    MissingField(&'static str),
}

/// Turns a stored workflow specification into a [`Workflow`].
pub trait WorkflowLoader: Send + Sync + 'static {
    fn load(&self, path: &Path) -> Result<Workflow, LoadError>;
}

/// Loads `.devagent.yml`-style YAML files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlWorkflowLoader;

impl WorkflowLoader for YamlWorkflowLoader {
    fn load(&self, path: &Path) -> Result<Workflow, LoadError> {
        load_workflow(path)
    }
}

/// Read and validate a workflow file.
pub fn load_workflow(path: &Path) -> Result<Workflow, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let workflow = parse_workflow(&content)?;
    tracing::debug!(
        path = %path.display(),
        name = %workflow.name,
        steps = workflow.steps.len(),
        "loaded workflow"
    );
    Ok(workflow)
}

/// Parse workflow YAML and check required fields.
pub fn parse_workflow(content: &str) -> Result<Workflow, LoadError> {
    let workflow: Workflow = serde_yaml::from_str(content)?;
    validate(&workflow)?;
    Ok(workflow)
}

/// Validate a workflow and render it as YAML.
pub fn render_workflow(workflow: &Workflow) -> Result<String, LoadError> {
    validate(workflow)?;
    Ok(serde_yaml::to_string(workflow)?)
}

/// Write a workflow as YAML, creating parent directories.
pub fn save_workflow(path: &Path, workflow: &Workflow) -> Result<(), LoadError> {
    let yaml = render_workflow(workflow)?;
    let write_err = |source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, yaml).map_err(write_err)
}

fn validate(workflow: &Workflow) -> Result<(), LoadError> {
    if workflow.name.trim().is_empty() {
        return Err(LoadError::MissingField("name"));
    }
    if workflow.repo.trim().is_empty() {
        return Err(LoadError::MissingField("repo"));
    }
    if workflow.schedule.cron.trim().is_empty() {
        return Err(LoadError::MissingField("schedule cron"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
