// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for command tests

use std::path::{Path, PathBuf};

use devagent_daemon::Config;
use devagent_workflow::{save_workflow, Schedule, Step, Workflow, WORKFLOW_FILE};
use tempfile::TempDir;

/// A state directory plus a repository holding a workflow file.
pub(crate) struct Sandbox {
    _root: TempDir,
    pub config: Config,
    pub repo: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let config = Config::for_state_dir(root.path().join("state"));
        let repo = root.path().join("repo");
        std::fs::create_dir_all(&repo).unwrap();
        Self {
            _root: root,
            config,
            repo,
        }
    }

    pub fn workflow(&self, name: &str, steps: &[&str]) -> Workflow {
        Workflow {
            version: 1,
            name: name.to_string(),
            repo: self.repo.display().to_string(),
            schedule: Schedule {
                cron: "0 7 * * *".to_string(),
                timezone: Some("UTC".to_string()),
                ..Default::default()
            },
            steps: steps.iter().map(|s| Step::new(*s)).collect(),
            outputs: None,
        }
    }

    /// Write `<repo>/.devagent.yml` and return its path.
    pub fn write_workflow(&self, name: &str, steps: &[&str]) -> PathBuf {
        let path = self.repo.join(WORKFLOW_FILE);
        save_workflow(&path, &self.workflow(name, steps)).unwrap();
        path
    }

    pub fn repo_file(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.repo.join(rel)
    }
}
