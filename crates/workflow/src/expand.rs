// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository path expansion: `~`, environment variables, lexical cleanup.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors from expanding a repository path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("workflow repo is empty")]
    Empty,

    #[error("cannot expand {0:?}: home directory is unknown")]
    NoHome(String),
}

/// Expand and normalize a repo path as written in a workflow.
///
/// Unset environment variables expand to the empty string.
pub fn expand_repo_path(raw: &str) -> Result<PathBuf, ExpandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ExpandError::Empty);
    }

    let home = dirs::home_dir().map(|p| p.to_string_lossy().into_owned());
    if raw.starts_with('~') && home.is_none() {
        return Err(ExpandError::NoHome(raw.to_string()));
    }

    let expanded = shellexpand::full_with_context_no_errors(
        raw,
        || home,
        |var| Some(std::env::var(var).unwrap_or_default()),
    );
    Ok(normalize_path(Path::new(expanded.as_ref())))
}

/// Lexically clean a path: drop `.`, fold `..` into its parent.
///
/// `..` directly under the root stays at the root; leading `..` on a
/// relative path is kept. An empty result becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
