//! Hierarchical selection model for the project tree.
//!
//! Two independent pieces of state drive which works are shown:
//!
//! - the **scope** picked in the project selector (all projects or one), and
//! - the **path** picked by clicking through the tree
//!   (project → block → floor).
//!
//! The path is kept consistent at all times: a floor is only ever selected
//! together with its block, and a block together with its project.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Wire value of [`ProjectScope::All`].
pub const SCOPE_ALL: &str = "all";

/// Active project scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ProjectScope {
    #[default]
    All,
    Project(String),
}

impl ProjectScope {
    pub fn project_code(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Project(code) => Some(code),
        }
    }
}

impl From<String> for ProjectScope {
    fn from(value: String) -> Self {
        if value == SCOPE_ALL || value.is_empty() {
            Self::All
        } else {
            Self::Project(value)
        }
    }
}

impl From<ProjectScope> for String {
    fn from(scope: ProjectScope) -> Self {
        match scope {
            ProjectScope::All => SCOPE_ALL.to_string(),
            ProjectScope::Project(code) => code,
        }
    }
}

impl FromStr for ProjectScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().to_string()))
    }
}

impl fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(SCOPE_ALL),
            Self::Project(code) => f.write_str(code),
        }
    }
}

/// Scope plus the drill-down path through the project tree.
///
/// Fields are private so that every change goes through an operation that
/// preserves the path invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    scope: ProjectScope,
    project: Option<String>,
    block: Option<DbId>,
    floor: Option<DbId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> &ProjectScope {
        &self.scope
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn block(&self) -> Option<DbId> {
        self.block
    }

    pub fn floor(&self) -> Option<DbId> {
        self.floor
    }

    /// Change the active scope. The tree path is left untouched.
    pub fn set_scope(&mut self, scope: ProjectScope) {
        self.scope = scope;
    }

    /// Click on a project node. Clicking the selected project again clears
    /// the whole path; clicking another one resets block and floor.
    pub fn select_project(&mut self, code: &str) {
        if self.project.as_deref() == Some(code) {
            self.clear();
        } else {
            self.project = Some(code.to_string());
            self.block = None;
            self.floor = None;
        }
    }

    /// Click on a block node of `project`.
    pub fn select_block(&mut self, project: &str, block: DbId) {
        self.set_project(project);
        self.block = if self.block == Some(block) {
            None
        } else {
            Some(block)
        };
        self.floor = None;
    }

    /// Click on a floor node of `block` in `project`.
    pub fn select_floor(&mut self, project: &str, block: DbId, floor: DbId) {
        if self.block != Some(block) || self.project.as_deref() != Some(project) {
            self.floor = None;
        }
        self.set_project(project);
        self.block = Some(block);
        self.floor = if self.floor == Some(floor) {
            None
        } else {
            Some(floor)
        };
    }

    /// Drop the tree path; the scope is kept.
    pub fn clear(&mut self) {
        self.project = None;
        self.block = None;
        self.floor = None;
    }

    /// floor ⟹ block ⟹ project.
    pub fn is_consistent(&self) -> bool {
        (self.floor.is_none() || self.block.is_some())
            && (self.block.is_none() || self.project.is_some())
    }

    fn set_project(&mut self, project: &str) {
        if self.project.as_deref() != Some(project) {
            self.project = Some(project.to_string());
            self.block = None;
            self.floor = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
