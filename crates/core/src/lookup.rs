//! Id-based lookups across the project → block → floor tree and the flat
//! catalogs, plus display-name fallbacks for works.
//!
//! Display helpers never fail: a missing reference degrades to
//! [`PLACEHOLDER`]. The `require_*` variants surface the miss as
//! [`CoreError::NotFound`] for flows that cannot proceed without it.

use crate::error::CoreError;
use crate::models::{Block, Executor, Floor, Project, Work, WorkType};
use crate::types::DbId;

/// Shown in place of a name that cannot be resolved.
pub const PLACEHOLDER: &str = "—";

/// Borrowed view over the entity collections.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    pub projects: &'a [Project],
    pub work_types: &'a [WorkType],
    pub executors: &'a [Executor],
}

impl<'a> Lookup<'a> {
    pub fn new(
        projects: &'a [Project],
        work_types: &'a [WorkType],
        executors: &'a [Executor],
    ) -> Self {
        Self {
            projects,
            work_types,
            executors,
        }
    }

    /// A lookup with no entities; every fallback resolves to nothing.
    pub fn empty() -> Lookup<'static> {
        Lookup {
            projects: &[],
            work_types: &[],
            executors: &[],
        }
    }

    // -- entities ------------------------------------------------------------

    pub fn project(&self, code: &str) -> Option<&'a Project> {
        self.projects.iter().find(|p| p.code == code)
    }

    pub fn work_type(&self, id: DbId) -> Option<&'a WorkType> {
        self.work_types.iter().find(|wt| wt.id == id)
    }

    pub fn executor(&self, id: DbId) -> Option<&'a Executor> {
        self.executors.iter().find(|e| e.id == id)
    }

    pub fn executor_by_name(&self, name: &str) -> Option<&'a Executor> {
        self.executors.iter().find(|e| e.name == name)
    }

    /// Project, block and floor owning `floor_id`, searching every project.
    pub fn locate_floor(&self, floor_id: DbId) -> Option<(&'a Project, &'a Block, &'a Floor)> {
        self.projects
            .iter()
            .find_map(|p| p.locate_floor(floor_id).map(|(b, f)| (p, b, f)))
    }

    pub fn require_project(&self, code: &str) -> Result<&'a Project, CoreError> {
        self.project(code)
            .ok_or_else(|| CoreError::not_found("project", code))
    }

    pub fn require_work_type(&self, id: DbId) -> Result<&'a WorkType, CoreError> {
        self.work_type(id)
            .ok_or_else(|| CoreError::not_found("work_type", id))
    }

    pub fn require_executor(&self, id: DbId) -> Result<&'a Executor, CoreError> {
        self.executor(id)
            .ok_or_else(|| CoreError::not_found("executor", id))
    }

    pub fn require_floor(&self, floor_id: DbId) -> Result<(&'a Project, &'a Block, &'a Floor), CoreError> {
        self.locate_floor(floor_id)
            .ok_or_else(|| CoreError::not_found("floor", floor_id))
    }

    // -- work display names --------------------------------------------------
    //
    // Each prefers the name denormalized onto the work and falls back to
    // resolving the id.

    pub fn project_name<'s>(&'s self, work: &'s Work) -> Option<&'s str> {
        let code = work.project.as_deref()?;
        self.project(code).map(|p| p.name.as_str())
    }

    pub fn work_type_name<'s>(&'s self, work: &'s Work) -> Option<&'s str> {
        work.work_type.as_deref().or_else(|| {
            work.work_type_id
                .and_then(|id| self.work_type(id))
                .map(|wt| wt.name.as_str())
        })
    }

    pub fn executor_name<'s>(&'s self, work: &'s Work) -> Option<&'s str> {
        work.executor.as_deref().or_else(|| {
            work.executor_id
                .and_then(|id| self.executor(id))
                .map(|e| e.name.as_str())
        })
    }

    pub fn object_name<'s>(&'s self, work: &'s Work) -> Option<&'s str> {
        work.object.as_deref().or_else(|| {
            let project = self.project(work.project.as_deref()?)?;
            project.object(work.object_id?).map(|o| o.name.as_str())
        })
    }

    pub fn block_name<'s>(&'s self, work: &'s Work) -> Option<&'s str> {
        work.block.as_deref().or_else(|| {
            let project = self.project(work.project.as_deref()?)?;
            project.block(work.block_id?).map(|b| b.name.as_str())
        })
    }

    pub fn floor_label<'s>(&'s self, work: &'s Work) -> Option<&'s str> {
        work.floor.as_deref().or_else(|| {
            self.locate_floor(work.floor_id?)
                .map(|(_, _, f)| f.number.as_str())
        })
    }

    /// Display name with the placeholder fallback.
    pub fn label(name: Option<&str>) -> &str {
        name.unwrap_or(PLACEHOLDER)
    }

    // -- legacy reference shim -----------------------------------------------

    /// Fill in the surrogate and denormalized references of `work`.
    ///
    /// `block_id` is resolved through `floor_id` when possible, since a
    /// floor belongs to exactly one block; otherwise through the legacy
    /// `(project, block name)` pair. Names, category and tech order that
    /// the row lacks are copied from the referenced entities. Existing
    /// values are never overwritten.
    pub fn normalize(&self, work: &mut Work) {
        if let Some((project, block, floor)) = work.floor_id.and_then(|id| self.locate_floor(id)) {
            work.project.get_or_insert_with(|| project.code.clone());
            work.block_id.get_or_insert(block.id);
            work.block.get_or_insert_with(|| block.name.clone());
            work.floor.get_or_insert_with(|| floor.number.clone());
        }

        if work.block_id.is_none() {
            let by_name = work
                .project
                .as_deref()
                .and_then(|code| self.project(code))
                .zip(work.block.as_deref())
                .and_then(|(project, name)| project.block_by_name(name));
            if let Some(block) = by_name {
                work.block_id = Some(block.id);
            }
        }

        if let Some(object) = work
            .project
            .as_deref()
            .and_then(|code| self.project(code))
            .zip(work.object_id)
            .and_then(|(project, id)| project.object(id))
        {
            work.object.get_or_insert_with(|| object.name.clone());
        }

        if let Some(work_type) = work.work_type_id.and_then(|id| self.work_type(id)) {
            work.work_type.get_or_insert_with(|| work_type.name.clone());
            work.category.get_or_insert_with(|| work_type.category.clone());
            work.tech_order.get_or_insert(work_type.order);
        }

        if let Some(executor) = work.executor_id.and_then(|id| self.executor(id)) {
            work.executor.get_or_insert_with(|| executor.name.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
