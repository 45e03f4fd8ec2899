//! Data-access seam between the store and the backend.

use async_trait::async_trait;

use sitetrack_core::models::{
    Executor, ExecutorInput, Project, ProjectInput, Work, WorkInput, WorkType, WorkTypeInput,
};
use sitetrack_core::types::DbId;

use crate::error::ApiError;

/// Per-entity CRUD against the tracker backend.
///
/// Projects are keyed by their business `code`; every other entity by its
/// numeric id. Every call is independent: nothing is queued, deduplicated
/// or retried here.
#[async_trait]
pub trait Backend: Send + Sync {
    // -- projects ------------------------------------------------------------

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn get_project(&self, code: &str) -> Result<Project, ApiError>;
    async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError>;
    async fn update_project(&self, code: &str, input: &ProjectInput) -> Result<Project, ApiError>;
    async fn delete_project(&self, code: &str) -> Result<(), ApiError>;

    // -- works ---------------------------------------------------------------

    async fn list_works(&self) -> Result<Vec<Work>, ApiError>;
    async fn get_work(&self, id: DbId) -> Result<Work, ApiError>;
    async fn create_work(&self, input: &WorkInput) -> Result<Work, ApiError>;
    async fn update_work(&self, id: DbId, input: &WorkInput) -> Result<Work, ApiError>;
    async fn delete_work(&self, id: DbId) -> Result<(), ApiError>;

    // -- work types ----------------------------------------------------------

    async fn list_work_types(&self) -> Result<Vec<WorkType>, ApiError>;
    async fn get_work_type(&self, id: DbId) -> Result<WorkType, ApiError>;
    async fn create_work_type(&self, input: &WorkTypeInput) -> Result<WorkType, ApiError>;
    async fn update_work_type(&self, id: DbId, input: &WorkTypeInput) -> Result<WorkType, ApiError>;
    async fn delete_work_type(&self, id: DbId) -> Result<(), ApiError>;

    // -- executors -----------------------------------------------------------

    async fn list_executors(&self) -> Result<Vec<Executor>, ApiError>;
    async fn get_executor(&self, id: DbId) -> Result<Executor, ApiError>;
    async fn create_executor(&self, input: &ExecutorInput) -> Result<Executor, ApiError>;
    async fn update_executor(&self, id: DbId, input: &ExecutorInput) -> Result<Executor, ApiError>;
    async fn delete_executor(&self, id: DbId) -> Result<(), ApiError>;

    /// Ask the backend to install its demo data set, default work-type
    /// catalog included.
    async fn seed_defaults(&self) -> Result<(), ApiError>;
}
