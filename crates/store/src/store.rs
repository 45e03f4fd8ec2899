//! Entity store: the in-memory snapshot of every collection plus the
//! mutation flows that keep it in sync with the backend.
//!
//! Refreshes replace a collection wholesale. Each one takes a sequence
//! number before its request goes out, and a response is applied only when
//! no later-issued refresh of the same collection has been applied already.
//! Concurrent or out-of-order refreshes therefore never roll a collection
//! back.
//!
//! Mutations validate locally, call the backend, and on success refetch the
//! collections they touch. A failed mutation leaves the snapshot untouched
//! and is reported through the [`Notifier`] as well as returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use validator::Validate;

use sitetrack_client::{ApiError, Backend};
use sitetrack_core::catalog;
use sitetrack_core::error::CoreError;
use sitetrack_core::lookup::Lookup;
use sitetrack_core::models::{
    Executor, ExecutorInput, Project, ProjectInput, Work, WorkDraft, WorkInput, WorkType,
    WorkTypeInput,
};
use sitetrack_core::notify::{Notifier, Severity};
use sitetrack_core::status::WorkStatus;
use sitetrack_core::types::DbId;
use sitetrack_core::validation::check;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The entity collections a store has loaded.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub works: Vec<Work>,
    pub work_types: Vec<WorkType>,
    pub executors: Vec<Executor>,
}

impl Snapshot {
    pub fn lookup(&self) -> Lookup<'_> {
        Lookup::new(&self.projects, &self.work_types, &self.executors)
    }

    pub fn work(&self, id: DbId) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    /// Fill in missing references on every work from the other collections.
    fn normalize_works(&mut self) {
        let Snapshot {
            projects,
            works,
            work_types,
            executors,
        } = self;
        let lookup = Lookup::new(projects, work_types, executors);
        for work in works.iter_mut() {
            lookup.normalize(work);
        }
    }
}

/// A snapshot collection, as addressed by refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Works,
    WorkTypes,
    Executors,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Projects,
        Collection::Works,
        Collection::WorkTypes,
        Collection::Executors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Works => "works",
            Self::WorkTypes => "work_types",
            Self::Executors => "executors",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot plus the sequence number last applied per collection.
#[derive(Debug, Default)]
struct State {
    snapshot: Snapshot,
    applied: [u64; 4],
}

impl State {
    /// Record `seq` as applied for `collection` unless a newer refresh got
    /// there first.
    fn accept(&mut self, collection: Collection, seq: u64) -> bool {
        let applied = &mut self.applied[collection.index()];
        if seq <= *applied {
            return false;
        }
        *applied = seq;
        true
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Shared, `Send + Sync` entity store. Wrap in `Arc` to share.
pub struct EntityStore {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<State>,
    next_seq: AtomicU64,
}

impl EntityStore {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            state: RwLock::new(State::default()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Read access to the current snapshot.
    pub async fn snapshot(&self) -> RwLockReadGuard<'_, Snapshot> {
        RwLockReadGuard::map(self.state.read().await, |s| &s.snapshot)
    }

    fn issue_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    // -- refresh -------------------------------------------------------------

    /// Reload `collection` from the backend.
    ///
    /// Returns `false` when the response was stale and discarded.
    pub async fn refresh(&self, collection: Collection) -> Result<bool, StoreError> {
        match collection {
            Collection::Projects => self.refresh_projects().await,
            Collection::Works => self.refresh_works().await,
            Collection::WorkTypes => self.refresh_work_types().await,
            Collection::Executors => self.refresh_executors().await,
        }
    }

    pub async fn refresh_projects(&self) -> Result<bool, StoreError> {
        let seq = self.issue_seq();
        let result = self.backend.list_projects().await;
        self.apply(Collection::Projects, seq, result, |s, v| s.projects = v)
            .await
    }

    pub async fn refresh_works(&self) -> Result<bool, StoreError> {
        let seq = self.issue_seq();
        let result = self.backend.list_works().await;
        self.apply(Collection::Works, seq, result, |s, v| s.works = v)
            .await
    }

    pub async fn refresh_work_types(&self) -> Result<bool, StoreError> {
        let seq = self.issue_seq();
        let result = self.backend.list_work_types().await;
        self.apply(Collection::WorkTypes, seq, result, |s, v| s.work_types = v)
            .await
    }

    pub async fn refresh_executors(&self) -> Result<bool, StoreError> {
        let seq = self.issue_seq();
        let result = self.backend.list_executors().await;
        self.apply(Collection::Executors, seq, result, |s, v| s.executors = v)
            .await
    }

    /// Reload every collection concurrently.
    pub async fn refresh_all(&self) -> Result<(), StoreError> {
        tokio::try_join!(
            self.refresh_projects(),
            self.refresh_works(),
            self.refresh_work_types(),
            self.refresh_executors(),
        )?;
        let snapshot = self.snapshot().await;
        tracing::info!(
            projects = snapshot.projects.len(),
            works = snapshot.works.len(),
            work_types = snapshot.work_types.len(),
            executors = snapshot.executors.len(),
            "Snapshot refreshed"
        );
        Ok(())
    }

    async fn apply<T>(
        &self,
        collection: Collection,
        seq: u64,
        result: Result<Vec<T>, ApiError>,
        set: impl FnOnce(&mut Snapshot, Vec<T>),
    ) -> Result<bool, StoreError> {
        let items = match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(collection = collection.as_str(), seq, error = %e, "Refresh failed");
                self.notifier.notify(
                    &format!("Failed to load {}: {e}", collection.as_str()),
                    Severity::Error,
                );
                return Err(e.into());
            }
        };

        let mut state = self.state.write().await;
        if !state.accept(collection, seq) {
            tracing::debug!(collection = collection.as_str(), seq, "Discarding stale refresh");
            return Ok(false);
        }
        let count = items.len();
        set(&mut state.snapshot, items);
        state.snapshot.normalize_works();
        tracing::debug!(collection = collection.as_str(), seq, count, "Applied refresh");
        Ok(true)
    }

    /// Refetch after a successful mutation. Failures are already logged and
    /// notified by the refresh itself; the mutation still counts as done.
    async fn reload(&self, collections: &[Collection]) {
        for &collection in collections {
            let _ = self.refresh(collection).await;
        }
    }

    // -- mutation plumbing ---------------------------------------------------

    fn validate<T: Validate>(&self, input: &T, failure: &str) -> Result<(), StoreError> {
        check(input).map_err(|e| self.fail(failure, e.into()))
    }

    fn fail(&self, failure: &str, error: StoreError) -> StoreError {
        tracing::warn!(error = %error, "{failure}");
        self.notifier
            .notify(&format!("{failure}: {error}"), Severity::Error);
        error
    }

    async fn settle<T>(
        &self,
        result: Result<T, ApiError>,
        reload: &[Collection],
        success: &str,
        failure: &str,
    ) -> Result<T, StoreError> {
        match result {
            Ok(value) => {
                self.reload(reload).await;
                self.notifier.notify(success, Severity::Success);
                Ok(value)
            }
            Err(e) => Err(self.fail(failure, e.into())),
        }
    }

    // -- projects ------------------------------------------------------------

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, StoreError> {
        const FAILURE: &str = "Failed to create project";
        self.validate(input, FAILURE)?;
        let result = self.backend.create_project(input).await;
        self.settle(result, &[Collection::Projects], "Project created", FAILURE)
            .await
    }

    /// Update the project keyed by `code`. Works are refetched as well,
    /// since renamed blocks and floors change their denormalized names.
    pub async fn update_project(
        &self,
        code: &str,
        input: &ProjectInput,
    ) -> Result<Project, StoreError> {
        const FAILURE: &str = "Failed to update project";
        self.validate(input, FAILURE)?;
        if input.code != code {
            return Err(self.fail(
                FAILURE,
                CoreError::Validation(format!("project code cannot change ({code} → {})", input.code))
                    .into(),
            ));
        }
        let result = self.backend.update_project(code, input).await;
        self.settle(
            result,
            &[Collection::Projects, Collection::Works],
            "Project updated",
            FAILURE,
        )
        .await
    }

    pub async fn delete_project(&self, code: &str) -> Result<(), StoreError> {
        let result = self.backend.delete_project(code).await;
        self.settle(
            result,
            &[Collection::Projects, Collection::Works],
            "Project deleted",
            "Failed to delete project",
        )
        .await
    }

    // -- works ---------------------------------------------------------------

    pub async fn create_work(&self, input: &WorkInput) -> Result<Work, StoreError> {
        const FAILURE: &str = "Failed to save work";
        self.validate(input, FAILURE)?;
        let result = self.backend.create_work(input).await;
        self.settle(result, &[Collection::Works], "Work added", FAILURE)
            .await
    }

    pub async fn update_work(&self, id: DbId, input: &WorkInput) -> Result<Work, StoreError> {
        const FAILURE: &str = "Failed to save work";
        self.validate(input, FAILURE)?;
        let result = self.backend.update_work(id, input).await;
        self.settle(result, &[Collection::Works], "Work updated", FAILURE)
            .await
    }

    pub async fn delete_work(&self, id: DbId) -> Result<(), StoreError> {
        let result = self.backend.delete_work(id).await;
        self.settle(
            result,
            &[Collection::Works],
            "Work deleted",
            "Failed to delete work",
        )
        .await
    }

    /// Change the status of a loaded work, coupling progress to it
    /// (not started → 0, completed → 100).
    pub async fn set_work_status(&self, id: DbId, status: WorkStatus) -> Result<Work, StoreError> {
        const FAILURE: &str = "Failed to update status";
        let input = {
            let snapshot = self.snapshot().await;
            let work = snapshot
                .work(id)
                .ok_or_else(|| self.fail(FAILURE, CoreError::not_found("work", id).into()))?;
            let mut input =
                WorkInput::from_work(work).map_err(|e| self.fail(FAILURE, e.into()))?;
            input.set_status(status);
            input
        };
        self.validate(&input, FAILURE)?;
        let result = self.backend.update_work(id, &input).await;
        self.settle(result, &[Collection::Works], "Status updated", FAILURE)
            .await
    }

    /// Submit the "add/edit work" form: resolve the typed executor name
    /// (creating the executor if needed), then create the work, or update
    /// work `id` when given.
    pub async fn submit_work_draft(
        &self,
        id: Option<DbId>,
        draft: WorkDraft,
    ) -> Result<Work, StoreError> {
        self.validate(&draft, "Failed to save work")?;
        let executor = self.resolve_executor(&draft.executor_name).await?;
        let input = draft
            .into_input(executor.id)
            .map_err(|e| self.fail("Failed to save work", e.into()))?;
        match id {
            Some(id) => self.update_work(id, &input).await,
            None => self.create_work(&input).await,
        }
    }

    // -- catalogs ------------------------------------------------------------

    pub async fn create_work_type(&self, input: &WorkTypeInput) -> Result<WorkType, StoreError> {
        const FAILURE: &str = "Failed to create work type";
        self.validate(input, FAILURE)?;
        let result = self.backend.create_work_type(input).await;
        self.settle(result, &[Collection::WorkTypes], "Work type created", FAILURE)
            .await
    }

    pub async fn create_executor(&self, input: &ExecutorInput) -> Result<Executor, StoreError> {
        const FAILURE: &str = "Failed to create executor";
        self.validate(input, FAILURE)?;
        let result = self.backend.create_executor(input).await;
        self.settle(result, &[Collection::Executors], "Executor created", FAILURE)
            .await
    }

    /// The executor named `name` (trimmed, exact match), created on the fly
    /// when none exists yet.
    pub async fn resolve_executor(&self, name: &str) -> Result<Executor, StoreError> {
        const FAILURE: &str = "Failed to create executor";
        let input = ExecutorInput {
            name: name.trim().to_string(),
        };
        self.validate(&input, FAILURE)?;

        if let Some(existing) = self.snapshot().await.lookup().executor_by_name(&input.name) {
            return Ok(existing.clone());
        }

        let executor = self
            .backend
            .create_executor(&input)
            .await
            .map_err(|e| self.fail(FAILURE, e.into()))?;
        tracing::info!(executor_id = executor.id, name = %executor.name, "Created executor");
        self.reload(&[Collection::Executors]).await;
        self.notifier.notify(
            &format!("Created new executor: {}", executor.name),
            Severity::Info,
        );
        Ok(executor)
    }

    /// Install every default work type the backend does not have yet,
    /// matched by name. Returns how many were created (0 when complete), so
    /// a run interrupted partway is finished by the next one.
    pub async fn ensure_seeded(&self) -> Result<usize, StoreError> {
        const FAILURE: &str = "Failed to seed work types";
        let existing = self
            .backend
            .list_work_types()
            .await
            .map_err(|e| self.fail(FAILURE, e.into()))?;
        let missing: Vec<_> = catalog::default_work_types()
            .into_iter()
            .filter(|input| !existing.iter().any(|wt| wt.name == input.name))
            .collect();
        if missing.is_empty() {
            tracing::debug!(count = existing.len(), "Work type catalog already present");
            self.refresh_work_types().await?;
            return Ok(0);
        }

        let mut created = 0;
        for input in &missing {
            check(input).map_err(|e| self.fail(FAILURE, e.into()))?;
            let result = self.backend.create_work_type(input).await;
            if let Err(e) = result {
                tracing::warn!(created, missing = missing.len(), "Seeding stopped partway");
                self.reload(&[Collection::WorkTypes]).await;
                return Err(self.fail(FAILURE, e.into()));
            }
            created += 1;
        }
        tracing::info!(created, existing = existing.len(), "Seeded default work type catalog");
        self.refresh_work_types().await?;
        Ok(created)
    }
}
