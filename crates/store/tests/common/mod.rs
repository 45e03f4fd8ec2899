//! Shared fixtures for store integration tests: an in-memory [`Backend`]
//! and a notifier that records what it was told.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use sitetrack_client::{ApiError, Backend};
use sitetrack_core::models::{
    Block, Executor, ExecutorInput, Floor, ObjectType, Project, ProjectInput, Work, WorkInput,
    WorkType, WorkTypeInput,
};
use sitetrack_core::notify::{Notifier, Severity};
use sitetrack_core::types::{Date, DbId};
use sitetrack_store::{EntityStore, TracingNotifier};

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.messages.lock().unwrap().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, s)| *s == severity)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        TracingNotifier.notify(message, severity);
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Holds one `list_works` response until released.
pub struct Gate {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test-side handles of a [`Gate`].
pub struct GateHandle {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

#[derive(Debug, Default)]
pub struct Data {
    pub projects: Vec<Project>,
    pub works: Vec<Work>,
    pub work_types: Vec<WorkType>,
    pub executors: Vec<Executor>,
}

/// In-memory backend with id allocation, call counting and failure
/// injection for mutations.
#[derive(Default)]
pub struct FakeBackend {
    pub data: Mutex<Data>,
    next_id: AtomicI64,
    fail_mutations: AtomicBool,
    fail_lists: AtomicBool,
    works_gates: Mutex<VecDeque<Gate>>,
    calls: Mutex<Vec<String>>,
    /// Call name and how many calls of it succeed before one fails.
    fail_once: Mutex<Option<(String, usize)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        }
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Let `successes` more `name` calls through, then fail the next one.
    pub fn fail_once_after(&self, name: &str, successes: usize) {
        *self.fail_once.lock().unwrap() = Some((name.to_string(), successes));
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Make the next `list_works` call capture its data, signal `started`,
    /// and wait for `release` before responding.
    pub fn gate_next_works_list(&self) -> GateHandle {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.works_gates.lock().unwrap().push_back(Gate {
            started: started_tx,
            release: release_rx,
        });
        GateHandle {
            started: started_rx,
            release: release_tx,
        }
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn mutation(&self, name: &str) -> Result<(), ApiError> {
        self.record(name);
        if self.fail_mutations.load(Ordering::SeqCst) || self.take_failure(name) {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(())
    }

    fn take_failure(&self, name: &str) -> bool {
        let mut fail_once = self.fail_once.lock().unwrap();
        match fail_once.as_mut() {
            Some((target, 0)) if target == name => {
                *fail_once = None;
                true
            }
            Some((target, remaining)) if target == name => {
                *remaining -= 1;
                false
            }
            _ => false,
        }
    }

    fn list(&self, name: &str) -> Result<(), ApiError> {
        self.record(name);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 503,
                message: "Service Unavailable".into(),
            });
        }
        Ok(())
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            message: format!("{what} not found"),
        }
    }

    fn build_project(&self, input: &ProjectInput, id: Option<DbId>) -> Project {
        Project {
            id: id.or_else(|| Some(self.id())),
            code: input.code.clone(),
            name: input.name.clone(),
            icon: input.icon.clone(),
            description: input.description.clone(),
            client: input.client.clone(),
            contractor: input.contractor.clone(),
            address: input.address.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            budget: Some(input.budget),
            blocks: input
                .blocks
                .iter()
                .map(|b| Block {
                    id: self.id(),
                    name: b.name.clone(),
                    floors: b
                        .floors
                        .iter()
                        .map(|number| Floor {
                            id: self.id(),
                            number: number.clone(),
                        })
                        .collect(),
                })
                .collect(),
            objects: input
                .objects
                .iter()
                .map(|name| ObjectType {
                    id: self.id(),
                    name: name.clone(),
                })
                .collect(),
        }
    }

    fn build_work(&self, id: DbId, input: &WorkInput) -> Work {
        Work {
            id,
            floor_id: Some(input.floor_id),
            object_id: Some(input.object_id),
            work_type_id: Some(input.work_type_id),
            executor_id: Some(input.executor_id),
            start_date: Some(input.start_date),
            end_date: Some(input.end_date),
            status: input.status,
            priority: input.priority,
            progress: input.progress,
            note: input.note.clone(),
            ..Work::default()
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.list("list_projects")?;
        Ok(self.data.lock().unwrap().projects.clone())
    }

    async fn get_project(&self, code: &str) -> Result<Project, ApiError> {
        let data = self.data.lock().unwrap();
        data.projects
            .iter()
            .find(|p| p.code == code)
            .cloned()
            .ok_or_else(|| Self::not_found("project"))
    }

    async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        self.mutation("create_project")?;
        let project = self.build_project(input, None);
        let mut data = self.data.lock().unwrap();
        if data.projects.iter().any(|p| p.code == input.code) {
            return Err(ApiError::Status {
                status: 400,
                message: "Project with this code already exists".into(),
            });
        }
        data.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, code: &str, input: &ProjectInput) -> Result<Project, ApiError> {
        self.mutation("update_project")?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .projects
            .iter_mut()
            .find(|p| p.code == code)
            .ok_or_else(|| Self::not_found("project"))?;
        *slot = self.build_project(input, slot.id);
        Ok(slot.clone())
    }

    async fn delete_project(&self, code: &str) -> Result<(), ApiError> {
        self.mutation("delete_project")?;
        let mut data = self.data.lock().unwrap();
        data.projects.retain(|p| p.code != code);
        data.works.retain(|w| w.project.as_deref() != Some(code));
        Ok(())
    }

    async fn list_works(&self) -> Result<Vec<Work>, ApiError> {
        self.list("list_works")?;
        let works = self.data.lock().unwrap().works.clone();
        let gate = self.works_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.started.send(());
            let _ = gate.release.await;
        }
        Ok(works)
    }

    async fn get_work(&self, id: DbId) -> Result<Work, ApiError> {
        let data = self.data.lock().unwrap();
        data.works
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("work"))
    }

    async fn create_work(&self, input: &WorkInput) -> Result<Work, ApiError> {
        self.mutation("create_work")?;
        let work = self.build_work(self.id(), input);
        self.data.lock().unwrap().works.push(work.clone());
        Ok(work)
    }

    async fn update_work(&self, id: DbId, input: &WorkInput) -> Result<Work, ApiError> {
        self.mutation("update_work")?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .works
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Self::not_found("work"))?;
        *slot = self.build_work(id, input);
        Ok(slot.clone())
    }

    async fn delete_work(&self, id: DbId) -> Result<(), ApiError> {
        self.mutation("delete_work")?;
        self.data.lock().unwrap().works.retain(|w| w.id != id);
        Ok(())
    }

    async fn list_work_types(&self) -> Result<Vec<WorkType>, ApiError> {
        self.list("list_work_types")?;
        Ok(self.data.lock().unwrap().work_types.clone())
    }

    async fn get_work_type(&self, id: DbId) -> Result<WorkType, ApiError> {
        let data = self.data.lock().unwrap();
        data.work_types
            .iter()
            .find(|wt| wt.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("work type"))
    }

    async fn create_work_type(&self, input: &WorkTypeInput) -> Result<WorkType, ApiError> {
        self.mutation("create_work_type")?;
        let work_type = WorkType {
            id: self.id(),
            name: input.name.clone(),
            order: input.order,
            color: input.color.clone(),
            category: input.category.clone(),
        };
        self.data.lock().unwrap().work_types.push(work_type.clone());
        Ok(work_type)
    }

    async fn update_work_type(&self, id: DbId, input: &WorkTypeInput) -> Result<WorkType, ApiError> {
        self.mutation("update_work_type")?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .work_types
            .iter_mut()
            .find(|wt| wt.id == id)
            .ok_or_else(|| Self::not_found("work type"))?;
        slot.name = input.name.clone();
        slot.order = input.order;
        slot.color = input.color.clone();
        slot.category = input.category.clone();
        Ok(slot.clone())
    }

    async fn delete_work_type(&self, id: DbId) -> Result<(), ApiError> {
        self.mutation("delete_work_type")?;
        self.data.lock().unwrap().work_types.retain(|wt| wt.id != id);
        Ok(())
    }

    async fn list_executors(&self) -> Result<Vec<Executor>, ApiError> {
        self.list("list_executors")?;
        Ok(self.data.lock().unwrap().executors.clone())
    }

    async fn get_executor(&self, id: DbId) -> Result<Executor, ApiError> {
        let data = self.data.lock().unwrap();
        data.executors
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("executor"))
    }

    async fn create_executor(&self, input: &ExecutorInput) -> Result<Executor, ApiError> {
        self.mutation("create_executor")?;
        let executor = Executor {
            id: self.id(),
            name: input.name.clone(),
        };
        self.data.lock().unwrap().executors.push(executor.clone());
        Ok(executor)
    }

    async fn update_executor(&self, id: DbId, input: &ExecutorInput) -> Result<Executor, ApiError> {
        self.mutation("update_executor")?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .executors
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Self::not_found("executor"))?;
        slot.name = input.name.clone();
        Ok(slot.clone())
    }

    async fn delete_executor(&self, id: DbId) -> Result<(), ApiError> {
        self.mutation("delete_executor")?;
        self.data.lock().unwrap().executors.retain(|e| e.id != id);
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<(), ApiError> {
        self.mutation("seed_defaults")
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn day(d: u32) -> Date {
    Date::from_ymd_opt(2024, 6, d).unwrap()
}

/// Backend preloaded with one project (block "А" with floors 1–2, object
/// "Квартиры"), one work type, one executor and one work on floor 2.
pub fn seeded_backend() -> FakeBackend {
    let backend = FakeBackend::new();
    {
        let mut data = backend.data.lock().unwrap();
        data.projects = serde_json::from_value(serde_json::json!([
            {"id": 1, "code": "P1", "name": "ЖК Северный",
             "blocks": [{"id": 10, "name": "А",
                         "floors": [{"id": 11, "number": 1}, {"id": 12, "number": 2}]}],
             "objects": [{"id": 5, "name": "Квартиры"}]}
        ]))
        .unwrap();
        data.work_types = vec![WorkType {
            id: 1,
            name: "Штукатурка".into(),
            order: 1,
            color: "#e53e3e".into(),
            category: "Черновые".into(),
        }];
        data.executors = vec![Executor {
            id: 3,
            name: "Бригада Петрова".into(),
        }];
        // Legacy row: only the block name and floor id are present.
        data.works = serde_json::from_value(serde_json::json!([
            {"id": 7, "project": "P1", "block": "А", "floor_id": 12, "object_id": 5,
             "work_type_id": 1, "executor_id": 3,
             "start_date": "2024-06-01", "end_date": "2024-06-10",
             "status": "in-progress", "priority": "high", "progress": 40}
        ]))
        .unwrap();
    }
    backend
}

pub fn store_with(backend: Arc<FakeBackend>) -> (EntityStore, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let store = EntityStore::new(backend, notifier.clone());
    (store, notifier)
}

pub fn work_input(floor_id: DbId) -> WorkInput {
    WorkInput {
        executor_id: 3,
        work_type_id: 1,
        start_date: day(1),
        end_date: day(5),
        status: Default::default(),
        priority: Default::default(),
        progress: 0,
        note: None,
        floor_id,
        object_id: 5,
    }
}
