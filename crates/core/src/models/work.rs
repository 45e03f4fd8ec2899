//! Work items: the tasks placed on a floor/object of a project.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::status::{Priority, WorkStatus};
use crate::types::{Date, DbId};
use crate::validation::{check, date_order, not_blank};
use crate::wire;

/// A work item as returned by `GET /works`.
///
/// Besides the foreign keys the backend denormalizes display names
/// (`workType`, `executor`, `block`, ...) and the work type's `category` and
/// `techOrder` into every row. Any of them may be absent on older rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    #[serde(default)]
    pub id: DbId,
    /// Owning project code.
    #[serde(default)]
    pub project: Option<String>,
    /// Legacy block reference by display name. Prefer `block_id`.
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub block_id: Option<DbId>,
    #[serde(default, deserialize_with = "wire::opt_label")]
    pub floor: Option<String>,
    #[serde(default)]
    pub floor_id: Option<DbId>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub object_id: Option<DbId>,
    #[serde(default, rename = "workType", alias = "work_type")]
    pub work_type: Option<String>,
    #[serde(default)]
    pub work_type_id: Option<DbId>,
    #[serde(default)]
    pub executor: Option<String>,
    #[serde(default)]
    pub executor_id: Option<DbId>,
    #[serde(default, alias = "startDate", deserialize_with = "wire::opt_date")]
    pub start_date: Option<Date>,
    #[serde(default, alias = "endDate", deserialize_with = "wire::opt_date")]
    pub end_date: Option<Date>,
    #[serde(default, deserialize_with = "wire::status")]
    pub status: WorkStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "wire::progress")]
    pub progress: u8,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "techOrder", alias = "tech_order")]
    pub tech_order: Option<i32>,
}

impl Work {
    /// Move the work to `status`, deriving progress from it.
    ///
    /// Not-started resets progress to 0 and completed pins it to 100; the
    /// intermediate states keep whatever progress was recorded.
    pub fn set_status(&mut self, status: WorkStatus) {
        self.status = status;
        if let Some(progress) = status.implied_progress() {
            self.progress = progress;
        }
    }

    pub fn tech_order(&self) -> i32 {
        self.tech_order.unwrap_or(0)
    }

    /// Whether the work's planned window covers `day` (inclusive).
    pub fn is_scheduled_on(&self, day: Date) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Payload for `POST /works` and `PUT /works/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[validate(schema(function = "validate_work"))]
pub struct WorkInput {
    #[validate(range(min = 1, message = "is required"))]
    pub executor_id: DbId,
    #[validate(range(min = 1, message = "is required"))]
    pub work_type_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub status: WorkStatus,
    pub priority: Priority,
    #[validate(range(max = 100))]
    pub progress: u8,
    pub note: Option<String>,
    #[validate(range(min = 1, message = "is required"))]
    pub floor_id: DbId,
    #[validate(range(min = 1, message = "is required"))]
    pub object_id: DbId,
}

fn validate_work(input: &WorkInput) -> Result<(), ValidationError> {
    date_order(Some(input.start_date), Some(input.end_date))
}

impl WorkInput {
    /// Payload that re-submits `work` as stored, e.g. before a status change.
    ///
    /// Fails when the row lacks one of the keys the backend requires.
    pub fn from_work(work: &Work) -> Result<Self, CoreError> {
        let missing = |field: &str| {
            CoreError::Validation(format!("work {} has no {field}", work.id))
        };
        Ok(Self {
            executor_id: work.executor_id.ok_or_else(|| missing("executor_id"))?,
            work_type_id: work.work_type_id.ok_or_else(|| missing("work_type_id"))?,
            start_date: work.start_date.ok_or_else(|| missing("start_date"))?,
            end_date: work.end_date.ok_or_else(|| missing("end_date"))?,
            status: work.status,
            priority: work.priority,
            progress: work.progress,
            note: work.note.clone(),
            floor_id: work.floor_id.ok_or_else(|| missing("floor_id"))?,
            object_id: work.object_id.ok_or_else(|| missing("object_id"))?,
        })
    }

    /// Same coupling as [`Work::set_status`], applied to a payload.
    pub fn set_status(&mut self, status: WorkStatus) {
        self.status = status;
        if let Some(progress) = status.implied_progress() {
            self.progress = progress;
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// State of the "add work" form before submission.
///
/// The executor is typed as free text; the store resolves it to an existing
/// executor by name or creates a new one.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
#[validate(schema(function = "validate_draft"))]
pub struct WorkDraft {
    #[validate(required(message = "is required"))]
    pub project: Option<String>,
    #[validate(required(message = "is required"))]
    pub block_id: Option<DbId>,
    #[validate(required(message = "is required"))]
    pub floor_id: Option<DbId>,
    #[validate(required(message = "is required"))]
    pub object_id: Option<DbId>,
    #[validate(required(message = "is required"))]
    pub work_type_id: Option<DbId>,
    #[validate(custom(function = "not_blank"))]
    pub executor_name: String,
    #[validate(required(message = "is required"))]
    pub start_date: Option<Date>,
    #[validate(required(message = "is required"))]
    pub end_date: Option<Date>,
    pub status: WorkStatus,
    pub priority: Priority,
    #[validate(range(max = 100))]
    pub progress: u8,
    pub note: String,
}

fn validate_draft(draft: &WorkDraft) -> Result<(), ValidationError> {
    date_order(draft.start_date, draft.end_date)
}

impl WorkDraft {
    /// Blank form: today's dates, not started, medium priority.
    pub fn new(today: Date) -> Self {
        Self {
            project: None,
            block_id: None,
            floor_id: None,
            object_id: None,
            work_type_id: None,
            executor_name: String::new(),
            start_date: Some(today),
            end_date: Some(today),
            status: WorkStatus::NotStarted,
            priority: Priority::Medium,
            progress: 0,
            note: String::new(),
        }
    }

    /// Validate the draft and build the payload for `executor_id`.
    pub fn into_input(self, executor_id: DbId) -> Result<WorkInput, CoreError> {
        check(&self)?;
        let required = |field: &str| CoreError::Validation(format!("{field}: is required"));
        let note = self.note.trim();
        let input = WorkInput {
            executor_id,
            work_type_id: self.work_type_id.ok_or_else(|| required("work_type_id"))?,
            start_date: self.start_date.ok_or_else(|| required("start_date"))?,
            end_date: self.end_date.ok_or_else(|| required("end_date"))?,
            status: self.status,
            priority: self.priority,
            progress: self.progress,
            note: (!note.is_empty()).then(|| note.to_string()),
            floor_id: self.floor_id.ok_or_else(|| required("floor_id"))?,
            object_id: self.object_id.ok_or_else(|| required("object_id"))?,
        };
        check(&input)?;
        Ok(input)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
