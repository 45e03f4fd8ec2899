//! Work-list filter pipeline.
//!
//! The dashboard narrows the full work list with a fixed sequence of
//! predicates: scope → status class → category → free-text search →
//! tree selection. Each pass is a pure predicate over the running subset, so
//! the passes commute and the pipeline is idempotent; the order only matters
//! for how much work later passes do.
//!
//! Relative order of the input is preserved. Sorting is a separate step
//! (see [`crate::sort`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::lookup::Lookup;
use crate::models::Work;
use crate::selection::Selection;
use crate::status::WorkStatus;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Status-class filter buttons on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    NotCompleted,
    /// Works whose planned window covers today.
    Today,
    Overdue,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::NotCompleted => "not-completed",
            Self::Today => "today",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::All,
            Self::Completed,
            Self::NotCompleted,
            Self::Today,
            Self::Overdue,
        ]
        .into_iter()
        .find(|f| f.as_str() == s)
        .ok_or_else(|| CoreError::Validation(format!("Unknown status filter: {s}")))
    }
}

/// Category filter: everything, or a single work-type category by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

/// Everything the pipeline needs besides the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

pub fn matches_scope(work: &Work, selection: &Selection) -> bool {
    match selection.scope().project_code() {
        None => true,
        Some(code) => work.project.as_deref() == Some(code),
    }
}

pub fn matches_status(work: &Work, filter: StatusFilter, today: Date) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Completed => work.status == WorkStatus::Completed,
        StatusFilter::NotCompleted => work.status != WorkStatus::Completed,
        StatusFilter::Today => work.is_scheduled_on(today),
        StatusFilter::Overdue => work.status == WorkStatus::Overdue,
    }
}

pub fn matches_category(work: &Work, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(name) => work.category.as_deref() == Some(name.as_str()),
    }
}

/// Case-insensitive substring match of `needle` (already lowercased and
/// non-empty) against any searchable field of `work`.
pub fn matches_search(work: &Work, needle: &str, lookup: &Lookup<'_>) -> bool {
    [
        lookup.work_type_name(work),
        lookup.object_name(work),
        lookup.executor_name(work),
        lookup.block_name(work),
        lookup.floor_label(work),
        work.note.as_deref(),
        lookup.project_name(work),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

pub fn matches_selection(work: &Work, selection: &Selection) -> bool {
    let Some(project) = selection.project() else {
        return true;
    };
    if work.project.as_deref() != Some(project) {
        return false;
    }
    if let Some(block) = selection.block() {
        if work.block_id != Some(block) {
            return false;
        }
        if let Some(floor) = selection.floor() {
            return work.floor_id == Some(floor);
        }
    }
    true
}

/// Normalize a raw search box value: trimmed and lowercased, `None` when
/// nothing is left.
pub fn search_needle(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every pass over `works` and return the surviving works in input
/// order.
pub fn apply<'w, I>(
    works: I,
    filter: &WorkFilter,
    selection: &Selection,
    lookup: &Lookup<'_>,
    today: Date,
) -> Vec<&'w Work>
where
    I: IntoIterator<Item = &'w Work>,
{
    let mut out: Vec<&Work> = works.into_iter().collect();

    if selection.scope().project_code().is_some() {
        out.retain(|w| matches_scope(w, selection));
    }
    if filter.status != StatusFilter::All {
        out.retain(|w| matches_status(w, filter.status, today));
    }
    if filter.category != CategoryFilter::All {
        out.retain(|w| matches_category(w, &filter.category));
    }
    if let Some(needle) = search_needle(&filter.search) {
        out.retain(|w| matches_search(w, &needle, lookup));
    }
    if selection.project().is_some() {
        out.retain(|w| matches_selection(w, selection));
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
