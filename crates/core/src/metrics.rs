//! Dashboard counters over a work list.
//!
//! The dashboard computes [`WorkMetrics`] twice: once over every work in the
//! snapshot and once over the filtered, sorted result.

use serde::Serialize;

use crate::models::{Project, Work};
use crate::status::WorkStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkMetrics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    /// Rounded mean progress, 0 for an empty list.
    pub average_progress: u8,
}

/// Counters over `works`.
pub fn compute<'w, I>(works: I) -> WorkMetrics
where
    I: IntoIterator<Item = &'w Work>,
{
    let mut metrics = WorkMetrics::default();
    let mut progress_sum: u64 = 0;
    for work in works {
        metrics.total += 1;
        progress_sum += u64::from(work.progress.min(100));
        match work.status {
            WorkStatus::Completed => metrics.completed += 1,
            WorkStatus::InProgress => metrics.in_progress += 1,
            WorkStatus::Overdue => metrics.overdue += 1,
            WorkStatus::NotStarted => {}
        }
    }
    metrics.average_progress = rounded_mean(progress_sum, metrics.total);
    metrics
}

/// Mean rounded half up. Each term is at most 100, so the result is too.
fn rounded_mean(sum: u64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    ((sum + count / 2) / count).min(100) as u8
}

// ---------------------------------------------------------------------------
// Per-project overview
// ---------------------------------------------------------------------------

/// One row of the project-manager overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub code: String,
    pub name: String,
    pub work_count: usize,
    pub floor_count: usize,
    pub completed: usize,
    pub average_progress: u8,
}

/// Summaries for `projects`, in their given order.
pub fn summarize_projects(projects: &[Project], works: &[Work]) -> Vec<ProjectSummary> {
    projects
        .iter()
        .map(|project| {
            let metrics = compute(
                works
                    .iter()
                    .filter(|w| w.project.as_deref() == Some(project.code.as_str())),
            );
            ProjectSummary {
                code: project.code.clone(),
                name: project.name.clone(),
                work_count: metrics.total,
                floor_count: project.floor_count(),
                completed: metrics.completed,
                average_progress: metrics.average_progress,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
