//! Dashboard state: what the user has selected, filtered and sorted by,
//! and the view it produces over a snapshot.

use serde::Serialize;

use sitetrack_core::filter::{self, CategoryFilter, StatusFilter, WorkFilter};
use sitetrack_core::metrics::{self, ProjectSummary, WorkMetrics};
use sitetrack_core::models::Work;
use sitetrack_core::selection::{ProjectScope, Selection};
use sitetrack_core::sort::{sort_works, SortMode};
use sitetrack_core::types::Date;

use crate::store::Snapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub selection: Selection,
    pub filter: WorkFilter,
    pub sort: SortMode,
}

/// Everything the work-list screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Filtered and sorted works.
    pub works: Vec<Work>,
    /// Counters over every work in the snapshot.
    pub global: WorkMetrics,
    /// Counters over `works`.
    pub visible: WorkMetrics,
}

impl Dashboard {
    pub fn new(scope: ProjectScope, filter: WorkFilter, sort: SortMode) -> Self {
        let mut selection = Selection::new();
        selection.set_scope(scope);
        Self {
            selection,
            filter,
            sort,
        }
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    /// Filter → sort → aggregate over `snapshot` as of `today`.
    pub fn view(&self, snapshot: &Snapshot, today: Date) -> DashboardView {
        let lookup = snapshot.lookup();
        let mut works = filter::apply(&snapshot.works, &self.filter, &self.selection, &lookup, today);
        sort_works(&mut works, self.sort);

        DashboardView {
            global: metrics::compute(&snapshot.works),
            visible: metrics::compute(works.iter().copied()),
            works: works.into_iter().cloned().collect(),
        }
    }

    /// Per-project overview rows for the projects in scope.
    pub fn project_summaries(&self, snapshot: &Snapshot) -> Vec<ProjectSummary> {
        let mut summaries = metrics::summarize_projects(&snapshot.projects, &snapshot.works);
        if let Some(code) = self.selection.scope().project_code() {
            summaries.retain(|s| s.code == code);
        }
        summaries
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
