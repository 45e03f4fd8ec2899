//! Plain-text rendering of the dashboard.

use std::fmt::Write;

use sitetrack_core::lookup::Lookup;
use sitetrack_core::metrics::{ProjectSummary, WorkMetrics};
use sitetrack_store::DashboardView;

fn metrics_line(label: &str, m: &WorkMetrics) -> String {
    format!(
        "{label:<8} total {:>4} | completed {:>4} | in progress {:>4} | overdue {:>4} | avg {:>3}%",
        m.total, m.completed, m.in_progress, m.overdue, m.average_progress
    )
}

/// Render the metrics header, the project overview and the work table.
pub fn render(view: &DashboardView, summaries: &[ProjectSummary], lookup: &Lookup<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", metrics_line("All", &view.global));
    let _ = writeln!(out, "{}", metrics_line("Shown", &view.visible));

    if !summaries.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Projects");
        for s in summaries {
            let _ = writeln!(
                out,
                "  {:<12} {:<30} works {:>4}  floors {:>4}  completed {:>4}  avg {:>3}%",
                s.code, s.name, s.work_count, s.floor_count, s.completed, s.average_progress
            );
        }
    }

    let _ = writeln!(out);
    if view.works.is_empty() {
        let _ = writeln!(out, "No works match the current filters.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>5}  {:<10} {:<8} {:<8} {:<28} {:<24} {:<12} {:>4}  {:<10} {:<10}",
        "ID", "PROJECT", "BLOCK", "FLOOR", "WORK TYPE", "EXECUTOR", "STATUS", "%", "START", "END"
    );
    for work in &view.works {
        let date = |d: Option<sitetrack_core::types::Date>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| Lookup::label(None).to_string())
        };
        let _ = writeln!(
            out,
            "{:>5}  {:<10} {:<8} {:<8} {:<28} {:<24} {:<12} {:>4}  {:<10} {:<10}",
            work.id,
            Lookup::label(work.project.as_deref()),
            Lookup::label(lookup.block_name(work)),
            Lookup::label(lookup.floor_label(work)),
            Lookup::label(lookup.work_type_name(work)),
            Lookup::label(lookup.executor_name(work)),
            work.status.as_str(),
            work.progress,
            date(work.start_date),
            date(work.end_date),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitetrack_core::models::Work;
    use sitetrack_core::status::WorkStatus;

    fn view(works: Vec<Work>) -> DashboardView {
        let metrics = sitetrack_core::metrics::compute(&works);
        DashboardView {
            works,
            global: metrics,
            visible: metrics,
        }
    }

    #[test]
    fn empty_view_says_so() {
        let text = render(&view(Vec::new()), &[], &Lookup::empty());
        assert!(text.contains("No works match"));
        assert!(text.starts_with("All      total    0"));
    }

    #[test]
    fn missing_names_render_as_placeholder() {
        let work = Work {
            id: 4,
            status: WorkStatus::Overdue,
            progress: 30,
            work_type: Some("Стяжка".into()),
            ..Work::default()
        };
        let text = render(&view(vec![work]), &[], &Lookup::empty());
        let row = text.lines().last().unwrap();
        assert!(row.contains("Стяжка"), "{row}");
        assert!(row.contains("overdue"), "{row}");
        assert!(row.contains('—'), "{row}");
    }
}
