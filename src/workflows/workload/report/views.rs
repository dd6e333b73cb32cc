use chrono::NaiveDate;
use serde::Serialize;

/// Completed points for one (assignee, workstream) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkstreamPoints {
    pub assignee: Option<String>,
    pub workstream: Option<String>,
    pub points: f64,
}

/// Assigned load for one assignee against the weekly capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEntry {
    pub assignee: String,
    pub task_points: f64,
    pub meeting_points: f64,
    pub points: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutstandingTask {
    pub id: String,
    pub assignee: Option<String>,
    pub workstream: Option<String>,
    pub effort_label: Option<String>,
    pub name: String,
    pub due_date: Option<NaiveDate>,
}

/// Row counts for a reporting period found in the sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub period: String,
    pub tasks: usize,
    pub completed: usize,
    pub meeting_rows: usize,
}

/// The three weekly views, computed for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub period: String,
    pub completed: Vec<WorkstreamPoints>,
    pub allocation: Vec<AllocationEntry>,
    pub outstanding: Vec<OutstandingTask>,
}

impl WeeklyReport {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.allocation.is_empty() && self.outstanding.is_empty()
    }

    /// Completed points per assignee, summed across workstreams.
    pub fn completed_totals(&self) -> Vec<(Option<&str>, f64)> {
        let mut totals: Vec<(Option<&str>, f64)> = Vec::new();
        for entry in &self.completed {
            let assignee = entry.assignee.as_deref();
            if let Some((last, total)) = totals.last_mut() {
                if *last == assignee {
                    *total += entry.points;
                    continue;
                }
            }
            totals.push((assignee, entry.points));
        }
        totals
    }
}
