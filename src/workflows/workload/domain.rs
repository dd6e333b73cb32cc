use super::effort;
use chrono::NaiveDate;
use serde::Serialize;

/// Weekly point budget; 20 points is one 40-hour week.
pub const CAPACITY_POINTS: f64 = 20.0;

/// Workstream assigned to every meeting-log row.
pub const MEETINGS_WORKSTREAM: &str = "Meetings";

/// One task from the export, after header normalization and section filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub created_at: Option<NaiveDate>,
    /// Raw completion timestamp; presence alone marks the task as completed.
    pub completed_at: Option<String>,
    pub completed_on: Option<NaiveDate>,
    pub name: String,
    pub section: String,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub effort_label: Option<String>,
    pub workstream: Option<String>,
    pub points: f64,
}

impl TaskRow {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub(crate) fn in_period(&self, period: &str) -> bool {
        self.section == period
    }
}

/// Builder-style input for [`TaskRow`]; points are derived from the effort label.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub id: String,
    pub created_at: Option<NaiveDate>,
    pub completed_at: Option<String>,
    pub completed_on: Option<NaiveDate>,
    pub name: String,
    pub section: String,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub effort_label: Option<String>,
    pub workstream: Option<String>,
}

impl TaskDraft {
    pub fn into_row(self) -> TaskRow {
        let points = effort::effort_points(self.effort_label.as_deref().unwrap_or(""));
        TaskRow {
            id: self.id,
            created_at: self.created_at,
            completed_at: self.completed_at,
            completed_on: self.completed_on,
            name: self.name,
            section: self.section,
            assignee: self.assignee,
            due_date: self.due_date,
            effort_label: self.effort_label,
            workstream: self.workstream,
            points,
        }
    }
}

/// Time logged in meetings for one assignee and week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingRow {
    pub assignee: Option<String>,
    pub section: String,
    pub hours: f64,
    pub points: f64,
}

impl MeetingRow {
    pub fn new(assignee: Option<String>, section: impl Into<String>, hours: f64) -> Self {
        Self {
            assignee,
            section: section.into(),
            hours,
            points: effort::meeting_points(hours),
        }
    }

    pub const fn workstream(&self) -> &'static str {
        MEETINGS_WORKSTREAM
    }

    pub(crate) fn in_period(&self, period: &str) -> bool {
        self.section == period
    }
}
