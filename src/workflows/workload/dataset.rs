use super::domain::{MeetingRow, TaskRow};
use super::report::{
    self, AllocationEntry, OutstandingTask, PeriodSummary, WeeklyReport, WorkstreamPoints,
};

/// Normalized task and meeting rows for one reporting run.
///
/// Every query is a pure function of the rows and a period label; the
/// dataset is never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct WorkloadDataset {
    tasks: Vec<TaskRow>,
    meetings: Vec<MeetingRow>,
}

impl WorkloadDataset {
    pub fn new(tasks: Vec<TaskRow>, meetings: Vec<MeetingRow>) -> Self {
        Self { tasks, meetings }
    }

    pub fn tasks(&self) -> &[TaskRow] {
        &self.tasks
    }

    pub fn meetings(&self) -> &[MeetingRow] {
        &self.meetings
    }

    pub fn completed_by_assignee_workstream(&self, period: &str) -> Vec<WorkstreamPoints> {
        report::completed_by_assignee_workstream(&self.tasks, &self.meetings, period)
    }

    pub fn allocation_by_assignee(&self, period: &str) -> Vec<AllocationEntry> {
        report::allocation_by_assignee(&self.tasks, &self.meetings, period)
    }

    pub fn uncompleted_detail(&self, period: &str) -> Vec<OutstandingTask> {
        report::uncompleted_detail(&self.tasks, period)
    }

    pub fn report(&self, period: &str) -> WeeklyReport {
        WeeklyReport {
            period: period.to_string(),
            completed: self.completed_by_assignee_workstream(period),
            allocation: self.allocation_by_assignee(period),
            outstanding: self.uncompleted_detail(period),
        }
    }

    /// Periods present in either source, in the order they first appear.
    pub fn periods(&self) -> Vec<PeriodSummary> {
        let mut summaries: Vec<PeriodSummary> = Vec::new();

        for task in &self.tasks {
            let summary = summary_for(&mut summaries, &task.section);
            summary.tasks += 1;
            if task.is_completed() {
                summary.completed += 1;
            }
        }

        for meeting in &self.meetings {
            summary_for(&mut summaries, &meeting.section).meeting_rows += 1;
        }

        summaries
    }
}

fn summary_for<'a>(summaries: &'a mut Vec<PeriodSummary>, period: &str) -> &'a mut PeriodSummary {
    let index = match summaries.iter().position(|summary| summary.period == period) {
        Some(index) => index,
        None => {
            summaries.push(PeriodSummary {
                period: period.to_string(),
                tasks: 0,
                completed: 0,
                meeting_rows: 0,
            });
            summaries.len() - 1
        }
    };
    &mut summaries[index]
}
