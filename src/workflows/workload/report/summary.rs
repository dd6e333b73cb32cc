use super::super::domain::{MeetingRow, TaskRow, CAPACITY_POINTS};
use super::views::{AllocationEntry, OutstandingTask, WorkstreamPoints};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy)]
struct LoadTotals {
    task_points: f64,
    meeting_points: f64,
}

/// Completed task points per (assignee, workstream), merged with the period's
/// meeting time under the `Meetings` workstream.
pub(crate) fn completed_by_assignee_workstream(
    tasks: &[TaskRow],
    meetings: &[MeetingRow],
    period: &str,
) -> Vec<WorkstreamPoints> {
    let mut grouped: BTreeMap<(Option<String>, Option<String>), f64> = BTreeMap::new();

    for task in tasks
        .iter()
        .filter(|task| task.in_period(period) && task.is_completed())
    {
        *grouped
            .entry((task.assignee.clone(), task.workstream.clone()))
            .or_default() += task.points;
    }

    for meeting in meetings.iter().filter(|meeting| meeting.in_period(period)) {
        *grouped
            .entry((meeting.assignee.clone(), Some(meeting.workstream().to_string())))
            .or_default() += meeting.points;
    }

    grouped
        .into_iter()
        .map(|((assignee, workstream), points)| WorkstreamPoints {
            assignee,
            workstream,
            points,
        })
        .collect()
}

/// Every task of the period, completed or not, plus meetings, per assignee.
pub(crate) fn allocation_by_assignee(
    tasks: &[TaskRow],
    meetings: &[MeetingRow],
    period: &str,
) -> Vec<AllocationEntry> {
    let mut totals: BTreeMap<String, LoadTotals> = BTreeMap::new();
    let mut unassigned_tasks = 0usize;
    let mut unassigned_meetings = 0usize;

    for task in tasks.iter().filter(|task| task.in_period(period)) {
        match &task.assignee {
            Some(assignee) => {
                totals.entry(assignee.clone()).or_default().task_points += task.points;
            }
            None => unassigned_tasks += 1,
        }
    }

    for meeting in meetings.iter().filter(|meeting| meeting.in_period(period)) {
        match &meeting.assignee {
            Some(assignee) => {
                totals.entry(assignee.clone()).or_default().meeting_points += meeting.points;
            }
            None => unassigned_meetings += 1,
        }
    }

    if unassigned_tasks > 0 || unassigned_meetings > 0 {
        warn!(
            period,
            unassigned_tasks,
            unassigned_meetings,
            "rows without an assignee left out of allocation"
        );
    }

    totals
        .into_iter()
        .map(|(assignee, load)| {
            let points = load.task_points + load.meeting_points;
            AllocationEntry {
                assignee,
                task_points: load.task_points,
                meeting_points: load.meeting_points,
                points,
                percent: allocation_percent(points),
            }
        })
        .collect()
}

pub fn allocation_percent(points: f64) -> f64 {
    points / CAPACITY_POINTS
}

pub(crate) fn uncompleted_detail(tasks: &[TaskRow], period: &str) -> Vec<OutstandingTask> {
    let mut outstanding: Vec<OutstandingTask> = tasks
        .iter()
        .filter(|task| task.in_period(period) && !task.is_completed())
        .map(|task| OutstandingTask {
            id: task.id.clone(),
            assignee: task.assignee.clone(),
            workstream: task.workstream.clone(),
            effort_label: task.effort_label.clone(),
            name: task.name.clone(),
            due_date: task.due_date,
        })
        .collect();

    outstanding.sort_by(|a, b| {
        a.assignee
            .cmp(&b.assignee)
            .then_with(|| a.workstream.cmp(&b.workstream))
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });

    outstanding
}
