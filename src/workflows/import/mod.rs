mod columns;
mod parser;
mod workbook;

pub use columns::SourceKind;

use crate::workflows::workload::{MeetingRow, TaskRow, WorkloadDataset};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {kind}: {source}")]
    Io {
        kind: SourceKind,
        source: std::io::Error,
    },
    #[error("invalid {kind} data: {source}")]
    Csv { kind: SourceKind, source: csv::Error },
    #[error("failed to open meeting workbook: {source}")]
    Workbook { source: calamine::Error },
    #[error("meeting workbook has no sheet named '{sheet}' (found: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
    #[error("{kind} is missing required column '{column}'")]
    MissingColumn {
        kind: SourceKind,
        column: &'static str,
    },
    #[error("meeting log row {row} has invalid hours '{value}'")]
    InvalidHours { row: usize, value: String },
}

/// Sheet read from a meeting workbook unless another name is configured.
pub const DEFAULT_MEETINGS_SHEET: &str = "Meetings";

/// Reads the task export and meeting log into a [`WorkloadDataset`].
pub struct WorkloadImporter;

impl WorkloadImporter {
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        tasks: P,
        meetings: Q,
        meetings_sheet: &str,
    ) -> Result<WorkloadDataset, LoadError> {
        let tasks = Self::tasks_from_path(tasks)?;
        let meetings = Self::meetings_from_path(meetings, meetings_sheet)?;
        Ok(Self::assemble(tasks, meetings))
    }

    pub fn from_readers<T: Read, M: Read>(
        tasks: T,
        meetings: M,
    ) -> Result<WorkloadDataset, LoadError> {
        let tasks = Self::tasks_from_reader(tasks)?;
        let meetings = Self::meetings_from_reader(meetings)?;
        Ok(Self::assemble(tasks, meetings))
    }

    pub fn tasks_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TaskRow>, LoadError> {
        let file = open(path.as_ref(), SourceKind::Tasks)?;
        Self::tasks_from_reader(file)
    }

    pub fn tasks_from_reader<R: Read>(reader: R) -> Result<Vec<TaskRow>, LoadError> {
        parser::parse_tasks(reader)
    }

    /// Workbooks (`.xlsx`, `.xls`, `.ods`, ...) are read from `sheet`; any
    /// other file is treated as a CSV export of that sheet.
    pub fn meetings_from_path<P: AsRef<Path>>(
        path: P,
        sheet: &str,
    ) -> Result<Vec<MeetingRow>, LoadError> {
        let path = path.as_ref();
        if workbook::is_workbook(path) {
            return workbook::read_meeting_sheet(path, sheet);
        }
        let file = open(path, SourceKind::Meetings)?;
        Self::meetings_from_reader(file)
    }

    pub fn meetings_from_reader<R: Read>(reader: R) -> Result<Vec<MeetingRow>, LoadError> {
        parser::parse_meetings(reader)
    }

    pub fn assemble(tasks: Vec<TaskRow>, meetings: Vec<MeetingRow>) -> WorkloadDataset {
        info!(
            tasks = tasks.len(),
            meetings = meetings.len(),
            "workload sources loaded"
        );
        WorkloadDataset::new(tasks, meetings)
    }
}

fn open(path: &Path, kind: SourceKind) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const TASK_HEADER: &str = concat!(
        "Task ID,Created At,Completed At,Name,Section/Column,",
        "Assignee,Due Date,Effort Level,Workstream\n"
    );

    #[test]
    fn parse_date_supports_rfc3339_and_date_strings() {
        assert_eq!(
            parser::parse_date_for_tests("2024-03-12T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 12)
        );
        assert_eq!(
            parser::parse_date_for_tests("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert!(parser::parse_date_for_tests("  ").is_none());
        assert!(parser::parse_date_for_tests("next week").is_none());
    }

    #[test]
    fn parse_hours_rejects_negative_and_text() {
        assert_eq!(parser::parse_hours_for_tests("1.5"), Some(1.5));
        assert_eq!(parser::parse_hours_for_tests("-2"), None);
        assert_eq!(parser::parse_hours_for_tests("two"), None);
    }

    #[test]
    fn tasks_without_section_are_dropped() {
        let csv = format!(
            "{TASK_HEADER}\
1,2024-03-11,2024-03-12,Write ADR,Mar 11-15,ana,2024-03-13,2,Platform\n\
2,2024-03-11,,Backlog idea,,ana,,1,Platform\n"
        );
        let tasks = WorkloadImporter::tasks_from_reader(Cursor::new(csv)).expect("parse");
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, "1");
        assert_eq!(task.section, "Mar 11-15");
        assert_eq!(task.points, 1.0);
        assert_eq!(task.completed_on, NaiveDate::from_ymd_opt(2024, 3, 12));
        assert!(task.is_completed());
    }

    #[test]
    fn empty_cells_become_none() {
        let csv = format!("{TASK_HEADER}7,,,Spike,Mar 11-15,,,,\n");
        let task = WorkloadImporter::tasks_from_reader(Cursor::new(csv))
            .expect("parse")
            .pop()
            .expect("task");
        assert!(task.assignee.is_none());
        assert!(task.workstream.is_none());
        assert!(task.effort_label.is_none());
        assert!(!task.is_completed());
        assert_eq!(task.points, 0.25);
    }

    #[test]
    fn missing_task_column_is_fatal() {
        let csv = "Task ID,Name,Section/Column\n1,Write ADR,Mar 11-15\n";
        let error = WorkloadImporter::tasks_from_reader(Cursor::new(csv))
            .expect_err("missing columns rejected");
        match error {
            LoadError::MissingColumn { kind, column } => {
                assert_eq!(kind, SourceKind::Tasks);
                assert_eq!(column, "created_at");
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn meeting_nickname_is_renamed_to_assignee() {
        let csv = "Assignee Nickname,Section/Column,Hours,Workstream\nana,Mar 11-15,3,Meetings\n";
        let meetings = WorkloadImporter::meetings_from_reader(Cursor::new(csv)).expect("parse");
        assert_eq!(
            meetings,
            vec![MeetingRow::new(Some("ana".to_string()), "Mar 11-15", 3.0)]
        );
    }

    #[test]
    fn invalid_meeting_hours_report_row() {
        let csv = "assignee_nickname,section_column,hours\nana,Mar 11-15,2\nbo,Mar 11-15,lots\n";
        let error = WorkloadImporter::meetings_from_reader(Cursor::new(csv))
            .expect_err("bad hours rejected");
        match error {
            LoadError::InvalidHours { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid hours, got {other:?}"),
        }
    }

    #[test]
    fn from_paths_propagates_io_errors() {
        let error = WorkloadImporter::from_paths(
            "./missing-tasks.csv",
            "./missing-meetings.csv",
            DEFAULT_MEETINGS_SHEET,
        )
        .expect_err("expected io error");
        match error {
            LoadError::Io { kind, .. } => assert_eq!(kind, SourceKind::Tasks),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn missing_workbook_is_a_workbook_error() {
        let error = WorkloadImporter::meetings_from_path("./missing-hours.xlsx", "Meetings")
            .expect_err("expected workbook error");
        assert!(matches!(error, LoadError::Workbook { .. }), "{error:?}");
    }
}
