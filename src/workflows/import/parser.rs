use super::columns::{canonical_headers, require_columns, SourceKind};
use super::LoadError;
use crate::workflows::workload::{MeetingRow, TaskDraft, TaskRow};
use chrono::{DateTime, NaiveDate};
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

pub(crate) fn parse_tasks<R: Read>(reader: R) -> Result<Vec<TaskRow>, LoadError> {
    let kind = SourceKind::Tasks;
    let mut csv_reader = canonical_reader(reader, kind)?;
    let mut tasks = Vec::new();
    let mut untriaged = 0usize;

    for record in csv_reader.deserialize::<TaskCsvRow>() {
        let row = record.map_err(|source| LoadError::Csv { kind, source })?;
        match row.into_draft() {
            Some(draft) => tasks.push(draft.into_row()),
            None => untriaged += 1,
        }
    }

    debug!(
        loaded = tasks.len(),
        skipped = untriaged,
        "task export parsed; rows without a section were skipped"
    );
    Ok(tasks)
}

pub(crate) fn parse_meetings<R: Read>(reader: R) -> Result<Vec<MeetingRow>, LoadError> {
    let kind = SourceKind::Meetings;
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| LoadError::Csv { kind, source })?
        .clone();

    let records = csv_reader
        .into_records()
        .map(|record| record.map_err(|source| LoadError::Csv { kind, source }));
    meetings_from_records(&headers, records)
}

/// Builds meeting rows from a raw header record and its data records, whether
/// they came from a CSV file or a workbook sheet.
pub(crate) fn meetings_from_records<I>(
    headers: &StringRecord,
    records: I,
) -> Result<Vec<MeetingRow>, LoadError>
where
    I: IntoIterator<Item = Result<StringRecord, LoadError>>,
{
    let kind = SourceKind::Meetings;
    let headers = canonical_headers(headers, kind);
    require_columns(&headers, kind)?;
    let mut meetings = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let record = record?;
        let row: MeetingCsvRow = record
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Csv { kind, source })?;
        let Some(section) = row.section_column else {
            continue;
        };

        let raw_hours = row.hours.unwrap_or_default();
        let hours = parse_hours(&raw_hours).ok_or(LoadError::InvalidHours {
            row: index + 1,
            value: raw_hours,
        })?;

        meetings.push(MeetingRow::new(row.assignee, section, hours));
    }

    debug!(loaded = meetings.len(), "meeting log parsed");
    Ok(meetings)
}

fn canonical_reader<R: Read>(reader: R, kind: SourceKind) -> Result<csv::Reader<R>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| LoadError::Csv { kind, source })?;
    let canonical = canonical_headers(headers, kind);
    require_columns(&canonical, kind)?;
    csv_reader.set_headers(canonical);

    Ok(csv_reader)
}

#[derive(Debug, Deserialize)]
struct TaskCsvRow {
    #[serde(default)]
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    completed_at: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    section_column: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    assignee: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    due_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    effort_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    workstream: Option<String>,
}

impl TaskCsvRow {
    /// `None` when the task has not been triaged into a reporting period.
    fn into_draft(self) -> Option<TaskDraft> {
        let section = self.section_column?;
        let completed_on = self.completed_at.as_deref().and_then(parse_date);

        Some(TaskDraft {
            created_at: self.created_at.as_deref().and_then(parse_date),
            due_date: self.due_date.as_deref().and_then(parse_date),
            id: self.id,
            completed_at: self.completed_at,
            completed_on,
            name: self.name,
            section,
            assignee: self.assignee,
            effort_label: self.effort_level,
            workstream: self.workstream,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MeetingCsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    assignee: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    section_column: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hours: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_hours(value: &str) -> Option<f64> {
    let hours = value.trim().parse::<f64>().ok()?;
    (hours.is_finite() && hours >= 0.0).then_some(hours)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}

#[cfg(test)]
pub(crate) fn parse_hours_for_tests(value: &str) -> Option<f64> {
    parse_hours(value)
}
