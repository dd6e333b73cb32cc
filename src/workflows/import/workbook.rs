use super::parser::meetings_from_records;
use super::LoadError;
use crate::workflows::workload::MeetingRow;
use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use std::path::Path;
use tracing::debug;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub(crate) fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Reads the meeting log from the named sheet of a workbook.
pub(crate) fn read_meeting_sheet(path: &Path, sheet: &str) -> Result<Vec<MeetingRow>, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|source| LoadError::Workbook { source })?;
    let name = select_sheet(&workbook.sheet_names(), sheet)?;
    let range = workbook
        .worksheet_range(&name)
        .map_err(|source| LoadError::Workbook { source })?;

    let mut rows = range.rows().map(sheet_record);
    let headers = rows.next().unwrap_or_default();
    let meetings = meetings_from_records(&headers, rows.map(Ok))?;

    debug!(sheet = %name, loaded = meetings.len(), "meeting sheet parsed");
    Ok(meetings)
}

/// Exact match first, then a case-insensitive match on the trimmed name.
pub(crate) fn select_sheet(available: &[String], wanted: &str) -> Result<String, LoadError> {
    let trimmed = wanted.trim();
    available
        .iter()
        .find(|name| name.as_str() == wanted)
        .or_else(|| {
            available
                .iter()
                .find(|name| name.trim().eq_ignore_ascii_case(trimmed))
        })
        .cloned()
        .ok_or_else(|| LoadError::SheetNotFound {
            sheet: wanted.to_string(),
            available: available.to_vec(),
        })
}

fn sheet_record(cells: &[Data]) -> StringRecord {
    let mut record: StringRecord = cells.iter().map(cell_text).collect();
    record.trim();
    record
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn detects_workbook_extensions() {
        assert!(is_workbook(Path::new("hours.xlsx")));
        assert!(is_workbook(Path::new("exports/Hours.XLSX")));
        assert!(is_workbook(Path::new("hours.ods")));
        assert!(!is_workbook(Path::new("hours.csv")));
        assert!(!is_workbook(Path::new("hours")));
    }

    #[test]
    fn selects_sheet_by_name_ignoring_case() {
        let available = names(&["Tasks", "Meetings"]);
        assert_eq!(select_sheet(&available, "Meetings").expect("exact"), "Meetings");
        assert_eq!(select_sheet(&available, " meetings ").expect("folded"), "Meetings");
    }

    #[test]
    fn missing_sheet_lists_available_names() {
        let available = names(&["Tasks", "Notes"]);
        match select_sheet(&available, "Meetings") {
            Err(LoadError::SheetNotFound { sheet, available }) => {
                assert_eq!(sheet, "Meetings");
                assert_eq!(available, vec!["Tasks", "Notes"]);
            }
            other => panic!("expected missing sheet, got {other:?}"),
        }
    }

    #[test]
    fn numeric_cells_render_as_plain_numbers() {
        let record = sheet_record(&[
            Data::String(" Ana ".to_string()),
            Data::Float(6.0),
            Data::Float(1.5),
            Data::Empty,
        ]);
        assert_eq!(record.iter().collect::<Vec<_>>(), vec!["Ana", "6", "1.5", ""]);
    }
}
