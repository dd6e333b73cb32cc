use super::{CapacityBand, PresenterConfig};
use crate::workflows::workload::{
    AllocationEntry, OutstandingTask, WeeklyReport, WorkstreamPoints, CAPACITY_POINTS,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write report output {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode CSV output {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// An allocation entry with the band it falls in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRow<'a> {
    pub assignee: &'a str,
    pub task_points: f64,
    pub meeting_points: f64,
    pub points: f64,
    pub percent: f64,
    pub band: CapacityBand,
    pub band_label: &'static str,
}

impl<'a> AllocationRow<'a> {
    fn from_entry(entry: &'a AllocationEntry, config: &PresenterConfig) -> Self {
        let band = CapacityBand::classify(entry.percent, &config.bands);
        Self {
            assignee: &entry.assignee,
            task_points: entry.task_points,
            meeting_points: entry.meeting_points,
            points: entry.points,
            percent: entry.percent,
            band,
            band_label: band.label(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    period: &'a str,
    capacity_points: f64,
    completed: &'a [WorkstreamPoints],
    allocation: Vec<AllocationRow<'a>>,
    outstanding: &'a [OutstandingTask],
}

/// Paths written by [`export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub completed: PathBuf,
    pub allocation: PathBuf,
    pub outstanding: PathBuf,
    pub json: PathBuf,
}

pub fn render_json(report: &WeeklyReport, config: &PresenterConfig) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&json_report(report, config))?)
}

/// Writes the three views as CSV plus the combined JSON document into `dir`.
pub fn export(
    report: &WeeklyReport,
    config: &PresenterConfig,
    dir: &Path,
) -> Result<ExportedFiles, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = ExportedFiles {
        completed: dir.join("completed.csv"),
        allocation: dir.join("allocation.csv"),
        outstanding: dir.join("outstanding.csv"),
        json: dir.join("report.json"),
    };

    write_csv(&files.completed, &report.completed)?;
    let allocation: Vec<AllocationRow<'_>> = report
        .allocation
        .iter()
        .map(|entry| AllocationRow::from_entry(entry, config))
        .collect();
    write_csv(&files.allocation, &allocation)?;
    write_csv(&files.outstanding, &report.outstanding)?;

    let json = render_json(report, config)?;
    fs::write(&files.json, json).map_err(|source| ExportError::Io {
        path: files.json.clone(),
        source,
    })?;

    info!(period = %report.period, dir = %dir.display(), "report exported");
    Ok(files)
}

fn json_report<'a>(report: &'a WeeklyReport, config: &PresenterConfig) -> JsonReport<'a> {
    JsonReport {
        period: &report.period,
        capacity_points: CAPACITY_POINTS,
        completed: &report.completed,
        allocation: report
            .allocation
            .iter()
            .map(|entry| AllocationRow::from_entry(entry, config))
            .collect(),
        outstanding: &report.outstanding,
    }
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    let csv_error = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WeeklyReport {
        WeeklyReport {
            period: "Mar 11-15".to_string(),
            completed: vec![WorkstreamPoints {
                assignee: Some("ana".to_string()),
                workstream: Some("Platform".to_string()),
                points: 4.0,
            }],
            allocation: vec![AllocationEntry {
                assignee: "ana".to_string(),
                task_points: 14.0,
                meeting_points: 2.0,
                points: 16.0,
                percent: 0.8,
            }],
            outstanding: Vec::new(),
        }
    }

    #[test]
    fn json_includes_bands_and_capacity() {
        let json = render_json(&report(), &PresenterConfig::default()).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["period"], "Mar 11-15");
        assert_eq!(value["capacity_points"], 20.0);
        assert_eq!(value["allocation"][0]["band"], "on_target");
        assert_eq!(value["allocation"][0]["band_label"], "On target");
        assert_eq!(value["outstanding"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn export_writes_all_views() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("week-11");
        let files = export(&report(), &PresenterConfig::default(), &target).expect("export");

        let completed = fs::read_to_string(&files.completed).expect("completed csv");
        assert_eq!(completed, "assignee,workstream,points\nana,Platform,4.0\n");

        let allocation = fs::read_to_string(&files.allocation).expect("allocation csv");
        assert!(allocation.starts_with(
            "assignee,task_points,meeting_points,points,percent,band,band_label\n"
        ));
        assert!(allocation.contains("ana,14.0,2.0,16.0,0.8,on_target,On target"));

        assert!(files.outstanding.exists());
        assert!(files.json.exists());
    }
}
