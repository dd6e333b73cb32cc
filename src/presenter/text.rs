use super::{assignee_label, workstream_label, CapacityBand, PresenterConfig};
use crate::workflows::workload::{WeeklyReport, CAPACITY_POINTS};
use std::fmt;

const FILLS: [char; 8] = ['#', '=', '+', '*', 'o', 'x', '%', '~'];
const CAPACITY_MARKER: char = '|';
const OVERFLOW_MARKER: char = '>';
/// Longest bar drawn, in multiples of the capacity width.
const MAX_BAR_CAPACITIES: usize = 4;

pub fn render_text(report: &WeeklyReport, config: &PresenterConfig) -> String {
    TextReport { report, config }.to_string()
}

/// Plain-text rendering of a [`WeeklyReport`]: the stacked completion bars,
/// the allocation list and the outstanding-task table.
pub struct TextReport<'a> {
    pub report: &'a WeeklyReport,
    pub config: &'a PresenterConfig,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workload report: {}", self.report.period)?;

        if self.report.is_empty() {
            return writeln!(f, "\nNo tasks or meetings recorded for this period.");
        }

        self.write_completed(f)?;
        self.write_allocation(f)?;
        self.write_outstanding(f)
    }
}

impl TextReport<'_> {
    fn write_completed(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TextReport { report, config } = *self;
        writeln!(
            f,
            "\nCompleted this week (points, '{}' marks {} points)",
            CAPACITY_MARKER,
            config.format_number(CAPACITY_POINTS)
        )?;

        if report.completed.is_empty() {
            return writeln!(f, "- none");
        }

        let mut workstreams: Vec<Option<&str>> = Vec::new();
        for entry in &report.completed {
            let workstream = entry.workstream.as_deref();
            if !workstreams.contains(&workstream) {
                workstreams.push(workstream);
            }
        }
        workstreams.sort_by(|a, b| config.compare_workstreams(*a, *b));

        let fill_for = |workstream: Option<&str>| -> char {
            let index = workstreams
                .iter()
                .position(|known| *known == workstream)
                .unwrap_or(0);
            FILLS[index % FILLS.len()]
        };

        let legend: Vec<String> = workstreams
            .iter()
            .map(|workstream| format!("{} {}", fill_for(*workstream), workstream_label(*workstream)))
            .collect();
        writeln!(f, "Legend: {}", legend.join("  "))?;

        let name_width = report
            .completed
            .iter()
            .map(|entry| assignee_label(entry.assignee.as_deref()).chars().count())
            .max()
            .unwrap_or(0);
        let limit = config.bar_width.saturating_mul(MAX_BAR_CAPACITIES);

        for (assignee, total) in report.completed_totals() {
            let mut segments: Vec<(Option<&str>, f64)> = report
                .completed
                .iter()
                .filter(|entry| entry.assignee.as_deref() == assignee)
                .map(|entry| (entry.workstream.as_deref(), entry.points))
                .collect();
            segments.sort_by(|a, b| config.compare_workstreams(a.0, b.0));

            let mut bar = String::new();
            let mut used = 0usize;
            let mut clipped = false;
            for (workstream, points) in segments {
                let (cells, over) = scaled_cells(points, config.bar_width, limit - used);
                bar.extend(std::iter::repeat(fill_for(workstream)).take(cells));
                used += cells;
                clipped |= over;
            }
            if clipped {
                bar.push(OVERFLOW_MARKER);
            }

            writeln!(
                f,
                "{:<width$}  {}  {}",
                assignee_label(assignee),
                with_capacity_marker(&bar, config.bar_width),
                config.format_number(total),
                width = name_width
            )?;
        }

        Ok(())
    }

    fn write_allocation(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TextReport { report, config } = *self;
        writeln!(
            f,
            "\nAllocation vs capacity ({} points)",
            config.format_number(CAPACITY_POINTS)
        )?;

        if report.allocation.is_empty() {
            return writeln!(f, "- none");
        }

        let name_width = report
            .allocation
            .iter()
            .map(|entry| entry.assignee.chars().count())
            .max()
            .unwrap_or(0);

        for entry in &report.allocation {
            let band = CapacityBand::classify(entry.percent, &config.bands);
            writeln!(
                f,
                "{:<width$}  {:>8} pts  {:>8}  {}",
                entry.assignee,
                config.format_number(entry.points),
                config.format_percent(entry.percent),
                band.label(),
                width = name_width
            )?;
        }

        Ok(())
    }

    fn write_outstanding(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nOutstanding tasks")?;

        if self.report.outstanding.is_empty() {
            return writeln!(f, "- none");
        }

        let header = ["Assignee", "Workstream", "Effort", "Task", "Due"];
        let rows: Vec<[String; 5]> = self
            .report
            .outstanding
            .iter()
            .map(|task| {
                [
                    assignee_label(task.assignee.as_deref()).to_string(),
                    workstream_label(task.workstream.as_deref()).to_string(),
                    task.effort_label.clone().unwrap_or_else(|| "-".to_string()),
                    task.name.clone(),
                    task.due_date
                        .map(|date| date.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_cells: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
        write_table_row(f, &header_cells, &widths)?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        write_table_row(f, &rule, &widths)?;
        for row in &rows {
            write_table_row(f, row, &widths)?;
        }

        Ok(())
    }
}

fn write_table_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(f, "{}", line.join(" | ").trim_end())
}

/// Cells for `points` at `bar_width` cells per capacity, capped at
/// `remaining`. The flag is set when the cap cut the segment short.
fn scaled_cells(points: f64, bar_width: usize, remaining: usize) -> (usize, bool) {
    let cells = ((points / CAPACITY_POINTS) * bar_width as f64)
        .round()
        .max(0.0);
    if cells > remaining as f64 {
        (remaining, true)
    } else {
        (cells as usize, false)
    }
}

/// Pads or splits the bar so the marker sits at the capacity column.
fn with_capacity_marker(bar: &str, bar_width: usize) -> String {
    let mut cells: Vec<char> = bar.chars().collect();
    if cells.len() <= bar_width {
        cells.resize(bar_width, ' ');
        cells.push(CAPACITY_MARKER);
    } else {
        cells.insert(bar_width, CAPACITY_MARKER);
    }
    cells.into_iter().collect()
}
