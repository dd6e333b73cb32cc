//! Rendering of a [`WeeklyReport`](crate::workflows::workload::WeeklyReport)
//! for people: a text version of the stacked completion chart, the
//! allocation chart and the outstanding-task table, plus CSV/JSON exports
//! that chart tooling can consume.

mod export;
mod text;

pub use export::{export, render_json, AllocationRow, ExportError, ExportedFiles};
pub use text::{render_text, TextReport};

use crate::workflows::workload::MEETINGS_WORKSTREAM;
use serde::Serialize;
use std::cmp::Ordering;

/// Allocation thresholds, as fractions of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityBands {
    pub on_target: f64,
    pub over: f64,
}

impl Default for CapacityBands {
    fn default() -> Self {
        Self {
            on_target: 0.75,
            over: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityBand {
    Under,
    OnTarget,
    Over,
}

impl CapacityBand {
    pub fn classify(percent: f64, bands: &CapacityBands) -> Self {
        if percent < bands.on_target {
            Self::Under
        } else if percent <= bands.over {
            Self::OnTarget
        } else {
            Self::Over
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under => "Below target",
            Self::OnTarget => "On target",
            Self::Over => "Over capacity",
        }
    }
}

/// Display options handed to the presenter at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterConfig {
    /// Digits after the decimal point for points and percentages.
    pub decimals: usize,
    /// Characters drawn for one full week of capacity.
    pub bar_width: usize,
    pub bands: CapacityBands,
    /// Fixed stacking order; workstreams not listed follow alphabetically.
    pub workstream_order: Vec<String>,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            decimals: 1,
            bar_width: 40,
            bands: CapacityBands::default(),
            workstream_order: Vec::new(),
        }
    }
}

impl PresenterConfig {
    /// Orders workstreams for stacking: configured names first, then the rest
    /// alphabetically, with meetings and uncategorized work at the end.
    pub(crate) fn compare_workstreams(&self, left: Option<&str>, right: Option<&str>) -> Ordering {
        self.workstream_rank(left)
            .cmp(&self.workstream_rank(right))
            .then_with(|| left.cmp(&right))
    }

    fn workstream_rank(&self, workstream: Option<&str>) -> (u8, usize) {
        let Some(name) = workstream else {
            return (3, 0);
        };

        match self.workstream_order.iter().position(|known| known == name) {
            Some(index) => (0, index),
            None if name == MEETINGS_WORKSTREAM => (2, 0),
            None => (1, 0),
        }
    }

    pub(crate) fn format_number(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }

    pub(crate) fn format_percent(&self, fraction: f64) -> String {
        format!("{:.*}%", self.decimals, fraction * 100.0)
    }
}

pub(crate) fn assignee_label(assignee: Option<&str>) -> &str {
    assignee.unwrap_or("Unassigned")
}

pub(crate) fn workstream_label(workstream: Option<&str>) -> &str {
    workstream.unwrap_or("No workstream")
}
