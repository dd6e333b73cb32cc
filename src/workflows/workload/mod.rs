mod dataset;
pub mod domain;
pub mod effort;
pub mod report;

pub use dataset::WorkloadDataset;
pub use domain::{MeetingRow, TaskDraft, TaskRow, CAPACITY_POINTS, MEETINGS_WORKSTREAM};
pub use report::{AllocationEntry, OutstandingTask, PeriodSummary, WeeklyReport, WorkstreamPoints};
