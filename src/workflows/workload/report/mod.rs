mod summary;
pub mod views;

pub use summary::allocation_percent;
pub use views::{AllocationEntry, OutstandingTask, PeriodSummary, WeeklyReport, WorkstreamPoints};

pub(crate) use summary::{
    allocation_by_assignee, completed_by_assignee_workstream, uncompleted_detail,
};
