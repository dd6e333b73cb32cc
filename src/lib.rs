pub mod config;
pub mod error;
pub mod presenter;
pub mod telemetry;
pub mod workflows;
