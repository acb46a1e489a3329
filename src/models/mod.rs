//! Data models for the Spark/YARN history shim.
//!
//! This module provides the data structures for history server payloads
//! (applications, jobs, stages, tasks, executors, cached RDDs) plus the
//! configuration and persisted-session types.

mod application;
mod config;
mod job;
mod state;
mod time;

pub use application::{AppAttemptInfo, Application, Attempt, AttemptContainersResponse};
pub use config::MonitorConfig;
pub use job::{
    DiagnosticsResponse, ExecutorSummary, JobSummary, RddInfo, StageDetail, StageSummary,
    TaskDetail,
};
pub use state::SessionState;
pub use time::SparkTime;
