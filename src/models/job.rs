//! Job, stage, task, executor and storage records from the history server.
//!
//! These mirror the JSON the shim forwards from the Spark REST API. Only the
//! fields the dashboard renders are modeled; everything else is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::time::SparkTime;

/// One Spark job within an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobSummary {
    pub job_id: u64,
    pub name: String,
    pub status: String,
    pub stage_ids: Vec<u64>,
    pub num_tasks: u64,
    pub num_completed_tasks: u64,
    pub num_failed_tasks: u64,
    pub submission_time: SparkTime,
    pub completion_time: SparkTime,
}

impl JobSummary {
    /// Menu label for the job graph dropdown.
    #[must_use]
    pub fn menu_label(&self) -> String {
        format!("Job {}", self.job_id)
    }
}

/// One stage within a job (summary form, no task map).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageSummary {
    pub stage_id: u64,
    pub attempt_id: u32,
    pub name: String,
    pub status: String,
    pub num_tasks: u64,
    pub num_complete_tasks: u64,
    pub num_failed_tasks: u64,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub shuffle_read_bytes: u64,
    pub shuffle_write_bytes: u64,
}

/// Stage detail as returned by `applications/{app}/{attempt}/stages/{stage}`:
/// the summary fields plus the per-task map keyed by task id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageDetail {
    pub stage_id: u64,
    pub name: String,
    pub status: String,
    pub tasks: HashMap<String, TaskDetail>,
}

impl StageDetail {
    /// Task ids belonging to this stage, as rendered in the task table.
    #[must_use]
    pub fn task_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.tasks.keys().cloned().collect();
        ids.sort_by_key(|id| id.parse::<u64>().unwrap_or(u64::MAX));
        ids
    }
}

/// One task within a stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskDetail {
    pub task_id: u64,
    pub index: u64,
    pub attempt: u32,
    pub launch_time: SparkTime,
    pub executor_id: String,
    pub host: String,
    pub status: String,
    pub task_locality: String,
    pub speculative: bool,
}

/// One executor of an application attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutorSummary {
    pub id: String,
    pub host_port: String,
    pub is_active: bool,
    pub rdd_blocks: u64,
    pub memory_used: u64,
    pub disk_used: u64,
    pub total_cores: u64,
    pub active_tasks: u64,
    pub failed_tasks: u64,
    pub completed_tasks: u64,
    pub total_tasks: u64,
}

/// One cached RDD from `applications/storage?appId=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RddInfo {
    pub id: u64,
    pub name: String,
    pub num_partitions: u64,
    pub num_cached_partitions: u64,
    pub storage_level: String,
    pub memory_used: u64,
    pub disk_used: u64,
}

/// Envelope of the YARN diagnostics endpoint (`apps?appId=...`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiagnosticsResponse {
    pub app: YarnApp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YarnApp {
    pub diagnostics: Option<String>,
}

impl DiagnosticsResponse {
    /// The message shown in the error panel. Empty or absent diagnostics
    /// surface as a recoverable label, never as a failure.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self.app.diagnostics.as_deref() {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => "No Error Message".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_menu_label() {
        let job = JobSummary {
            job_id: 7,
            ..Default::default()
        };
        assert_eq!(job.menu_label(), "Job 7");
    }

    #[test]
    fn test_stage_detail_task_ids_sorted_numerically() {
        let mut tasks = HashMap::new();
        for id in ["10", "2", "1"] {
            tasks.insert(id.to_string(), TaskDetail::default());
        }
        let detail = StageDetail {
            stage_id: 3,
            tasks,
            ..Default::default()
        };
        assert_eq!(detail.task_ids(), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_diagnostics_message_fallback() {
        let empty = DiagnosticsResponse::default();
        assert_eq!(empty.display_message(), "No Error Message");

        let blank = DiagnosticsResponse {
            app: YarnApp {
                diagnostics: Some(String::new()),
            },
        };
        assert_eq!(blank.display_message(), "No Error Message");

        let real = DiagnosticsResponse {
            app: YarnApp {
                diagnostics: Some("container exited".to_string()),
            },
        };
        assert_eq!(real.display_message(), "container exited");
    }

    #[test]
    fn test_deserialize_job_payload() {
        let json = r#"[
            {"jobId": 0, "name": "count", "status": "SUCCEEDED",
             "stageIds": [0, 1], "numTasks": 8, "numCompletedTasks": 8}
        ]"#;
        let jobs: Vec<JobSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(jobs[0].stage_ids, vec![0, 1]);
        assert_eq!(jobs[0].num_tasks, 8);
    }
}
