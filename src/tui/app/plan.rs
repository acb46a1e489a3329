//! Fetch plan derived from a row selection.
//!
//! Selecting an application fans out into several independent shim fetches.
//! Which of them actually fire depends on the application: locally-run jobs
//! have no YARN side, hive-submitted jobs expose no job list, and attempt 0
//! means no per-attempt data exists. The plan is computed up front as plain
//! data so the rules are testable without touching the runtime.

use crate::models::Application;

/// Label shown instead of the AM container id for locally-run jobs.
pub const LOCAL_TASK_LABEL: &str = "Local Task";
/// Label shown in the error panel when a local job has no YARN diagnostics.
pub const NO_YARN_ERROR_LABEL: &str = "No Yarn Error Message";
/// Label shown in the stage panel when no attempt data exists.
pub const NO_STAGE_INFO_LABEL: &str = "No Stage Info";

/// The set of fetches one selection triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPlan {
    pub app_id: String,
    /// Attempt the per-attempt endpoints are addressed to. `0` for legacy
    /// records without an attempt id.
    pub attempt_id: u32,
    pub application_name: String,

    pub fetch_am_container: bool,
    pub fetch_diagnostics: bool,
    pub fetch_jobs: bool,
    pub fetch_storage: bool,
    pub fetch_stages: bool,
    pub fetch_executors: bool,
    /// Driver log and job result are chained after the AM container arrives,
    /// not fired directly.
    pub chain_logs_after_container: bool,
}

impl SelectionPlan {
    /// Build the plan for selecting `app`.
    ///
    /// The addressed attempt is the most recent one; legacy records without
    /// an attempt id address attempt `0`.
    #[must_use]
    pub fn for_application(app: &Application) -> Self {
        let attempt_id = app
            .attempts
            .last()
            .and_then(|a| a.attempt_id)
            .unwrap_or(0);
        let local = app.is_local();
        let hive = app.spark_user() == "hive";
        let has_attempt = attempt_id != 0;

        SelectionPlan {
            app_id: app.id.clone(),
            attempt_id,
            application_name: app.name.clone(),
            fetch_am_container: !local,
            fetch_diagnostics: !local,
            fetch_jobs: !hive,
            fetch_storage: has_attempt,
            fetch_stages: has_attempt,
            fetch_executors: true,
            chain_logs_after_container: !local && has_attempt,
        }
    }

    /// Placeholder for the container panel when the fetch is suppressed.
    #[must_use]
    pub fn container_placeholder(&self) -> Option<&'static str> {
        (!self.fetch_am_container).then_some(LOCAL_TASK_LABEL)
    }

    /// Placeholder for the error panel when the fetch is suppressed.
    #[must_use]
    pub fn diagnostics_placeholder(&self) -> Option<&'static str> {
        (!self.fetch_diagnostics).then_some(NO_YARN_ERROR_LABEL)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attempt, SparkTime};

    fn attempt(id: Option<u32>, user: &str) -> Attempt {
        Attempt {
            attempt_id: id,
            start_time: SparkTime::new("2017-01-01T00:00:00.000GMT"),
            end_time: SparkTime::new("2017-01-01T01:00:00.000GMT"),
            completed: true,
            spark_user: user.to_string(),
        }
    }

    fn app(id: &str, attempts: Vec<Attempt>) -> Application {
        Application {
            id: id.to_string(),
            name: format!("app {id}"),
            attempts,
        }
    }

    #[test]
    fn test_regular_app_fetches_everything() {
        let plan = SelectionPlan::for_application(&app("app-001", vec![attempt(Some(1), "alice")]));
        assert_eq!(plan.attempt_id, 1);
        assert!(plan.fetch_am_container);
        assert!(plan.fetch_diagnostics);
        assert!(plan.fetch_jobs);
        assert!(plan.fetch_storage);
        assert!(plan.fetch_stages);
        assert!(plan.fetch_executors);
        assert!(plan.chain_logs_after_container);
    }

    #[test]
    fn test_local_app_suppresses_yarn_fetches() {
        let plan =
            SelectionPlan::for_application(&app("local-123", vec![attempt(Some(1), "alice")]));
        assert!(!plan.fetch_am_container);
        assert!(!plan.fetch_diagnostics);
        assert!(!plan.chain_logs_after_container);
        assert_eq!(plan.container_placeholder(), Some(LOCAL_TASK_LABEL));
        assert_eq!(plan.diagnostics_placeholder(), Some(NO_YARN_ERROR_LABEL));
        // spark-side fetches still run
        assert!(plan.fetch_jobs);
        assert!(plan.fetch_stages);
        assert!(plan.fetch_executors);
    }

    #[test]
    fn test_hive_user_suppresses_job_list() {
        let plan = SelectionPlan::for_application(&app("app-002", vec![attempt(Some(1), "hive")]));
        assert!(!plan.fetch_jobs);
        assert!(plan.fetch_stages);
    }

    #[test]
    fn test_hive_rule_reads_first_attempt() {
        let plan = SelectionPlan::for_application(&app(
            "app-003",
            vec![attempt(Some(1), "hive"), attempt(Some(2), "alice")],
        ));
        assert!(!plan.fetch_jobs);
    }

    #[test]
    fn test_attempt_zero_suppresses_per_attempt_fetches() {
        let plan = SelectionPlan::for_application(&app("app-004", vec![attempt(None, "alice")]));
        assert_eq!(plan.attempt_id, 0);
        assert!(!plan.fetch_storage);
        assert!(!plan.fetch_stages);
        assert!(!plan.chain_logs_after_container);
        assert!(plan.fetch_executors);
        assert!(plan.fetch_diagnostics);
    }

    #[test]
    fn test_addresses_most_recent_attempt() {
        let plan = SelectionPlan::for_application(&app(
            "app-005",
            vec![attempt(Some(1), "alice"), attempt(Some(2), "alice")],
        ));
        assert_eq!(plan.attempt_id, 2);
    }

    #[test]
    fn test_no_attempts_behaves_like_attempt_zero() {
        let plan = SelectionPlan::for_application(&app("app-006", vec![]));
        assert_eq!(plan.attempt_id, 0);
        assert!(!plan.fetch_stages);
        assert!(plan.fetch_jobs);
    }
}
