//! Application and attempt records from the Spark history server.

use serde::{Deserialize, Serialize};

use super::time::SparkTime;

/// One submitted Spark application as tracked by the history server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub attempts: Vec<Attempt>,
}

/// One execution try of an application.
///
/// `attempt_id` is absent in the legacy single-attempt format; such attempts
/// are treated as "attempt 0" throughout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attempt {
    #[serde(deserialize_with = "lenient_attempt_id")]
    pub attempt_id: Option<u32>,
    pub start_time: SparkTime,
    pub end_time: SparkTime,
    pub completed: bool,
    pub spark_user: String,
}

/// The history server reports `attemptId` as a number in some versions and a
/// quoted string in others; accept both.
fn lenient_attempt_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Str(String),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Str(s)) => s.parse().ok(),
    })
}

impl Application {
    /// Whether the job run finished successfully, judged by the last attempt.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.attempts.last().map(|a| a.completed).unwrap_or(false)
    }

    /// The attempt matching `selected`, falling back to the most recent one.
    ///
    /// Legacy attempts without an id match any selection.
    #[must_use]
    pub fn attempt_matching(&self, selected: Option<u32>) -> Option<&Attempt> {
        self.attempts
            .iter()
            .find(|a| a.attempt_id.is_none() || a.attempt_id == selected)
            .or_else(|| self.attempts.last())
    }

    /// Attempt count as rendered in the applications table.
    ///
    /// A single attempt without an `attempt_id` is the legacy format and
    /// renders as `0`; otherwise the count is the number of attempts.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        if self.attempts.len() == 1 && self.attempts[0].attempt_id.is_none() {
            0
        } else {
            self.attempts.len()
        }
    }

    /// Spark user of the first attempt, empty when there are none.
    #[must_use]
    pub fn spark_user(&self) -> &str {
        self.attempts
            .first()
            .map(|a| a.spark_user.as_str())
            .unwrap_or("")
    }

    /// Start time of the first attempt.
    #[must_use]
    pub fn start_time(&self) -> Option<&SparkTime> {
        self.attempts.first().map(|a| &a.start_time)
    }

    /// Applications with ids starting with `local` ran outside YARN; their
    /// container and log views are suppressed.
    #[must_use]
    pub fn is_local(&self) -> bool {
        is_local_app_id(&self.id)
    }
}

/// Whether an application id denotes a locally-run (non-YARN) job.
#[must_use]
pub fn is_local_app_id(app_id: &str) -> bool {
    app_id.starts_with("local")
}

/// YARN-side attempt envelope returned by the per-application endpoint.
///
/// Carries the AM container of each attempt, which the Spark-side
/// [`Attempt`] record does not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttemptContainersResponse {
    pub app_attempts: AppAttempts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppAttempts {
    pub app_attempt: Vec<AppAttemptInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppAttemptInfo {
    pub container_id: String,
    pub node_id: String,
}

impl AttemptContainersResponse {
    /// AM container of the first recorded attempt, if any.
    #[must_use]
    pub fn am_container(&self) -> Option<&AppAttemptInfo> {
        self.app_attempts.app_attempt.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(id: Option<u32>, completed: bool, user: &str) -> Attempt {
        Attempt {
            attempt_id: id,
            start_time: SparkTime::new("2017-01-01T00:00:00.000GMT"),
            end_time: SparkTime::new("2017-01-01T01:00:00.000GMT"),
            completed,
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
    fn test_completed_follows_last_attempt() {
        let a = app(
            "app-001",
            vec![attempt(Some(1), false, "alice"), attempt(Some(2), true, "alice")],
        );
        assert!(a.is_completed());

        let b = app(
            "app-002",
            vec![attempt(Some(1), true, "alice"), attempt(Some(2), false, "alice")],
        );
        assert!(!b.is_completed());
    }

    #[test]
    fn test_no_attempts_is_not_completed() {
        assert!(!app("app-003", vec![]).is_completed());
    }

    #[test]
    fn test_legacy_attempt_count_is_zero() {
        let a = app("app-004", vec![attempt(None, true, "bob")]);
        assert_eq!(a.attempt_count(), 0);
    }

    #[test]
    fn test_attempt_count_uses_length_otherwise() {
        let single = app("app-005", vec![attempt(Some(1), true, "bob")]);
        assert_eq!(single.attempt_count(), 1);

        let multi = app(
            "app-006",
            vec![attempt(Some(1), false, "bob"), attempt(Some(2), true, "bob")],
        );
        assert_eq!(multi.attempt_count(), 2);
    }

    #[test]
    fn test_attempt_matching_prefers_selected() {
        let a = app(
            "app-007",
            vec![attempt(Some(1), false, "alice"), attempt(Some(2), true, "alice")],
        );
        assert_eq!(a.attempt_matching(Some(2)).unwrap().attempt_id, Some(2));
        // No match falls back to the most recent attempt
        assert_eq!(a.attempt_matching(Some(9)).unwrap().attempt_id, Some(2));
    }

    #[test]
    fn test_attempt_matching_legacy_matches_anything() {
        let a = app("app-008", vec![attempt(None, true, "alice")]);
        assert!(a.attempt_matching(Some(3)).is_some());
        assert!(a.attempt_matching(None).is_some());
    }

    #[test]
    fn test_local_app_id() {
        assert!(is_local_app_id("local-123"));
        assert!(!is_local_app_id("app-001"));
        assert!(app("local-1479280403833", vec![]).is_local());
    }

    #[test]
    fn test_deserialize_string_attempt_id() {
        // some server versions quote attemptId
        let json = r#"{
            "attemptId": "2",
            "startTime": "2017-01-01T00:00:00.000GMT",
            "endTime": "2017-01-01T01:00:00.000GMT",
            "completed": false,
            "sparkUser": "bob"
        }"#;
        let a: Attempt = serde_json::from_str(json).unwrap();
        assert_eq!(a.attempt_id, Some(2));
    }

    #[test]
    fn test_deserialize_attempt_containers() {
        let json = r#"{
            "appAttempts": {
                "appAttempt": [
                    {"containerId": "container_1489_0001_01_000001", "nodeId": "wn0:30050"}
                ]
            }
        }"#;
        let resp: AttemptContainersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.am_container().unwrap().container_id,
            "container_1489_0001_01_000001"
        );
    }

    #[test]
    fn test_am_container_absent() {
        let resp = AttemptContainersResponse::default();
        assert!(resp.am_container().is_none());
    }

    #[test]
    fn test_deserialize_history_server_payload() {
        let json = r#"[
            {
                "id": "app-20170101",
                "name": "WordCount",
                "attempts": [
                    {
                        "attemptId": 1,
                        "startTime": "2017-01-01T00:00:00.000GMT",
                        "endTime": "2017-01-01T01:00:00.000GMT",
                        "completed": true,
                        "sparkUser": "alice"
                    }
                ]
            }
        ]"#;
        let apps: Vec<Application> = serde_json::from_str(json).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].spark_user(), "alice");
        assert_eq!(apps[0].attempt_count(), 1);
    }
}
