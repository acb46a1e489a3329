//! Interface to the local history shim.
//!
//! The shim is a small HTTP service fronting the real Spark and YARN history
//! servers at `http://localhost:{port}/`. This module builds the request
//! paths, issues async GETs, and parses the JSON responses. Path patterns are
//! kept exactly as the shim expects them, including two historical oddities
//! (`apps?appId={id}yarn` and `applications/driverLog?appId{id}`).

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Application, AttemptContainersResponse, DiagnosticsResponse, ExecutorSummary, JobSummary,
    RddInfo, StageDetail, StageSummary,
};

/// Which backing service a request is routed to. Forwarded to the shim as the
/// `restType` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestSource {
    Spark,
    Yarn,
    YarnHistory,
}

impl std::fmt::Display for RestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestSource::Spark => write!(f, "spark"),
            RestSource::Yarn => write!(f, "yarn"),
            RestSource::YarnHistory => write!(f, "yarnhistory"),
        }
    }
}

/// Request path constructors, one per shim endpoint.
///
/// Kept pure so the fetch plan can be unit-tested without a network.
pub mod endpoints {
    /// All applications known to the history server.
    #[must_use]
    pub fn applications() -> String {
        "applications/".to_string()
    }

    /// A single application with its attempts.
    #[must_use]
    pub fn application(app_id: &str) -> String {
        format!("applications?appId={app_id}")
    }

    /// YARN diagnostics for an application.
    #[must_use]
    pub fn diagnostics(app_id: &str) -> String {
        format!("apps?appId={app_id}yarn")
    }

    /// Driver log blob.
    #[must_use]
    pub fn driver_log(app_id: &str) -> String {
        format!("applications/driverLog?appId{app_id}")
    }

    /// Job stdout as captured by the YARN history server.
    #[must_use]
    pub fn job_result(app_id: &str) -> String {
        format!("yarnui/jobresult?appId{app_id}")
    }

    /// Jobs of an application.
    #[must_use]
    pub fn jobs(app_id: &str) -> String {
        format!("applications/jobs?appId={app_id}")
    }

    /// Stage summaries of an application.
    #[must_use]
    pub fn stages(app_id: &str) -> String {
        format!("applications/stages?appId={app_id}")
    }

    /// Cached RDDs of an application.
    #[must_use]
    pub fn storage(app_id: &str) -> String {
        format!("applications/storage?appId={app_id}")
    }

    /// Stages of one attempt (direct history-server URL shape).
    #[must_use]
    pub fn attempt_stages(app_id: &str, attempt_id: u32) -> String {
        format!("applications/{app_id}/{attempt_id}/stages")
    }

    /// Executors of one attempt (direct history-server URL shape).
    #[must_use]
    pub fn attempt_executors(app_id: &str, attempt_id: u32) -> String {
        format!("applications/{app_id}/{attempt_id}/executors")
    }

    /// One stage with its task map.
    #[must_use]
    pub fn stage_detail(app_id: &str, attempt_id: u32, stage_id: u64) -> String {
        format!("applications/{app_id}/{attempt_id}/stages/{stage_id}")
    }
}

/// Errors from the shim.
#[derive(Debug, Error)]
pub enum ShimError {
    #[error("cannot connect to shim at {base_url}")]
    Connect { base_url: String },

    #[error("request to {path} timed out")]
    Timeout { path: String },

    #[error("shim returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("request to {path} failed: {message}")]
    Request { path: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl ShimError {
    fn from_reqwest(error: reqwest::Error, base_url: &str, path: &str) -> Self {
        if error.is_timeout() {
            ShimError::Timeout {
                path: path.to_string(),
            }
        } else if error.is_connect() {
            ShimError::Connect {
                base_url: base_url.to_string(),
            }
        } else if error.is_decode() {
            ShimError::Decode {
                path: path.to_string(),
                message: error.to_string(),
            }
        } else {
            ShimError::Request {
                path: path.to_string(),
                message: error.to_string(),
            }
        }
    }
}

pub type ShimResult<T> = Result<T, ShimError>;

/// Async client for the local history shim.
#[derive(Debug, Clone)]
pub struct ShimClient {
    client: reqwest::Client,
    base_url: String,
}

impl ShimClient {
    /// Create a client for the shim on `port` with the given request timeout.
    pub fn new(port: u16, timeout: Duration) -> ShimResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShimError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: format!("http://localhost:{port}/"),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a path and optional source tag.
    #[must_use]
    pub fn url_for(&self, path: &str, source: Option<RestSource>) -> String {
        match source {
            Some(tag) => {
                let sep = if path.contains('?') { '&' } else { '?' };
                format!("{}{path}{sep}restType={tag}", self.base_url)
            }
            None => format!("{}{path}", self.base_url),
        }
    }

    /// Issue a GET and return the raw response body.
    pub async fn get_text(&self, path: &str, source: Option<RestSource>) -> ShimResult<String> {
        let url = self.url_for(path, source);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShimError::from_reqwest(e, &self.base_url, path))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShimError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ShimError::from_reqwest(e, &self.base_url, path))
    }

    /// Issue a GET and decode the JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        source: Option<RestSource>,
    ) -> ShimResult<T> {
        let body = self.get_text(path, source).await?;
        serde_json::from_str(&body).map_err(|e| ShimError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn fetch_applications(&self) -> ShimResult<Vec<Application>> {
        self.get_json(&endpoints::applications(), Some(RestSource::Spark))
            .await
    }

    pub async fn fetch_application(&self, app_id: &str) -> ShimResult<Application> {
        self.get_json(&endpoints::application(app_id), Some(RestSource::Spark))
            .await
    }

    /// AM container info. Same path as [`fetch_application`](Self::fetch_application)
    /// but the shim answers with the YARN attempt envelope here.
    pub async fn fetch_am_container(&self, app_id: &str) -> ShimResult<AttemptContainersResponse> {
        self.get_json(&endpoints::application(app_id), Some(RestSource::Spark))
            .await
    }

    pub async fn fetch_diagnostics(&self, app_id: &str) -> ShimResult<DiagnosticsResponse> {
        self.get_json(&endpoints::diagnostics(app_id), None).await
    }

    pub async fn fetch_driver_log(&self, app_id: &str) -> ShimResult<String> {
        self.get_text(&endpoints::driver_log(app_id), Some(RestSource::Yarn))
            .await
    }

    pub async fn fetch_job_result(&self, app_id: &str) -> ShimResult<String> {
        self.get_text(&endpoints::job_result(app_id), Some(RestSource::YarnHistory))
            .await
    }

    pub async fn fetch_jobs(&self, app_id: &str) -> ShimResult<Vec<JobSummary>> {
        self.get_json(&endpoints::jobs(app_id), Some(RestSource::Spark))
            .await
    }

    pub async fn fetch_stages(&self, app_id: &str) -> ShimResult<Vec<StageSummary>> {
        self.get_json(&endpoints::stages(app_id), Some(RestSource::Spark))
            .await
    }

    pub async fn fetch_storage(&self, app_id: &str) -> ShimResult<Vec<RddInfo>> {
        self.get_json(&endpoints::storage(app_id), Some(RestSource::Spark))
            .await
    }

    pub async fn fetch_attempt_stages(
        &self,
        app_id: &str,
        attempt_id: u32,
    ) -> ShimResult<Vec<StageSummary>> {
        self.get_json(&endpoints::attempt_stages(app_id, attempt_id), None)
            .await
    }

    pub async fn fetch_attempt_executors(
        &self,
        app_id: &str,
        attempt_id: u32,
    ) -> ShimResult<Vec<ExecutorSummary>> {
        self.get_json(&endpoints::attempt_executors(app_id, attempt_id), None)
            .await
    }

    /// Stage detail with the task map. The shim returns a one-element array
    /// for this endpoint; an empty array means the stage is unknown.
    pub async fn fetch_stage_detail(
        &self,
        app_id: &str,
        attempt_id: u32,
        stage_id: u64,
    ) -> ShimResult<Option<StageDetail>> {
        let details: Vec<StageDetail> = self
            .get_json(&endpoints::stage_detail(app_id, attempt_id, stage_id), None)
            .await?;
        Ok(details.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(endpoints::applications(), "applications/");
        assert_eq!(endpoints::application("app-001"), "applications?appId=app-001");
        assert_eq!(endpoints::diagnostics("app-001"), "apps?appId=app-001yarn");
        assert_eq!(
            endpoints::driver_log("app-001"),
            "applications/driverLog?appIdapp-001"
        );
        assert_eq!(endpoints::job_result("app-001"), "yarnui/jobresult?appIdapp-001");
        assert_eq!(endpoints::jobs("app-001"), "applications/jobs?appId=app-001");
        assert_eq!(endpoints::stages("app-001"), "applications/stages?appId=app-001");
        assert_eq!(
            endpoints::storage("app-001"),
            "applications/storage?appId=app-001"
        );
        assert_eq!(
            endpoints::attempt_stages("app-001", 2),
            "applications/app-001/2/stages"
        );
        assert_eq!(
            endpoints::attempt_executors("app-001", 2),
            "applications/app-001/2/executors"
        );
        assert_eq!(
            endpoints::stage_detail("app-001", 2, 5),
            "applications/app-001/2/stages/5"
        );
    }

    #[test]
    fn test_url_for_appends_rest_type() {
        let client = ShimClient::new(8998, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.url_for("applications/", Some(RestSource::Spark)),
            "http://localhost:8998/applications/?restType=spark"
        );
        assert_eq!(
            client.url_for("applications/jobs?appId=a", Some(RestSource::Spark)),
            "http://localhost:8998/applications/jobs?appId=a&restType=spark"
        );
        assert_eq!(
            client.url_for("applications/a/1/stages", None),
            "http://localhost:8998/applications/a/1/stages"
        );
    }

    #[test]
    fn test_rest_source_display() {
        assert_eq!(RestSource::Spark.to_string(), "spark");
        assert_eq!(RestSource::Yarn.to_string(), "yarn");
        assert_eq!(RestSource::YarnHistory.to_string(), "yarnhistory");
    }

    #[tokio::test]
    async fn test_connect_error_is_typed() {
        // nothing listens on this port
        let client = ShimClient::new(1, Duration::from_secs(1)).unwrap();
        let result = client.fetch_applications().await;
        assert!(matches!(
            result,
            Err(ShimError::Connect { .. }) | Err(ShimError::Timeout { .. })
        ));
    }
}
