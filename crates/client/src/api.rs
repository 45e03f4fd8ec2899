//! REST implementation of [`Backend`] using [`reqwest`].
//!
//! Error responses are decoded into a readable message: the body's
//! `"error"` string, else a `field: a, b; ...` join of a validation-error
//! map, else the raw body text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use sitetrack_core::models::{
    Executor, ExecutorInput, Project, ProjectInput, Work, WorkInput, WorkType, WorkTypeInput,
};
use sitetrack_core::types::DbId;

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Fallback message for error responses with an empty body.
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Fallback for a validation-error map with no entries.
pub const GENERIC_VALIDATION_ERROR: &str = "Something went wrong with form validation.";

/// HTTP client for one tracker backend.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base: Url,
}

impl RestBackend {
    /// Build a client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_client(client, &config.api_url)
    }

    /// Reuse an existing [`reqwest::Client`] against `api_url`.
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(api_url)
            .map_err(|e| ApiError::Config(format!("invalid API_URL {api_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!("API_URL {api_url:?} cannot be a base URL")));
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` joined with `segments`, each percent-encoded as one path
    /// segment.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ---- private helpers ----

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(segments);
        tracing::debug!(%method, %url, "Backend request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::ensure_success(response).await
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, segments, None).await?;
        Self::parse_response(response).await
    }

    async fn submit<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(method, segments, Some(body)).await?;
        Self::parse_response(response).await
    }

    async fn remove(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, segments, None).await?;
        Ok(())
    }

    /// Return the response unchanged on success, or an
    /// [`ApiError::Status`] carrying the decoded error message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::warn!(status = status.as_u16(), %message, "Backend returned an error");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Parse a JSON body. `204 No Content` yields `None`.
    async fn parse_optional<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, ApiError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        Self::parse_optional(response)
            .await?
            .ok_or_else(|| ApiError::Decode("expected a body, got 204 No Content".into()))
    }
}

/// Human-readable message for an error response body.
pub fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return if body.is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            body.to_string()
        };
    };

    if let Some(error) = json.get("error").and_then(non_empty_text) {
        return error;
    }

    let Some(fields) = json.as_object() else {
        return body.to_string();
    };

    // A map of field -> list of messages; anything else is shown verbatim.
    let parts: Option<Vec<String>> = fields
        .iter()
        .map(|(field, messages)| {
            let messages = messages
                .as_array()?
                .iter()
                .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                .collect::<Vec<_>>();
            Some(format!("{field}: {}", messages.join(", ")))
        })
        .collect();

    match parts {
        Some(parts) if parts.is_empty() => GENERIC_VALIDATION_ERROR.to_string(),
        Some(parts) => parts.join("; "),
        None => body.to_string(),
    }
}

fn non_empty_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Backend impl
// ---------------------------------------------------------------------------

const PROJECTS: &str = "projects";
const WORKS: &str = "works";
const WORK_TYPES: &str = "work_types";
const EXECUTORS: &str = "executors";

#[async_trait]
impl Backend for RestBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.fetch(&[PROJECTS]).await
    }

    async fn get_project(&self, code: &str) -> Result<Project, ApiError> {
        self.fetch(&[PROJECTS, code]).await
    }

    async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        self.submit(Method::POST, &[PROJECTS], input).await
    }

    async fn update_project(&self, code: &str, input: &ProjectInput) -> Result<Project, ApiError> {
        self.submit(Method::PUT, &[PROJECTS, code], input).await
    }

    async fn delete_project(&self, code: &str) -> Result<(), ApiError> {
        self.remove(&[PROJECTS, code]).await
    }

    async fn list_works(&self) -> Result<Vec<Work>, ApiError> {
        self.fetch(&[WORKS]).await
    }

    async fn get_work(&self, id: DbId) -> Result<Work, ApiError> {
        self.fetch(&[WORKS, &id.to_string()]).await
    }

    async fn create_work(&self, input: &WorkInput) -> Result<Work, ApiError> {
        self.submit(Method::POST, &[WORKS], input).await
    }

    async fn update_work(&self, id: DbId, input: &WorkInput) -> Result<Work, ApiError> {
        self.submit(Method::PUT, &[WORKS, &id.to_string()], input).await
    }

    async fn delete_work(&self, id: DbId) -> Result<(), ApiError> {
        self.remove(&[WORKS, &id.to_string()]).await
    }

    async fn list_work_types(&self) -> Result<Vec<WorkType>, ApiError> {
        self.fetch(&[WORK_TYPES]).await
    }

    async fn get_work_type(&self, id: DbId) -> Result<WorkType, ApiError> {
        self.fetch(&[WORK_TYPES, &id.to_string()]).await
    }

    async fn create_work_type(&self, input: &WorkTypeInput) -> Result<WorkType, ApiError> {
        self.submit(Method::POST, &[WORK_TYPES], input).await
    }

    async fn update_work_type(&self, id: DbId, input: &WorkTypeInput) -> Result<WorkType, ApiError> {
        self.submit(Method::PUT, &[WORK_TYPES, &id.to_string()], input).await
    }

    async fn delete_work_type(&self, id: DbId) -> Result<(), ApiError> {
        self.remove(&[WORK_TYPES, &id.to_string()]).await
    }

    async fn list_executors(&self) -> Result<Vec<Executor>, ApiError> {
        self.fetch(&[EXECUTORS]).await
    }

    async fn get_executor(&self, id: DbId) -> Result<Executor, ApiError> {
        self.fetch(&[EXECUTORS, &id.to_string()]).await
    }

    async fn create_executor(&self, input: &ExecutorInput) -> Result<Executor, ApiError> {
        self.submit(Method::POST, &[EXECUTORS], input).await
    }

    async fn update_executor(&self, id: DbId, input: &ExecutorInput) -> Result<Executor, ApiError> {
        self.submit(Method::PUT, &[EXECUTORS, &id.to_string()], input).await
    }

    async fn delete_executor(&self, id: DbId) -> Result<(), ApiError> {
        self.remove(&[EXECUTORS, &id.to_string()]).await
    }

    async fn seed_defaults(&self) -> Result<(), ApiError> {
        self.send::<()>(Method::POST, &["seed_data"], None).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn backend(api_url: &str) -> RestBackend {
        RestBackend::with_client(reqwest::Client::new(), api_url).unwrap()
    }

    // -- error_message ---------------------------------------------------

    #[test]
    fn error_field_wins() {
        assert_eq!(
            error_message(r#"{"error": "Project with this code already exists"}"#),
            "Project with this code already exists"
        );
    }

    #[test]
    fn validation_map_is_joined() {
        assert_eq!(
            error_message(r#"{"code": ["This field is required."], "name": ["Too long", "Invalid"]}"#),
            "code: This field is required.; name: Too long, Invalid"
        );
    }

    #[test]
    fn empty_map_gets_validation_fallback() {
        assert_eq!(error_message("{}"), GENERIC_VALIDATION_ERROR);
    }

    #[test]
    fn non_json_body_is_passed_through() {
        assert_eq!(error_message("<h1>Not Found</h1>"), "<h1>Not Found</h1>");
        assert_eq!(error_message(""), GENERIC_ERROR);
    }

    #[test]
    fn unexpected_shape_is_passed_through() {
        assert_eq!(error_message(r#"{"error": ""}"#), r#"{"error": ""}"#);
        assert_eq!(error_message(r#"{"detail": "gone"}"#), r#"{"detail": "gone"}"#);
        assert_eq!(error_message("[1, 2]"), "[1, 2]");
    }

    // -- urls ------------------------------------------------------------

    #[test]
    fn url_appends_segments_to_base_path() {
        let api = backend("http://localhost:5000/api");
        assert_eq!(api.url(&["works", "7"]).as_str(), "http://localhost:5000/api/works/7");
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let api = backend("http://localhost:5000/api/");
        assert_eq!(api.url(&["projects"]).as_str(), "http://localhost:5000/api/projects");
    }

    #[test]
    fn project_codes_are_percent_encoded() {
        let api = backend("http://localhost:5000/api");
        assert_eq!(
            api.url(&["projects", "A/B 1"]).as_str(),
            "http://localhost:5000/api/projects/A%2FB%201"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        assert_matches!(
            RestBackend::with_client(reqwest::Client::new(), "mailto:ops@example.com"),
            Err(ApiError::Config(_))
        );
        assert_matches!(
            RestBackend::with_client(reqwest::Client::new(), "not a url"),
            Err(ApiError::Config(_))
        );
    }
}
