//! HTTP client for the tasks backend.
//!
//! Every response passes through [`TaskApiClient::execute`], which logs
//! the outcome and reports it to the notification manager: a success toast
//! for a completed write, an error toast for any failure.

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::config::ApiConfig;
use crate::error::{ApiFailure, AppError, AppResult, error_detail};
use crate::external::client::{build_http_client, default_user_agent};
use crate::notifications::NotificationManager;

use super::outcome::success_message;
use super::types::{NewTask, Task, TaskList, TaskQuery, TaskUpdate};

const SUCCESS_TITLE: &str = "Success!";
const ERROR_TITLE: &str = "Error";

/// Client for `/tasks` that reports request outcomes as notifications
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: reqwest::Client,
    base_url: Url,
    notifications: NotificationManager,
}

impl TaskApiClient {
    pub fn new(config: &ApiConfig, notifications: NotificationManager) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| AppError::Validation {
            field: "api.base_url".to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation {
                field: "api.base_url".to_string(),
                reason: format!("'{}' cannot be used as a base URL", config.base_url),
            });
        }

        let http = build_http_client(config, &default_user_agent())?;

        Ok(Self {
            http,
            base_url,
            notifications,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /tasks?skip&limit[&completed]`
    pub async fn get_tasks(&self, query: &TaskQuery) -> AppResult<TaskList> {
        query.validate()?;

        let mut url = self.endpoint(&["tasks"])?;
        query.apply(&mut url);

        let body = self.execute(self.http.get(url)).await?;
        decode("GET /tasks", &body)
    }

    /// `GET /tasks/{id}`
    pub async fn get_task(&self, id: i32) -> AppResult<Task> {
        let url = self.endpoint(&["tasks", &id.to_string()])?;

        let body = self.execute(self.http.get(url)).await?;
        decode("GET /tasks/{id}", &body)
    }

    /// `POST /tasks`
    ///
    /// The title is trimmed and the payload validated before anything is sent.
    pub async fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        let task = task.clone().normalized();
        task.validate()?;

        let url = self.endpoint(&["tasks"])?;

        let body = self.execute(self.http.post(url).json(&task)).await?;
        decode("POST /tasks", &body)
    }

    /// `PUT /tasks/{id}` with the changed fields as JSON body
    pub async fn update_task(&self, id: i32, update: &TaskUpdate) -> AppResult<Task> {
        let update = update.clone().normalized();
        update.validate()?;

        let url = self.endpoint(&["tasks", &id.to_string()])?;

        let body = self.execute(self.http.put(url).json(&update)).await?;
        decode("PUT /tasks/{id}", &body)
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete_task(&self, id: i32) -> AppResult<()> {
        let url = self.endpoint(&["tasks", &id.to_string()])?;

        self.execute(self.http.delete(url)).await?;
        Ok(())
    }

    /// `PATCH /tasks/{id}/complete`
    pub async fn complete_task(&self, id: i32) -> AppResult<Task> {
        let url = self.endpoint(&["tasks", &id.to_string(), "complete"])?;

        let body = self.execute(self.http.patch(url)).await?;
        decode("PATCH /tasks/{id}/complete", &body)
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Validation {
                field: "api.base_url".to_string(),
                reason: "cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and reports its outcome
    ///
    /// Returns the raw body of a successful response. Any failure is logged,
    /// shown as an error notification and returned as [`AppError::Api`].
    async fn execute(&self, request: RequestBuilder) -> AppResult<Vec<u8>> {
        let request = match request.build() {
            Ok(request) => request,
            Err(e) => {
                return Err(self.report_failure(ApiFailure::from_transport(&e), None, |notice| {
                    tracing::error!(error = %e, notice, "API request could not be built");
                }));
            }
        };

        let method = request.method().clone();
        let url = request.url().clone();

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                return Err(self.report_failure(ApiFailure::from_transport(&e), None, |notice| {
                    tracing::error!(url = %url, method = %method, error = %e, notice, "API error");
                }));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => {
                return Err(self.report_failure(ApiFailure::NoResponse, None, |notice| {
                    tracing::error!(
                        url = %url,
                        method = %method,
                        status = status.as_u16(),
                        error = %e,
                        notice,
                        "API response body could not be read"
                    );
                }));
            }
        };

        if status.is_success() {
            self.report_success(&method, &url, status.as_u16());
            return Ok(body);
        }

        let failure = ApiFailure::from_status(status.as_u16());
        let detail = serde_json::from_slice::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(error_detail);

        Err(self.report_failure(failure, detail.as_deref(), |notice| {
            tracing::error!(
                url = %url,
                method = %method,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                notice,
                "API error"
            );
        }))
    }

    fn report_success(&self, method: &Method, url: &Url, status: u16) {
        if *method == Method::GET {
            tracing::debug!(method = %method, status, "{} {}: {}", method, url.path(), status);
            return;
        }

        tracing::info!(method = %method, status, "{} {}: {}", method, url.path(), status);
        self.notifications
            .success(success_message(method), Some(SUCCESS_TITLE), None);
    }

    fn report_failure(
        &self,
        failure: ApiFailure,
        detail: Option<&str>,
        log: impl FnOnce(&str),
    ) -> AppError {
        let message = failure.message_with_detail(detail);
        log(&message);
        self.notifications
            .error(message.as_str(), Some(ERROR_TITLE), None);

        AppError::Api { failure, message }
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|source| AppError::InvalidResponse {
        endpoint: endpoint.to_string(),
        source,
    })
}
