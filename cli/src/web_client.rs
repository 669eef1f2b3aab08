use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use taskdeck_core::{ApiError, ApiResult, NewTask, Priority, Task, TaskApi};
use tracing::debug;

/// `TaskApi` over the remote REST endpoint
pub struct HttpTaskApi {
    client: reqwest::Client,
    api_url: Url,
    token: String,
}

#[derive(Serialize)]
struct CompletedBody {
    completed: bool,
}

#[derive(Serialize)]
struct PriorityBody {
    priority: Priority,
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error)
    }
}

/// Path segments under `tasks/` that name a route rather than a task
const RESERVED_IDS: [&str; 4] = ["", ".", "..", "clear"];

impl HttpTaskApi {
    pub fn new(api_url: &str, token: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let api_url = Url::parse(api_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API URL '{}'", api_url))?;
        if api_url.cannot_be_a_base() {
            anyhow::bail!("Invalid API URL '{}'", api_url);
        }

        Ok(Self {
            client: builder.build()?,
            api_url,
            token: token.to_string(),
        })
    }

    /// Appends each segment percent-encoded, so an id never spans segments
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Invalid API URL '{}'", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn task_url(&self, id: &str) -> ApiResult<Url> {
        if RESERVED_IDS.contains(&id) {
            return Err(ApiError::Rejected {
                status: 400,
                message: Some(format!("Invalid task id '{}'", id)),
            });
        }

        self.url(&["tasks", id])
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Task API response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_message);

            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("Invalid response body: {}", e)))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> ApiResult<Vec<Task>> {
        self.send_json(self.client.get(self.url(&["tasks"])?)).await
    }

    async fn create(&self, input: &NewTask) -> ApiResult<Task> {
        self.send_json(self.client.post(self.url(&["tasks"])?).json(input))
            .await
    }

    async fn set_completed(&self, id: &str, completed: bool) -> ApiResult<Task> {
        let body = CompletedBody { completed };
        self.send_json(self.client.put(self.task_url(id)?).json(&body))
            .await
    }

    async fn set_priority(&self, id: &str, priority: Priority) -> ApiResult<()> {
        let body = PriorityBody { priority };
        self.send(self.client.put(self.task_url(id)?).json(&body))
            .await
            .map(|_| ())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.send(self.client.delete(self.task_url(id)?))
            .await
            .map(|_| ())
    }

    async fn clear_completed(&self) -> ApiResult<()> {
        self.send(self.client.delete(self.url(&["tasks", "clear"])?))
            .await
            .map(|_| ())
    }
}
