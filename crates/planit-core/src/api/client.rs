//! HTTP client for the PlanIt REST API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::types::{
    Credentials, Event, LoginResponse, MessageResponse, NewEvent, NewTask, Task, TaskUpdate,
};

/// Standard User-Agent header for planit API requests.
pub const USER_AGENT: &str = concat!("planit/", env!("CARGO_PKG_VERSION"));

/// Who a request is made on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Opaque session token, sent as `Authorization: Bearer`.
    Bearer(String),
    /// Raw user id, sent as a `user_id` query/body parameter.
    UserId(String),
}

impl Identity {
    /// `user_id` to attach as a parameter, if identity travels that way.
    pub fn user_id_param(&self) -> Option<&str> {
        match self {
            Identity::Bearer(_) => None,
            Identity::UserId(id) => Some(id),
        }
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Identity::Bearer(token) => builder.bearer_auth(token),
            Identity::UserId(_) => builder,
        }
    }
}

/// How a search query is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Trimmed and percent-encoded as a query parameter.
    Encoded,
    /// Concatenated into the URL exactly as typed.
    Raw,
}

/// PlanIt API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash).
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        self.http
            .request(method, url)
            .header("accept", "application/json")
    }

    /// `POST /login`
    pub async fn login(&self, credentials: &Credentials<'_>) -> ApiResult<LoginResponse> {
        let builder = self.request(Method::POST, "/login").json(credentials);
        read_json(send(builder).await?).await
    }

    /// `POST /register`
    pub async fn register(&self, credentials: &Credentials<'_>) -> ApiResult<MessageResponse> {
        let builder = self.request(Method::POST, "/register").json(credentials);
        read_message(send(builder).await?).await
    }

    /// `GET /tasks`
    pub async fn list_tasks(&self, identity: &Identity) -> ApiResult<Vec<Task>> {
        let mut builder = identity.apply(self.request(Method::GET, "/tasks"));
        if let Some(user_id) = identity.user_id_param() {
            builder = builder.query(&[("user_id", user_id)]);
        }
        read_json(send(builder).await?).await
    }

    /// `GET /tasks/search?q=`
    pub async fn search_tasks(
        &self,
        identity: &Identity,
        query: &str,
        encoding: QueryEncoding,
    ) -> ApiResult<Vec<Task>> {
        let builder = match encoding {
            QueryEncoding::Encoded => self
                .request(Method::GET, "/tasks/search")
                .query(&[("q", query.trim())]),
            QueryEncoding::Raw => {
                self.request(Method::GET, &format!("/tasks/search?q={query}"))
            }
        };
        read_json(send(identity.apply(builder)).await?).await
    }

    /// `POST /tasks`
    pub async fn create_task(
        &self,
        identity: &Identity,
        title: &str,
        description: &str,
    ) -> ApiResult<MessageResponse> {
        let body = NewTask {
            user_id: identity.user_id_param(),
            title,
            description,
        };
        let builder = identity.apply(self.request(Method::POST, "/tasks").json(&body));
        read_message(send(builder).await?).await
    }

    /// `PUT /tasks/:id`
    pub async fn update_task(
        &self,
        identity: &Identity,
        id: i64,
        is_done: bool,
    ) -> ApiResult<MessageResponse> {
        let builder = identity.apply(
            self.request(Method::PUT, &format!("/tasks/{id}"))
                .json(&TaskUpdate { is_done }),
        );
        read_message(send(builder).await?).await
    }

    /// `DELETE /tasks/:id`
    pub async fn delete_task(&self, identity: &Identity, id: i64) -> ApiResult<MessageResponse> {
        let builder = identity.apply(self.request(Method::DELETE, &format!("/tasks/{id}")));
        read_message(send(builder).await?).await
    }

    /// `GET /events`
    pub async fn list_events(&self, identity: &Identity) -> ApiResult<Vec<Event>> {
        let mut builder = identity.apply(self.request(Method::GET, "/events"));
        if let Some(user_id) = identity.user_id_param() {
            builder = builder.query(&[("user_id", user_id)]);
        }
        read_json(send(builder).await?).await
    }

    /// `POST /events`
    pub async fn create_event(
        &self,
        identity: &Identity,
        title: &str,
        date: &str,
    ) -> ApiResult<MessageResponse> {
        let body = NewEvent {
            user_id: identity.user_id_param(),
            title,
            date,
        };
        let builder = identity.apply(self.request(Method::POST, "/events").json(&body));
        read_message(send(builder).await?).await
    }
}

async fn send(builder: RequestBuilder) -> ApiResult<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::from_reqwest(&e))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ApiError::http_status(status.as_u16(), &body);
    if err.is_unauthorized() {
        tracing::warn!(status = status.as_u16(), "api rejected credentials");
    } else {
        tracing::debug!(status = status.as_u16(), error = %err, "api request failed");
    }
    Err(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::from_reqwest(&e))?;
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            let mut err = ApiError::parse(format!("Unexpected response from server: {e}"));
            err.body = Some(body);
            Err(err)
        }
    }
}

/// Acknowledgement bodies are informational; an empty or odd body still
/// counts as success.
async fn read_message(response: Response) -> ApiResult<MessageResponse> {
    let body = response.text().await.unwrap_or_default();
    Ok(serde_json::from_str(&body).unwrap_or_default())
}
