use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::model::config::UpdateBody;
use crate::model::request::Request;
use crate::model::todo::{TodoId, TodoItem};

/// Error type for calls against the todo service
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
    },
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("server url '{0}' cannot be used as a base for /todos")]
    NotABase(Url),
}

/// The result of executing one [`Request`], handed back to the synchronizer
#[derive(Debug)]
pub enum Completion {
    Listed(Result<Vec<TodoItem>, ApiError>),
    Created(Result<(), ApiError>),
    Updated {
        id: TodoId,
        result: Result<(), ApiError>,
    },
    Deleted {
        id: TodoId,
        result: Result<(), ApiError>,
    },
}

impl Completion {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Completion::Listed(r) => r.as_ref().err(),
            Completion::Created(r)
            | Completion::Updated { result: r, .. }
            | Completion::Deleted { result: r, .. } => r.as_ref().err(),
        }
    }
}

/// Blocking client for the `/todos` collection.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: Client,
    base: Url,
    update_body: UpdateBody,
}

impl TodoClient {
    pub fn new(base: Url, update_body: UpdateBody) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::NotABase(base));
        }
        let http = Client::builder().build()?;
        Ok(TodoClient {
            http,
            base,
            update_body,
        })
    }

    /// `{base}/todos` or `{base}/todos/{id}`. Ids are percent-encoded as a
    /// single path segment.
    pub fn endpoint(&self, id: Option<&TodoId>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("todos");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    /// `GET /todos`
    pub fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let url = self.endpoint(None);
        let resp = self.http.get(url.clone()).send()?;
        let resp = check_status("GET", &url, resp)?;
        let body = resp.text()?;
        let items: Vec<TodoItem> = serde_json::from_str(&body)?;
        tracing::debug!(count = items.len(), "listed todos");
        Ok(items)
    }

    /// `POST /todos` with the text as a JSON string
    pub fn create(&self, text: &str) -> Result<(), ApiError> {
        let url = self.endpoint(None);
        let body = serde_json::to_string(text)?;
        let resp = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        check_status("POST", &url, resp)?;
        Ok(())
    }

    /// `PUT /todos/{id}`; the body encoding follows `server.update_body`
    pub fn update(&self, id: &TodoId, text: &str) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id));
        let body = match self.update_body {
            UpdateBody::Raw => text.to_string(),
            UpdateBody::Json => serde_json::to_string(text)?,
        };
        let resp = self
            .http
            .put(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        check_status("PUT", &url, resp)?;
        Ok(())
    }

    /// `DELETE /todos/{id}`
    pub fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id));
        let resp = self.http.delete(url.clone()).send()?;
        check_status("DELETE", &url, resp)?;
        Ok(())
    }

    /// Perform `request` and wrap the outcome for the synchronizer
    pub fn execute(&self, request: Request) -> Completion {
        tracing::debug!(method = request.method(), id = ?request.item_id(), "sending request");
        let completion = match request {
            Request::List => Completion::Listed(self.list()),
            Request::Create { text } => Completion::Created(self.create(&text)),
            Request::Update { id, text } => {
                let result = self.update(&id, &text);
                Completion::Updated { id, result }
            }
            Request::Delete { id } => {
                let result = self.delete(&id);
                Completion::Deleted { id, result }
            }
        };
        if let Some(err) = completion.error() {
            tracing::debug!(error = %err, "request failed");
        }
        completion
    }
}

fn check_status(method: &'static str, url: &Url, resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ApiError::Status {
            method,
            url: url.to_string(),
            status,
        })
    }
}
