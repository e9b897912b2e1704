// File: ./src/client/core.rs
// HTTP transport for the task service
use crate::api::ErrorBody;
use crate::client::cert::tls_config;
use crate::model::{Task, TaskId, TaskPayload};

use async_trait::async_trait;
use http::uri::Scheme;
use http::{Method, Request, StatusCode, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const TASKS_PATH: &str = "/api/tasks";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service URL `{0}`")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("could not build request: {0}")]
    Request(#[from] http::Error),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("service answered {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// The `error` text the service put in its response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status {
                message: Some(m), ..
            } if !m.is_empty() => Some(m.as_str()),
            _ => None,
        }
    }
}

/// What the board needs from the service.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;
    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, ClientError>;
    async fn update_task(&self, id: &TaskId, payload: &TaskPayload) -> Result<Task, ClientError>;
    async fn delete_task(&self, id: &TaskId) -> Result<(), ClientError>;
}

#[derive(Clone, Debug)]
pub struct TaskHttpClient {
    http: HttpsClient,
    base_url: String,
}

impl TaskHttpClient {
    pub fn new(url: &str, insecure: bool) -> Result<Self, ClientError> {
        let base_url = url.trim().trim_end_matches('/').to_string();
        let uri: Uri = base_url
            .parse()
            .map_err(|_| ClientError::InvalidUrl(url.to_string()))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(ClientError::InvalidUrl(url.to_string()));
        }

        let tls = match tls_config(insecure) {
            Ok(cfg) => cfg,
            // Plain http never consults the root store.
            Err(e) if uri.scheme() == Some(&Scheme::HTTP) => {
                tracing::debug!(error = %e, "no system roots, continuing for http URL");
                tls_config(true)?
            }
            Err(e) => return Err(e),
        };
        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .build();
        let http = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_uri(&self, id: Option<&TaskId>) -> String {
        match id {
            Some(id) => format!("{}{}/{}", self.base_url, TASKS_PATH, id),
            None => format!("{}{}", self.base_url, TASKS_PATH),
        }
    }

    /// Sends one request and returns the body of a 2xx response. Other
    /// statuses become `ClientError::Status` carrying the service's message.
    async fn send(
        &self,
        method: Method,
        uri: String,
        body: Option<String>,
    ) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(%method, %uri, "task service request");
        let mut builder = Request::builder()
            .method(method)
            .uri(&uri)
            .header(header::ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let req = builder.body(body.unwrap_or_default())?;

        let resp = self
            .http
            .request(req)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?
            .to_bytes();

        if status.is_success() {
            return Ok(bytes.to_vec());
        }
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .map(|b| b.error);
        tracing::debug!(%status, ?message, "task service refused request");
        Err(ClientError::Status { status, message })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: String,
        body: Option<String>,
    ) -> Result<T, ClientError> {
        let bytes = self.send(method, uri, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TaskApi for TaskHttpClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.send_json(Method::GET, self.task_uri(None), None).await
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, ClientError> {
        let body = serde_json::to_string(payload)?;
        self.send_json(Method::POST, self.task_uri(None), Some(body))
            .await
    }

    async fn update_task(&self, id: &TaskId, payload: &TaskPayload) -> Result<Task, ClientError> {
        let body = serde_json::to_string(payload)?;
        self.send_json(Method::PUT, self.task_uri(Some(id)), Some(body))
            .await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ClientError> {
        self.send(Method::DELETE, self.task_uri(Some(id)), None)
            .await
            .map(|_| ())
    }
}
