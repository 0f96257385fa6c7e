//! The wire seam under [`crate::HeroClient`]: one request in, one JSON value
//! (or a [`TransportError`]) out.

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::debug;

use crate::{error::TransportError, settings::ClientSettings};

#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn is_write(&self) -> bool {
        self.method != Method::GET
    }
}

#[async_trait]
pub trait HeroTransport: Send + Sync {
    /// Performs the request. An empty success body comes back as
    /// [`Value::Null`].
    async fn execute(&self, request: TransportRequest) -> Result<Value, TransportError>;
}

/// [`HeroTransport`] over HTTP with JSON bodies.
pub struct HttpTransport {
    http: Client,
    settings: ClientSettings,
}

impl HttpTransport {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait]
impl HeroTransport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        let url = self
            .settings
            .resolve(&request.path)
            .map_err(|e| TransportError::Unavailable(format!("bad request url: {e}")))?;
        debug!(method = %request.method, %url, "heroes: sending request");

        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.is_write() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
