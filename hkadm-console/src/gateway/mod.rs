//! REST gateway client
//!
//! Thin reqwest wrapper over the backend. Every endpoint group lives in its
//! own file as an `impl Gateway` block; this module owns request building,
//! bearer authorization and error mapping.

mod admin;
mod annonces;
mod auth;
mod hackathons;
mod inscriptions;
mod monitoring;
mod resultats;
mod teams;
mod users;

use hkadm_common::config::ConsoleConfig;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ConsoleError, Result, FALLBACK_MESSAGE};
use crate::session::SessionStore;

const USER_AGENT: &str = concat!("hkadm/", env!("CARGO_PKG_VERSION"));

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Sent without Authorization header
    Public,
    /// Sent with `Authorization: Bearer <token>` when a session exists
    Authenticated,
}

/// Backend HTTP client
#[derive(Debug)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl Gateway {
    pub fn new(config: &ConsoleConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConsoleError::Network(e.to_string()))?;

        let base_url = Url::parse(&config.api_base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ConsoleError::Validation(format!("Invalid API URL: {}", config.api_base_url))
            })?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Base URL followed by `segments`, each one percent-encoded
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request(&self, method: Method, url: Url, access: Access) -> RequestBuilder {
        debug!(method = %method, url = %url, ?access, "Gateway request");

        let builder = self.http.request(method, url);
        match access {
            Access::Public => builder,
            Access::Authenticated => match self.session.token().await {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
        }
    }

    /// Send and turn non-success statuses into [`ConsoleError::Gateway`]
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!("Gateway unreachable: {}", e);
            ConsoleError::from(e)
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(handle_api_error(response).await)
        }
    }

    async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        access: Access,
    ) -> Result<Response> {
        let mut builder = self.request(method, url, access).await;
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.send(builder).await
    }

    /// GET and decode a JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url, access: Access) -> Result<T> {
        let response = self.call(Method::GET, url, None, access).await?;
        decode(response).await
    }

    /// Send a JSON body (or none) and decode the JSON answer
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        access: Access,
    ) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ConsoleError::Decode(e.to_string()))?;
        let response = self.call(method, url, body, access).await?;
        decode(response).await
    }

    /// Like [`send_json`](Self::send_json) but keeps the answer untyped
    ///
    /// An empty body yields `Value::Null`.
    pub(crate) async fn send_value<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        access: Access,
    ) -> Result<Value>
    where
        B: Serialize,
    {
        self.send_json::<B, Value>(method, url, body, access).await
    }

    /// Send a multipart form and decode the JSON answer
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
        access: Access,
    ) -> Result<T> {
        let builder = self.request(Method::POST, url, access).await.multipart(form);
        let response = self.send(builder).await?;
        decode(response).await
    }

    /// GET a binary body
    pub(crate) async fn get_bytes(&self, url: Url, access: Access) -> Result<Vec<u8>> {
        let response = self.call(Method::GET, url, None, access).await?;
        let bytes = response.bytes().await.map_err(ConsoleError::from)?;
        Ok(bytes.to_vec())
    }
}

/// Decode a JSON body; an empty body decodes as `null`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await.map_err(ConsoleError::from)?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ConsoleError::Decode(e.to_string()))
}

/// Map a non-success response to a gateway error
///
/// Message priority: JSON `message` (string, or list joined), JSON `error`
/// (string, or object with `message`), plain-text body, status reason,
/// generic fallback.
pub(crate) async fn handle_api_error(response: Response) -> ConsoleError {
    let status = response.status();
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let message = match response.text().await {
        Ok(text) => {
            let from_json = if is_json || text.trim_start().starts_with('{') {
                serde_json::from_str::<Value>(&text)
                    .ok()
                    .and_then(|v| message_from_json(&v))
            } else {
                None
            };
            from_json
                .or_else(|| (!text.trim().is_empty() && !is_json).then(|| text.trim().to_string()))
                .unwrap_or_else(|| status_reason(status))
        }
        Err(_) => status_reason(status),
    };

    warn!(status = status.as_u16(), message = %message, "Gateway returned an error");

    ConsoleError::Gateway {
        status: status.as_u16(),
        message,
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    match value.get("message") {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if !parts.is_empty() {
                return Some(parts.join(", "));
            }
        }
        _ => {}
    }
    match value.get("error") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn status_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}
