use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use serde::Serialize;

use crate::middleware::auth::Claims;

/// Inbound request as seen by the Space operations: method, query string
/// parameters, optional raw body, caller claims and request headers.
#[derive(Clone, Debug)]
pub struct SpaceRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
    /// Set when the body bytes were not valid UTF-8; `body` is then `None`.
    pub undecodable_body: bool,
    pub claims: Option<Claims>,
    pub headers: HeaderMap,
}

/// The `id` query parameter, distinguishing a missing key from an empty value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryId<'a> {
    Absent,
    Empty,
    Present(&'a str),
}

impl SpaceRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: HashMap::new(),
            body: None,
            undecodable_body: false,
            claims: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body from raw bytes, marking it undecodable when it is not
    /// UTF-8.
    pub fn with_body_bytes(mut self, bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                self.body = Some(text.to_string());
                self.undecodable_body = false;
            }
            Err(e) => {
                tracing::warn!("Request body is not valid UTF-8: {}", e);
                self.body = None;
                self.undecodable_body = true;
            }
        }
        self
    }

    pub fn with_claims(mut self, claims: Claims) -> Self {
        self.claims = Some(claims);
        self
    }

    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn id(&self) -> QueryId<'_> {
        match self.query.get("id") {
            None => QueryId::Absent,
            Some(id) if id.is_empty() => QueryId::Empty,
            Some(id) => QueryId::Present(id),
        }
    }

    /// Request body, treating an empty body as absent.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }

    pub fn origin(&self) -> Option<&str> {
        self.headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
    }
}

/// Outbound response: status, headers and a JSON-serialized body.
#[derive(Clone, Debug)]
pub struct SpaceResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl SpaceResponse {
    /// Serializes `payload` and tags the response as `application/json`.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Self {
        let (status, body) = match serde_json::to_string(payload) {
            Ok(body) => (status, body),
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    r#"{"message":"Internal Server Error"}"#.to_string(),
                )
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
