//! HTTP descriptors carried by mock handles.
//!
//! # Design
//! These types describe requests and responses as plain data. Nothing here is
//! ever sent over the network: the session mock copies the store's canned
//! `HttpRequest` / `HttpResponse` into every handle it builds so that handlers
//! can inspect "what was sent" and "what came back" exactly as they would with
//! a real session.
//!
//! All fields use owned types so descriptors can be cloned into each response
//! envelope without lifetime concerns.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Header list in insertion order. Duplicate names are allowed.
pub type HttpHeaders = Vec<(String, String)>;

/// Request parameters as a JSON object.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

/// How request parameters would be encoded. Accepted by the factory
/// operations and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterEncoding {
    /// Query string for GET/HEAD/DELETE, form body otherwise.
    #[default]
    Url,
    /// Always in the query string.
    QueryString,
    /// Form-encoded HTTP body.
    HttpBody,
    /// JSON HTTP body.
    Json,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpRequest {
    #[serde(default)]
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: HttpHeaders,
    #[serde(skip)]
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// The response side of an exchange: status line and headers. The body
/// travels separately in the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    #[serde(default)]
    pub url: String,
    pub status: u16,
    #[serde(default)]
    pub headers: HttpHeaders,
}

impl HttpResponse {
    pub fn new(url: &str, status: u16) -> Self {
        Self {
            url: url.to_string(),
            status,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Case-insensitive lookup of the first header with `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
