//! Response envelopes delivered to handlers.
//!
//! The `Default*` envelopes carry the raw outcome (bytes and error side by
//! side). The typed envelopes carry a `Result` produced by a serializer.

use std::path::PathBuf;

use bytes::Bytes;

use crate::error::{ResponseError, SimulatedError};
use crate::http::{HttpRequest, HttpResponse};

/// Typed envelope whose result can be replaced by a failure.
pub(crate) trait ResultEnvelope {
    fn fail_with(&mut self, error: ResponseError);
}

/// Unserialized outcome of a data request.
#[derive(Debug, Clone)]
pub struct DefaultDataResponse {
    pub request: Option<HttpRequest>,
    pub response: Option<HttpResponse>,
    pub data: Option<Bytes>,
    pub error: Option<SimulatedError>,
}

/// Serialized outcome of a data request.
#[derive(Debug, Clone)]
pub struct DataResponse<T> {
    pub request: Option<HttpRequest>,
    pub response: Option<HttpResponse>,
    pub data: Option<Bytes>,
    pub result: Result<T, ResponseError>,
}

impl<T> ResultEnvelope for DataResponse<T> {
    fn fail_with(&mut self, error: ResponseError) {
        self.result = Err(error);
    }
}

impl<T> DataResponse<T> {
    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ResponseError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Unserialized outcome of a download request.
#[derive(Debug, Clone)]
pub struct DefaultDownloadResponse {
    pub request: Option<HttpRequest>,
    pub response: Option<HttpResponse>,
    pub temporary_url: Option<PathBuf>,
    pub destination_url: Option<PathBuf>,
    pub resume_data: Option<Bytes>,
    pub error: Option<SimulatedError>,
}

/// Serialized outcome of a download request.
#[derive(Debug, Clone)]
pub struct DownloadResponse<T> {
    pub request: Option<HttpRequest>,
    pub response: Option<HttpResponse>,
    pub temporary_url: Option<PathBuf>,
    pub destination_url: Option<PathBuf>,
    pub resume_data: Option<Bytes>,
    pub result: Result<T, ResponseError>,
}

impl<T> ResultEnvelope for DownloadResponse<T> {
    fn fail_with(&mut self, error: ResponseError) {
        self.result = Err(error);
    }
}

impl<T> DownloadResponse<T> {
    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ResponseError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
