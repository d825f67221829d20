//! Canned response sources.
//!
//! # Design
//! `ResponseStore` is the seam a test uses to decide what every mocked call
//! returns. The lookup methods take a URL, a request or a URL plus
//! parameters, but `DefaultResponseStore` ignores the key and hands back its
//! single configured payload. Tests that need per-URL answers implement the
//! trait themselves.
//!
//! Every method is a pure read: a store gives the same answer for its whole
//! lifetime, which is what makes handler calls idempotent.

use std::error::Error as StdError;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::error::SimulatedError;
use crate::http::{HttpRequest, HttpResponse, Parameters};
use crate::response::{DataResponse, DownloadResponse};
use crate::types::Progress;

/// Source of canned payloads for `SessionManagerMock`.
pub trait ResponseStore {
    /// Terminal error applied to every handle built from this store.
    fn error(&self) -> Option<SimulatedError>;

    /// Request descriptor copied into every handle.
    fn request(&self) -> Option<HttpRequest>;

    /// Response descriptor copied into every handle.
    fn response(&self) -> Option<HttpResponse>;

    /// Progress value handed to progress callbacks.
    fn progress(&self) -> Option<Progress>;

    /// Pre-built structured response for data and upload handles.
    fn property_list_response(&self) -> Option<DataResponse<Value>>;

    /// Pre-built structured response for download handles.
    fn download_property_list_response(&self) -> Option<DownloadResponse<Value>>;

    fn data_for_request(&self, request: &HttpRequest) -> Option<Bytes>;

    fn data_for_url(&self, url: &str) -> Option<Bytes>;

    fn data_for_url_with_parameters(&self, url: &str, parameters: Option<&Parameters>) -> Option<Bytes>;
}

/// Store holding one fixed payload, returned for every key.
#[derive(Debug, Clone, Default)]
pub struct DefaultResponseStore {
    data: Option<Bytes>,
    error: Option<SimulatedError>,
    request: Option<HttpRequest>,
    response: Option<HttpResponse>,
    progress: Option<Progress>,
    property_list_response: Option<DataResponse<Value>>,
    download_property_list_response: Option<DownloadResponse<Value>>,
}

impl DefaultResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_error<E>(self, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_error(Arc::new(error))
    }

    pub fn with_shared_error(mut self, error: SimulatedError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_request(mut self, request: HttpRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_response(mut self, response: HttpResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_property_list_response(mut self, response: DataResponse<Value>) -> Self {
        self.property_list_response = Some(response);
        self
    }

    pub fn with_download_property_list_response(mut self, response: DownloadResponse<Value>) -> Self {
        self.download_property_list_response = Some(response);
        self
    }

    /// The configured error. The request is not consulted.
    pub fn error_for(&self, _request: &HttpRequest) -> Option<SimulatedError> {
        self.error.clone()
    }
}

impl ResponseStore for DefaultResponseStore {
    fn error(&self) -> Option<SimulatedError> {
        self.error.clone()
    }

    fn request(&self) -> Option<HttpRequest> {
        self.request.clone()
    }

    fn response(&self) -> Option<HttpResponse> {
        self.response.clone()
    }

    fn progress(&self) -> Option<Progress> {
        self.progress
    }

    fn property_list_response(&self) -> Option<DataResponse<Value>> {
        self.property_list_response.clone()
    }

    fn download_property_list_response(&self) -> Option<DownloadResponse<Value>> {
        self.download_property_list_response.clone()
    }

    fn data_for_request(&self, _request: &HttpRequest) -> Option<Bytes> {
        self.data.clone()
    }

    fn data_for_url(&self, _url: &str) -> Option<Bytes> {
        self.data.clone()
    }

    fn data_for_url_with_parameters(&self, _url: &str, _parameters: Option<&Parameters>) -> Option<Bytes> {
        self.data.clone()
    }
}
