//! Capability traits for a networking session and its requests.
//!
//! # Design
//! Application code depends on these traits rather than on a concrete
//! session, so tests can substitute `SessionManagerMock`. Handler methods
//! take the handler by value, call it, and return `&Self` so calls chain:
//!
//! ```
//! use session_mock::{DataRequest, DefaultResponseStore, HttpMethod, Session, SessionManagerMock};
//!
//! let session = SessionManagerMock::new(DefaultResponseStore::new().with_data("ok"));
//! let mut body = None;
//! session
//!     .request("https://localhost", HttpMethod::Get, None, Default::default(), None)
//!     .response_string(None, |resp| body = resp.value().cloned());
//! assert_eq!(body.as_deref(), Some("ok"));
//! ```
//!
//! The `queue` argument names where a real session would run the handler.
//! Implementations in this crate ignore it and run the handler before
//! returning.

use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use serde_json::Value;
use uuid::Uuid;

use crate::http::{HttpHeaders, HttpMethod, HttpRequest, HttpResponse, ParameterEncoding, Parameters};
use crate::multipart::{EncodingCompletion, MultipartFormData};
use crate::response::{DataResponse, DefaultDataResponse, DefaultDownloadResponse, DownloadResponse};
use crate::types::{CallbackQueue, Credential, CredentialPersistence, NetService, Progress};

/// Base capability shared by every request kind.
pub trait Request {
    fn session(&self) -> Option<Uuid>;

    fn task(&self) -> Option<Uuid>;

    /// The request that was (or would have been) sent.
    fn url_request(&self) -> Option<&HttpRequest>;

    /// The response received for it.
    fn http_response(&self) -> Option<&HttpResponse>;

    fn retry_count(&self) -> u32;

    fn description(&self) -> &str;

    fn debug_description(&self) -> &str;

    fn authenticate(&self, user: &str, password: &str, persistence: CredentialPersistence) -> &Self;

    fn authenticate_with(&self, credential: &Credential) -> &Self;

    fn resume(&self);

    fn suspend(&self);

    fn cancel(&self);
}

/// A request whose body is held in memory.
pub trait DataRequest: Request {
    fn response<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DefaultDataResponse);

    fn response_data<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Bytes>);

    fn response_string<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<String>);

    fn response_json<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Value>);

    fn response_property_list<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Value>);

    fn download_progress<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnMut(Progress);
}

/// A request whose body is written to disk.
pub trait DownloadRequest: Request {
    /// Partial data a later download can resume from.
    fn resume_data(&self) -> Option<&Bytes>;

    fn response<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DefaultDownloadResponse);

    fn response_data<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<Bytes>);

    fn response_string<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<String>);

    fn response_json<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<Value>);

    fn response_property_list<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<Value>);

    fn download_progress<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnMut(Progress);
}

/// A data request that also sends a body.
pub trait UploadRequest: DataRequest {
    fn upload_progress<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnMut(Progress);
}

/// Factory for requests. One method per verb of a networking session.
pub trait Session {
    type Data: DataRequest;
    type Download: DownloadRequest;
    type Upload: UploadRequest;
    type Stream: Request;

    fn request(
        &self,
        url: &str,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        encoding: ParameterEncoding,
        headers: Option<&HttpHeaders>,
    ) -> Self::Data;

    fn request_with(&self, request: &HttpRequest) -> Self::Data;

    fn download(
        &self,
        url: &str,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        encoding: ParameterEncoding,
        headers: Option<&HttpHeaders>,
        destination: Option<&Path>,
    ) -> Self::Download;

    fn download_with(&self, request: &HttpRequest, destination: Option<&Path>) -> Self::Download;

    fn download_resuming(&self, resume_data: Bytes, destination: Option<&Path>) -> Self::Download;

    fn upload_file(&self, file: &Path, url: &str, method: HttpMethod, headers: Option<&HttpHeaders>) -> Self::Upload;

    fn upload_file_with(&self, file: &Path, request: &HttpRequest) -> Self::Upload;

    fn upload_data(&self, data: Bytes, url: &str, method: HttpMethod, headers: Option<&HttpHeaders>) -> Self::Upload;

    fn upload_data_with(&self, data: Bytes, request: &HttpRequest) -> Self::Upload;

    fn upload_stream(
        &self,
        stream: &mut dyn Read,
        url: &str,
        method: HttpMethod,
        headers: Option<&HttpHeaders>,
    ) -> Self::Upload;

    fn upload_stream_with(&self, stream: &mut dyn Read, request: &HttpRequest) -> Self::Upload;

    #[allow(clippy::too_many_arguments)]
    fn upload_multipart<F>(
        &self,
        form: F,
        threshold: u64,
        url: &str,
        method: HttpMethod,
        headers: Option<&HttpHeaders>,
        queue: Option<CallbackQueue>,
        completion: Option<EncodingCompletion<'_, Self::Upload>>,
    ) where
        F: FnOnce(&mut MultipartFormData);

    fn upload_multipart_with<F>(
        &self,
        form: F,
        threshold: u64,
        request: &HttpRequest,
        queue: Option<CallbackQueue>,
        completion: Option<EncodingCompletion<'_, Self::Upload>>,
    ) where
        F: FnOnce(&mut MultipartFormData);

    fn stream(&self, host: &str, port: u16) -> Self::Stream;

    fn stream_with_service(&self, service: &NetService) -> Self::Stream;
}
