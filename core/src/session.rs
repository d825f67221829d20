//! Session mock: the entry point tests hand to code under test.
//!
//! # Design
//! Every factory reads the store, wraps the payload in the matching mock
//! handle and returns it; nothing is queued and nothing touches the network.
//! The target URL or request is passed to the store's lookup but the default
//! store ignores it, so every call answers with the same canned payload.
//!
//! Multipart uploads need two injected values: the form-data recorder given
//! to the form callback, and, when a completion is passed, the encoding
//! result handed to it. A call that needs one that was not injected panics.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::data::DataRequestMock;
use crate::download::DownloadRequestMock;
use crate::error::{misconfigured, misused};
use crate::http::{HttpHeaders, HttpMethod, HttpRequest, ParameterEncoding, Parameters};
use crate::multipart::{EncodingCompletion, MultipartFormData, MultipartFormDataResult};
use crate::protocol::Session;
use crate::request::RequestMock;
use crate::store::{DefaultResponseStore, ResponseStore};
use crate::types::{CallbackQueue, NetService};
use crate::upload::UploadRequestMock;

pub struct SessionManagerMock {
    store: Arc<dyn ResponseStore>,
    running_session: Option<Uuid>,
    start_requests_immediately: bool,
    multipart_form_data: Option<RefCell<MultipartFormData>>,
    multipart_result: Option<MultipartFormDataResult<UploadRequestMock>>,
}

impl fmt::Debug for SessionManagerMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManagerMock")
            .field("running_session", &self.running_session)
            .field("start_requests_immediately", &self.start_requests_immediately)
            .field("multipart_form_data", &self.multipart_form_data)
            .field("multipart_result", &self.multipart_result)
            .finish_non_exhaustive()
    }
}

impl Default for SessionManagerMock {
    fn default() -> Self {
        Self::new(DefaultResponseStore::new())
    }
}

impl SessionManagerMock {
    pub fn new(store: impl ResponseStore + 'static) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    pub fn with_shared_store(store: Arc<dyn ResponseStore>) -> Self {
        Self {
            store,
            running_session: None,
            start_requests_immediately: true,
            multipart_form_data: None,
            multipart_result: None,
        }
    }

    pub fn with_running_session(mut self, session: Uuid) -> Self {
        self.running_session = Some(session);
        self
    }

    /// Recorder handed to multipart form callbacks.
    pub fn with_multipart_form_data(mut self, form: MultipartFormData) -> Self {
        self.multipart_form_data = Some(RefCell::new(form));
        self
    }

    /// Result handed to multipart encoding completions.
    pub fn with_multipart_result(mut self, result: MultipartFormDataResult<UploadRequestMock>) -> Self {
        self.multipart_result = Some(result);
        self
    }

    pub fn running_session(&self) -> Option<Uuid> {
        self.running_session
    }

    pub fn start_requests_immediately(&self) -> bool {
        self.start_requests_immediately
    }

    pub fn store(&self) -> &dyn ResponseStore {
        self.store.as_ref()
    }

    /// The injected recorder, with whatever the form callbacks appended.
    ///
    /// Panics when called from inside a running form callback.
    pub fn multipart_form_data(&self) -> Option<Ref<'_, MultipartFormData>> {
        let recorder = self.multipart_form_data.as_ref()?;
        match recorder.try_borrow() {
            Ok(form) => Some(form),
            Err(_) => misused(
                "multipart_form_data",
                "multipart form data is being filled by a running form callback",
            ),
        }
    }

    fn base(&self, description: &str) -> RequestMock {
        log::debug!("session mock building handle: {description}");
        RequestMock::new()
            .with_session(self.running_session)
            .with_task(Some(Uuid::new_v4()))
            .with_request(self.store.request())
            .with_response(self.store.response())
            .with_description(description)
            .with_shared_error(self.store.error())
    }

    fn data_request(&self, data: Option<Bytes>, description: &str) -> DataRequestMock {
        DataRequestMock::new(self.base(description))
            .with_data(data)
            .with_progress(self.store.progress())
            .with_property_list_response(self.store.property_list_response())
    }

    fn download_request(&self, data: Option<Bytes>, description: &str) -> DownloadRequestMock {
        DownloadRequestMock::new(self.base(description))
            .with_resume_data(data)
            .with_progress(self.store.progress())
            .with_property_list_response(self.store.download_property_list_response())
    }

    fn upload_request(&self, data: Option<Bytes>, description: &str) -> UploadRequestMock {
        UploadRequestMock::new(self.base(description))
            .with_data(data)
            .with_progress(self.store.progress())
            .with_property_list_response(self.store.property_list_response())
    }

    fn multipart<F>(
        &self,
        operation: &str,
        form: F,
        completion: Option<EncodingCompletion<'_, UploadRequestMock>>,
    ) where
        F: FnOnce(&mut MultipartFormData),
    {
        let recorder = self
            .multipart_form_data
            .as_ref()
            .unwrap_or_else(|| misconfigured(operation, "multipart form data"));
        let Ok(mut recorder) = recorder.try_borrow_mut() else {
            misused(operation, "multipart form data is still borrowed by the caller");
        };
        form(&mut *recorder);
        drop(recorder);

        let Some(completion) = completion else {
            return;
        };
        let result = self
            .multipart_result
            .clone()
            .unwrap_or_else(|| misconfigured(operation, "multipart form data result"));
        log::trace!("{operation}: delivering encoding result");
        completion(result);
    }
}

impl Session for SessionManagerMock {
    type Data = DataRequestMock;
    type Download = DownloadRequestMock;
    type Upload = UploadRequestMock;
    type Stream = RequestMock;

    fn request(
        &self,
        url: &str,
        _method: HttpMethod,
        parameters: Option<&Parameters>,
        _encoding: ParameterEncoding,
        _headers: Option<&HttpHeaders>,
    ) -> DataRequestMock {
        let data = self.store.data_for_url_with_parameters(url, parameters);
        self.data_request(data, "called from request(url, method, parameters, encoding, headers)")
    }

    fn request_with(&self, request: &HttpRequest) -> DataRequestMock {
        let data = self.store.data_for_request(request);
        self.data_request(data, "called from request_with(request)")
    }

    fn download(
        &self,
        url: &str,
        _method: HttpMethod,
        parameters: Option<&Parameters>,
        _encoding: ParameterEncoding,
        _headers: Option<&HttpHeaders>,
        _destination: Option<&Path>,
    ) -> DownloadRequestMock {
        let data = self.store.data_for_url_with_parameters(url, parameters);
        self.download_request(
            data,
            "called from download(url, method, parameters, encoding, headers, destination)",
        )
    }

    fn download_with(&self, request: &HttpRequest, _destination: Option<&Path>) -> DownloadRequestMock {
        let data = self.store.data_for_request(request);
        self.download_request(data, "called from download_with(request, destination)")
    }

    fn download_resuming(&self, resume_data: Bytes, _destination: Option<&Path>) -> DownloadRequestMock {
        self.download_request(Some(resume_data), "called from download_resuming(resume_data, destination)")
    }

    fn upload_file(
        &self,
        file: &Path,
        _url: &str,
        _method: HttpMethod,
        _headers: Option<&HttpHeaders>,
    ) -> UploadRequestMock {
        let data = self.store.data_for_url(&file.to_string_lossy());
        self.upload_request(data, "called from upload_file(file, url, method, headers)")
    }

    fn upload_file_with(&self, _file: &Path, request: &HttpRequest) -> UploadRequestMock {
        let data = self.store.data_for_request(request);
        self.upload_request(data, "called from upload_file_with(file, request)")
    }

    fn upload_data(
        &self,
        _data: Bytes,
        url: &str,
        _method: HttpMethod,
        _headers: Option<&HttpHeaders>,
    ) -> UploadRequestMock {
        let data = self.store.data_for_url(url);
        self.upload_request(data, "called from upload_data(data, url, method, headers)")
    }

    fn upload_data_with(&self, _data: Bytes, request: &HttpRequest) -> UploadRequestMock {
        let data = self.store.data_for_request(request);
        self.upload_request(data, "called from upload_data_with(data, request)")
    }

    fn upload_stream(
        &self,
        _stream: &mut dyn Read,
        url: &str,
        _method: HttpMethod,
        _headers: Option<&HttpHeaders>,
    ) -> UploadRequestMock {
        let data = self.store.data_for_url(url);
        self.upload_request(data, "called from upload_stream(stream, url, method, headers)")
    }

    fn upload_stream_with(&self, _stream: &mut dyn Read, request: &HttpRequest) -> UploadRequestMock {
        let data = self.store.data_for_request(request);
        self.upload_request(data, "called from upload_stream_with(stream, request)")
    }

    #[allow(clippy::too_many_arguments)]
    fn upload_multipart<F>(
        &self,
        form: F,
        _threshold: u64,
        _url: &str,
        _method: HttpMethod,
        _headers: Option<&HttpHeaders>,
        _queue: Option<CallbackQueue>,
        completion: Option<EncodingCompletion<'_, UploadRequestMock>>,
    ) where
        F: FnOnce(&mut MultipartFormData),
    {
        self.multipart("upload_multipart", form, completion);
    }

    fn upload_multipart_with<F>(
        &self,
        form: F,
        _threshold: u64,
        _request: &HttpRequest,
        _queue: Option<CallbackQueue>,
        completion: Option<EncodingCompletion<'_, UploadRequestMock>>,
    ) where
        F: FnOnce(&mut MultipartFormData),
    {
        self.multipart("upload_multipart_with", form, completion);
    }

    fn stream(&self, host: &str, port: u16) -> RequestMock {
        log::debug!("session mock building stream handle for {host}:{port}");
        RequestMock::new()
            .with_session(self.running_session)
            .with_request(self.store.request())
            .with_response(self.store.response())
            .with_description("called from stream(host, port)")
    }

    fn stream_with_service(&self, service: &NetService) -> RequestMock {
        log::debug!("session mock building stream handle for service {}", service.name);
        RequestMock::new()
            .with_session(self.running_session)
            .with_request(self.store.request())
            .with_response(self.store.response())
            .with_description("called from stream_with_service(service)")
    }
}
