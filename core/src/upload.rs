//! Upload request mock: a data request plus upload progress.

use bytes::Bytes;
use serde_json::Value;

use crate::data::DataRequestMock;
use crate::protocol::{DataRequest, Request, UploadRequest};
use crate::request::{delegate_request, RequestMock};
use crate::response::{DataResponse, DefaultDataResponse};
use crate::serializer::report_progress;
use crate::types::{CallbackQueue, Progress};

#[derive(Debug, Clone, Default)]
pub struct UploadRequestMock {
    inner: DataRequestMock,
}

impl UploadRequestMock {
    pub fn new(base: RequestMock) -> Self {
        Self {
            inner: DataRequestMock::new(base),
        }
    }

    pub fn with_data(mut self, data: Option<Bytes>) -> Self {
        self.inner = self.inner.with_data(data);
        self
    }

    pub fn with_progress(mut self, progress: Option<Progress>) -> Self {
        self.inner = self.inner.with_progress(progress);
        self
    }

    pub fn with_property_list_response(mut self, response: Option<DataResponse<Value>>) -> Self {
        self.inner = self.inner.with_property_list_response(response);
        self
    }

    /// The data request this upload answers through.
    pub fn as_data_request(&self) -> &DataRequestMock {
        &self.inner
    }
}

delegate_request!(UploadRequestMock, inner);

impl DataRequest for UploadRequestMock {
    fn response<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DefaultDataResponse),
    {
        self.inner.response(queue, handler);
        self
    }

    fn response_data<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Bytes>),
    {
        self.inner.response_data(queue, handler);
        self
    }

    fn response_string<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<String>),
    {
        self.inner.response_string(queue, handler);
        self
    }

    fn response_json<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Value>),
    {
        self.inner.response_json(queue, handler);
        self
    }

    fn response_property_list<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Value>),
    {
        self.inner.response_property_list(queue, handler);
        self
    }

    fn download_progress<F>(&self, queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnMut(Progress),
    {
        self.inner.download_progress(queue, handler);
        self
    }
}

impl UploadRequest for UploadRequestMock {
    fn upload_progress<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnMut(Progress),
    {
        report_progress(
            "upload_progress",
            self.inner.description(),
            self.inner.current_progress(),
            handler,
        );
        self
    }
}
