//! Download request mock.
//!
//! Decodes exactly like `DataRequestMock`, but the body is the handle's
//! resumable data and every envelope reports no temporary or destination
//! file, since nothing is ever written to disk.

use bytes::Bytes;
use serde_json::Value;

use crate::error::ResponseError;
use crate::protocol::{DownloadRequest, Request};
use crate::request::{delegate_request, RequestMock};
use crate::response::{DefaultDownloadResponse, DownloadResponse};
use crate::serializer::{
    decode, prebuilt, report_progress, DataSerializer, JsonSerializer, ResponseSerializer, StringSerializer,
};
use crate::types::{CallbackQueue, Progress};

#[derive(Debug, Clone, Default)]
pub struct DownloadRequestMock {
    base: RequestMock,
    resume_data: Option<Bytes>,
    progress: Option<Progress>,
    property_list_response: Option<DownloadResponse<Value>>,
}

impl DownloadRequestMock {
    pub fn new(base: RequestMock) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn with_resume_data(mut self, resume_data: Option<Bytes>) -> Self {
        self.resume_data = resume_data;
        self
    }

    pub fn with_progress(mut self, progress: Option<Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_property_list_response(mut self, response: Option<DownloadResponse<Value>>) -> Self {
        self.property_list_response = response;
        self
    }

    pub fn base(&self) -> &RequestMock {
        &self.base
    }

    pub fn current_progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Custom serializers are not supported for downloads; always panics.
    pub fn response_with<S, F>(&self, _queue: Option<CallbackQueue>, _serializer: &S, _handler: F) -> &Self
    where
        S: ResponseSerializer,
        F: FnOnce(DownloadResponse<S::Output>),
    {
        log::error!("{}: response_with is not supported by the download mock", self.base.description());
        unimplemented!("DownloadRequestMock::response_with has not been implemented")
    }

    fn dispatch<S, F>(&self, operation: &str, serializer: &S, handler: F)
    where
        S: ResponseSerializer,
        F: FnOnce(DownloadResponse<S::Output>),
    {
        log::trace!("{}: dispatching {operation}", self.base.description());
        let result = decode(operation, self.resume_data.as_ref(), self.base.error(), serializer);
        handler(self.envelope(result));
    }

    fn envelope<T>(&self, result: Result<T, ResponseError>) -> DownloadResponse<T> {
        DownloadResponse {
            request: self.base.url_request().cloned(),
            response: self.base.http_response().cloned(),
            temporary_url: None,
            destination_url: None,
            resume_data: self.resume_data.clone(),
            result,
        }
    }
}

delegate_request!(DownloadRequestMock, base);

impl DownloadRequest for DownloadRequestMock {
    fn resume_data(&self) -> Option<&Bytes> {
        self.resume_data.as_ref()
    }

    fn response<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DefaultDownloadResponse),
    {
        log::trace!("{}: dispatching response", self.base.description());
        handler(DefaultDownloadResponse {
            request: self.base.url_request().cloned(),
            response: self.base.http_response().cloned(),
            temporary_url: None,
            destination_url: None,
            resume_data: self.resume_data.clone(),
            error: self.base.error().cloned(),
        });
        self
    }

    fn response_data<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<Bytes>),
    {
        self.dispatch("response_data", &DataSerializer, handler);
        self
    }

    fn response_string<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<String>),
    {
        self.dispatch("response_string", &StringSerializer, handler);
        self
    }

    fn response_json<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<Value>),
    {
        self.dispatch("response_json", &JsonSerializer, handler);
        self
    }

    fn response_property_list<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DownloadResponse<Value>),
    {
        let response = prebuilt(
            "response_property_list",
            self.base.description(),
            self.property_list_response.as_ref(),
            self.base.error(),
        );
        handler(response);
        self
    }

    fn download_progress<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnMut(Progress),
    {
        report_progress("download_progress", self.base.description(), self.progress, handler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CannedError;

    fn mock(data: &'static [u8]) -> DownloadRequestMock {
        DownloadRequestMock::new(RequestMock::new()).with_resume_data(Some(Bytes::from_static(data)))
    }

    #[test]
    fn default_response_has_no_file_locations() {
        let mut got = None;
        mock(b"partial").response(None, |resp| got = Some(resp));
        let resp = got.unwrap();
        assert!(resp.temporary_url.is_none());
        assert!(resp.destination_url.is_none());
        assert_eq!(resp.resume_data.as_deref(), Some(&b"partial"[..]));
        assert!(resp.error.is_none());
    }

    #[test]
    fn response_data_returns_resume_data() {
        let req = mock(b"partial");
        assert_eq!(req.resume_data().map(|b| &b[..]), Some(&b"partial"[..]));

        let mut got = None;
        req.response_data(None, |resp| got = Some(resp));
        let resp = got.unwrap();
        assert_eq!(resp.value().map(|b| &b[..]), Some(&b"partial"[..]));
        assert!(resp.temporary_url.is_none());
        assert!(resp.destination_url.is_none());
    }

    #[test]
    fn response_string_and_json_decode_resume_data() {
        let req = mock(br#"{"file":"report.pdf","size":2048}"#);
        let mut text = None;
        let mut json = None;
        req.response_string(None, |resp| text = resp.value().cloned())
            .response_json(None, |resp| json = resp.value().cloned());
        assert_eq!(text.as_deref(), Some(r#"{"file":"report.pdf","size":2048}"#));
        let json = json.unwrap();
        assert_eq!(json["file"], "report.pdf");
        assert_eq!(json["size"], 2048);
    }

    #[test]
    fn configured_error_wins() {
        let req = DownloadRequestMock::new(RequestMock::new().with_error(CannedError::new("disk full")))
            .with_resume_data(Some(Bytes::from_static(b"[]")));
        let mut got = None;
        req.response_json(None, |resp| got = Some(resp));
        let resp = got.unwrap();
        assert_eq!(resp.error().unwrap().simulated::<CannedError>(), Some(&CannedError::new("disk full")));
    }

    #[test]
    #[should_panic(expected = "response_string failed; mocked data not provided")]
    fn missing_resume_data_is_fatal() {
        DownloadRequestMock::default().response_string(None, |_| {});
    }

    #[test]
    fn property_list_returns_prebuilt_download_response() {
        let prebuilt = DownloadResponse {
            request: None,
            response: None,
            temporary_url: None,
            destination_url: None,
            resume_data: None,
            result: Ok(serde_json::json!(["a", "b"])),
        };
        let req = mock(b"").with_property_list_response(Some(prebuilt));
        let mut got = None;
        req.response_property_list(None, |resp| got = resp.value().cloned());
        assert_eq!(got, Some(serde_json::json!(["a", "b"])));
    }

    #[test]
    #[should_panic(expected = "response_property_list failed; mocked property list response not provided")]
    fn property_list_without_prebuilt_is_fatal() {
        mock(b"").response_property_list(None, |_| {});
    }

    #[test]
    fn download_progress_reports_configured_value() {
        let req = mock(b"").with_progress(Some(Progress::new(512, 2048)));
        let mut seen = None;
        req.download_progress(None, |p| seen = Some(p));
        assert_eq!(seen, Some(Progress::new(512, 2048)));
    }

    #[test]
    #[should_panic(expected = "not implemented")]
    fn custom_serializer_is_not_implemented() {
        mock(b"").response_with(None, &DataSerializer, |_| {});
    }

    #[test]
    #[should_panic(expected = "download_progress failed; mocked progress not provided")]
    fn download_progress_without_value_is_fatal() {
        mock(b"partial").download_progress(None, |_| {});
    }

    #[test]
    fn configured_error_replaces_prebuilt_property_list_result() {
        let prebuilt = DownloadResponse {
            request: None,
            response: None,
            temporary_url: None,
            destination_url: None,
            resume_data: None,
            result: Ok(serde_json::json!({ "CFBundleName": "Demo" })),
        };
        let req = DownloadRequestMock::new(RequestMock::new().with_error(CannedError::new("disk full")))
            .with_property_list_response(Some(prebuilt));
        let mut got = None;
        req.response_property_list(None, |resp| got = Some(resp.result));
        let err = got.unwrap().unwrap_err();
        assert!(matches!(err, ResponseError::Simulated(_)));
        assert_eq!(err.simulated::<CannedError>(), Some(&CannedError::new("disk full")));
    }
}
