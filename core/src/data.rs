//! In-memory data request mock.

use bytes::Bytes;
use serde_json::Value;

use crate::error::ResponseError;
use crate::protocol::{DataRequest, Request};
use crate::request::{delegate_request, RequestMock};
use crate::response::{DataResponse, DefaultDataResponse};
use crate::serializer::{
    decode, prebuilt, report_progress, DataSerializer, JsonSerializer, ResponseSerializer, StringSerializer,
};
use crate::types::{CallbackQueue, Progress};

/// Data request that answers every handler with its canned body or error.
#[derive(Debug, Clone, Default)]
pub struct DataRequestMock {
    base: RequestMock,
    data: Option<Bytes>,
    progress: Option<Progress>,
    property_list_response: Option<DataResponse<Value>>,
}

impl DataRequestMock {
    pub fn new(base: RequestMock) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Option<Bytes>) -> Self {
        self.data = data;
        self
    }

    pub fn with_progress(mut self, progress: Option<Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_property_list_response(mut self, response: Option<DataResponse<Value>>) -> Self {
        self.property_list_response = response;
        self
    }

    pub fn base(&self) -> &RequestMock {
        &self.base
    }

    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    pub fn current_progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Run a custom serializer through the same decode rules as the
    /// built-in handlers.
    pub fn response_with<S, F>(&self, _queue: Option<CallbackQueue>, serializer: &S, handler: F) -> &Self
    where
        S: ResponseSerializer,
        F: FnOnce(DataResponse<S::Output>),
    {
        self.dispatch("response_with", serializer, handler);
        self
    }

    fn dispatch<S, F>(&self, operation: &str, serializer: &S, handler: F)
    where
        S: ResponseSerializer,
        F: FnOnce(DataResponse<S::Output>),
    {
        log::trace!("{}: dispatching {operation}", self.base.description());
        let result = decode(operation, self.data.as_ref(), self.base.error(), serializer);
        handler(self.envelope(result));
    }

    fn envelope<T>(&self, result: Result<T, ResponseError>) -> DataResponse<T> {
        DataResponse {
            request: self.base.url_request().cloned(),
            response: self.base.http_response().cloned(),
            data: self.data.clone(),
            result,
        }
    }
}

delegate_request!(DataRequestMock, base);

impl DataRequest for DataRequestMock {
    fn response<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DefaultDataResponse),
    {
        log::trace!("{}: dispatching response", self.base.description());
        handler(DefaultDataResponse {
            request: self.base.url_request().cloned(),
            response: self.base.http_response().cloned(),
            data: self.data.clone(),
            error: self.base.error().cloned(),
        });
        self
    }

    fn response_data<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Bytes>),
    {
        self.dispatch("response_data", &DataSerializer, handler);
        self
    }

    fn response_string<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<String>),
    {
        self.dispatch("response_string", &StringSerializer, handler);
        self
    }

    fn response_json<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Value>),
    {
        self.dispatch("response_json", &JsonSerializer, handler);
        self
    }

    fn response_property_list<F>(&self, _queue: Option<CallbackQueue>, handler: F) -> &Self
    where
        F: FnOnce(DataResponse<Value>),
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
    use crate::http::{HttpRequest, HttpResponse};

    fn mock(data: &'static [u8]) -> DataRequestMock {
        DataRequestMock::new(RequestMock::new()).with_data(Some(Bytes::from_static(data)))
    }

    fn failing(data: &'static [u8]) -> DataRequestMock {
        DataRequestMock::new(RequestMock::new().with_error(CannedError::new("unreachable host")))
            .with_data(Some(Bytes::from_static(data)))
    }

    #[test]
    fn response_data_returns_bytes() {
        let mut got = None;
        mock(&[1, 2, 3]).response_data(None, |resp| got = resp.value().cloned());
        assert_eq!(got.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn response_data_with_error_fails() {
        let mut got = None;
        failing(&[1, 2, 3]).response_data(None, |resp| got = Some(resp));
        let resp = got.unwrap();
        assert!(resp.value().is_none());
        assert_eq!(
            resp.error().unwrap().simulated::<CannedError>(),
            Some(&CannedError::new("unreachable host"))
        );
        assert_eq!(resp.data.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn every_typed_handler_fails_with_configured_error() {
        let req = failing(br#"{"ok":true}"#);
        let mut failures = 0;
        req.response_data(None, |resp| failures += usize::from(resp.error().is_some()))
            .response_string(None, |resp| failures += usize::from(resp.error().is_some()))
            .response_json(None, |resp| failures += usize::from(resp.error().is_some()));
        assert_eq!(failures, 3);
    }

    #[test]
    fn response_string_decodes_utf8() {
        let mut got = None;
        mock("Café".as_bytes()).response_string(None, |resp| got = resp.value().cloned());
        assert_eq!(got.as_deref(), Some("Café"));
    }

    #[test]
    fn response_json_reads_fields() {
        let mut got = None;
        mock(br#"{ "group" : "Research and Development", "name" : "Engineering", "department" : 1 }"#)
            .response_json(None, |resp| got = resp.value().cloned());
        let json = got.unwrap();
        assert_eq!(json["group"], "Research and Development");
        assert_eq!(json["name"], "Engineering");
        assert_eq!(json["department"], 1);
    }

    #[test]
    fn response_json_with_bad_bytes_is_failure_not_panic() {
        let mut got = None;
        mock(b"<html>").response_json(None, |resp| got = Some(resp));
        assert!(matches!(got.unwrap().result, Err(ResponseError::JsonSerialization(_))));
    }

    #[test]
    fn default_response_carries_everything_without_decoding() {
        let req = DataRequestMock::new(
            RequestMock::new()
                .with_request(Some(HttpRequest::get("https://localhost")))
                .with_response(Some(HttpResponse::new("https://localhost", 500)))
                .with_error(CannedError::new("server")),
        );
        let mut got = None;
        req.response(None, |resp| got = Some(resp));
        let resp = got.unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.response.unwrap().status, 500);
        assert_eq!(resp.request.unwrap().url, "https://localhost");
        assert_eq!(resp.error.unwrap().to_string(), "server");
    }

    #[test]
    #[should_panic(expected = "response_data failed; mocked data not provided")]
    fn response_data_without_bytes_is_fatal() {
        DataRequestMock::default().response_data(None, |_| {});
    }

    #[test]
    #[should_panic(expected = "response_json failed; mocked data not provided")]
    fn response_json_without_bytes_is_fatal() {
        DataRequestMock::default().response_json(None, |_| {});
    }

    #[test]
    fn property_list_returns_prebuilt_response() {
        let prebuilt = DataResponse {
            request: None,
            response: Some(HttpResponse::new("https://localhost", 200)),
            data: None,
            result: Ok(serde_json::json!({ "CFBundleName": "Demo" })),
        };
        let req = mock(b"ignored").with_property_list_response(Some(prebuilt));
        let mut got = None;
        req.response_property_list(None, |resp| got = Some(resp));
        let resp = got.unwrap();
        assert_eq!(resp.value().unwrap()["CFBundleName"], "Demo");
        assert_eq!(resp.response.unwrap().status, 200);
    }

    #[test]
    fn property_list_with_error_fails() {
        let prebuilt = DataResponse {
            request: None,
            response: None,
            data: None,
            result: Ok(Value::Bool(true)),
        };
        let req = failing(b"").with_property_list_response(Some(prebuilt));
        let mut got = None;
        req.response_property_list(None, |resp| got = Some(resp));
        assert!(got.unwrap().error().unwrap().simulated::<CannedError>().is_some());
    }

    #[test]
    #[should_panic(expected = "response_property_list failed; mocked property list response not provided")]
    fn property_list_without_prebuilt_is_fatal() {
        mock(b"{}").response_property_list(None, |_| {});
    }

    #[test]
    fn download_progress_reports_once() {
        let req = mock(b"").with_progress(Some(Progress::new(7, 10)));
        let mut seen = Vec::new();
        req.download_progress(Some(CallbackQueue::Main), |p| seen.push(p));
        assert_eq!(seen, vec![Progress::new(7, 10)]);
    }

    #[test]
    #[should_panic(expected = "download_progress failed; mocked progress not provided")]
    fn download_progress_without_value_is_fatal() {
        mock(b"").download_progress(None, |_| {});
    }

    #[test]
    fn handlers_are_idempotent() {
        let req = mock(br#"[1,2,3]"#);
        let mut results = Vec::new();
        req.response_json(None, |resp| results.push(resp.value().cloned()))
            .response_json(None, |resp| results.push(resp.value().cloned()));
        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], Some(serde_json::json!([1, 2, 3])));
    }

    #[test]
    fn custom_serializer_uses_shared_rules() {
        struct Length;
        impl ResponseSerializer for Length {
            type Output = usize;
            fn serialize(&self, data: &Bytes) -> Result<usize, ResponseError> {
                Ok(data.len())
            }
        }

        let mut got = None;
        mock(b"12345").response_with(None, &Length, |resp| got = resp.value().copied());
        assert_eq!(got, Some(5));

        let mut failed = false;
        failing(b"12345").response_with(None, &Length, |resp| failed = resp.error().is_some());
        assert!(failed);
    }
}
