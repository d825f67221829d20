//! Multipart uploads: the injected recorder and encoding result.

use std::path::Path;

use session_mock::{
    BodyPartSource, CannedError, DataRequest, DefaultResponseStore, HttpMethod, HttpRequest, MultipartFormData,
    MultipartFormDataResult, Request, ResponseError, Session, SessionManagerMock, UploadRequestMock,
    MULTIPART_ENCODING_MEMORY_THRESHOLD,
};

fn upload_result() -> MultipartFormDataResult<UploadRequestMock> {
    let store = DefaultResponseStore::new().with_data(r#"{"uploaded":true}"#);
    let request = SessionManagerMock::new(store).upload_data(
        bytes::Bytes::new(),
        "https://localhost/upload",
        HttpMethod::Post,
        None,
    );
    MultipartFormDataResult::Success {
        request,
        streaming_from_disk: false,
        streamed_file_url: None,
    }
}

#[test]
fn form_callback_receives_injected_recorder() {
    let sut = SessionManagerMock::default().with_multipart_form_data(MultipartFormData::with_boundary("xyz"));

    let mut boundary = None;
    sut.upload_multipart(
        |form| {
            boundary = Some(form.boundary().to_string());
            form.append_data("ada", "user");
            form.append_file(Path::new("/tmp/avatar.png"), "avatar");
        },
        MULTIPART_ENCODING_MEMORY_THRESHOLD,
        "https://localhost/upload",
        HttpMethod::Post,
        None,
        None,
        None,
    );

    assert_eq!(boundary.as_deref(), Some("xyz"));
    let form = sut.multipart_form_data().unwrap();
    assert_eq!(form.parts().len(), 2);
    assert_eq!(form.parts()[0].name, "user");
    assert_eq!(
        form.parts()[1].source,
        BodyPartSource::File(Path::new("/tmp/avatar.png").to_path_buf())
    );
}

#[test]
fn completion_receives_injected_result() {
    let sut = SessionManagerMock::default()
        .with_multipart_form_data(MultipartFormData::new())
        .with_multipart_result(upload_result());

    let mut uploaded = None;
    sut.upload_multipart_with(
        |form| form.append_data("1", "id"),
        MULTIPART_ENCODING_MEMORY_THRESHOLD,
        &HttpRequest::new(HttpMethod::Put, "https://localhost/upload"),
        None,
        Some(Box::new(|result: MultipartFormDataResult<UploadRequestMock>| {
            if let MultipartFormDataResult::Success { request, streaming_from_disk, .. } = result {
                assert!(!streaming_from_disk);
                request.response_json(None, |resp| uploaded = resp.value().cloned());
            }
        })),
    );

    assert_eq!(uploaded, Some(serde_json::json!({ "uploaded": true })));
}

#[test]
fn failure_result_is_passed_through() {
    let failure = MultipartFormDataResult::Failure(ResponseError::Simulated(std::sync::Arc::new(CannedError::new(
        "body too large",
    ))));
    let sut = SessionManagerMock::default()
        .with_multipart_form_data(MultipartFormData::new())
        .with_multipart_result(failure);

    let mut message = None;
    sut.upload_multipart(
        |_| {},
        0,
        "https://localhost/upload",
        HttpMethod::Post,
        None,
        None,
        Some(Box::new(|result: MultipartFormDataResult<UploadRequestMock>| {
            assert!(!result.is_success());
            if let MultipartFormDataResult::Failure(err) = result {
                message = Some(err.to_string());
            }
        })),
    );
    assert_eq!(message.as_deref(), Some("body too large"));
}

#[test]
fn result_request_is_a_usable_upload() {
    if let MultipartFormDataResult::Success { request, .. } = upload_result() {
        assert_eq!(request.retry_count(), 1);
        assert_eq!(request.description(), "called from upload_data(data, url, method, headers)");
    } else {
        panic!("expected success");
    }
}

#[test]
#[should_panic(expected = "upload_multipart failed; mocked multipart form data not provided")]
fn missing_recorder_panics() {
    SessionManagerMock::default().upload_multipart(
        |_| {},
        MULTIPART_ENCODING_MEMORY_THRESHOLD,
        "https://localhost/upload",
        HttpMethod::Post,
        None,
        None,
        None,
    );
}

#[test]
#[should_panic(expected = "upload_multipart_with failed; mocked multipart form data result not provided")]
fn completion_without_result_panics() {
    let sut = SessionManagerMock::default().with_multipart_form_data(MultipartFormData::new());
    sut.upload_multipart_with(
        |_| {},
        MULTIPART_ENCODING_MEMORY_THRESHOLD,
        &HttpRequest::get("https://localhost/upload"),
        None,
        Some(Box::new(|_: MultipartFormDataResult<UploadRequestMock>| {})),
    );
}

#[test]
fn no_completion_needs_no_result() {
    let sut = SessionManagerMock::default().with_multipart_form_data(MultipartFormData::new());
    sut.upload_multipart_with(
        |form| form.append_stream(10, "log", "log.txt", "text/plain"),
        MULTIPART_ENCODING_MEMORY_THRESHOLD,
        &HttpRequest::get("https://localhost/upload"),
        None,
        None,
    );
    assert_eq!(sut.multipart_form_data().unwrap().parts().len(), 1);
}
