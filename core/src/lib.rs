//! Test doubles for an HTTP networking session.
//!
//! # Overview
//! Code under test talks to a [`Session`] and the requests it hands out.
//! In tests, [`SessionManagerMock`] stands in for the real session: it never
//! touches the network, and every handler attached to one of its requests is
//! called immediately with a payload taken from a [`ResponseStore`].
//!
//! ```
//! use session_mock::{DataRequest, DefaultResponseStore, HttpMethod, ParameterEncoding, Session, SessionManagerMock};
//!
//! let store = DefaultResponseStore::new().with_data(r#"{"name":"Engineering","department":1}"#);
//! let session = SessionManagerMock::new(store);
//!
//! let mut name = None;
//! session
//!     .request("https://localhost/groups/1", HttpMethod::Get, None, ParameterEncoding::Url, None)
//!     .response_json(None, |resp| name = resp.value().map(|json| json["name"].clone()));
//! assert_eq!(name, Some("Engineering".into()));
//! ```
//!
//! # Design
//! - The store decides the payload; the default store ignores the URL and
//!   returns one configured body, error and metadata for every call.
//! - A configured error makes every typed handler fail with it.
//! - Asking for canned data that was never configured panics rather than
//!   yielding an empty body.
//! - Queue arguments are accepted and ignored; handlers run on the caller.

pub mod data;
pub mod download;
pub mod error;
pub mod fixture;
pub mod http;
pub mod multipart;
pub mod protocol;
pub mod request;
pub mod response;
pub mod serializer;
pub mod session;
pub mod store;
pub mod types;
pub mod upload;

pub use data::DataRequestMock;
pub use download::DownloadRequestMock;
pub use error::{CannedError, FixtureError, ResponseError, SimulatedError};
pub use fixture::ResponseFixture;
pub use http::{HttpHeaders, HttpMethod, HttpRequest, HttpResponse, ParameterEncoding, Parameters};
pub use multipart::{
    BodyPart, BodyPartSource, EncodingCompletion, MultipartFormData, MultipartFormDataResult,
    MULTIPART_ENCODING_MEMORY_THRESHOLD,
};
pub use protocol::{DataRequest, DownloadRequest, Request, Session, UploadRequest};
pub use request::RequestMock;
pub use response::{DataResponse, DefaultDataResponse, DefaultDownloadResponse, DownloadResponse};
pub use serializer::{DataSerializer, JsonSerializer, ResponseSerializer, StringSerializer};
pub use session::SessionManagerMock;
pub use store::{DefaultResponseStore, ResponseStore};
pub use types::{CallbackQueue, Credential, CredentialPersistence, NetService, Progress};
pub use upload::UploadRequestMock;
