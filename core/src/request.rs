//! Base request mock: metadata plus no-op lifecycle.

use std::error::Error as StdError;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::SimulatedError;
use crate::http::{HttpRequest, HttpResponse};
use crate::protocol::Request;
use crate::types::{Credential, CredentialPersistence};

/// An already-resolved request. Lifecycle calls are accepted and dropped;
/// there is no pending work to start, pause or cancel.
#[derive(Debug, Clone)]
pub struct RequestMock {
    session: Option<Uuid>,
    task: Option<Uuid>,
    request: Option<HttpRequest>,
    response: Option<HttpResponse>,
    retry_count: u32,
    description: String,
    debug_description: String,
    error: Option<SimulatedError>,
}

impl Default for RequestMock {
    fn default() -> Self {
        Self {
            session: None,
            task: None,
            request: None,
            response: None,
            retry_count: 1,
            description: String::new(),
            debug_description: String::new(),
            error: None,
        }
    }
}

impl RequestMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session: Option<Uuid>) -> Self {
        self.session = session;
        self
    }

    pub fn with_task(mut self, task: Option<Uuid>) -> Self {
        self.task = task;
        self
    }

    pub fn with_request(mut self, request: Option<HttpRequest>) -> Self {
        self.request = request;
        self
    }

    pub fn with_response(mut self, response: Option<HttpResponse>) -> Self {
        self.response = response;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_debug_description(mut self, debug_description: impl Into<String>) -> Self {
        self.debug_description = debug_description.into();
        self
    }

    pub fn with_error<E>(self, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_error(Some(Arc::new(error)))
    }

    pub fn with_shared_error(mut self, error: Option<SimulatedError>) -> Self {
        self.error = error;
        self
    }

    /// Terminal error every typed handler will fail with.
    pub fn error(&self) -> Option<&SimulatedError> {
        self.error.as_ref()
    }
}

impl Request for RequestMock {
    fn session(&self) -> Option<Uuid> {
        self.session
    }

    fn task(&self) -> Option<Uuid> {
        self.task
    }

    fn url_request(&self) -> Option<&HttpRequest> {
        self.request.as_ref()
    }

    fn http_response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    fn retry_count(&self) -> u32 {
        self.retry_count
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn debug_description(&self) -> &str {
        &self.debug_description
    }

    fn authenticate(&self, user: &str, _password: &str, persistence: CredentialPersistence) -> &Self {
        log::trace!("authenticate({user}, {persistence:?}) ignored by mock");
        self
    }

    fn authenticate_with(&self, credential: &Credential) -> &Self {
        log::trace!("authenticate_with({}) ignored by mock", credential.user);
        self
    }

    fn resume(&self) {
        log::trace!("resume ignored by mock");
    }

    fn suspend(&self) {
        log::trace!("suspend ignored by mock");
    }

    fn cancel(&self) {
        log::trace!("cancel ignored by mock");
    }
}

/// Implement `Request` for a wrapper by forwarding to an inner field that
/// already implements it. Chaining methods return the wrapper.
macro_rules! delegate_request {
    ($ty:ty, $($field:ident).+) => {
        impl $crate::protocol::Request for $ty {
            fn session(&self) -> Option<::uuid::Uuid> {
                $crate::protocol::Request::session(&self.$($field).+)
            }

            fn task(&self) -> Option<::uuid::Uuid> {
                $crate::protocol::Request::task(&self.$($field).+)
            }

            fn url_request(&self) -> Option<&$crate::http::HttpRequest> {
                $crate::protocol::Request::url_request(&self.$($field).+)
            }

            fn http_response(&self) -> Option<&$crate::http::HttpResponse> {
                $crate::protocol::Request::http_response(&self.$($field).+)
            }

            fn retry_count(&self) -> u32 {
                $crate::protocol::Request::retry_count(&self.$($field).+)
            }

            fn description(&self) -> &str {
                $crate::protocol::Request::description(&self.$($field).+)
            }

            fn debug_description(&self) -> &str {
                $crate::protocol::Request::debug_description(&self.$($field).+)
            }

            fn authenticate(
                &self,
                user: &str,
                password: &str,
                persistence: $crate::types::CredentialPersistence,
            ) -> &Self {
                $crate::protocol::Request::authenticate(&self.$($field).+, user, password, persistence);
                self
            }

            fn authenticate_with(&self, credential: &$crate::types::Credential) -> &Self {
                $crate::protocol::Request::authenticate_with(&self.$($field).+, credential);
                self
            }

            fn resume(&self) {
                $crate::protocol::Request::resume(&self.$($field).+)
            }

            fn suspend(&self) {
                $crate::protocol::Request::suspend(&self.$($field).+)
            }

            fn cancel(&self) {
                $crate::protocol::Request::cancel(&self.$($field).+)
            }
        }
    };
}

pub(crate) use delegate_request;
