//! Error types for the session mock.
//!
//! # Design
//! Two kinds of failure are kept apart:
//!
//! - A *simulated* failure is an error the test author configured on the
//!   store. It reaches the handler as the `Err` branch of a response result,
//!   exactly like a failed network call would, and is wrapped in
//!   `ResponseError::Simulated` without losing its concrete type.
//! - A *misconfiguration* is canned data the test never supplied (bytes,
//!   a structured response, a progress value, a form-data recorder). It is a
//!   mistake in the test, not a runtime condition, so it goes through
//!   [`misconfigured`] and panics instead of producing a `Result`.
//!
//! Errors are held in `Arc` because the same configured error is handed to
//! every response built from the store.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// A configured error, shared by every response built from one store.
pub type SimulatedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Failure branch of every decoded response.
#[derive(Debug, Clone, Error)]
pub enum ResponseError {
    /// The error configured on the response store.
    #[error(transparent)]
    Simulated(SimulatedError),

    /// The stored bytes were not valid JSON.
    #[error("JSON could not be serialized: {0}")]
    JsonSerialization(Arc<serde_json::Error>),
}

impl ResponseError {
    /// The configured error, if it is of type `E`.
    pub fn simulated<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            ResponseError::Simulated(err) => err.downcast_ref::<E>(),
            ResponseError::JsonSerialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::JsonSerialization(Arc::new(err))
    }
}

/// A plain message error, used when fixtures configure a failure by text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CannedError {
    pub message: String,
}

impl CannedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while loading a response fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),

    /// `body` and `json` both set; only one byte source is allowed.
    #[error("fixture sets both `body` and `json`")]
    ConflictingBody,
}

/// Halt the test: `operation` needed canned data that was never supplied.
#[track_caller]
pub(crate) fn misconfigured(operation: &str, missing: &str) -> ! {
    misused(operation, &format!("mocked {missing} not provided"))
}

/// Halt the test: the mock was used in a way it cannot answer.
#[track_caller]
pub(crate) fn misused(operation: &str, problem: &str) -> ! {
    log::error!("{operation}: mock misused, {problem}");
    panic!("{operation} failed; {problem}")
}
