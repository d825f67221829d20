//! Turning canned bytes into typed results.
//!
//! Every typed handler of the data, download and upload mocks goes through
//! [`decode`]: a configured error wins over any bytes, missing bytes halt the
//! test, and otherwise the serializer decides the output shape. Progress and
//! pre-built structured responses go through [`report_progress`] and
//! [`prebuilt`] under the same rules.

use bytes::Bytes;
use serde_json::Value;

use crate::error::{misconfigured, ResponseError, SimulatedError};
use crate::response::ResultEnvelope;
use crate::types::Progress;

/// Converts the stored body into a typed value.
pub trait ResponseSerializer {
    type Output;

    fn serialize(&self, data: &Bytes) -> Result<Self::Output, ResponseError>;
}

/// Passes the bytes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSerializer;

impl ResponseSerializer for DataSerializer {
    type Output = Bytes;

    fn serialize(&self, data: &Bytes) -> Result<Bytes, ResponseError> {
        Ok(data.clone())
    }
}

/// Decodes the bytes as UTF-8, replacing invalid sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSerializer;

impl ResponseSerializer for StringSerializer {
    type Output = String;

    fn serialize(&self, data: &Bytes) -> Result<String, ResponseError> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Parses the bytes as JSON. Top-level scalars are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl ResponseSerializer for JsonSerializer {
    type Output = Value;

    fn serialize(&self, data: &Bytes) -> Result<Value, ResponseError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Shared decode step for all typed handlers.
///
/// Panics through `misconfigured` when neither an error nor bytes were set:
/// the test asked for a body it never supplied.
#[track_caller]
pub(crate) fn decode<S>(
    operation: &str,
    data: Option<&Bytes>,
    error: Option<&SimulatedError>,
    serializer: &S,
) -> Result<S::Output, ResponseError>
where
    S: ResponseSerializer + ?Sized,
{
    if let Some(error) = error {
        return Err(ResponseError::Simulated(error.clone()));
    }
    match data {
        Some(data) => serializer.serialize(data),
        None => misconfigured(operation, "data"),
    }
}

/// Shared progress step: hands the configured value to the handler once.
#[track_caller]
pub(crate) fn report_progress<F>(operation: &str, description: &str, progress: Option<Progress>, mut handler: F)
where
    F: FnMut(Progress),
{
    let Some(progress) = progress else {
        misconfigured(operation, "progress");
    };
    log::trace!("{description}: {operation} reporting {progress:?}");
    handler(progress);
}

/// Shared step for handlers answered by a pre-built envelope.
///
/// The envelope is required; a configured error replaces its result.
#[track_caller]
pub(crate) fn prebuilt<R>(operation: &str, description: &str, envelope: Option<&R>, error: Option<&SimulatedError>) -> R
where
    R: ResultEnvelope + Clone,
{
    let Some(envelope) = envelope else {
        misconfigured(operation, "property list response");
    };
    log::trace!("{description}: dispatching {operation}");
    let mut response = envelope.clone();
    if let Some(error) = error {
        response.fail_with(ResponseError::Simulated(error.clone()));
    }
    response
}
