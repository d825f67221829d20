//! JSON fixtures describing a canned response.
//!
//! # Design
//! A fixture is the file form of a `DefaultResponseStore`, so tests and demo
//! apps can keep canned payloads next to their code:
//!
//! ```json
//! {
//!   "json": { "name": "Engineering", "department": 1 },
//!   "response": { "url": "https://localhost/groups/1", "status": 200 },
//!   "progress": { "completed": 1, "total": 1 }
//! }
//! ```
//!
//! The body comes from either `body` (stored as UTF-8 text) or `json`
//! (re-serialized to bytes), never both. `error` configures a simulated
//! failure by message. `property_list` becomes a successful pre-built
//! structured response for both data and download handles.

use std::path::Path;

use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CannedError, FixtureError};
use crate::http::{HttpRequest, HttpResponse};
use crate::response::{DataResponse, DownloadResponse};
use crate::store::DefaultResponseStore;
use crate::types::Progress;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseFixture {
    pub body: Option<String>,
    pub json: Option<Value>,
    pub error: Option<String>,
    pub request: Option<HttpRequest>,
    pub response: Option<HttpResponse>,
    pub progress: Option<Progress>,
    pub property_list: Option<Value>,
}

impl ResponseFixture {
    pub fn into_store(self) -> Result<DefaultResponseStore, FixtureError> {
        let data = match (self.body, self.json) {
            (Some(_), Some(_)) => return Err(FixtureError::ConflictingBody),
            (Some(body), None) => Some(Bytes::from(body)),
            (None, Some(json)) => Some(Bytes::from(serde_json::to_vec(&json)?)),
            (None, None) => None,
        };

        let mut store = DefaultResponseStore::new();
        if let Some(data) = data {
            store = store.with_data(data);
        }
        if let Some(message) = self.error {
            store = store.with_error(CannedError::new(message));
        }
        if let Some(progress) = self.progress {
            store = store.with_progress(progress);
        }
        if let Some(value) = self.property_list {
            store = store
                .with_property_list_response(DataResponse {
                    request: self.request.clone(),
                    response: self.response.clone(),
                    data: None,
                    result: Ok(value.clone()),
                })
                .with_download_property_list_response(DownloadResponse {
                    request: self.request.clone(),
                    response: self.response.clone(),
                    temporary_url: None,
                    destination_url: None,
                    resume_data: None,
                    result: Ok(value),
                });
        }
        if let Some(request) = self.request {
            store = store.with_request(request);
        }
        if let Some(response) = self.response {
            store = store.with_response(response);
        }
        Ok(store)
    }
}

impl DefaultResponseStore {
    pub fn from_fixture_str(raw: &str) -> Result<Self, FixtureError> {
        let fixture: ResponseFixture = serde_json::from_str(raw)?;
        fixture.into_store()
    }

    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        log::debug!("loading response fixture from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_fixture_str(&raw)
    }
}
