//! Multipart form data recording.
//!
//! # Design
//! `MultipartFormData` records what the caller appends and never encodes
//! anything. The session mock hands the injected recorder to the caller's
//! form-population callback, so a test can assert afterwards on the parts
//! its code produced.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::error::ResponseError;

/// Size above which a real session would stream the encoded form from disk.
pub const MULTIPART_ENCODING_MEMORY_THRESHOLD: u64 = 10_000_000;

/// Handler for the outcome of encoding a multipart form.
pub type EncodingCompletion<'a, U> = Box<dyn FnOnce(MultipartFormDataResult<U>) + 'a>;

/// Where the bytes of one body part come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPartSource {
    Data(Bytes),
    File(PathBuf),
    Stream { length: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPart {
    pub name: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub source: BodyPartSource,
}

/// In-memory recorder of appended form parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFormData {
    boundary: String,
    parts: Vec<BodyPart>,
}

impl Default for MultipartFormData {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartFormData {
    pub fn new() -> Self {
        Self::with_boundary(&format!("session-mock.boundary.{}", Uuid::new_v4().simple()))
    }

    pub fn with_boundary(boundary: &str) -> Self {
        Self {
            boundary: boundary.to_string(),
            parts: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    pub fn append_data(&mut self, data: impl Into<Bytes>, name: &str) {
        self.push(name, None, None, BodyPartSource::Data(data.into()));
    }

    pub fn append_data_with(&mut self, data: impl Into<Bytes>, name: &str, file_name: &str, mime_type: &str) {
        self.push(
            name,
            Some(file_name),
            Some(mime_type),
            BodyPartSource::Data(data.into()),
        );
    }

    pub fn append_file(&mut self, path: &Path, name: &str) {
        let file_name = path.file_name().map(|f| f.to_string_lossy().into_owned());
        self.parts.push(BodyPart {
            name: name.to_string(),
            file_name,
            mime_type: None,
            source: BodyPartSource::File(path.to_path_buf()),
        });
    }

    pub fn append_file_with(&mut self, path: &Path, name: &str, file_name: &str, mime_type: &str) {
        self.push(
            name,
            Some(file_name),
            Some(mime_type),
            BodyPartSource::File(path.to_path_buf()),
        );
    }

    pub fn append_stream(&mut self, length: u64, name: &str, file_name: &str, mime_type: &str) {
        self.push(
            name,
            Some(file_name),
            Some(mime_type),
            BodyPartSource::Stream { length },
        );
    }

    fn push(&mut self, name: &str, file_name: Option<&str>, mime_type: Option<&str>, source: BodyPartSource) {
        self.parts.push(BodyPart {
            name: name.to_string(),
            file_name: file_name.map(str::to_string),
            mime_type: mime_type.map(str::to_string),
            source,
        });
    }
}

/// Outcome of encoding a multipart form, handed to the encoding completion.
#[derive(Debug, Clone)]
pub enum MultipartFormDataResult<U> {
    Success {
        request: U,
        streaming_from_disk: bool,
        streamed_file_url: Option<PathBuf>,
    },
    Failure(ResponseError),
}

impl<U> MultipartFormDataResult<U> {
    pub fn is_success(&self) -> bool {
        matches!(self, MultipartFormDataResult::Success { .. })
    }
}
