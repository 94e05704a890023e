//! Field values stored in a form body.
//!
//! # Design
//! A form field holds either text or a reference to a file on disk. The two
//! cases are a tagged union so serialization dispatches on the tag instead of
//! inspecting an untyped value. Text is captured as a `String` when the field
//! is added; files are only read when an entity is built.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FileRef),
}

impl FieldValue {
    pub fn is_file(&self) -> bool {
        matches!(self, FieldValue::File(_))
    }

    /// String form used by the URL-encoded path. Files stringify to their path.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::File(file) => file.path().to_string_lossy(),
        }
    }
}

impl From<FileRef> for FieldValue {
    fn from(file: FileRef) -> Self {
        FieldValue::File(file)
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

/// Reference to a file whose bytes become a multipart file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name sent as the part's `filename`: the last path component, or the
    /// whole path when it has none (e.g. `..`).
    pub fn file_name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
