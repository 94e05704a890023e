//! Form body builder: URL-encoded or multipart, chosen from the fields.
//!
//! # Design
//! `MultipartBody` borrows its owning `HttpRequest` mutably for as long as the
//! body is being assembled. Credentials are forwarded to the request and
//! `attach` writes the finished entity back into it; nothing else on the
//! request is touched.
//!
//! The encoding is decided once per `build_entity` call from the current
//! parameters: any file field means multipart/form-data, otherwise the pairs
//! are URL-encoded. Entities are never cached, so every build reflects the
//! fields as they are at that moment.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, trace};

use crate::encode::{self, MultipartWriter};
use crate::entity::{Entity, EntityKind};
use crate::error::BodyError;
use crate::http::HttpRequest;
use crate::params::ParameterSet;
use crate::value::{FieldValue, FileRef};

/// Accumulates form fields for an `HttpRequest` and serializes them.
///
/// ```no_run
/// use form_body_core::{HttpMethod, HttpRequest};
///
/// let mut req = HttpRequest::new(HttpMethod::Post, "http://localhost:3000/submit");
/// req.field("title", "Quarterly report")
///     .file("attachment", "report.pdf")
///     .basic_auth("alice", "secret")
///     .attach()?;
/// assert!(req.body.is_some());
/// # Ok::<(), form_body_core::BodyError>(())
/// ```
#[derive(Debug)]
pub struct MultipartBody<'r> {
    request: &'r mut HttpRequest,
    params: ParameterSet,
    boundary: Option<String>,
}

impl<'r> MultipartBody<'r> {
    pub fn new(request: &'r mut HttpRequest) -> Self {
        Self {
            request,
            params: ParameterSet::new(),
            boundary: None,
        }
    }

    /// Store `value` under `name` by its string form.
    pub fn field(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.params.insert(name, FieldValue::Text(value.to_string()));
        self
    }

    /// Like `field`, but `None` is ignored.
    pub fn field_opt<V: fmt::Display>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => {
                trace!("skipping empty field {name:?}");
                self
            }
        }
    }

    /// Store a file reference under `name`. The file is read at build time.
    pub fn file(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.params.insert(name, FileRef::new(path));
        self
    }

    /// Like `file`, but `None` is ignored.
    pub fn file_opt<P: Into<PathBuf>>(self, name: &str, path: Option<P>) -> Self {
        match path {
            Some(path) => self.file(name, path),
            None => {
                trace!("skipping empty file field {name:?}");
                self
            }
        }
    }

    /// Forward basic-auth credentials to the owning request.
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        self.request.basic_auth(username, password);
        self
    }

    /// Use a fixed multipart boundary instead of a random one per build.
    pub fn boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn is_multipart(&self) -> bool {
        self.params.is_multipart()
    }

    /// Serialize the current fields into a wire-ready entity.
    pub fn build_entity(&self) -> Result<Entity, BodyError> {
        let entity = if self.params.is_multipart() {
            self.build_multipart()?
        } else {
            let body = encode::urlencode(&self.params.to_pairs());
            Entity::new(EntityKind::UrlEncoded, body)
        };
        debug!(
            "built {} entity: {} fields, {} bytes",
            if entity.is_multipart() { "multipart" } else { "urlencoded" },
            self.params.len(),
            entity.content_length()
        );
        Ok(entity)
    }

    /// Build the entity and store it as the owning request's body.
    pub fn attach(self) -> Result<(), BodyError> {
        let entity = self.build_entity()?;
        self.request.set_header("content-type", entity.content_type());
        self.request.body = Some(entity.into_body());
        Ok(())
    }

    fn build_multipart(&self) -> Result<Entity, BodyError> {
        let boundary = match &self.boundary {
            Some(boundary) if encode::is_valid_boundary(boundary) => boundary.clone(),
            Some(boundary) => return Err(BodyError::InvalidBoundary(boundary.clone())),
            None => encode::random_boundary(),
        };

        let mut writer = MultipartWriter::new(boundary);
        for (name, value) in &self.params {
            match value {
                FieldValue::File(file) => {
                    let contents = fs::read(file.path()).map_err(|source| BodyError::FileRead {
                        name: name.clone(),
                        path: file.path().to_path_buf(),
                        source,
                    })?;
                    trace!("file part {name:?} from {file} ({} bytes)", contents.len());
                    writer.file_part(name, &file.file_name(), &contents);
                }
                FieldValue::Text(text) => {
                    trace!("text part {name:?}");
                    writer.text_part(name, text);
                }
            }
        }

        let (boundary, body) = writer.finish();
        Ok(Entity::new(EntityKind::Multipart { boundary }, body))
    }
}
