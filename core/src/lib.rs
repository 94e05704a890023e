//! Form request bodies for a host-does-IO HTTP client.
//!
//! # Overview
//! Accumulates named form fields on top of a plain-data `HttpRequest` and
//! serializes them into an `Entity`. Bodies without files are sent as
//! `application/x-www-form-urlencoded`; as soon as a file field is present the
//! body becomes `multipart/form-data`. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of network I/O.
//!
//! # Design
//! - `MultipartBody` borrows the request it belongs to and forwards basic-auth
//!   credentials to it.
//! - Field values are a tagged union (`FieldValue`); the encoding is derived
//!   from the stored values at build time.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod body;
pub mod encode;
pub mod entity;
pub mod error;
pub mod http;
pub mod params;
pub mod value;

pub use body::MultipartBody;
pub use entity::{Entity, EntityKind};
pub use error::BodyError;
pub use http::{HttpMethod, HttpRequest};
pub use params::ParameterSet;
pub use value::{FieldValue, FileRef};
