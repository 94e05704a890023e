//! Error types for entity construction.
//!
//! # Design
//! Building an entity is all-or-nothing. A file that cannot be read aborts
//! the whole build and the I/O error is kept as the `source()` so callers
//! can inspect the underlying `ErrorKind`. Missing (`None`) field values are
//! not errors at all; they never reach this type.

use std::io;
use std::path::PathBuf;

/// Errors returned by `MultipartBody::build_entity` and `attach`.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// A file field could not be read while building a multipart entity.
    #[error("failed to read file field {name:?} from {}: {source}", .path.display())]
    FileRead {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configured multipart boundary is not valid per RFC 2046.
    #[error("invalid multipart boundary {0:?}")]
    InvalidBoundary(String),
}
