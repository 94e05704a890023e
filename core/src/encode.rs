//! Wire encodings for form bodies.
//!
//! `application/x-www-form-urlencoded` goes through `form_urlencoded`, which
//! encodes UTF-8 and writes spaces as `+`. Multipart bodies are written by
//! hand following RFC 7578.

use uuid::Uuid;

/// Content type of a text part.
pub const TEXT_PART_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Content type of a file part.
pub const FILE_PART_CONTENT_TYPE: &str = "application/octet-stream";

const MAX_BOUNDARY_LEN: usize = 70;

/// Encode ordered pairs as `name=value&...`.
pub(crate) fn urlencode(pairs: &[(String, String)]) -> Vec<u8> {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
        .into_bytes()
}

/// Fresh boundary for one build.
pub(crate) fn random_boundary() -> String {
    format!("----FormBoundary{}", Uuid::new_v4().simple())
}

/// Boundaries are restricted to characters that need no quoting in the
/// `content-type` header.
pub(crate) fn is_valid_boundary(boundary: &str) -> bool {
    !boundary.is_empty()
        && boundary.len() <= MAX_BOUNDARY_LEN
        && boundary
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'\'' | b'+' | b'_' | b'-' | b'.'))
}

/// Escape a name for a quoted `Content-Disposition` parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Accumulates parts of a multipart/form-data body.
pub(crate) struct MultipartWriter {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartWriter {
    pub(crate) fn new(boundary: String) -> Self {
        Self {
            boundary,
            buf: Vec::new(),
        }
    }

    pub(crate) fn text_part(&mut self, name: &str, value: &str) {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\nContent-Type: {TEXT_PART_CONTENT_TYPE}",
            escape_quoted(name)
        ));
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    pub(crate) fn file_part(&mut self, name: &str, file_name: &str, contents: &[u8]) {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {FILE_PART_CONTENT_TYPE}",
            escape_quoted(name),
            escape_quoted(file_name)
        ));
        self.buf.extend_from_slice(contents);
        self.buf.extend_from_slice(b"\r\n");
    }

    pub(crate) fn finish(mut self) -> (String, Vec<u8>) {
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"--\r\n");
        (self.boundary, self.buf)
    }

    fn open_part(&mut self, headers: &str) {
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self.buf.extend_from_slice(headers.as_bytes());
        self.buf.extend_from_slice(b"\r\n\r\n");
    }
}
