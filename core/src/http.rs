//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! `HttpRequest` describes a request as plain data. The core fills it in and
//! never touches the network; the caller (host) executes the actual I/O.
//! Form bodies are built through `MultipartBody`, which borrows the request
//! so that credentials and the finished entity land on the right owner.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross FFI
//! boundaries without lifetime concerns.

use std::fmt;
use std::path::PathBuf;

use base64ct::{Base64, Encoding};

use crate::body::MultipartBody;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// The caller is responsible for executing this request against the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace every header called `name` with a single `name: value`.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_ascii_lowercase(), value.into()));
    }

    /// Set `authorization: Basic ...`, replacing earlier credentials.
    pub fn basic_auth(&mut self, username: &str, password: &str) {
        let token = Base64::encode_string(format!("{username}:{password}").as_bytes());
        self.set_header("authorization", format!("Basic {token}"));
    }

    /// Start a form body bound to this request.
    pub fn multipart(&mut self) -> MultipartBody<'_> {
        MultipartBody::new(self)
    }

    /// Start a form body with a text field.
    pub fn field(&mut self, name: &str, value: impl fmt::Display) -> MultipartBody<'_> {
        self.multipart().field(name, value)
    }

    /// Start a form body with a file field.
    pub fn file(&mut self, name: &str, path: impl Into<PathBuf>) -> MultipartBody<'_> {
        self.multipart().file(name, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_is_empty() {
        let req = HttpRequest::new(HttpMethod::Post, "http://localhost:3000/submit");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/submit");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn basic_auth_encodes_credentials() {
        let mut req = HttpRequest::new(HttpMethod::Post, "http://x");
        req.basic_auth("Aladdin", "open sesame");
        assert_eq!(
            req.header("Authorization"),
            Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")
        );
    }

    #[test]
    fn basic_auth_replaces_previous_credentials() {
        let mut req = HttpRequest::new(HttpMethod::Post, "http://x");
        req.headers
            .push(("Authorization".to_string(), "Bearer t".to_string()));
        req.basic_auth("u", "p");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("authorization"), Some("Basic dTpw"));
    }

    #[test]
    fn set_header_is_case_insensitive() {
        let mut req = HttpRequest::new(HttpMethod::Put, "http://x");
        req.set_header("Content-Type", "text/plain");
        req.set_header("content-type", "application/json");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
