//! Serialized request bodies.
//!
//! # Design
//! An `Entity` is immutable once built: the body bytes plus the metadata the
//! transport needs to send them. The content type is derived from the kind so
//! the multipart boundary in the header can never drift from the one used in
//! the body.

/// URL-encoded form content type, always UTF-8.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Which encoding produced an `Entity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    UrlEncoded,
    Multipart { boundary: String },
}

/// A wire-ready request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    kind: EntityKind,
    body: Vec<u8>,
}

impl Entity {
    pub(crate) fn new(kind: EntityKind, body: Vec<u8>) -> Self {
        Self { kind, body }
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.kind, EntityKind::Multipart { .. })
    }

    /// Boundary of a multipart entity, `None` for URL-encoded ones.
    pub fn boundary(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::UrlEncoded => None,
            EntityKind::Multipart { boundary } => Some(boundary),
        }
    }

    /// Value for the `content-type` header.
    pub fn content_type(&self) -> String {
        match &self.kind {
            EntityKind::UrlEncoded => FORM_URLENCODED.to_string(),
            EntityKind::Multipart { boundary } => {
                format!("multipart/form-data; boundary={boundary}")
            }
        }
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_content_type() {
        let entity = Entity::new(EntityKind::UrlEncoded, b"a=1".to_vec());
        assert_eq!(entity.content_type(), FORM_URLENCODED);
        assert!(!entity.is_multipart());
        assert_eq!(entity.boundary(), None);
        assert_eq!(entity.content_length(), 3);
    }

    #[test]
    fn multipart_content_type_carries_boundary() {
        let entity = Entity::new(
            EntityKind::Multipart {
                boundary: "xyz".to_string(),
            },
            Vec::new(),
        );
        assert_eq!(entity.content_type(), "multipart/form-data; boundary=xyz");
        assert_eq!(entity.boundary(), Some("xyz"));
        assert!(entity.is_multipart());
    }
}
