//! Verify entity construction against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector lists the fields to add (a `null` text or file means the field
//! is offered as `None`), an optional fixed boundary, and the exact content
//! type and body expected from `build_entity`. File contents are written to a
//! temporary directory under the vector's `file_name`.

use std::fs;

use form_body_core::{HttpMethod, HttpRequest, MultipartBody};
use serde::Deserialize;

#[derive(Deserialize)]
struct Vectors {
    cases: Vec<Case>,
}

#[derive(Deserialize)]
struct Case {
    name: String,
    boundary: Option<String>,
    fields: Vec<Field>,
    expected_content_type: String,
    expected_body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Text,
    File,
}

#[derive(Deserialize)]
struct Field {
    name: String,
    kind: Kind,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    file: Option<VectorFile>,
}

#[derive(Deserialize)]
struct VectorFile {
    file_name: String,
    contents: String,
}

/// Add every field of `case`, writing file contents into `dir` first.
fn populate<'r>(
    mut body: MultipartBody<'r>,
    case: &Case,
    dir: &tempfile::TempDir,
) -> MultipartBody<'r> {
    for field in &case.fields {
        body = match field.kind {
            Kind::Text => body.field_opt(&field.name, field.text.as_deref()),
            Kind::File => {
                let path = field.file.as_ref().map(|file| {
                    let path = dir.path().join(&file.file_name);
                    fs::write(&path, &file.contents).unwrap();
                    path
                });
                body.file_opt(&field.name, path)
            }
        };
    }
    if let Some(boundary) = &case.boundary {
        body = body.boundary(boundary.as_str());
    }
    body
}

fn run_vectors(raw: &str) {
    let vectors: Vectors = serde_json::from_str(raw).unwrap();
    for case in &vectors.cases {
        let dir = tempfile::tempdir().unwrap();
        let mut req = HttpRequest::new(HttpMethod::Post, "http://localhost:3000/submit");
        let body = populate(req.multipart(), case, &dir);

        let entity = body.build_entity().unwrap();
        assert_eq!(
            entity.content_type(),
            case.expected_content_type,
            "{}: content type",
            case.name
        );
        assert_eq!(
            String::from_utf8(entity.into_body()).unwrap(),
            case.expected_body,
            "{}: body",
            case.name
        );
    }
}

// ---------------------------------------------------------------------------
// URL-encoded
// ---------------------------------------------------------------------------

#[test]
fn urlencoded_test_vectors() {
    run_vectors(include_str!("../../test-vectors/urlencoded.json"));
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

#[test]
fn multipart_test_vectors() {
    run_vectors(include_str!("../../test-vectors/multipart.json"));
}
