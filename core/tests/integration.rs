//! Form submissions against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, builds requests with the core
//! crate, and sends them over real HTTP using ureq. The server decodes the
//! bodies with axum's own `Form` and `Multipart` extractors and echoes what it
//! saw, so these tests check that the wire format is accepted by an
//! independent parser.

use std::io::Write;
use std::net::SocketAddr;

use form_body_core::{HttpMethod, HttpRequest};
use mock_server::{FormEncoding, Submission};

/// Execute an `HttpRequest` using ureq and decode the echoed submission.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data and the status can be asserted on.
fn execute(req: HttpRequest) -> (u16, Option<Submission>) {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    assert_eq!(req.method, HttpMethod::Post, "only POST is exercised here");
    let mut builder = agent.post(req.url.as_str());
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let body = req.body.unwrap_or_default();
    let mut response = builder.send(&body[..]).expect("HTTP transport error");

    let status = response.status().as_u16();
    let text = response.body_mut().read_to_string().unwrap_or_default();
    (status, serde_json::from_str(&text).ok())
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn form_submissions() {
    let addr = start_server();
    let url = format!("http://{addr}/submit");

    // Step 1: scalar fields go out URL-encoded.
    let mut req = HttpRequest::new(HttpMethod::Post, &url);
    req.field("a", "1")
        .field("b", "two words & more")
        .field("n", 42)
        .attach()
        .unwrap();
    let (status, submission) = execute(req);
    assert_eq!(status, 200);
    let submission = submission.expect("json echo");
    assert_eq!(submission.encoding, FormEncoding::Urlencoded);
    let pairs: Vec<(&str, &str)> = submission
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("a", "1"), ("b", "two words & more"), ("n", "42")]
    );

    // Step 2: a file switches the body to multipart.
    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".txt")
        .tempfile()
        .unwrap();
    file.write_all("contents with ünïcode\r\nand a CRLF".as_bytes())
        .unwrap();
    let file_name = file
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    let mut req = HttpRequest::new(HttpMethod::Post, &url);
    req.field("a", "1")
        .file("file", file.path())
        .attach()
        .unwrap();
    assert!(req
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data; boundary="));
    let (status, submission) = execute(req);
    assert_eq!(status, 200);
    let submission = submission.expect("json echo");
    assert_eq!(submission.encoding, FormEncoding::Multipart);
    assert_eq!(submission.fields.len(), 2);

    let text = &submission.fields[0];
    assert_eq!(text.name, "a");
    assert_eq!(text.value, "1");
    assert!(text.filename.is_none());

    let upload = &submission.fields[1];
    assert_eq!(upload.name, "file");
    assert_eq!(upload.filename.as_deref(), Some(file_name.as_str()));
    assert_eq!(upload.content_type.as_deref(), Some("application/octet-stream"));
    assert_eq!(upload.value, "contents with ünïcode\r\nand a CRLF");

    // Step 3: credentials are forwarded to the request.
    let mut req = HttpRequest::new(HttpMethod::Post, &url);
    req.field("a", "1")
        .basic_auth("alice", "s3cret")
        .attach()
        .unwrap();
    let (status, submission) = execute(req);
    assert_eq!(status, 200);
    assert_eq!(submission.unwrap().user.as_deref(), Some("alice"));

    // Step 4: an empty form still round-trips.
    let mut req = HttpRequest::new(HttpMethod::Post, &url);
    req.multipart().field_opt::<&str>("x", None).attach().unwrap();
    assert_eq!(req.body.as_deref(), Some(&b""[..]));
    let (status, submission) = execute(req);
    assert_eq!(status, 200);
    assert!(submission.unwrap().fields.is_empty());
}
