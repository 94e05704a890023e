use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Form, Json, Router,
};
use base64ct::{Base64, Encoding as _};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// How the submitted body was encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEncoding {
    Urlencoded,
    Multipart,
}

/// One decoded form field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedField {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub value: String,
}

/// Echo of a decoded form submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub encoding: FormEncoding,
    pub user: Option<String>,
    pub fields: Vec<ReceivedField>,
}

pub fn app() -> Router {
    Router::new().route("/submit", post(submit))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn submit(req: Request) -> Result<Json<Submission>, StatusCode> {
    let user = basic_auth_user(req.headers());
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let (encoding, fields) = if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        let fields: Vec<ReceivedField> = pairs
            .into_iter()
            .map(|(name, value)| ReceivedField {
                name,
                filename: None,
                content_type: None,
                value,
            })
            .collect();
        (FormEncoding::Urlencoded, fields)
    } else if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        (FormEncoding::Multipart, read_multipart(multipart).await?)
    } else {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    };

    log::debug!("received {} {encoding:?} fields", fields.len());
    Ok(Json(Submission {
        encoding,
        user,
        fields,
    }))
}

async fn read_multipart(mut multipart: Multipart) -> Result<Vec<ReceivedField>, StatusCode> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        fields.push(ReceivedField {
            name,
            filename,
            content_type,
            value: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    Ok(fields)
}

/// Username from an `authorization: Basic ...` header.
fn basic_auth_user(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Basic ")?;
    let decoded = Base64::decode_vec(token.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (user, _password) = credentials.split_once(':')?;
    Some(user.to_string())
}
