//! Request context annotation.
//!
//! These stages attach values to the request's extension map so that later
//! stages and handlers can extract them with `Extension<T>`:
//! - [`DisplayName`], defaulted when nothing upstream set one
//! - [`RequestBody`], the parsed JSON object (or its absence)

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::error::{AppError, Failure};

/// Name used when greeting the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(pub String);

/// Attach the display name, keeping one that an earlier stage already set.
pub async fn assign_display_name(
    State(default): State<DisplayName>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<DisplayName>().is_none() {
        req.extensions_mut().insert(default);
    }

    next.run(req).await
}

/// Largest request body, in bytes, the JSON parser will buffer.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimit(pub usize);

/// Parsed JSON request body.
///
/// `None` when the request carried no JSON body at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody(pub Option<Map<String, Value>>);

impl RequestBody {
    /// True when a body is present and has at least one field.
    pub fn has_fields(&self) -> bool {
        self.0.as_ref().is_some_and(|fields| !fields.is_empty())
    }

    /// The body's fields; an absent body yields an empty map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0.unwrap_or_default()
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parse a JSON request body into [`RequestBody`].
///
/// Only requests declaring a JSON content type are read. An empty body is
/// treated as absent. Malformed JSON, a JSON value that is not an object, or a
/// body over the limit is signaled as a [`Failure`].
pub async fn parse_json_body(
    State(BodyLimit(limit)): State<BodyLimit>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    if !is_json(&parts.headers) {
        parts.extensions.insert(RequestBody::default());
        return Ok(next.run(Request::from_parts(parts, body)).await);
    }

    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| Failure::new("Request body is too large or could not be read"))?;

    let fields = if bytes.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(fields)) => Some(fields),
            Ok(_) => return Err(Failure::new("Request body must be a JSON object").into()),
            Err(err) => return Err(Failure::new(format!("Malformed JSON body: {err}")).into()),
        }
    };

    parts.extensions.insert(RequestBody(fields));

    // Hand the bytes on untouched for anything that still wants the raw body.
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
