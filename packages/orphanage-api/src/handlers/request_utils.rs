//! Request utilities for HTTP endpoints.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_TYPE};
use hyper::{Request, Response};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::router::RouterError;
use orphanage_store::{StoreError, Table};

/// Boxed error accepted from request bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Decodes a percent-encoded path parameter.
pub fn decode_path_param(raw: &str) -> Result<String, RouterError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RouterError::BadRequest(format!("Failed to decode param '{}'", raw)))
}

/// Returns true if the request declares a JSON body.
pub fn is_json_content(headers: &HeaderMap) -> bool {
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

/// Reads the request body, rejecting bodies over `max_bytes`.
pub async fn read_request_body<B>(req: Request<B>, max_bytes: usize) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let collected = Limited::new(req.into_body(), max_bytes)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                RouterError::PayloadTooLarge("request entity too large".to_string())
            } else {
                RouterError::BadRequest(format!("Failed to read request body: {}", e))
            }
        })?;
    Ok(collected.to_bytes())
}

/// Reads the body fields of a write request.
///
/// Non-JSON and empty bodies yield no fields, as does a JSON value that is
/// not an object.
pub async fn read_body_fields<B>(
    req: Request<B>,
    max_bytes: usize,
) -> Result<Map<String, Value>, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    if !is_json_content(req.headers()) {
        return Ok(Map::new());
    }
    let body = read_request_body(req, max_bytes).await?;
    parse_body_fields(&body)
}

/// Parses a JSON body into its top-level fields.
pub fn parse_body_fields(body: &[u8]) -> Result<Map<String, Value>, RouterError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Map::new()),
    }
}

/// Picks the table's columns out of the body fields, in declared order.
/// Absent fields become null and are left for the store to reject.
pub fn column_values(table: Table, fields: &Map<String, Value>) -> Vec<Value> {
    table
        .columns()
        .iter()
        .map(|column| fields.get(column.name).cloned().unwrap_or(Value::Null))
        .collect()
}

/// Any store failure while reading maps to 500.
pub fn read_failure(e: StoreError) -> RouterError {
    RouterError::InternalError(e.to_string())
}

/// Any store failure while writing maps to 400.
pub fn write_failure(e: StoreError) -> RouterError {
    RouterError::BadRequest(e.to_string())
}

/// Serializes `body` and builds a JSON response.
pub fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(body)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, "application/json", json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(
    status: u16,
    content_type: &str,
    body: impl Into<Bytes>,
) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(body.into())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}
