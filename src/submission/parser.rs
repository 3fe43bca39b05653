use axum::http::HeaderMap;
use serde_json::{Map, Value};

use super::record::Submission;

/// Parse a request body based on its Content-Type header.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Submission, String> {
    let ct = content_type.unwrap_or("application/json");

    if body.is_empty() {
        return Ok(Submission::default());
    }

    if ct.contains("application/json") {
        serde_json::from_slice(body)
            .map(Submission::from_value)
            .map_err(|e| format!("Invalid JSON: {e}"))
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else if ct.contains("multipart/form-data") {
        Err("multipart".to_string())
    } else {
        // Try JSON first, then form-urlencoded
        serde_json::from_slice(body)
            .map(Submission::from_value)
            .or_else(|_| parse_form_urlencoded(body))
            .map_err(|e| format!("Unable to parse body: {e}"))
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Submission, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        insert_repeated(&mut map, &k, v.into_owned());
    }
    Ok(Submission::new(map))
}

/// Parse multipart form data using multer.
pub async fn parse_multipart(headers: &HeaderMap, body: bytes::Bytes) -> Result<Submission, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut map = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        insert_repeated(&mut map, &name, value);
    }

    Ok(Submission::new(map))
}

/// Insert a form value. A repeated key, or one written as `key[]`, collects
/// its values into an array.
fn insert_repeated(map: &mut Map<String, Value>, key: &str, value: String) {
    let (key, force_list) = match key.strip_suffix("[]") {
        Some(stripped) => (stripped, true),
        None => (key, false),
    };

    match map.get_mut(key) {
        Some(Value::Array(items)) => items.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None if force_list => {
            map.insert(key.to_string(), Value::Array(vec![Value::String(value)]));
        }
        None => {
            map.insert(key.to_string(), Value::String(value));
        }
    }
}
