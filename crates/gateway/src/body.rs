//! Lenient request extraction and presence checks.
//!
//! A request without an `application/json` content type, or with an empty
//! body, is read as an empty object so that it fails the endpoint's presence
//! check with the endpoint's own message rather than a generic extractor
//! rejection. Query strings that cannot be decoded are rejected as
//! [`ApiError`] so they render as JSON like every other error.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// The request body as a JSON object.
#[derive(Debug, Default)]
pub struct JsonBody(pub Map<String, Value>);

fn is_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            essence == "application/json"
        })
        .unwrap_or(false)
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(&req);
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BodyRejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            // Arrays and scalars carry no named fields.
            Ok(_) => Ok(Self::default()),
            Err(e) => Err(ApiError::MalformedBody(e.to_string())),
        }
    }
}

/// Query parameters whose decoding failures render as JSON errors.
#[derive(Debug)]
pub struct JsonQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for JsonQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))?;
        Ok(Self(value))
    }
}

impl JsonBody {
    /// A field that is present, a string, and non-empty.
    pub fn required_str(&self, field: &str) -> Option<String> {
        match self.0.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// A non-empty array whose elements are all strings. Empty strings
    /// inside the array are kept.
    pub fn required_str_array(&self, field: &str) -> Option<Vec<String>> {
        match self.0.get(field) {
            Some(Value::Array(items)) if !items.is_empty() => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }
}

/// Query parameters count as present only when non-empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> JsonBody {
        match value {
            Value::Object(map) => JsonBody(map),
            _ => JsonBody::default(),
        }
    }

    #[test]
    fn required_str_rejects_empty_null_and_non_strings() {
        let b = body(json!({"a": "x", "b": "", "c": null, "d": 0, "e": 7, "f": true}));
        assert_eq!(b.required_str("a"), Some("x".into()));
        assert_eq!(b.required_str("b"), None);
        assert_eq!(b.required_str("c"), None);
        assert_eq!(b.required_str("d"), None);
        assert_eq!(b.required_str("e"), None);
        assert_eq!(b.required_str("f"), None);
        assert_eq!(b.required_str("missing"), None);
    }

    #[test]
    fn required_str_array_rules() {
        let b = body(json!({
            "ok": ["Kitchen", ""],
            "empty": [],
            "scalar": "Kitchen",
            "mixed": ["Kitchen", 3]
        }));
        assert_eq!(
            b.required_str_array("ok"),
            Some(vec!["Kitchen".to_string(), String::new()])
        );
        assert_eq!(b.required_str_array("empty"), None);
        assert_eq!(b.required_str_array("scalar"), None);
        assert_eq!(b.required_str_array("mixed"), None);
        assert_eq!(b.required_str_array("missing"), None);
    }

    fn request_with_content_type(ct: &str) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, ct)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[test]
    fn only_application_json_is_parsed() {
        assert!(is_json_content_type(&request_with_content_type("application/json")));
        assert!(is_json_content_type(&request_with_content_type(
            "Application/JSON; charset=utf-8"
        )));
        assert!(!is_json_content_type(&request_with_content_type(
            "application/vnd.api+json"
        )));
        assert!(!is_json_content_type(&request_with_content_type("text/plain")));
    }

    #[test]
    fn non_empty_query_values() {
        assert_eq!(non_empty(Some("u1".into())), Some("u1".into()));
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }
}
