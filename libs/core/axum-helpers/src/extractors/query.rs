//! Query string extractor that reports failures through the error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::fmt::Display;
use std::str::FromStr;

/// Like `axum::extract::Query`, but a malformed query string becomes a
/// `BAD_REQUEST` JSON error instead of a plain-text rejection.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())
    }
}

/// Deserializes an optional query parameter, treating `?key=` (empty) as absent.
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Filter {
///     #[serde(default, deserialize_with = "empty_as_none")]
///     estado: Option<OperationalStatus>,
/// }
/// ```
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "empty_as_none")]
        year: Option<i32>,
    }

    async fn handler(ApiQuery(filter): ApiQuery<Filter>) -> String {
        format!("{:?}", filter.year)
    }

    async fn call(uri: &str) -> (StatusCode, String) {
        let response = Router::new()
            .route("/", get(handler))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_empty_value_is_none() {
        assert_eq!(call("/?year=").await, (StatusCode::OK, "None".to_string()));
        assert_eq!(call("/").await, (StatusCode::OK, "None".to_string()));
    }

    #[tokio::test]
    async fn test_value_is_parsed() {
        assert_eq!(call("/?year=2025").await, (StatusCode::OK, "Some(2025)".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_value_uses_error_envelope() {
        let (status, body) = call("/?year=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("BAD_REQUEST"));
    }
}
