use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parses a comma-separated origin list (`CORS_ALLOWED_ORIGIN` format).
///
/// Blank entries are skipped. Returns an error naming the first invalid origin.
pub fn parse_allowed_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| format!("invalid origin '{}': {}", s, e))
        })
        .collect()
}

/// Creates a CORS layer for the browser-facing API surface.
///
/// # Returns
/// A configured `CorsLayer` with:
/// - The given allowed origins
/// - The forwarded HTTP methods (GET, POST, PUT, DELETE) plus OPTIONS
/// - Common headers (Content-Type, Authorization, Accept)
/// - `content-disposition` exposed so exported files keep their name
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins("http://localhost:3000, https://ti.example.edu,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://ti.example.edu");
    }

    #[test]
    fn test_parse_allowed_origins_rejects_invalid() {
        let err = parse_allowed_origins("http://ok,bad\norigin").unwrap_err();
        assert!(err.contains("bad"));
    }
}
