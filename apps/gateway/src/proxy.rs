//! Request forwarding.

use axum::{
    body::Bytes,
    extract::{OriginalUri, State, rejection::BytesRejection},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};

use crate::error::GatewayError;
use crate::routes::{RouteTable, ServiceId, Upstream};

fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Split `/api/{service_id}/{rest}` into its raw parts
pub fn split_api_path(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("/api/")?;
    let (service, tail) = rest.split_once('/').unwrap_or((rest, ""));
    (!service.is_empty()).then_some((service, tail))
}

/// Inbound headers minus hop-by-hop ones, `host`, `content-length` and
/// `accept-encoding`. Headers named by `Connection` are dropped as well.
pub fn forwardable_headers(inbound: &HeaderMap) -> HeaderMap {
    let connection_listed: Vec<String> = inbound
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        let dropped = is_hop_by_hop(name)
            || name == header::HOST
            || name == header::CONTENT_LENGTH
            // Content-Encoding is not relayed, so upstream bodies must be identity-encoded
            || name == header::ACCEPT_ENCODING
            || connection_listed.iter().any(|token| token == name.as_str());
        if !dropped {
            outbound.append(name.clone(), value.clone());
        }
    }
    outbound
}

/// `{GET,POST,PUT,DELETE} /api/{service_id}[/{*path}]`
pub async fn proxy(
    State(routes): State<Arc<RouteTable>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    let (raw_service, rest) = split_api_path(uri.path())
        .ok_or_else(|| GatewayError::UnknownService(String::new()))?;
    let (service, upstream) = routes.resolve(raw_service)?;

    let body = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => GatewayError::PayloadTooLarge(rejection.body_text()),
        _ => GatewayError::InvalidBody(rejection.body_text()),
    })?;

    let span = info_span!("forward", service = %service, method = %method, path = %rest);
    forward(
        service,
        upstream,
        routes.timeout(),
        method,
        rest,
        uri.query(),
        &headers,
        body,
    )
    .instrument(span)
    .await
}

#[allow(clippy::too_many_arguments)]
async fn forward(
    service: ServiceId,
    upstream: &Upstream,
    bound: std::time::Duration,
    method: Method,
    path: &str,
    query: Option<&str>,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let started = Instant::now();
    let url = upstream.url_for(path, query);

    let upstream_response = upstream
        .client()
        .request(method, url)
        .headers(forwardable_headers(headers))
        .body(body)
        .send()
        .await
        .map_err(|e| GatewayError::from_reqwest(service, e, bound))?;

    let status = upstream_response.status();
    let content_type = upstream_response
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    // Passed back besides the content type
    let relayed: Vec<(HeaderName, HeaderValue)> = [header::CONTENT_DISPOSITION, header::LOCATION]
        .into_iter()
        .filter_map(|name| {
            upstream_response
                .headers()
                .get(&name)
                .map(|value| (name.clone(), value.clone()))
        })
        .collect();

    let bytes = upstream_response
        .bytes()
        .await
        .map_err(|e| GatewayError::from_reqwest(service, e, bound))?;

    info!(
        status = status.as_u16(),
        bytes = bytes.len(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Forwarded request"
    );

    let mut response = (status, bytes).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(header::CONTENT_TYPE, content_type);
    for (name, value) in relayed {
        response_headers.insert(name, value);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_api_path() {
        assert_eq!(split_api_path("/api/equipos"), Some(("equipos", "")));
        assert_eq!(split_api_path("/api/equipos/"), Some(("equipos", "")));
        assert_eq!(
            split_api_path("/api/equipos/equipos/3"),
            Some(("equipos", "equipos/3"))
        );
        assert_eq!(
            split_api_path("/api/reportes/a%2Fb"),
            Some(("reportes", "a%2Fb"))
        );
        assert_eq!(split_api_path("/api/"), None);
        assert_eq!(split_api_path("/health"), None);
    }

    #[test]
    fn test_forwardable_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, HeaderValue::from_static("gateway:8000"));
        inbound.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        inbound.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-trace-hop"));
        inbound.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        inbound.insert("x-trace-hop", HeaderValue::from_static("1"));
        inbound.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        inbound.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        inbound.append("x-tag", HeaderValue::from_static("a"));
        inbound.append("x-tag", HeaderValue::from_static("b"));

        let outbound = forwardable_headers(&inbound);

        assert_eq!(outbound.len(), 3);
        assert_eq!(outbound[header::AUTHORIZATION], "Bearer t");
        let tags: Vec<&str> = outbound
            .get_all("x-tag")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(tags, vec!["a", "b"]);
    }
}
