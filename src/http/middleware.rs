//! Axum adapter for the edge handlers.
//!
//! # Responsibilities
//! - Translate an axum request into an `EdgeRequest`
//! - Run a handler and apply its outcome: respond, rewrite the path, or
//!   pass through to `next`
//! - Map configuration failures to 500
//!
//! # Design Decisions
//! - `Router::layer` runs after route matching; wrap the whole router
//!   (`layer.layer(router)`) when a rewrite must change the matched route
//! - The query string is preserved across a rewrite

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{uri::PathAndQuery, HeaderName, HeaderValue, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::handler::{AccessGateHandler, EdgeOutcome, HandlerError, RedirectHandler};
use crate::http::{EdgeHeaders, EdgeRequest, EdgeResponse};

/// Access gate in front of the wrapped service.
pub async fn access_gate_middleware(
    State(handler): State<Arc<AccessGateHandler>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let edge_request = to_edge_request(&request);
    apply_outcome(handler.handle(edge_request), request, next).await
}

/// Redirects and `.html` rewrites in front of the wrapped service.
pub async fn redirect_middleware(
    State(handler): State<Arc<RedirectHandler>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let edge_request = to_edge_request(&request);
    apply_outcome(handler.handle(edge_request), request, next).await
}

async fn apply_outcome(
    outcome: Result<EdgeOutcome, HandlerError>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match outcome {
        Ok(EdgeOutcome::Respond(response)) => into_http_response(response),
        Ok(EdgeOutcome::Forward(forwarded)) => {
            if forwarded.uri != request.uri().path() {
                match rewrite_path(request.uri(), &forwarded.uri) {
                    Ok(uri) => *request.uri_mut() = uri,
                    Err(e) => {
                        tracing::error!(uri = %forwarded.uri, error = %e, "Rewritten URI is invalid");
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                }
            }
            next.run(request).await
        }
        Err(e) => {
            tracing::error!(error = %e, "Edge handler failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Edge configuration unavailable").into_response()
        }
    }
}

/// Snapshot of the fields the edge handlers read.
pub fn to_edge_request(request: &Request<Body>) -> EdgeRequest {
    let mut headers = EdgeHeaders::new();
    for (name, value) in request.headers() {
        headers.append(
            name.as_str(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }

    EdgeRequest {
        method: request.method().to_string(),
        uri: request.uri().path().to_string(),
        querystring: request.uri().query().unwrap_or_default().to_string(),
        client_ip: request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string()),
        headers,
    }
}

/// Replace the path of `uri`, keeping scheme, authority and query.
pub fn rewrite_path(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

/// Render a synthesized response for axum.
pub fn into_http_response(edge: EdgeResponse) -> Response {
    let status = StatusCode::from_u16(edge.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = Response::new(Body::from(edge.body.unwrap_or_default()));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    for (name, entries) in edge.headers.iter() {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!(header = %name, "Skipping invalid response header name");
            continue;
        };
        for entry in entries {
            match HeaderValue::from_str(&entry.value) {
                Ok(value) => {
                    headers.append(name.clone(), value);
                }
                Err(_) => {
                    tracing::warn!(header = %name, "Skipping invalid response header value");
                }
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_path_keeps_query() {
        let uri: Uri = "http://example.com/about?lang=en".parse().unwrap();
        let rewritten = rewrite_path(&uri, "/about.html").unwrap();
        assert_eq!(rewritten.to_string(), "http://example.com/about.html?lang=en");

        let uri: Uri = "/docs/".parse().unwrap();
        assert_eq!(rewrite_path(&uri, "/docs/.html").unwrap(), "/docs/.html");
    }

    #[test]
    fn test_to_edge_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/submit?x=1")
            .header("Authorization", "Basic dTpw")
            .header("X-Tag", "a")
            .header("X-Tag", "b")
            .body(Body::empty())
            .unwrap();

        let edge = to_edge_request(&request);
        assert_eq!(edge.method, "POST");
        assert_eq!(edge.uri, "/submit");
        assert_eq!(edge.querystring, "x=1");
        assert_eq!(edge.headers.first_value("authorization"), Some("Basic dTpw"));
        assert_eq!(edge.headers.get("x-tag").unwrap().len(), 2);
        assert!(edge.client_ip.is_none());
    }

    #[test]
    fn test_into_http_response() {
        let response = into_http_response(EdgeResponse::unauthorized(&EdgeHeaders::new()));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["www-authenticate"], "Basic");
    }
}
