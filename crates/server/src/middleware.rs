use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use std::time::Instant;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation ID for one request, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_request(request: &Request) -> Self {
        let id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        Self(id)
    }
}

/// Attaches a [`RequestId`] to the request and echoes it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = RequestId::from_request(&request);
    let header = HeaderValue::from_str(&id.0).ok();
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;
    if let Some(header) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, header);
    }
    response
}

/// Logs every request once it completes and records HTTP metrics.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let started = Instant::now();

    let response = next.run(request).await;
    let elapsed = started.elapsed();
    let status = response.status();

    counter!(
        "textlens_http_requests_total",
        "method" => method.to_string(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!("textlens_http_request_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());

    if status.is_server_error() {
        tracing::warn!(
            %method,
            %path,
            status = status.as_u16(),
            duration_ms = elapsed.as_millis() as u64,
            %request_id,
            "request failed"
        );
    } else {
        tracing::info!(
            %method,
            %path,
            status = status.as_u16(),
            duration_ms = elapsed.as_millis() as u64,
            %request_id,
            "request completed"
        );
    }

    response
}
