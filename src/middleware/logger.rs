use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Runs the request inside a span carrying a fresh trace id and logs its
/// outcome.
pub async fn logger<B>(req: Request<B>, next: Next<B>) -> Response {
    // 生成 trace_id
    let trace_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let span = info_span!("request", trace_id = %trace_id, method = %method, path = %path);
    let response = next.run(req).instrument(span).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed().as_millis();
    info!(
        trace_id = %trace_id,
        method = %method,
        path = %path,
        status = status,
        elapsed_ms = elapsed,
        "Request log"
    );
    response
}
