//! Request middleware
//!
//! - URL rewriting before routing
//! - Fixed response delay
//! - Per-request logging

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::Response,
};

use crate::observability::{log_event_with_fields, Event, Timer};
use crate::rewrite::CompiledRuleset;

/// Replace the request URI when a rewrite rule matches.
///
/// Must wrap the router that dispatches on the path, so the handlers
/// see the rewritten URL.
pub async fn rewrite_request(
    State(rules): State<Arc<CompiledRuleset>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !rules.is_empty() {
        let original = path_and_query(request.uri());

        if let Some((rule, rewritten)) = rules.find(&original) {
            match rewritten.parse::<Uri>() {
                Ok(uri) => {
                    log_event_with_fields(
                        Event::RequestRewritten,
                        &[("from", &original), ("rule", rule.from()), ("to", &rewritten)],
                    );
                    *request.uri_mut() = uri;
                }
                Err(e) => {
                    log_event_with_fields(
                        Event::RequestRewriteFailed,
                        &[("error", &e.to_string()), ("from", &original), ("to", &rewritten)],
                    );
                }
            }
        }
    }

    next.run(request).await
}

/// Hold every response for a fixed duration.
pub async fn delay_response(
    State(delay): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    tokio::time::sleep(delay).await;
    next.run(request).await
}

/// Log method, original URL, status and latency.
pub async fn log_request(request: Request, next: Next) -> Response {
    let timer = Timer::new();
    let method = request.method().to_string();
    let url = path_and_query(request.uri());

    let response = next.run(request).await;

    log_event_with_fields(
        Event::RequestComplete,
        &[
            ("method", &method),
            ("ms", &timer.elapsed_ms()),
            ("status", response.status().as_str()),
            ("url", &url),
        ],
    );

    response
}

fn path_and_query(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
