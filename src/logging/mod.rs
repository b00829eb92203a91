//! Request log for the mock server, written through a `slog` terminal drain.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use slog::{o, Drain, Logger};
use slog_async::Async;
use slog_term::{FullFormat, PlainDecorator, TermDecorator};
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub async_buffer_size: usize,
    pub use_color: bool,
    pub environment: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            async_buffer_size: 1024,
            use_color: true,
            environment: "development".to_string(),
        }
    }
}

impl From<&AppConfig> for LoggerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            use_color: !config.log_json && !config.is_production(),
            environment: config.environment.clone(),
            ..Self::default()
        }
    }
}

pub fn setup_logger(config: &LoggerConfig) -> Logger {
    let root = o!(
        "version" => env!("CARGO_PKG_VERSION"),
        "env" => config.environment.clone(),
    );

    if config.use_color {
        let decorator = TermDecorator::new().force_color().build();
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = Async::new(drain)
            .chan_size(config.async_buffer_size)
            .build()
            .fuse();
        Logger::root(drain, root)
    } else {
        let decorator = PlainDecorator::new(std::io::stderr());
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = Async::new(drain)
            .chan_size(config.async_buffer_size)
            .build()
            .fuse();
        Logger::root(drain, root)
    }
}

#[derive(Clone)]
pub struct LoggingState {
    logger: Logger,
}

impl LoggingState {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

/// First path segment, which names the collection for REST routes.
fn resource_of(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or("")
}

pub async fn logging_middleware(
    State(state): State<Arc<LoggingState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let resource = resource_of(&path).to_string();

    let response = next.run(req).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        slog::warn!(
            &state.logger,
            "request failed";
            "method" => method,
            "path" => path,
            "resource" => resource,
            "status" => status.as_u16(),
            "duration_ms" => duration_ms,
        );
    } else {
        slog::info!(
            &state.logger,
            "request handled";
            "method" => method,
            "path" => path,
            "resource" => resource,
            "status" => status.as_u16(),
            "duration_ms" => duration_ms,
        );
    }

    response
}

/// Wraps every route of `router` with the request log.
pub fn with_request_log(router: Router, logger: Logger) -> Router {
    let state = Arc::new(LoggingState::new(logger));
    router.layer(middleware::from_fn_with_state(state, logging_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[test]
    fn resource_is_first_segment() {
        assert_eq!(resource_of("/sparepart/42"), "sparepart");
        assert_eq!(resource_of("/"), "");
    }

    #[tokio::test]
    async fn middleware_passes_responses_through() {
        let logger = setup_logger(&LoggerConfig {
            async_buffer_size: 64,
            use_color: false,
            environment: "test".to_string(),
        });
        let app = with_request_log(
            Router::new().route("/health", get(|| async { "OK" })),
            logger,
        );

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
