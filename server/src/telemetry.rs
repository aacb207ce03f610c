//! Log subscriber setup and per-request logging.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, info_span, Instrument};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, ServerConfig};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let result = match config.log_format {
        LogFormat::Json => fmt().with_env_filter(filter).json().try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Wrap every request in a span and log its outcome.
pub async fn log_request(req: Request, next: Next) -> Response {
    let span = info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
    );
    let started = Instant::now();

    async move {
        let response = next.run(req).await;
        info!(
            status = response.status().as_u16(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_twice_does_not_panic() {
        let config = ServerConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}
