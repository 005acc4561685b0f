//! # Logging
//! src/logging.rs
//!
//! Inicialización del subscriber de `tracing` y un middleware que registra
//! cada request atendido.
//!
//! El nivel se toma de `RUST_LOG` si está definido; si no, del nivel
//! configurado (por ejemplo `info` o `httpmux=debug`).

use crate::router::{handler_fn, SharedHandler};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Instala el subscriber global
///
/// Llamarlo más de una vez no falla; las llamadas extra se ignoran.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Subscriber para tests, con salida capturada por el harness
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Middleware que registra método, URL, status y latencia
///
/// ```
/// use httpmux::logging::request_logger;
/// use httpmux::router::Router;
///
/// let mut router = Router::new();
/// router.use_middleware(request_logger);
/// ```
pub fn request_logger(next: SharedHandler) -> SharedHandler {
    handler_fn(move |w, r| {
        let start = Instant::now();
        next.serve_http(w, r);

        info!(
            method = r.method(),
            url = r.url(),
            status = w.status().as_u16(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "request served"
        );
    })
}
