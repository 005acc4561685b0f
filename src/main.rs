//! # httpmux - Entry Point
//! src/main.rs
//!
//! Servidor de demo: registra algunas rutas de ejemplo y escucha en la
//! dirección configurada por CLI o variables de entorno.

use clap::Parser;
use httpmux::config::Config;
use httpmux::logging;
use httpmux::router::Router;
use httpmux::server::Server;
use httpmux::template::Template;
use serde_json::json;
use std::net::TcpListener;
use tracing::{error, info, warn};

fn main() {
    let config = Config::parse();

    logging::init(&config.log_level);

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        std::process::exit(2);
    }

    let router = build_router(&config);

    let listener = match TcpListener::bind(config.address()) {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %config.address(), error = %e, "could not bind");
            std::process::exit(1);
        }
    };
    info!(address = %config.address(), "listening");

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = Server::new(router).listen(listener) {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

fn build_router(config: &Config) -> Router {
    let mut router = Router::new();
    router.use_middleware(logging::request_logger);

    router.get("/", |w, _r| w.write_string("Hello World\n"));
    router.get("/bad", |w, _r| w.write_status(400));

    router.get("/json", |w, r| {
        w.write_header("Content-Type", "application/json");
        if let Err(e) = w.write_json(&json!({ "url": r.url(), "protocol": r.protocol() })) {
            error!(error = %e, "could not encode JSON body");
            w.write_status(500);
        }
    });

    router.post("/echo", |w, r| match r.body_string() {
        Some(body) => w.write_string(&body),
        None => w.write_status(400),
    });

    if let Some(path) = &config.template {
        let mut template = Template::new(path);
        match template.parse() {
            Ok(()) => router.get("/page", move |w, _r| {
                if let Err(e) = template.execute(w) {
                    error!(error = %e, "template failed");
                    w.write_status(500);
                }
            }),
            Err(e) => warn!(error = %e, "template disabled"),
        }
    }

    router
}
