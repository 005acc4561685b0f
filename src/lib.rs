//! # httpmux
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero sobre `std::net`:
//! acepta conexiones TCP, parsea cada request del stream, lo despacha a un
//! handler elegido por método + URL exactos y serializa la respuesta,
//! manteniendo la conexión abierta si el cliente pide keep-alive.
//!
//! ## Arquitectura
//!
//! - `http`: Modelo de mensajes (Request, Response, headers, status codes)
//! - `router`: Handlers, rutas, middleware y dispatch
//! - `server`: Accept loop y loop por conexión (un thread por conexión)
//! - `template`: Templates HTML leídos desde archivo
//! - `logging`: Subscriber de `tracing` y middleware de logging
//! - `config`: Configuración del binario de demo
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use httpmux::router::Router;
//! use httpmux::server::Server;
//! use std::net::TcpListener;
//!
//! let mut router = Router::new();
//! router.get("/", |w, _r| w.write_string("Hello World\n"));
//! router.get("/bad", |w, _r| w.write_status(400));
//!
//! let listener = TcpListener::bind("127.0.0.1:8080").unwrap();
//! Server::new(router).listen(listener).unwrap();
//! ```

pub mod config;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
pub mod template;

pub use http::{Request, Response, StatusCode};
pub use router::{Handler, Router};
pub use server::Server;
