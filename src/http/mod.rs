//! # Módulo HTTP
//!
//! Modelo de mensajes y formato en el cable del subconjunto HTTP/1.1 que
//! soporta el servidor:
//!
//! - Parsing de requests directamente desde el stream
//! - Construcción y serialización de responses
//! - Tabla de status codes y reason phrases
//! - Mapa de headers con orden de inserción
//!
//! ## Alcance
//!
//! - Solo framing por `Content-Length` (sin chunked transfer encoding)
//! - Keep-alive únicamente si el request envía `Connection: keep-alive`
//! - La URL no se decodifica ni se separa en path/query
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 12\r\n
//! \r\n
//! Hello World\n
//! ```

pub mod headers;   // Mapa ordenado de headers
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use headers::Headers;
pub use request::{ParseError, Request};
pub use response::{Response, ResponseError};
pub use status::StatusCode;
