//! # Construcción de Respuestas HTTP
//!
//! La conexión crea una `Response` por request con valores por defecto
//! (200, `Content-Type: text/plain`, body vacío) y se la presta al handler,
//! que solo la modifica a través de los métodos `write_*`. Al terminar, la
//! conexión la serializa con [`Response::to_bytes`].
//!
//! ## Formato en el cable
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 12\r\n
//! \r\n
//! Hello World\n
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use httpmux::http::Response;
//!
//! let mut response = Response::new("HTTP/1.1");
//! response.write_status(201);
//! response.write_string("done");
//!
//! let bytes = response.to_bytes().unwrap();
//! assert!(bytes.starts_with(b"HTTP/1.1 201 Created\r\n"));
//! ```

use super::{Headers, StatusCode};
use serde::Serialize;
use thiserror::Error;

const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_LENGTH: &str = "Content-Length";

/// Protocolo usado cuando no hay request del cual heredarlo
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.1";

/// Errores al escribir o serializar una respuesta
#[derive(Debug, Error)]
pub enum ResponseError {
    /// El status no está en la tabla de reason phrases
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u16),

    /// Falla al serializar el body como JSON
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Representa una respuesta HTTP en construcción
#[derive(Debug, Clone)]
pub struct Response {
    /// Versión del protocolo, heredada del request
    protocol: String,

    /// Código de estado HTTP (200 por defecto)
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Headers,

    body: Vec<u8>,
}

impl Response {
    /// Crea la respuesta por defecto para un request
    ///
    /// # Ejemplo
    /// ```
    /// use httpmux::http::{Response, StatusCode};
    ///
    /// let response = Response::new("HTTP/1.1");
    /// assert_eq!(response.status(), StatusCode::OK);
    /// assert_eq!(response.header("Content-Type"), Some("text/plain"));
    /// ```
    pub fn new(protocol: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE, "text/plain");

        Self {
            protocol: protocol.into(),
            status: StatusCode::OK,
            headers,
            body: Vec::new(),
        }
    }

    /// Respuesta 400 usada cuando el request no se pudo parsear
    ///
    /// Incluye `Connection: close` porque la conexión se cierra después.
    pub fn bad_request(protocol: impl Into<String>) -> Self {
        let mut response = Self::new(protocol);
        response.write_status(StatusCode::BAD_REQUEST.as_u16());
        response.write_header("Connection", "close");
        response
    }

    /// Respuesta 500 usada cuando la respuesta del handler no es serializable
    pub fn internal_error(protocol: impl Into<String>) -> Self {
        let mut response = Self::new(protocol);
        response.write_status(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
        response.write_header("Connection", "close");
        response
    }

    // === Interfaz de escritura para handlers ===

    /// Reemplaza el body completo con un string
    pub fn write_string(&mut self, body: &str) {
        self.body = body.as_bytes().to_vec();
    }

    /// Establece el código de estado
    ///
    /// Cualquier entero es aceptado aquí; si no existe en la tabla de status
    /// el error aparece recién al serializar.
    pub fn write_status(&mut self, status: u16) {
        self.status = StatusCode::from_u16(status);
    }

    /// Agrega o reemplaza un header
    pub fn write_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    /// Serializa un valor como JSON y lo usa como body
    ///
    /// No toca `Content-Type`; el handler decide si lo cambia.
    ///
    /// # Ejemplo
    /// ```
    /// use httpmux::http::Response;
    /// use serde_json::json;
    ///
    /// let mut response = Response::new("HTTP/1.1");
    /// response.write_json(&json!({"ok": true})).unwrap();
    /// assert_eq!(response.body(), br#"{"ok":true}"#);
    /// ```
    pub fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ResponseError> {
        self.body = serde_json::to_vec(value)?;
        Ok(())
    }

    // === Serialización ===

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden de inserción: `Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body tal cual, sin terminador
    ///
    /// `Content-Length` se recalcula siempre desde el body y pisa cualquier
    /// valor que haya puesto el handler. Si el status no tiene reason phrase
    /// se retorna error sin modificar la respuesta.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, ResponseError> {
        let phrase = self
            .status
            .reason_phrase()
            .ok_or(ResponseError::InvalidStatusCode(self.status.as_u16()))?;

        self.headers.remove_case_variants(CONTENT_LENGTH);
        self.headers
            .insert(CONTENT_LENGTH, self.body.len().to_string());

        let mut result = Vec::with_capacity(128 + self.body.len());

        let status_line = format!("{} {} {}\r\n", self.protocol, self.status.as_u16(), phrase);
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in self.headers.iter() {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        Ok(result)
    }

    // === Lectura ===

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[test]
    fn test_new_response_defaults() {
        let response = Response::new("HTTP/1.1");
        assert_eq!(response.protocol(), "HTTP/1.1");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.headers().len(), 1);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_write_methods() {
        let mut response = Response::new("HTTP/1.1");
        response.write_status(404);
        response.write_header("X-Custom", "value");
        response.write_string("missing");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.header("X-Custom"), Some("value"));
        assert_eq!(response.body(), b"missing");
    }

    #[test]
    fn test_write_json() {
        #[derive(Serialize)]
        struct Greeting {
            message: &'static str,
        }

        let mut response = Response::new("HTTP/1.1");
        response
            .write_json(&Greeting { message: "hi" })
            .unwrap();

        assert_eq!(response.body(), br#"{"message":"hi"}"#);
    }

    #[test]
    fn test_write_json_failure_is_reported() {
        // Las claves no-string no se pueden serializar como objeto JSON
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple key");

        let mut response = Response::new("HTTP/1.1");
        response.write_string("untouched");
        let result = response.write_json(&map);

        assert!(matches!(result, Err(ResponseError::Json(_))));
        assert_eq!(response.body(), b"untouched");
    }

    #[test]
    fn test_to_bytes_exact() {
        let mut response = Response::new("HTTP/1.1");
        response.write_string("Hello World\n");

        let bytes = response.to_bytes().unwrap();
        assert_eq!(
            bytes,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 12\r\n\r\nHello World\n"
        );
    }

    #[test]
    fn test_content_length_overrides_handler_value() {
        let mut response = Response::new("HTTP/1.1");
        response.write_header("Content-Length", "999");
        response.write_string("abc");

        let text = String::from_utf8(response.to_bytes().unwrap()).unwrap();
        assert!(text.contains("Content-Length: 3\r\n"));
        assert!(!text.contains("999"));
        assert_eq!(response.header("Content-Length"), Some("3"));
    }

    #[test]
    fn test_content_length_case_variants_are_replaced() {
        let mut response = Response::new("HTTP/1.1");
        response.write_header("content-length", "999");
        response.write_header("CONTENT-LENGTH", "998");
        response.write_string("abc");

        let text = String::from_utf8(response.to_bytes().unwrap()).unwrap();
        assert_eq!(text.to_ascii_lowercase().matches("content-length").count(), 1);
        assert!(text.contains("Content-Length: 3\r\n"));
        assert!(!text.contains("999"));
        assert!(!text.contains("998"));
    }

    #[test]
    fn test_empty_body_response() {
        let mut response = Response::new("HTTP/1.0");
        response.write_status(204);
        let text = String::from_utf8(response.to_bytes().unwrap()).unwrap();

        assert!(text.starts_with("HTTP/1.0 204 No Content\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let mut response = Response::new("HTTP/1.1");
        response.write_status(999);

        let result = response.to_bytes();
        assert!(matches!(result, Err(ResponseError::InvalidStatusCode(999))));
        assert!(response.header("Content-Length").is_none());
    }

    #[test]
    fn test_bad_request_helper() {
        let mut response = Response::bad_request(DEFAULT_PROTOCOL);
        let text = String::from_utf8(response.to_bytes().unwrap()).unwrap();

        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("Content-Length: 0\r\n\r\n"));
    }

    #[test]
    fn test_binary_body() {
        let mut response = Response::new("HTTP/1.1");
        response.body = vec![0x00, 0x01, 0xFF];
        let bytes = response.to_bytes().unwrap();

        assert!(bytes.ends_with(&[b'\r', b'\n', 0x00, 0x01, 0xFF]));
    }
}
