//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser incremental que lee un request directamente del stream de la
//! conexión, línea por línea.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /echo HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD SP URL SP PROTOCOL CRLF`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes (o nada)
//!
//! La URL se guarda tal como llegó: no se decodifica ni se separa la query.

use super::Headers;
use std::io::{self, BufRead, Read};
use thiserror::Error;
use tracing::debug;

/// Header que determina el largo del body
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Header que controla el keep-alive
pub const CONNECTION: &str = "Connection";

/// Representa un request HTTP parseado
///
/// Se crea uno nuevo por cada request de la conexión y los handlers solo lo
/// reciben por referencia compartida.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó (GET, POST, ...)
    method: String,

    /// URL cruda (ej: "/users?id=1")
    url: String,

    /// Versión del protocolo (ej: "HTTP/1.1")
    protocol: String,

    headers: Headers,

    body: Vec<u8>,
}

/// Errores que pueden ocurrir al leer un request del stream
#[derive(Debug, Error)]
pub enum ParseError {
    /// Falla de lectura del socket
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),

    /// El stream terminó a mitad de la request line o de los headers
    #[error("Connection closed before the request head was complete")]
    UnexpectedEof,

    /// Bytes que no son UTF-8 en la request line o en un header
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// Request line sin METHOD, URL o PROTOCOL
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// `Content-Length` no es un entero no negativo
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// El body tiene menos bytes de los declarados
    #[error("Incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },
}

impl ParseError {
    /// Indica si el error es culpa del request (merece un 400) y no del transporte
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, ParseError::Io(_))
    }
}

impl Request {
    /// Lee un request completo desde un reader con buffer
    ///
    /// # Retorna
    ///
    /// * `Ok(Some(Request))` - Request parseado
    /// * `Ok(None)` - El peer cerró la conexión antes de enviar un byte
    /// * `Err(ParseError)` - Request malformado o error de lectura
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Option<Self>, ParseError> {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let (method, url, protocol) = Self::parse_request_line(decode_line(&line)?)?;

        let headers = Self::read_headers(reader)?;
        let body = Self::read_body(reader, &headers)?;

        Ok(Some(Request {
            method,
            url,
            protocol,
            headers,
            body,
        }))
    }

    /// Parsea un request desde un buffer en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use httpmux::http::Request;
    ///
    /// let raw = b"GET /hello HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.url(), "/hello");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)?.ok_or(ParseError::UnexpectedEof)
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`. Se separa por espacios simples y se
    /// exige que los tres primeros tokens existan y no estén vacíos; los
    /// tokens sobrantes se ignoran.
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        if !line.ends_with('\n') {
            return Err(ParseError::UnexpectedEof);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);

        let mut parts = trimmed.split(' ');
        let method = parts.next().filter(|token| !token.is_empty());
        let url = parts.next().filter(|token| !token.is_empty());
        let protocol = parts.next().map(str::trim).filter(|token| !token.is_empty());

        match (method, url, protocol) {
            (Some(method), Some(url), Some(protocol)) => {
                Ok((method.to_string(), url.to_string(), protocol.to_string()))
            }
            _ => Err(ParseError::InvalidRequestLine(trimmed.to_string())),
        }
    }

    /// Lee headers hasta la línea vacía
    ///
    /// Cada header se separa en el primer ':' y se recortan los espacios.
    /// Las líneas sin ':' se descartan.
    fn read_headers<R: BufRead>(reader: &mut R) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Err(ParseError::UnexpectedEof);
            }

            let text = decode_line(&line)?;
            if !text.ends_with('\n') {
                return Err(ParseError::UnexpectedEof);
            }
            if text == "\r\n" || text == "\n" {
                break;
            }

            match text.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim(), value.trim());
                }
                None => debug!(line = text.trim_end(), "skipping header line without colon"),
            }
        }

        Ok(headers)
    }

    /// Lee exactamente `Content-Length` bytes
    ///
    /// Sin ese header el body queda vacío y cualquier byte extra permanece
    /// en el stream.
    fn read_body<R: BufRead>(reader: &mut R, headers: &Headers) -> Result<Vec<u8>, ParseError> {
        let Some(raw) = headers.get(CONTENT_LENGTH) else {
            return Ok(Vec::new());
        };
        let expected: usize = raw
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))?;

        // `take` evita reservar de antemano lo que declare el cliente
        let mut body = Vec::new();
        (&mut *reader).take(expected as u64).read_to_end(&mut body)?;

        if body.len() < expected {
            return Err(ParseError::IncompleteBody {
                expected,
                received: body.len(),
            });
        }
        Ok(body)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene la URL cruda
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Obtiene la versión del protocolo
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (case-sensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body del request como String
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Largo declarado del body, si el header existe y es válido
    pub fn content_length(&self) -> Option<usize> {
        self.header(CONTENT_LENGTH)?.parse().ok()
    }

    /// `true` solo si `Connection` es exactamente `keep-alive`
    ///
    /// No hay keep-alive implícito para HTTP/1.1.
    pub fn wants_keep_alive(&self) -> bool {
        self.header(CONNECTION) == Some("keep-alive")
    }
}

fn decode_line(line: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.url(), "/");
        assert_eq!(request.protocol(), "HTTP/1.1");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_url_is_kept_raw() {
        let raw = b"GET /search?q=hello%20world HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.url(), "/search?q=hello%20world");
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent:  test \r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("localhost:8080"));
        assert_eq!(request.header("User-Agent"), Some("test"));
    }

    #[test]
    fn test_repeated_header_last_wins() {
        let raw = b"GET / HTTP/1.1\r\nX-Tag: one\r\nX-Tag: two\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("X-Tag"), Some("two"));
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn test_header_without_colon_is_skipped() {
        let raw = b"GET / HTTP/1.1\r\ngarbage\r\nHost: a\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("Host"), Some("a"));
    }

    #[test]
    fn test_parse_body_with_content_length() {
        let raw = b"POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.body(), b"hello");
        assert_eq!(request.body_string(), Some("hello".to_string()));
        assert_eq!(request.content_length(), Some(5));
    }

    #[test]
    fn test_body_without_content_length_is_empty() {
        let raw = b"POST /echo HTTP/1.1\r\n\r\nignored";
        let request = Request::parse(raw).unwrap();

        assert!(request.body().is_empty());
    }

    #[test]
    fn test_read_leaves_next_request_on_stream() {
        let raw = b"POST /a HTTP/1.1\r\nContent-Length: 2\r\n\r\nokGET /b HTTP/1.1\r\n\r\n";
        let mut reader = &raw[..];

        let first = Request::read_from(&mut reader).unwrap().unwrap();
        let second = Request::read_from(&mut reader).unwrap().unwrap();

        assert_eq!(first.body(), b"ok");
        assert_eq!(second.url(), "/b");
        assert!(Request::read_from(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_invalid_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidContentLength(v)) if v == "abc"));
    }

    #[test]
    fn test_negative_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: -1\r\n\r\n";
        assert!(matches!(
            Request::parse(raw),
            Err(ParseError::InvalidContentLength(_))
        ));
    }

    #[test]
    fn test_incomplete_body() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc";
        let result = Request::parse(raw);

        assert!(matches!(
            result,
            Err(ParseError::IncompleteBody { expected: 10, received: 3 })
        ));
    }

    #[test]
    fn test_invalid_request_line() {
        let raw = b"GET\r\n\r\n"; // Falta url y protocolo
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidRequestLine(_))));
    }

    #[test]
    fn test_request_line_with_empty_token() {
        let raw = b"GET / \r\n\r\n";
        assert!(matches!(
            Request::parse(raw),
            Err(ParseError::InvalidRequestLine(_))
        ));
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let raw = b"GET / HTTP/1.1 extra\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.protocol(), "HTTP/1.1");
    }

    #[test]
    fn test_truncated_head() {
        assert!(matches!(
            Request::parse(b"GET / HTTP/1.1"),
            Err(ParseError::UnexpectedEof)
        ));
        assert!(matches!(
            Request::parse(b"GET / HTTP/1.1\r\nHost: a\r\n"),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_empty_request() {
        let mut reader: &[u8] = b"";
        assert!(Request::read_from(&mut reader).unwrap().is_none());
        assert!(matches!(Request::parse(b""), Err(ParseError::UnexpectedEof)));
    }

    #[test]
    fn test_invalid_utf8() {
        let raw = b"GET /\xff\xfe HTTP/1.1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidEncoding)));
    }

    #[test]
    fn test_keep_alive_is_exact_match() {
        let keep = Request::parse(b"GET / HTTP/1.1\r\nConnection: keep-alive\r\n\r\n").unwrap();
        let upper = Request::parse(b"GET / HTTP/1.1\r\nConnection: Keep-Alive\r\n\r\n").unwrap();
        let absent = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();

        assert!(keep.wants_keep_alive());
        assert!(!upper.wants_keep_alive());
        assert!(!absent.wants_keep_alive());
    }

    #[test]
    fn test_is_bad_request() {
        assert!(ParseError::InvalidRequestLine(String::new()).is_bad_request());
        assert!(ParseError::InvalidContentLength("x".into()).is_bad_request());
        assert!(!ParseError::Io(io::Error::from(io::ErrorKind::BrokenPipe)).is_bad_request());
    }
}
