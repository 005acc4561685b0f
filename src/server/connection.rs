//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Loop bloqueante de una conexión:
//!
//! ```text
//! loop {
//!     leer Request → Response por defecto → handler raíz → serializar → escribir
//!     seguir solo si el request pidió `Connection: keep-alive`
//! }
//! ```
//!
//! Los requests de una misma conexión se procesan en orden estricto: no se
//! lee el siguiente hasta haber escrito la respuesta completa del anterior.
//! No hay timeouts; un peer silencioso mantiene ocupado el thread.

use crate::http::response::DEFAULT_PROTOCOL;
use crate::http::{ParseError, Request, Response};
use crate::router::SharedHandler;
use std::io::{self, BufReader, Read, Write};
use tracing::{debug, error, warn};

/// Conexión viva con un cliente
///
/// Es genérica sobre el stream para poder probarla sin sockets.
pub struct Connection<S: Read + Write> {
    reader: BufReader<S>,
    handler: SharedHandler,
    peer: String,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S, handler: SharedHandler, peer: impl Into<String>) -> Self {
        Self {
            reader: BufReader::new(stream),
            handler,
            peer: peer.into(),
        }
    }

    /// Atiende requests hasta que la conexión deba cerrarse
    ///
    /// Retorna `Ok(())` cuando el cierre es normal (sin keep-alive, EOF del
    /// peer o request malformado ya respondido con 400) y `Err` solo ante
    /// errores de transporte.
    pub fn serve(&mut self) -> io::Result<()> {
        loop {
            let request = match Request::read_from(&mut self.reader) {
                Ok(Some(request)) => request,
                Ok(None) => {
                    debug!(peer = %self.peer, "peer closed the connection");
                    return Ok(());
                }
                Err(ParseError::Io(e)) => return Err(e),
                Err(e) => {
                    warn!(peer = %self.peer, error = %e, "rejecting malformed request");
                    self.reject();
                    return Ok(());
                }
            };

            if !self.respond(&request)? {
                return Ok(());
            }
        }
    }

    /// Ejecuta el handler raíz y escribe la respuesta
    ///
    /// Retorna si la conexión debe seguir abierta.
    fn respond(&mut self, request: &Request) -> io::Result<bool> {
        let mut response = Response::new(request.protocol());
        self.handler.serve_http(&mut response, request);

        match response.to_bytes() {
            Ok(bytes) => {
                self.write(&bytes)?;
                debug!(
                    peer = %self.peer,
                    method = request.method(),
                    url = request.url(),
                    status = response.status().as_u16(),
                    "response written"
                );
                Ok(request.wants_keep_alive())
            }
            Err(e) => {
                error!(
                    peer = %self.peer,
                    method = request.method(),
                    url = request.url(),
                    error = %e,
                    "handler produced an unserializable response"
                );
                let mut fallback = Response::internal_error(request.protocol());
                let bytes = fallback.to_bytes().map_err(io::Error::other)?;
                self.write(&bytes)?;
                Ok(false)
            }
        }
    }

    /// Responde 400 a un request que no se pudo parsear
    ///
    /// La escritura es best-effort: el peer puede haber cerrado ya.
    fn reject(&mut self) {
        let mut response = Response::bad_request(DEFAULT_PROTOCOL);
        let result = response
            .to_bytes()
            .map_err(io::Error::other)
            .and_then(|bytes| self.write(&bytes));

        if let Err(e) = result {
            debug!(peer = %self.peer, error = %e, "could not send 400 response");
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.reader.get_mut();
        stream.write_all(bytes)?;
        stream.flush()
    }

    /// Recupera el stream subyacente
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}
