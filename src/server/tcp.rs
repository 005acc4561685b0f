//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio thread;
//! no hay pool ni límite de conexiones.

use super::Connection;
use crate::router::{Handler, SharedHandler};
use std::io;
use std::net::{TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

/// Servidor HTTP con un único handler raíz (normalmente un `Router`)
pub struct Server {
    handler: SharedHandler,
}

impl Server {
    /// Crea el servidor quedándose con el handler raíz
    ///
    /// Al tomar el handler por valor, el router ya no se puede modificar
    /// mientras el servidor atiende conexiones.
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Handler raíz compartido por todas las conexiones
    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// Acepta conexiones para siempre sobre un listener ya creado
    ///
    /// Bloquea el thread actual. Solo retorna si `accept` falla, y en ese
    /// caso el servidor completo termina con ese error (no hay reintentos).
    pub fn listen(&self, listener: TcpListener) -> io::Result<()> {
        match listener.local_addr() {
            Ok(address) => info!(%address, "server running"),
            Err(_) => info!("server running"),
        }

        loop {
            let (stream, peer) = listener.accept().map_err(|e| {
                error!(error = %e, "accept failed, stopping server");
                e
            })?;

            info!(%peer, "new connection");
            let handler = Arc::clone(&self.handler);

            thread::spawn(move || {
                let mut connection = Connection::new(stream, handler, peer.to_string());
                if let Err(e) = connection.serve() {
                    warn!(%peer, error = %e, "connection aborted");
                }
                debug!(%peer, "connection closed");
            });
        }
    }

    /// Hace bind a la dirección y luego llama a [`Server::listen`]
    pub fn listen_and_serve<A: ToSocketAddrs>(&self, address: A) -> io::Result<()> {
        let listener = TcpListener::bind(address)?;
        self.listen(listener)
    }
}
