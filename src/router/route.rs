//! # Rutas
//! src/router/route.rs
//!
//! Una ruta es un registro inmutable (método, URL, handler). La coincidencia
//! es igualdad exacta de strings: no hay prefijos, patrones ni parámetros.

use super::SharedHandler;
use crate::http::Request;
use std::fmt;

/// Método comodín: la ruta acepta cualquier método
pub const ALL: &str = "ALL";

#[derive(Clone)]
pub struct Route {
    method: String,
    url: String,
    handler: SharedHandler,
}

impl Route {
    pub fn new(method: &str, url: &str, handler: SharedHandler) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            handler,
        }
    }

    /// Verifica si la ruta atiende este request
    ///
    /// La URL debe ser idéntica y el método igual al de la ruta, salvo que
    /// la ruta use [`ALL`].
    pub fn matches(&self, request: &Request) -> bool {
        self.url == request.url() && (self.method == ALL || self.method == request.method())
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
