//! # Handlers
//! src/router/handler.rs
//!
//! Un handler es cualquier valor que sepa responder un request: una función
//! o closure con la firma `Fn(&mut Response, &Request)`, o un struct con
//! estado que implemente [`Handler`] a mano.

use crate::http::{Request, Response};
use std::sync::Arc;

/// Capacidad de atender un request escribiendo en la respuesta
///
/// Se comparte entre todos los threads de conexión, por eso exige
/// `Send + Sync`.
///
/// # Ejemplo
/// ```
/// use httpmux::http::{Request, Response};
/// use httpmux::router::Handler;
///
/// struct Greeter {
///     name: String,
/// }
///
/// impl Handler for Greeter {
///     fn serve_http(&self, w: &mut Response, _r: &Request) {
///         w.write_string(&format!("hello {}", self.name));
///     }
/// }
/// ```
pub trait Handler: Send + Sync {
    fn serve_http(&self, w: &mut Response, r: &Request);
}

/// Toda función con la firma correcta es un handler
impl<F> Handler for F
where
    F: Fn(&mut Response, &Request) + Send + Sync,
{
    fn serve_http(&self, w: &mut Response, r: &Request) {
        self(w, r)
    }
}

/// Handler compartido, tal como lo guardan las rutas y el middleware
pub type SharedHandler = Arc<dyn Handler>;

/// Adapta una closure a un [`SharedHandler`]
///
/// Útil dentro de middleware, donde hace falta retornar un handler nuevo
/// que envuelve al siguiente.
pub fn handler_fn<F>(f: F) -> SharedHandler
where
    F: Fn(&mut Response, &Request) + Send + Sync + 'static,
{
    Arc::new(f)
}
