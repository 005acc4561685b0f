//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router (mux) que elige un handler según el
//! método y la URL del request.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → [middleware N → ... → middleware 1] → Handler → Response
//! ```
//!
//! - Las rutas se recorren en orden de registro y **gana la primera** que
//!   coincide. Registrar dos veces el mismo (método, URL) deja la segunda
//!   ruta inalcanzable.
//! - El middleware registrado al final queda más afuera en la cadena.
//! - Si ninguna ruta coincide la respuesta queda en 404 sin body y el
//!   middleware no se ejecuta.
//!
//! El router se arma completo antes de entregarlo al [`Server`], que se
//! queda con él por valor; desde ese momento solo se lee y se comparte entre
//! threads sin locks.
//!
//! [`Server`]: crate::server::Server

pub mod handler;
pub mod route;

pub use handler::{handler_fn, Handler, SharedHandler};
pub use route::{Route, ALL};

use crate::http::{Request, Response, StatusCode};
use std::sync::Arc;
use tracing::debug;

/// Función que envuelve un handler y retorna otro
pub type Middleware = Box<dyn Fn(SharedHandler) -> SharedHandler + Send + Sync>;

/// Router que mapea (método, URL) a handlers
#[derive(Default)]
pub struct Router {
    /// Rutas en orden de registro
    routes: Vec<Route>,

    /// Middleware en orden de registro
    middleware: Vec<Middleware>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una ruta GET
    ///
    /// # Ejemplo
    /// ```
    /// use httpmux::router::Router;
    ///
    /// let mut router = Router::new();
    /// router.get("/", |w, _r| w.write_string("Hello World\n"));
    /// router.get("/bad", |w, _r| w.write_status(400));
    /// ```
    pub fn get<F>(&mut self, url: &str, handler: F)
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        self.handle("GET", url, handler);
    }

    /// Registra una ruta POST
    pub fn post<F>(&mut self, url: &str, handler: F)
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        self.handle("POST", url, handler);
    }

    /// Registra una ruta PUT
    pub fn put<F>(&mut self, url: &str, handler: F)
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        self.handle("PUT", url, handler);
    }

    /// Registra una ruta DELETE
    pub fn delete<F>(&mut self, url: &str, handler: F)
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        self.handle("DELETE", url, handler);
    }

    /// Registra una ruta PATCH
    pub fn patch<F>(&mut self, url: &str, handler: F)
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        self.handle("PATCH", url, handler);
    }

    /// Registra una ruta que acepta cualquier método
    pub fn all<F>(&mut self, url: &str, handler: F)
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        self.handle(ALL, url, handler);
    }

    /// Registra cualquier [`Handler`] para un método y URL exactos
    ///
    /// Es la forma de montar handlers con estado o routers anidados.
    pub fn handle<H: Handler + 'static>(&mut self, method: &str, url: &str, handler: H) {
        self.routes.push(Route::new(method, url, Arc::new(handler)));
    }

    /// Registra un middleware
    ///
    /// # Ejemplo
    /// ```
    /// use httpmux::router::{handler_fn, Router};
    ///
    /// let mut router = Router::new();
    /// router.use_middleware(|next| {
    ///     handler_fn(move |w, r| {
    ///         w.write_header("X-Powered-By", "httpmux");
    ///         next.serve_http(w, r);
    ///     })
    /// });
    /// ```
    pub fn use_middleware<M>(&mut self, middleware: M)
    where
        M: Fn(SharedHandler) -> SharedHandler + Send + Sync + 'static,
    {
        self.middleware.push(Box::new(middleware));
    }

    /// Busca la primera ruta que coincide con el request
    pub fn find(&self, request: &Request) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(request))
    }

    /// Rutas registradas, en orden
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Envuelve el handler con todo el middleware
    ///
    /// Cada middleware envuelve la cadena ya envuelta, así el último
    /// registrado es el primero en ejecutarse.
    fn wrap(&self, handler: &SharedHandler) -> SharedHandler {
        self.middleware
            .iter()
            .fold(Arc::clone(handler), |next, middleware| middleware(next))
    }
}

impl Handler for Router {
    fn serve_http(&self, w: &mut Response, r: &Request) {
        match self.find(r) {
            Some(route) => {
                debug!(method = route.method(), url = route.url(), "route matched");
                self.wrap(route.handler()).serve_http(w, r);
            }
            None => {
                debug!(method = r.method(), url = r.url(), "no route matched");
                w.write_status(StatusCode::NOT_FOUND.as_u16());
            }
        }
    }
}
