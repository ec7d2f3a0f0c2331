//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea paths HTTP a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las rutas son una lista ordenada de `(matcher, handler)`. Se prueban
//! en orden de registro y gana la primera que coincide; el orden es la
//! única regla de desempate. Si ninguna coincide se usa el handler de
//! fallback (404 Not Found).
//!
//! Solo el path participa en el matching. El método lo revisa cada
//! handler (por ejemplo `/files/` responde 405 a todo lo que no sea GET).

use crate::config::ServerConfig;
use crate::handlers;
use crate::http::{Request, Response};

/// Tipo de función handler
///
/// Un handler es una función pura de (Request, ServerConfig) → Response.
pub type Handler = fn(&Request, &ServerConfig) -> Response;

/// Regla de matching sobre el path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// El path debe ser exactamente igual
    Exact(&'static str),

    /// El path debe empezar con el prefijo
    Prefix(&'static str),
}

impl Matcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Matcher::Exact(expected) => path == *expected,
            Matcher::Prefix(prefix) => path.starts_with(prefix),
        }
    }
}

/// Una ruta registrada
#[derive(Clone, Copy)]
pub struct Route {
    /// Nombre para logs
    pub name: &'static str,
    pub matcher: Matcher,
    pub handler: Handler,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Router que mapea paths a handlers
#[derive(Debug)]
pub struct Router {
    /// Rutas en orden de prioridad
    routes: Vec<Route>,

    /// Se usa cuando ninguna ruta coincide
    fallback: Route,
}

impl Router {
    /// Crea un router vacío: todo request termina en 404
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: Route {
                name: "not_found",
                matcher: Matcher::Prefix(""),
                handler: handlers::not_found_handler,
            },
        }
    }

    /// Tabla de rutas del servidor
    ///
    /// | Orden | Matcher              | Handler      |
    /// |-------|----------------------|--------------|
    /// | 1     | exacto `/`           | root         |
    /// | 2     | prefijo `/echo/`     | echo         |
    /// | 3     | prefijo `/user-agent`| user_agent   |
    /// | 4     | prefijo `/files/`    | files        |
    /// | -     | (fallback)           | not_found    |
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();
        router.register_exact("root", "/", handlers::root_handler);
        router.register_prefix("echo", "/echo/", handlers::echo_handler);
        router.register_prefix("user_agent", "/user-agent", handlers::user_agent_handler);
        router.register_prefix("files", "/files/", handlers::files_handler);
        router
    }

    /// Registra una ruta que requiere path exacto
    ///
    /// # Ejemplo
    /// ```
    /// use mini_http::config::ServerConfig;
    /// use mini_http::http::{Request, Response, StatusCode};
    /// use mini_http::router::Router;
    ///
    /// fn health(_req: &Request, _config: &ServerConfig) -> Response {
    ///     Response::text("ok")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register_exact("health", "/health", health);
    ///
    /// let request = Request::parse(b"GET /health HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request, &ServerConfig::default());
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// ```
    pub fn register_exact(&mut self, name: &'static str, path: &'static str, handler: Handler) {
        self.routes.push(Route {
            name,
            matcher: Matcher::Exact(path),
            handler,
        });
    }

    /// Registra una ruta por prefijo de path
    pub fn register_prefix(&mut self, name: &'static str, prefix: &'static str, handler: Handler) {
        self.routes.push(Route {
            name,
            matcher: Matcher::Prefix(prefix),
            handler,
        });
    }

    /// Selecciona la ruta para un request
    ///
    /// Siempre retorna exactamente una ruta (el fallback si no hay match).
    pub fn select(&self, request: &Request) -> &Route {
        let path = request.path();
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .unwrap_or(&self.fallback)
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request, config: &ServerConfig) -> Response {
        let route = self.select(request);
        (route.handler)(request, config)
    }

    /// Número de rutas registradas (sin contar el fallback)
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_default_routes()
    }
}
