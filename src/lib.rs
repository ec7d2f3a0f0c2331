//! # mini_http
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: acepta conexiones TCP,
//! parsea un único request por conexión, lo despacha a uno de pocos
//! handlers y responde. Cada conexión corre en su propio thread.
//!
//! ## Arquitectura
//!
//! ```text
//! Listener → read → Parser → Router → Handler → Response Writer → close
//! ```
//!
//! - `http`: Parsing de requests, lectura del socket y escritura de responses
//! - `router`: Tabla ordenada de rutas `(matcher, handler)`
//! - `handlers`: root, echo, user-agent, archivos estáticos y 404
//! - `server`: Listener TCP y ciclo de vida de cada conexión
//! - `config`: Argumentos CLI y configuración compartida
//! - `error`: Tipos de error
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use mini_http::config::Config;
//! use mini_http::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el loop de accept");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
