//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel:
//!
//! - Parsing de requests (request line + headers + body por `Content-Length`)
//! - Lectura de requests desde el socket
//! - Construcción y escritura de responses
//! - Status codes
//!
//! Fuera de alcance: keep-alive, chunked transfer encoding, pipelining.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod headers;
pub mod reader;
pub mod request;
pub mod response;
pub mod status;

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use headers::Headers;
pub use reader::{read_request, RequestLimits};
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
