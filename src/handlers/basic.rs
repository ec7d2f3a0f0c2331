//! # Handlers Básicos
//!
//! - `/`: 200 sin body
//! - `/echo/<text>`: devuelve `<text>` tal cual (gzip si el cliente lo acepta)
//! - `/user-agent`: devuelve el header `User-Agent`
//! - fallback: 404 sin body

use crate::config::ServerConfig;
use crate::http::{Request, Response, StatusCode};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tracing::warn;

const ECHO_PREFIX: &str = "/echo/";

/// Handler para `/`
pub fn root_handler(_req: &Request, _config: &ServerConfig) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `/echo/<text>`
///
/// El texto es el resto del path después de `/echo/`, sin URL-decoding.
/// Puede estar vacío o contener `/`.
///
/// Si el request trae `Accept-Encoding` con `gzip`, el body se comprime
/// y `Content-Length` es la longitud comprimida.
///
/// # Ejemplo
/// ```
/// use mini_http::config::ServerConfig;
/// use mini_http::handlers::echo_handler;
/// use mini_http::http::Request;
///
/// let request = Request::parse(b"GET /echo/a%20b/c HTTP/1.1\r\n\r\n").unwrap();
/// let response = echo_handler(&request, &ServerConfig::default());
///
/// assert_eq!(response.body(), Some(&b"a%20b/c"[..]));
/// ```
pub fn echo_handler(req: &Request, _config: &ServerConfig) -> Response {
    let text = req.path().strip_prefix(ECHO_PREFIX).unwrap_or_default();

    let accepts_gzip = req
        .header("Accept-Encoding")
        .is_some_and(|value| accepts_encoding(value, "gzip"));

    if accepts_gzip {
        match gzip(text.as_bytes()) {
            Ok(compressed) => {
                return Response::new(StatusCode::Ok)
                    .with_header("Content-Type", "text/plain")
                    .with_header("Content-Encoding", "gzip")
                    .with_body_bytes(compressed);
            }
            Err(e) => warn!(error = %e, "gzip failed, sending echo uncompressed"),
        }
    }

    Response::text(text)
}

/// Handler para `/user-agent`
///
/// Sin header `User-Agent` responde 200 con body vacío.
pub fn user_agent_handler(req: &Request, _config: &ServerConfig) -> Response {
    Response::text(req.header("User-Agent").unwrap_or_default())
}

/// Handler de fallback: 404 sin body
pub fn not_found_handler(_req: &Request, _config: &ServerConfig) -> Response {
    Response::new(StatusCode::NotFound)
}

/// Revisa si una lista `Accept-Encoding` incluye `encoding`
///
/// Formato: `gzip, deflate;q=0.5, br`. Una codificación con `q=0`
/// cuenta como rechazada.
fn accepts_encoding(header: &str, encoding: &str) -> bool {
    header.split(',').any(|item| {
        let mut parts = item.split(';');
        let name = parts.next().unwrap_or_default().trim();
        if !name.eq_ignore_ascii_case(encoding) {
            return false;
        }

        let rejected = parts.any(|param| {
            param
                .trim()
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q == 0.0)
        });
        !rejected
    })
}

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
