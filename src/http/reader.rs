//! # Lectura de Requests desde el Socket
//! src/http/reader.rs
//!
//! Un solo `read()` no garantiza traer el request completo. Aquí se lee
//! hasta encontrar `\r\n\r\n` y después exactamente `Content-Length`
//! bytes de body. No hay soporte para chunked ni pipelining: lo que
//! llegue después del body se descarta.

use super::request::{find_head_end, ParseError, Request, HEAD_TERMINATOR};
use crate::error::ServerError;
use std::io::{ErrorKind, Read};
use tracing::trace;

/// Tamaño de cada lectura del socket
const READ_CHUNK: usize = 4096;

/// Límites de tamaño aplicados al leer un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    /// Máximo de bytes antes de `\r\n\r\n`
    pub max_header_bytes: usize,

    /// Máximo `Content-Length` aceptado
    pub max_body_bytes: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8 * 1024,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Lee y parsea un request completo desde `reader`
///
/// # Errores
///
/// - `ConnectionClosed` si el peer cierra sin mandar nada
/// - `Read` ante errores de I/O
/// - `Malformed` si el request no se puede parsear o excede los límites
pub fn read_request<R: Read>(reader: &mut R, limits: &RequestLimits) -> Result<Request, ServerError> {
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    // 1. Leer hasta el final de los headers
    let (head_end, body_start) = loop {
        if let Some(end) = find_head_end(&buffer) {
            break (end, end + HEAD_TERMINATOR.len());
        }

        if buffer.len() > limits.max_header_bytes {
            return Err(ParseError::HeadersTooLarge {
                limit: limits.max_header_bytes,
            }
            .into());
        }

        let n = read_some(reader, &mut chunk)?;
        if n == 0 {
            if buffer.is_empty() {
                return Err(ServerError::ConnectionClosed);
            }
            // EOF sin línea vacía: se parsea lo recibido como headers
            break (buffer.len(), buffer.len());
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    if head_end > limits.max_header_bytes {
        return Err(ParseError::HeadersTooLarge {
            limit: limits.max_header_bytes,
        }
        .into());
    }

    let mut request = Request::parse_head(&buffer[..head_end])?;

    // 2. Leer el body según Content-Length
    let Some(expected) = request.content_length()? else {
        return Ok(request);
    };

    if expected > limits.max_body_bytes {
        return Err(ParseError::BodyTooLarge {
            length: expected,
            limit: limits.max_body_bytes,
        }
        .into());
    }

    let mut body = buffer.split_off(body_start);
    body.truncate(expected);

    while body.len() < expected {
        let want = (expected - body.len()).min(READ_CHUNK);
        let n = read_some(reader, &mut chunk[..want])?;
        if n == 0 {
            return Err(ParseError::IncompleteBody {
                expected,
                received: body.len(),
            }
            .into());
        }
        body.extend_from_slice(&chunk[..n]);
    }

    trace!(bytes = body.len(), "request body read");
    request.set_body(body);
    Ok(request)
}

/// Un `read()` que reintenta ante `Interrupted`
fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ServerError> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ServerError::Read(e)),
        }
    }
}
