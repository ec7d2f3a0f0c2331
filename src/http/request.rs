//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser en dos etapas: primero la request line, luego los headers.
//! Cualquier entrada que no produzca método, path y versión se rechaza.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/a.bin HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/8.4.0\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD PATH VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Solo si hay `Content-Length` y el método admite body

use super::Headers;
use thiserror::Error;

/// Separador entre el bloque de headers y el body
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es soportado
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "PATCH" => Ok(Method::PATCH),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::OPTIONS => "OPTIONS",
        }
    }

    /// Indica si el método puede llevar body
    ///
    /// `GET` y `HEAD` nunca leen body aunque traigan `Content-Length`.
    pub fn permits_body(&self) -> bool {
        !matches!(self, Method::GET | Method::HEAD)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path tal cual llegó (ej: "/echo/abc")
    path: String,

    /// Versión HTTP (ej: "HTTP/1.1")
    version: String,

    /// Headers HTTP, búsqueda case-insensitive
    headers: Headers,

    /// Body, presente solo si el request trae `Content-Length`
    body: Option<Vec<u8>>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene exactamente 3 tokens, o no es UTF-8
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Método HTTP no soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Versión HTTP que no empieza con `HTTP/`
    #[error("Invalid HTTP version: {0}")]
    InvalidHttpVersion(String),

    /// Header sin `:` o con nombre vacío
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// `Content-Length` que no es un entero no negativo
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// El bloque de headers supera el límite configurado
    #[error("Request head exceeds {limit} bytes")]
    HeadersTooLarge { limit: usize },

    /// El body declarado supera el límite configurado
    #[error("Request body of {length} bytes exceeds {limit} bytes")]
    BodyTooLarge { length: usize, limit: usize },

    /// Llegaron menos bytes de body que los declarados
    #[error("Incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },
}

/// Busca el final del bloque de headers
///
/// Retorna el índice donde empieza `\r\n\r\n`, si existe.
pub fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

impl Request {
    /// Parsea un request completo desde bytes
    ///
    /// El buffer debe contener el request entero: si `Content-Length`
    /// declara más bytes de los que hay, retorna `IncompleteBody`.
    /// Los bytes sobrantes después del body se ignoran.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use mini_http::http::{Method, Request};
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, rest) = match find_head_end(buffer) {
            Some(end) => (&buffer[..end], &buffer[end + HEAD_TERMINATOR.len()..]),
            None => (buffer, &buffer[buffer.len()..]),
        };

        let mut request = Self::parse_head(head)?;

        if let Some(expected) = request.content_length()? {
            if rest.len() < expected {
                return Err(ParseError::IncompleteBody {
                    expected,
                    received: rest.len(),
                });
            }
            request.set_body(rest[..expected].to_vec());
        }

        Ok(request)
    }

    /// Parsea el bloque de headers (request line + headers), sin body
    ///
    /// `head` son los bytes anteriores a `\r\n\r\n`.
    pub fn parse_head(head: &[u8]) -> Result<Self, ParseError> {
        // Convertir a string (validando que sea UTF-8 válido)
        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidRequestLine)?;

        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head.split("\r\n");

        // 1. Request line
        let start_line = lines.next().ok_or(ParseError::EmptyRequest)?;
        let (method, path, version) = Self::parse_request_line(start_line)?;

        // 2. Headers
        let headers = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
            body: None,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        let [method, path, version] = parts.as_slice() else {
            return Err(ParseError::InvalidRequestLine);
        };

        let method = Method::from_str(method)?;

        if !version.starts_with("HTTP/") {
            return Err(ParseError::InvalidHttpVersion(version.to_string()));
        }

        Ok((method, path.to_string(), version.to_string()))
    }

    /// Parsea los headers hasta la primera línea vacía
    ///
    /// Cada header tiene formato: "Name: Value"
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();

        for line in lines {
            if line.is_empty() {
                break;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

            let name = name.trim();
            if name.is_empty() {
                return Err(ParseError::InvalidHeader(line.to_string()));
            }

            headers.insert(name, value.trim());
        }

        Ok(headers)
    }

    /// Longitud de body que hay que leer
    ///
    /// `None` si el método no admite body o no hay `Content-Length`.
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        if !self.method.permits_body() {
            return Ok(None);
        }

        let Some(raw) = self.headers.get("Content-Length") else {
            return Ok(None);
        };

        // Solo dígitos: `usize::from_str` aceptaría un `+` inicial
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidContentLength(raw.to_string()));
        }
        raw.parse::<usize>()
            .map(Some)
            .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))
    }

    pub(crate) fn set_body(&mut self, body: Vec<u8>) {
        self.body = Some(body);
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene el body del request, si lo hay
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
