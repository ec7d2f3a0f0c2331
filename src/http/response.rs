//! # Construcción y Escritura de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! y serializarlas al socket.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use mini_http::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("abc");
//!
//! assert_eq!(
//!     response.to_bytes(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
//! );
//! ```

use super::{Headers, StatusCode};
use std::io::{self, Write};

/// Versión que se escribe en la status line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Headers,

    /// Cuerpo de la respuesta; `None` = sin body ni `Content-Length`
    body: Option<Vec<u8>>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: None,
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// `Content-Length` es la longitud exacta del vector, aunque el
    /// contenido tenga bytes nulos o no sea UTF-8.
    ///
    /// # Ejemplo
    /// ```
    /// use mini_http::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body_bytes(vec![0x00, 0xFF, 0x00]);
    ///
    /// assert_eq!(response.headers().get("Content-Length"), Some("3"));
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.headers.insert("Content-Length", &body.len().to_string());
        self.body = Some(body);
        self
    }

    /// Respuesta `200 OK` con `Content-Type: text/plain`
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario (si existe)
    pub fn to_bytes(&self) -> Vec<u8> {
        let body_len = self.body.as_ref().map_or(0, Vec::len);
        let mut result = Vec::with_capacity(64 + body_len);

        result.extend_from_slice(format!("{} {}\r\n", HTTP_VERSION, self.status).as_bytes());

        for (name, value) in self.headers.iter() {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");

        if let Some(body) = &self.body {
            result.extend_from_slice(body);
        }

        result
    }

    /// Escribe la respuesta completa en `writer`
    ///
    /// `write_all` reintenta las escrituras parciales: o se envían todos
    /// los bytes o se retorna el error.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer que acepta como máximo `max` bytes por llamada
    struct ShortWriter {
        written: Vec<u8>,
        max: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.max);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_none());
    }

    #[test]
    fn test_empty_response_bytes() {
        assert_eq!(Response::new(StatusCode::Ok).to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(
            Response::new(StatusCode::NotFound).to_bytes(),
            b"HTTP/1.1 404 Not Found\r\n\r\n"
        );
    }

    #[test]
    fn test_with_body() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), Some(&b"Hello World"[..]));
        assert_eq!(response.headers().get("Content-Length"), Some("11"));
    }

    #[test]
    fn test_empty_body_sets_zero_length() {
        let response = Response::text("");

        assert_eq!(response.body(), Some(&b""[..]));
        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n"
        );
    }

    #[test]
    fn test_content_length_counts_bytes_not_chars() {
        let response = Response::text("ñandú");
        assert_eq!(response.headers().get("Content-Length"), Some("7"));
    }

    #[test]
    fn test_binary_body_with_nulls() {
        let binary_data = vec![0x00, 0x01, 0x00, 0xFF];
        let response = Response::new(StatusCode::Ok).with_body_bytes(binary_data.clone());

        let bytes = response.to_bytes();
        assert!(bytes.ends_with(&binary_data));
        assert_eq!(response.headers().get("Content-Length"), Some("4"));
    }

    #[test]
    fn test_write_to_survives_short_writes() {
        let response = Response::text(&"x".repeat(1000));
        let mut writer = ShortWriter {
            written: Vec::new(),
            max: 7,
        };

        response.write_to(&mut writer).unwrap();
        assert_eq!(writer.written, response.to_bytes());
    }

    #[test]
    fn test_write_zero_is_error() {
        let mut writer = ShortWriter {
            written: Vec::new(),
            max: 0,
        };
        let result = Response::text("abc").write_to(&mut writer);

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::WriteZero);
    }
}
