//! # Errores del Servidor
//! src/error.rs
//!
//! Taxonomía de errores del servidor. Los errores de parsing viven en
//! `http::request` y se re-exportan aquí.
//!
//! | Error                | Resultado en el wire                 |
//! |----------------------|--------------------------------------|
//! | `Bind` / `Accept`    | fatal al iniciar / se ignora el accept |
//! | `Malformed`          | `400 Bad Request` y cierre           |
//! | `Read`, `ConnectionClosed` | cierre sin respuesta           |
//! | `Write`              | cierre (ya no se puede responder)    |

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::http::request::ParseError;

/// Errores del ciclo de vida de una conexión y del listener
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo hacer bind del socket
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Falló un `accept()` puntual
    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    /// Error de I/O leyendo el request
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// El cliente cerró antes de mandar un solo byte
    #[error("connection closed before any request bytes arrived")]
    ConnectionClosed,

    /// El request no se pudo parsear
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),

    /// Error de I/O escribiendo la respuesta
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl ServerError {
    /// Indica si el error merece una respuesta `400 Bad Request`
    pub fn is_malformed(&self) -> bool {
        matches!(self, ServerError::Malformed(_))
    }
}

/// Errores de validación de la configuración
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max header bytes must be >= 16 (got {0})")]
    HeaderLimitTooSmall(usize),

    #[error("files directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("files path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
