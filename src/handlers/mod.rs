//! # Handlers del Servidor
//!
//! Cada handler es una función pura `(Request, ServerConfig) → Response`
//! sin estado entre llamadas.
//!
//! - **basic**: root, echo, user-agent y not-found
//! - **files**: archivos estáticos bajo el directorio configurado

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::files_handler;
