//! # Configuración del Servidor
//! src/config.rs
//!
//! Dos niveles de configuración:
//!
//! - [`Config`]: argumentos CLI y variables de entorno (clap). Solo se usa
//!   al arrancar.
//! - [`ServerConfig`]: lo que necesitan los handlers. Se construye una vez,
//!   se comparte por `Arc` entre threads y nunca se modifica.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./mini_http --port 4221 --directory /tmp/files
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 FILES_DIR=/tmp/files ./mini_http
//! ```

use crate::error::ConfigError;
use crate::http::RequestLimits;
use clap::Parser;
use std::path::PathBuf;

/// Configuración de arranque del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "mini_http")]
#[command(about = "Servidor HTTP/1.1 mínimo: un thread por conexión")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz para /files/. Sin él, /files/* responde 500
    #[arg(short, long, env = "FILES_DIR")]
    pub directory: Option<PathBuf>,

    /// Tamaño máximo del bloque de headers en bytes
    #[arg(long = "max-header-bytes", default_value = "8192", env = "MAX_HEADER_BYTES")]
    pub max_header_bytes: usize,

    /// Tamaño máximo del body en bytes
    #[arg(long = "max-body-bytes", default_value = "1048576", env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_header_bytes < 16 {
            return Err(ConfigError::HeaderLimitTooSmall(self.max_header_bytes));
        }

        if let Some(dir) = &self.directory {
            if !dir.exists() {
                return Err(ConfigError::DirectoryMissing(dir.clone()));
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.clone()));
            }
        }

        Ok(())
    }

    /// Límites para la lectura de requests
    pub fn limits(&self) -> RequestLimits {
        RequestLimits {
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Configuración de solo lectura para los handlers
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            files_root: self.directory.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4221,
            host: "0.0.0.0".to_string(),
            directory: None,
            max_header_bytes: 8 * 1024,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Configuración compartida por todos los handlers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Raíz de /files/; `None` = servicio de archivos deshabilitado
    pub files_root: Option<PathBuf>,
}

impl ServerConfig {
    pub fn with_files_root(root: impl Into<PathBuf>) -> Self {
        Self {
            files_root: Some(root.into()),
        }
    }
}
