//! # mini_http - Entry Point
//! src/main.rs
//!
//! Parsea la configuración (CLI + env), inicializa el logging y arranca
//! el loop de accept. El nivel de log se controla con `RUST_LOG`.

use mini_http::config::Config;
use mini_http::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mini_http=info")),
        )
        .with_thread_names(true)
        .init();

    let config = Config::new();

    if let Err(e) = config.validate() {
        error!("Configuración inválida: {}", e);
        std::process::exit(2);
    }

    info!(
        address = %config.address(),
        directory = ?config.directory,
        max_header_bytes = config.max_header_bytes,
        max_body_bytes = config.max_body_bytes,
        "Configuración"
    );

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
