//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementacion del servidor TCP que maneja multiples conexiones simultaneas
//! usando threads. Cada conexión se procesa en su propio thread; el único
//! punto secuencial es el loop de `accept()`.
//!
//! Los threads solo comparten el `Router` y el `ServerConfig`, ambos de
//! solo lectura detrás de `Arc`, así que no hace falta ningún lock.

use super::connection::serve_tcp;
use crate::config::{Config, ServerConfig};
use crate::error::ServerError;
use crate::http::RequestLimits;
use crate::router::Router;
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    config: Arc<ServerConfig>,
    limits: RequestLimits,
}

impl Server {
    /// Hace bind del socket con la tabla de rutas por defecto
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        Self::bind_with_router(config, Router::with_default_routes())
    }

    /// Hace bind del socket con un router propio
    pub fn bind_with_router(config: &Config, router: Router) -> Result<Self, ServerError> {
        let address = config.address();
        info!("Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        Ok(Self {
            listener,
            router: Arc::new(router),
            config: Arc::new(config.server_config()),
            limits: config.limits(),
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop de accept: bloquea el thread actual indefinidamente
    ///
    /// Los errores de `accept()` se registran y el loop sigue; ningún
    /// error de una conexión detiene al listener.
    pub fn run(&self) -> Result<(), ServerError> {
        match self.local_addr() {
            Ok(addr) => info!("Servidor escuchando en {}", addr),
            Err(e) => warn!(error = %e, "could not read local address"),
        }
        info!("Modo concurrente: un thread por conexion");

        let mut next_id: u64 = 0;

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %ServerError::Accept(e), "accept failed");
                    continue;
                }
            };

            next_id += 1;
            let id = next_id;

            let peer = match stream.peer_addr() {
                Ok(peer) => peer,
                Err(e) => {
                    warn!(error = %e, "peer disconnected before dispatch");
                    continue;
                }
            };

            let router = Arc::clone(&self.router);
            let config = Arc::clone(&self.config);
            let limits = self.limits;

            let spawned = thread::Builder::new()
                .name(format!("conn-{}", id))
                .spawn(move || serve_tcp(stream, peer, id, router, config, limits));

            if let Err(e) = spawned {
                error!(error = %e, id, "failed to spawn connection thread");
            }
        }

        Ok(())
    }
}
