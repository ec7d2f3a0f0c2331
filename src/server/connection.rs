//! # Ciclo de Vida de una Conexión
//! src/server/connection.rs
//!
//! accept → read → parse → route → respond → close
//!
//! Todo error se resuelve dentro de la conexión: nunca llega al listener
//! ni afecta a otras conexiones. No hay reintentos.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::http::{read_request, RequestLimits, Response, StatusCode};
use crate::router::Router;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// Atiende un único request sobre `stream`
///
/// Retorna el status enviado, o `None` si la conexión se cerró sin
/// respuesta (el peer no mandó nada).
///
/// Un request malformado se contesta con `400 Bad Request` sin body.
pub fn handle_connection<S: Read + Write>(
    stream: &mut S,
    router: &Router,
    config: &ServerConfig,
    limits: &RequestLimits,
) -> Result<Option<StatusCode>, ServerError> {
    let start = Instant::now();

    let request = match read_request(stream, limits) {
        Ok(request) => request,
        Err(ServerError::ConnectionClosed) => {
            debug!("peer closed without sending a request");
            return Ok(None);
        }
        Err(e) if e.is_malformed() => {
            info!(error = %e, "malformed request");
            let response = Response::new(StatusCode::BadRequest);
            response.write_to(stream).map_err(ServerError::Write)?;
            return Ok(Some(response.status()));
        }
        Err(e) => return Err(e),
    };

    let route = router.select(&request);
    let response = (route.handler)(&request, config);
    response.write_to(stream).map_err(ServerError::Write)?;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        warn!(route = route.name, "{} {} -> {} ({:.2}ms)", request.method(), request.path(), status, elapsed_ms);
    } else {
        info!(route = route.name, "{} {} -> {} ({:.2}ms)", request.method(), request.path(), status, elapsed_ms);
    }

    Ok(Some(status))
}

/// Cuerpo del thread de una conexión TCP
///
/// Abre un span con el peer y el id de conexión, atiende el request y
/// cierra el socket. Los errores solo se registran.
pub fn serve_tcp(
    mut stream: TcpStream,
    peer: SocketAddr,
    id: u64,
    router: Arc<Router>,
    config: Arc<ServerConfig>,
    limits: RequestLimits,
) {
    let span = info_span!("connection", id, %peer);
    let _guard = span.enter();

    if let Err(e) = handle_connection(&mut stream, &router, &config, &limits) {
        warn!(error = %e, "connection dropped");
    }

    // El cierre lo hace el drop; shutdown avisa EOF al cliente de inmediato
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        debug!(error = %e, "shutdown failed");
    }
}
