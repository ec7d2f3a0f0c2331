//! # Handler de Archivos Estáticos
//!
//! `GET /files/<name>` devuelve el contenido de `<root>/<name>` como
//! `application/octet-stream`. El archivo se lee completo en memoria y
//! `Content-Length` es su tamaño exacto en bytes.
//!
//! | Situación                               | Respuesta |
//! |-----------------------------------------|-----------|
//! | método distinto de GET                  | 405       |
//! | servidor sin directorio raíz            | 500       |
//! | nombre con `..`, absoluto o vacío       | 404       |
//! | el path resuelto escapa de la raíz      | 404       |
//! | no existe / es un directorio            | 404       |
//! | la raíz configurada no es accesible     | 500       |
//! | error de permisos o de I/O              | 500       |

use crate::config::ServerConfig;
use crate::http::{Method, Request, Response, StatusCode};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const FILES_PREFIX: &str = "/files/";

/// Motivos por los que no se pudo servir un archivo
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file serving is disabled (no root directory)")]
    NoRoot,

    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path escapes the files root: {}", .0.display())]
    OutsideRoot(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Status HTTP con el que se reporta el error
    pub fn status(&self) -> StatusCode {
        match self {
            FileError::NoRoot | FileError::Io { .. } => StatusCode::InternalServerError,
            FileError::InvalidName(_) | FileError::NotFound(_) | FileError::OutsideRoot(_) => {
                StatusCode::NotFound
            }
        }
    }
}

/// Handler para `/files/<name>`
pub fn files_handler(req: &Request, config: &ServerConfig) -> Response {
    if req.method() != Method::GET {
        return Response::new(StatusCode::MethodNotAllowed).with_header("Allow", "GET");
    }

    let name = req.path().strip_prefix(FILES_PREFIX).unwrap_or_default();

    match read_file(config, name) {
        Ok(contents) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(contents),
        Err(e) => {
            match e.status() {
                StatusCode::NotFound => debug!(error = %e, "file not served"),
                _ => warn!(error = %e, "file not served"),
            }
            Response::new(e.status())
        }
    }
}

/// Lee `<root>/<name>` completo
pub fn read_file(config: &ServerConfig, name: &str) -> Result<Vec<u8>, FileError> {
    let root = config.files_root.as_deref().ok_or(FileError::NoRoot)?;
    let path = resolve(root, name)?;

    fs::read(&path).map_err(|e| classify(path, e))
}

/// Resuelve `name` dentro de `root` sin permitir salir de él
///
/// Rechaza nombres vacíos, absolutos o con `..`. Después canonicaliza
/// (resolviendo symlinks) y verifica que el resultado siga bajo la raíz.
pub fn resolve(root: &Path, name: &str) -> Result<PathBuf, FileError> {
    let relative = Path::new(name);

    let is_plain = !name.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !is_plain {
        return Err(FileError::InvalidName(name.to_string()));
    }

    // Una raíz inaccesible es un problema del servidor, no del request
    let root = root.canonicalize().map_err(|source| FileError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    let candidate = root.join(relative);
    let resolved = candidate.canonicalize().map_err(|e| classify(candidate, e))?;

    if !resolved.starts_with(&root) {
        return Err(FileError::OutsideRoot(resolved));
    }
    if resolved.is_dir() {
        return Err(FileError::NotFound(resolved));
    }

    Ok(resolved)
}

/// Separa "no hay tal archivo" (404) de las fallas de I/O reales (500)
///
/// Un componente intermedio que no es directorio (`a.txt/b`), un byte
/// nulo o un nombre demasiado largo tampoco nombran un archivo existente.
fn classify(path: PathBuf, error: io::Error) -> FileError {
    match error.kind() {
        ErrorKind::NotFound
        | ErrorKind::NotADirectory
        | ErrorKind::InvalidInput
        | ErrorKind::InvalidFilename => FileError::NotFound(path),
        _ => FileError::Io { path, source: error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(method: &str, path: &str) -> Request {
        Request::parse(format!("{} {} HTTP/1.1\r\n\r\n", method, path).as_bytes()).unwrap()
    }

    fn setup() -> (TempDir, ServerConfig) {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::with_files_root(dir.path());
        (dir, config)
    }

    #[test]
    fn test_serves_binary_file() {
        let (dir, config) = setup();
        let contents = vec![0x00, 0xFF, 0xFE, b'a', 0x00, 0x80];
        fs::write(dir.path().join("blob.bin"), &contents).unwrap();

        let response = files_handler(&request("GET", "/files/blob.bin"), &config);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().get("Content-Type"), Some("application/octet-stream"));
        assert_eq!(response.headers().get("Content-Length"), Some("6"));
        assert_eq!(response.body(), Some(&contents[..]));
    }

    #[test]
    fn test_serves_empty_file() {
        let (dir, config) = setup();
        fs::write(dir.path().join("empty"), b"").unwrap();

        let response = files_handler(&request("GET", "/files/empty"), &config);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().get("Content-Length"), Some("0"));
    }

    #[test]
    fn test_serves_nested_file() {
        let (dir, config) = setup();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("x.txt"), b"nested").unwrap();

        let response = files_handler(&request("GET", "/files/sub/x.txt"), &config);
        assert_eq!(response.body(), Some(&b"nested"[..]));
    }

    #[test]
    fn test_missing_file() {
        let (_dir, config) = setup();
        let response = files_handler(&request("GET", "/files/nope.txt"), &config);

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_none());
    }

    #[test]
    fn test_directory_is_not_found() {
        let (dir, config) = setup();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let response = files_handler(&request("GET", "/files/sub"), &config);
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_non_get_is_method_not_allowed() {
        let (dir, config) = setup();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();

        for method in ["POST", "PUT", "DELETE", "HEAD"] {
            let response = files_handler(&request(method, "/files/a.txt"), &config);
            assert_eq!(response.status(), StatusCode::MethodNotAllowed, "{}", method);
            assert!(response.body().is_none());
        }
    }

    #[test]
    fn test_no_root_is_server_error() {
        let response = files_handler(&request("GET", "/files/a.txt"), &ServerConfig::default());

        assert_eq!(response.status(), StatusCode::InternalServerError);
        assert!(response.body().is_none());
    }

    #[test]
    fn test_traversal_rejected() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(outer.path().join("secret.txt"), b"secret").unwrap();
        let config = ServerConfig::with_files_root(&root);

        for path in ["/files/../secret.txt", "/files/a/../../secret.txt", "/files/"] {
            let response = files_handler(&request("GET", path), &config);
            assert_eq!(response.status(), StatusCode::NotFound, "{}", path);
        }
    }

    #[test]
    fn test_absolute_name_rejected() {
        let (_dir, config) = setup();
        let root = config.files_root.clone().unwrap();

        assert!(matches!(
            resolve(&root, "/etc/passwd"),
            Err(FileError::InvalidName(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(outer.path().join("secret.txt"), b"secret").unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), root.join("link")).unwrap();

        let result = resolve(&root, "link");
        assert!(matches!(result, Err(FileError::OutsideRoot(_))));
    }

    #[test]
    fn test_path_under_regular_file_is_not_found() {
        let (dir, config) = setup();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();

        for path in ["/files/a.txt/", "/files/a.txt/b"] {
            let response = files_handler(&request("GET", path), &config);
            assert_eq!(response.status(), StatusCode::NotFound, "{}", path);
            assert!(response.body().is_none());
        }
    }

    #[test]
    fn test_unnameable_file_is_not_found() {
        let (_dir, config) = setup();

        let long_name = "x".repeat(300);
        for name in ["a\0b", long_name.as_str()] {
            let result = read_file(&config, name);
            assert!(matches!(result, Err(FileError::NotFound(_))), "{:?}", result);
        }
    }

    #[test]
    fn test_missing_root_is_server_error() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("gone");
        fs::create_dir(&root).unwrap();
        let config = ServerConfig::with_files_root(&root);
        fs::remove_dir(&root).unwrap();

        let response = files_handler(&request("GET", "/files/a.txt"), &config);
        assert_eq!(response.status(), StatusCode::InternalServerError);
        assert!(matches!(read_file(&config, "a.txt"), Err(FileError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_server_error() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, config) = setup();
        let path = dir.path().join("locked.txt");
        fs::write(&path, b"locked").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignora los permisos: no hay forma de provocar el error
        if fs::read(&path).is_ok() {
            return;
        }

        let response = files_handler(&request("GET", "/files/locked.txt"), &config);
        assert_eq!(response.status(), StatusCode::InternalServerError);
        assert!(response.body().is_none());
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(FileError::NoRoot.status(), StatusCode::InternalServerError);
        assert_eq!(FileError::NotFound(PathBuf::from("x")).status(), StatusCode::NotFound);
        let io_error = FileError::Io {
            path: PathBuf::from("x"),
            source: io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(io_error.status(), StatusCode::InternalServerError);
    }
}
