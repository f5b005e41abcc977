//! # Files
//! src/handlers/files.rs
//!
//! - `GET /files/{name}`: lee el blob del storage
//! - `POST /files/{name}`: escribe el body del request en el storage
//!
//! Al leer, el contenido se procesa línea por línea y los terminadores
//! (`\n`, `\r\n`) se eliminan: un archivo con varias líneas NO vuelve
//! byte a byte.

use crate::http::{Response, StatusCode};
use crate::storage::BlobStore;

/// Handler para GET /files/{name}
///
/// Cualquier error de lectura (no existe, permisos, etc.) es 404.
pub fn get_file_handler(name: &str, store: &dyn BlobStore) -> Response {
    if name.is_empty() {
        return Response::text(StatusCode::Ok, "");
    }

    match store.read(name) {
        Ok(contents) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(join_lines(&contents)),
        Err(e) => {
            tracing::warn!(file = name, error = %e, "failed to read file");
            Response::new(StatusCode::NotFound)
        }
    }
}

/// Handler para POST /files/{name}
///
/// Sin nombre es 400; si la escritura falla es 500.
pub fn post_file_handler(name: &str, body: &[u8], store: &dyn BlobStore) -> Response {
    if name.is_empty() {
        return Response::new(StatusCode::BadRequest);
    }

    match store.write(name, body) {
        Ok(()) => Response::new(StatusCode::Created),
        Err(e) => {
            tracing::error!(file = name, error = %e, "failed to write file");
            Response::new(StatusCode::InternalServerError)
        }
    }
}

/// Concatena las líneas sin sus terminadores
fn join_lines(contents: &[u8]) -> Vec<u8> {
    let mut joined = Vec::with_capacity(contents.len());

    for line in contents.split(|&byte| byte == b'\n') {
        joined.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(line));
    }

    joined
}
