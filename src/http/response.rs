//! # Construcción de Respuestas HTTP
//!
//! Un handler produce un `Response`: status + headers + body. Al
//! serializarlo se separa en dos partes:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n            <- status line
//! Content-Type: text/plain\r\n   <- tail: headers,
//! Content-Length: 3\r\n
//! \r\n                           <-       línea vacía
//! abc                            <-       y body
//! ```
//!
//! El tail siempre termina con la línea vacía aunque no haya body.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use concurrent_http::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("abc");
//!
//! assert_eq!(
//!     response.to_bytes(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
//! );
//! ```

use super::StatusCode;
use std::io::{self, Write};

/// Respuesta de un handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Vec<(String, String)>,

    body: Vec<u8>,
}

impl Response {
    /// Respuesta sin headers ni body; su tail es solo `\r\n`
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header
    ///
    /// Si ya existe, se sobrescribe conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el body desde un string y agrega `Content-Length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el body desde bytes y agrega `Content-Length`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.add_header("Content-Length", &body.len().to_string());
        self.body = body;
        self
    }

    /// Respuesta `text/plain` con el body indicado
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// Todo lo que va después de la status line: headers, línea vacía y body
    pub fn tail(&self) -> Vec<u8> {
        let mut tail = Vec::new();

        for (name, value) in &self.headers {
            tail.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }
        tail.extend_from_slice(b"\r\n");
        tail.extend_from_slice(&self.body);

        tail
    }

    /// Respuesta completa: `HTTP/1.1 <status>\r\n` + tail
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = format!("HTTP/1.1 {}\r\n", self.status).into_bytes();
        bytes.extend_from_slice(&self.tail());
        bytes
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Escribe la respuesta completa en una sola llamada de escritura
///
/// No hay reintentos: si falla, el caller cierra la conexión.
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> io::Result<()> {
    writer.write_all(&response.to_bytes())?;
    writer.flush()
}
