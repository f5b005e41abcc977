//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Lee un único request desde el stream de una conexión.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notes HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION` (la versión no se valida)
//! 2. **Headers**: `Name: Value`, solo se guardan los reconocidos
//! 3. **Empty Line**: separa headers del body
//! 4. **Body**: solo en POST y solo si hay `Content-Length`

use super::headers::HeaderSet;
use std::io::{self, BufRead, Read};
use thiserror::Error;

/// Máximo de bytes de una línea del head (request line o header)
pub const MAX_LINE_BYTES: u64 = 8 * 1024;

/// Método HTTP del request
///
/// Solo GET y POST tienen rutas; cualquier otro token se conserva tal cual
/// para que el router responda 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    Other(String),
}

impl Method {
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que abortan la conexión sin enviar respuesta
#[derive(Debug, Error)]
pub enum ParseError {
    /// El stream se cerró antes de una request line completa
    #[error("connection closed before a complete request line")]
    ConnectionClosed,

    /// Falló la lectura de la request line o de un header
    #[error("failed to read request head: {0}")]
    Framing(#[source] io::Error),

    /// El body declarado es más largo que lo que llegó
    #[error("body underrun: expected {expected} bytes, received {received}")]
    BodyUnderrun { expected: usize, received: usize },

    /// Otro error de I/O leyendo el body
    #[error("failed to read request body: {0}")]
    Body(#[source] io::Error),
}

/// Request parseado, inmutable después de crearse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,

    /// Path tal cual llegó (vacío si la request line no lo traía)
    path: String,

    headers: HeaderSet,

    /// Presente solo en POST con `Content-Length`
    body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, path: &str, headers: HeaderSet, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers,
            body,
        }
    }

    /// Lee un request completo desde un stream con buffer
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use concurrent_http::http::{Method, Request};
    ///
    /// let raw: &[u8] = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let mut reader = raw;
    /// let request = Request::read_from(&mut reader).unwrap();
    ///
    /// assert_eq!(request.method(), &Method::GET);
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.headers().user_agent(), Some("curl"));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let (method, path) = Self::read_request_line(reader)?;
        let headers = Self::read_headers(reader)?;
        let body = Self::read_body(reader, &method, &headers)?;

        Ok(Self {
            method,
            path,
            headers,
            body,
        })
    }

    /// Lee la request line: `METHOD PATH ...`
    ///
    /// Con menos de dos tokens el path queda vacío; el router lo trata
    /// como 404.
    pub(crate) fn read_request_line<R: BufRead>(reader: &mut R) -> Result<(Method, String), ParseError> {
        let mut raw = Vec::new();
        let read = Self::read_head_line(reader, &mut raw)?;

        if read == 0 || raw.last() != Some(&b'\n') {
            return Err(ParseError::ConnectionClosed);
        }

        let line = String::from_utf8_lossy(&raw);
        let mut parts = line.trim().split(' ');

        let method = Method::from_token(parts.next().unwrap_or_default());
        let path = parts.next().unwrap_or_default().to_string();

        Ok((method, path))
    }

    /// Lee headers hasta una línea vacía o el fin del stream
    ///
    /// Una línea cortada por el fin del stream (sin `\n`) se descarta.
    pub(crate) fn read_headers<R: BufRead>(reader: &mut R) -> Result<HeaderSet, ParseError> {
        let mut headers = HeaderSet::new();
        let mut raw = Vec::new();

        loop {
            raw.clear();
            Self::read_head_line(reader, &mut raw)?;

            if raw.last() != Some(&b'\n') {
                break;
            }

            let line = String::from_utf8_lossy(&raw);
            let line = line.trim();
            if line.is_empty() {
                break;
            }

            if let Some((name, value)) = line.split_once(':') {
                headers.insert_raw(name.trim(), value.trim());
            }
        }

        Ok(headers)
    }

    /// Lee una línea del head de a lo sumo `MAX_LINE_BYTES`
    ///
    /// Una línea que llega al límite sin `\n` es un error de framing.
    fn read_head_line<R: BufRead>(reader: &mut R, raw: &mut Vec<u8>) -> Result<usize, ParseError> {
        let read = reader
            .by_ref()
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', raw)
            .map_err(ParseError::Framing)?;

        if read as u64 >= MAX_LINE_BYTES && raw.last() != Some(&b'\n') {
            return Err(ParseError::Framing(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds {} bytes", MAX_LINE_BYTES),
            )));
        }

        Ok(read)
    }

    /// Lee exactamente `Content-Length` bytes en un POST
    ///
    /// El buffer crece a medida que llegan bytes, nunca se reserva el
    /// tamaño declarado por el cliente.
    pub(crate) fn read_body<R: Read>(
        reader: &mut R,
        method: &Method,
        headers: &HeaderSet,
    ) -> Result<Option<Vec<u8>>, ParseError> {
        if *method != Method::POST {
            return Ok(None);
        }

        let expected = match headers.content_length() {
            Some(length) => length,
            None => return Ok(None),
        };

        let mut body = Vec::new();
        let received = reader
            .take(expected as u64)
            .read_to_end(&mut body)
            .map_err(ParseError::Body)?;

        if received < expected {
            return Err(ParseError::BodyUnderrun { expected, received });
        }

        Ok(Some(body))
    }

    // === Accesores ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
