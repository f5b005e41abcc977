//! # Worker de Conexión
//! src/server/connection.rs
//!
//! Máquina de estados de una conexión:
//!
//! ```text
//! Accepted → LineRead → HeadersRead → (BodyRead si POST) → Routed → ResponseWritten → Closed
//! ```
//!
//! Un fallo leyendo la línea, los headers o el body aborta directo a
//! `Closed` sin escribir respuesta. El stream se cierra siempre al salir,
//! porque `Connection` es dueña del stream y lo suelta en su `Drop`.

use crate::http::{write_response, ParseError, Request, StatusCode};
use crate::router::Router;
use std::fmt;
use std::io::{self, BufReader, Read, Write};
use thiserror::Error;

/// Estado alcanzado por una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Accepted,
    LineRead,
    HeadersRead,
    BodyRead,
    Routed,
    ResponseWritten,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Accepted => "accepted",
            ConnectionState::LineRead => "line-read",
            ConnectionState::HeadersRead => "headers-read",
            ConnectionState::BodyRead => "body-read",
            ConnectionState::Routed => "routed",
            ConnectionState::ResponseWritten => "response-written",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Motivo por el que una conexión terminó sin completar su respuesta
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Falló la lectura del request; `failed_at` es el paso que no se completó
    #[error("request aborted at {failed_at}: {source}")]
    Parse {
        failed_at: ConnectionState,
        #[source]
        source: ParseError,
    },

    /// Falló el envío de la respuesta (no se reintenta)
    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}

impl ConnectionError {
    fn at(failed_at: ConnectionState) -> impl FnOnce(ParseError) -> Self {
        move |source| ConnectionError::Parse { failed_at, source }
    }
}

/// Una conexión aceptada y su estado
pub struct Connection<S: Read + Write> {
    stream: S,
    state: ConnectionState,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            state: ConnectionState::Accepted,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Procesa el único request de la conexión y escribe la respuesta
    pub fn serve(&mut self, router: &Router) -> Result<StatusCode, ConnectionError> {
        let request = self.read_request()?;

        let response = router.route(&request);
        self.state = ConnectionState::Routed;

        write_response(&mut self.stream, &response).map_err(ConnectionError::Write)?;
        self.state = ConnectionState::ResponseWritten;

        tracing::info!(
            method = %request.method(),
            path = request.path(),
            status = response.status().as_u16(),
            "request served"
        );

        Ok(response.status())
    }

    fn read_request(&mut self) -> Result<Request, ConnectionError> {
        let mut reader = BufReader::new(&mut self.stream);

        let (method, path) = Request::read_request_line(&mut reader)
            .map_err(ConnectionError::at(ConnectionState::LineRead))?;
        self.state = ConnectionState::LineRead;

        let headers = Request::read_headers(&mut reader)
            .map_err(ConnectionError::at(ConnectionState::HeadersRead))?;
        self.state = ConnectionState::HeadersRead;

        let body = Request::read_body(&mut reader, &method, &headers)
            .map_err(ConnectionError::at(ConnectionState::BodyRead))?;
        if body.is_some() {
            self.state = ConnectionState::BodyRead;
        }

        Ok(Request::new(method, &path, headers, body))
    }
}

impl<S: Read + Write> Drop for Connection<S> {
    fn drop(&mut self) {
        tracing::debug!(last_state = %self.state, "connection closed");
        self.state = ConnectionState::Closed;
    }
}

/// Atiende una conexión completa; el stream queda cerrado al retornar
pub fn handle_connection<S: Read + Write>(
    stream: S,
    router: &Router,
) -> Result<StatusCode, ConnectionError> {
    Connection::new(stream).serve(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::EchoEncoding;
    use crate::storage::DirStore;
    use std::io::Cursor;
    use std::sync::Arc;

    /// Stream en memoria: lee de `input`, escribe en `output`
    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
        fail_writes: bool,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
                fail_writes: false,
            }
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer gone"));
            }
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn router() -> Router {
        Router::new(
            Arc::new(DirStore::new("/nonexistent/concurrent_http")),
            EchoEncoding::Advertise,
        )
    }

    #[test]
    fn test_serve_echo() {
        let mut connection = Connection::new(MockStream::new(b"GET /echo/abc HTTP/1.1\r\n\r\n"));

        let status = connection.serve(&router()).unwrap();

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(connection.state(), ConnectionState::ResponseWritten);
        assert_eq!(
            connection.stream.output,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
        );
    }

    #[test]
    fn test_empty_stream_aborts_without_response() {
        let mut connection = Connection::new(MockStream::new(b""));

        let result = connection.serve(&router());

        assert!(matches!(
            result,
            Err(ConnectionError::Parse {
                failed_at: ConnectionState::LineRead,
                source: ParseError::ConnectionClosed,
            })
        ));
        assert_eq!(connection.state(), ConnectionState::Accepted);
        assert!(connection.stream.output.is_empty());
    }

    #[test]
    fn test_body_underrun_aborts_without_response() {
        let raw = b"POST /files/x HTTP/1.1\r\nContent-Length: 20\r\n\r\nshort";
        let mut connection = Connection::new(MockStream::new(raw));

        let result = connection.serve(&router());

        assert!(matches!(
            result,
            Err(ConnectionError::Parse {
                failed_at: ConnectionState::BodyRead,
                source: ParseError::BodyUnderrun { .. },
            })
        ));
        assert_eq!(connection.state(), ConnectionState::HeadersRead);
        assert!(connection.stream.output.is_empty());
    }

    #[test]
    fn test_write_failure() {
        let mut stream = MockStream::new(b"GET / HTTP/1.1\r\n\r\n");
        stream.fail_writes = true;
        let mut connection = Connection::new(stream);

        let result = connection.serve(&router());

        assert!(matches!(result, Err(ConnectionError::Write(_))));
        assert_eq!(connection.state(), ConnectionState::Routed);
    }

    #[test]
    fn test_handle_connection_not_allowed() {
        let status = handle_connection(MockStream::new(b"DELETE / HTTP/1.1\r\n\r\n"), &router()).unwrap();
        assert_eq!(status, StatusCode::MethodNotAllowed);
    }
}
