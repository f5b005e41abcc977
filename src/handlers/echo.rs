//! # Echo
//! src/handlers/echo.rs
//!
//! `GET /echo/{text}` devuelve `{text}` tal cual como texto plano.
//!
//! Si el cliente manda exactamente `Accept-Encoding: gzip` la respuesta
//! incluye `Content-Encoding: gzip`. Por defecto el body NO se comprime
//! (solo se anuncia el encoding); con `--gzip-echo` se comprime de verdad.

use crate::http::{HeaderSet, Response, StatusCode};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Qué hacer cuando el cliente acepta gzip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoEncoding {
    /// Anunciar `Content-Encoding: gzip` sin transformar el body
    #[default]
    Advertise,

    /// Comprimir el body con gzip
    Compress,
}

/// Handler para /echo/{text}
///
/// `text` es lo que el router capturó después de `/echo/` (puede estar
/// vacío o contener más `/`).
pub fn echo_handler(text: &str, headers: &HeaderSet, encoding: EchoEncoding) -> Response {
    if text.is_empty() {
        return Response::text(StatusCode::Ok, "");
    }

    let response = Response::new(StatusCode::Ok).with_header("Content-Type", "text/plain");

    // Solo coincidencia exacta, no negociación con listas
    if headers.accept_encoding() != Some("gzip") {
        return response.with_body(text);
    }

    match encoding {
        EchoEncoding::Advertise => response
            .with_header("Content-Encoding", "gzip")
            .with_body(text),
        EchoEncoding::Compress => match gzip(text.as_bytes()) {
            Ok(compressed) => response
                .with_header("Content-Encoding", "gzip")
                .with_body_bytes(compressed),
            Err(e) => {
                tracing::warn!(error = %e, "gzip compression failed, sending identity body");
                response.with_body(text)
            }
        },
    }
}

fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HeaderName;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gzip_headers(value: &str) -> HeaderSet {
        let mut headers = HeaderSet::new();
        headers.set(HeaderName::AcceptEncoding, value);
        headers
    }

    #[test]
    fn test_echo_text() {
        let response = echo_handler("abc", &HeaderSet::new(), EchoEncoding::Advertise);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("3"));
        assert_eq!(response.header("Content-Encoding"), None);
        assert_eq!(response.body(), b"abc");
    }

    #[test]
    fn test_echo_length_is_byte_length() {
        let response = echo_handler("ñandú", &HeaderSet::new(), EchoEncoding::Advertise);
        assert_eq!(response.header("Content-Length"), Some("7"));
    }

    #[test]
    fn test_echo_empty() {
        let response = echo_handler("", &gzip_headers("gzip"), EchoEncoding::Advertise);

        assert_eq!(response.header("Content-Length"), Some("0"));
        assert_eq!(response.header("Content-Encoding"), None);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_echo_gzip_advertised_not_compressed() {
        let response = echo_handler("hello", &gzip_headers("gzip"), EchoEncoding::Advertise);

        let tail = String::from_utf8(response.tail()).unwrap();
        assert_eq!(
            tail,
            "Content-Type: text/plain\r\nContent-Encoding: gzip\r\nContent-Length: 5\r\n\r\nhello"
        );
    }

    #[test]
    fn test_echo_gzip_requires_exact_match() {
        let response = echo_handler("hello", &gzip_headers("gzip, deflate"), EchoEncoding::Advertise);
        assert_eq!(response.header("Content-Encoding"), None);

        let response = echo_handler("hello", &gzip_headers("invalid-encoding"), EchoEncoding::Advertise);
        assert_eq!(response.header("Content-Encoding"), None);
    }

    #[test]
    fn test_echo_gzip_compressed() {
        let response = echo_handler("hello hello hello", &gzip_headers("gzip"), EchoEncoding::Compress);

        assert_eq!(response.header("Content-Encoding"), Some("gzip"));
        assert_eq!(
            response.header("Content-Length"),
            Some(response.body().len().to_string().as_str())
        );

        let mut decoded = String::new();
        GzDecoder::new(response.body()).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "hello hello hello");
    }
}
