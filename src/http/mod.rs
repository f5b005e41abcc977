//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP/1.1 que usa el servidor, sin
//! librerías de alto nivel:
//!
//! - Parsing de un request por conexión (request line, headers, body)
//! - Conjunto fijo de headers reconocidos
//! - Construcción y escritura de responses
//!
//! No hay keep-alive, pipelining ni chunked transfer-encoding: cada
//! conexión lleva exactamente un request y una respuesta.

pub mod headers;   // Headers reconocidos
pub mod request;   // Parsing de requests
pub mod response;  // Construcción y escritura de responses
pub mod status;    // Códigos de estado

pub use headers::{HeaderName, HeaderSet};
pub use request::{Method, ParseError, Request};
pub use response::{write_response, Response};
pub use status::StatusCode;
