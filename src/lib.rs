//! # concurrent_http
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente mínimo implementado desde cero: acepta
//! conexiones TCP, parsea un request por conexión, lo despacha a un
//! handler de path fijo y escribe status line, headers y body.
//!
//! ## Arquitectura
//!
//! ```text
//! Acceptor/Gate → Connection → Request parser → Router → Handler → Response → socket
//! ```
//!
//! - `http`: parsing de requests, headers reconocidos, responses
//! - `router`: tabla de rutas y despacho a handlers
//! - `handlers`: echo, user-agent y files
//! - `storage`: archivos como almacén nombre → bytes
//! - `server`: acceptor, compuerta de concurrencia y worker por conexión
//! - `config`: CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use concurrent_http::config::Config;
//! use concurrent_http::server::Server;
//!
//! let server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod storage;
