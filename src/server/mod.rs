//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones, con a lo sumo N workers activos (`gate`)
//! 3. Lee y parsea un request por conexión (`connection`)
//! 4. Genera y envía la respuesta, y cierra la conexión

pub mod connection;
pub mod gate;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{handle_connection, Connection, ConnectionError, ConnectionState};
pub use gate::{ConcurrencyGate, GatePermit};
pub use tcp::Server;
