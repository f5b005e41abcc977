//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Acepta conexiones y lanza un thread por cada una, con a lo sumo N
//! threads activos a la vez. Con la compuerta llena el acceptor se
//! bloquea con la conexión recién aceptada en la mano; las siguientes
//! esperan en el backlog del socket. Nunca se rechaza una conexión.

use super::connection::{handle_connection, ConnectionError};
use super::gate::{ConcurrencyGate, GatePermit};
use crate::config::Config;
use crate::handlers::EchoEncoding;
use crate::router::Router;
use crate::storage::DirStore;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    gate: Arc<ConcurrencyGate>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let echo_encoding = if config.gzip_echo {
            EchoEncoding::Compress
        } else {
            EchoEncoding::Advertise
        };
        let store = Arc::new(DirStore::new(&config.directory));
        let router = Router::new(store, echo_encoding);
        let gate = ConcurrencyGate::new(config.worker_limit());

        Self {
            config,
            router: Arc::new(router),
            gate,
        }
    }

    /// Compuerta compartida con los workers
    pub fn gate(&self) -> Arc<ConcurrencyGate> {
        Arc::clone(&self.gate)
    }

    /// Abre el socket en la dirección configurada
    pub fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind(self.config.address())
    }

    /// Hace bind y atiende conexiones indefinidamente
    pub fn run(&self) -> io::Result<()> {
        let listener = self.bind()?;
        self.serve(listener)
    }

    /// Loop del acceptor sobre un listener ya abierto
    ///
    /// Un error en `accept` se registra y el loop sigue; solo falla si no
    /// se puede leer la dirección local del listener.
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        tracing::info!(
            address = %listener.local_addr()?,
            max_workers = self.gate.capacity(),
            "listening"
        );

        loop {
            let (stream, peer) = match listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            // Backpressure: sin slot libre no se acepta la siguiente conexión
            let permit = self.gate.acquire();

            tracing::debug!(
                peer = %peer,
                active = self.gate.active(),
                "connection admitted"
            );

            // Si el SO no crea el thread, el stream y el permiso se sueltan
            // acá: la conexión se cierra y el slot queda libre.
            let builder = thread::Builder::new().name(format!("conn-{}", peer));
            if let Err(e) = spawn_worker(builder, Arc::clone(&self.router), stream, peer, permit) {
                tracing::error!(peer = %peer, error = %e, "failed to spawn connection worker");
            }
        }
    }
}

/// Lanza el thread que atiende una conexión, dueño del stream y del permiso
fn spawn_worker(
    builder: thread::Builder,
    router: Arc<Router>,
    stream: TcpStream,
    peer: SocketAddr,
    permit: GatePermit,
) -> io::Result<()> {
    builder
        .spawn(move || {
            let _permit = permit;
            let span = tracing::info_span!("connection", peer = %peer);
            let _entered = span.enter();

            match handle_connection(stream, &router) {
                Ok(_) => {}
                Err(e @ ConnectionError::Write(_)) => {
                    tracing::error!(error = %e, "connection failed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "connection aborted");
                }
            }
        })
        .map(|_| ())
}
