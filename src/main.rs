//! # concurrent_http - Entry Point
//! src/main.rs
//!
//! Punto de entrada: inicializa logging, lee la configuración, hace bind
//! del puerto y atiende conexiones indefinidamente.

use concurrent_http::config::Config;
use concurrent_http::server::Server;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("concurrent_http=info")),
        )
        .init();

    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "server failed");
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
