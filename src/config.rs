//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./concurrent_http --port 4221 --directory /tmp/files --max-workers 8
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 DATA_DIR=/srv/files GZIP_ECHO=true ./concurrent_http
//! ```

use clap::Parser;
use std::num::NonZeroUsize;
use std::thread;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "concurrent_http")]
#[command(about = "Servidor HTTP/1.1 concurrente: echo, user-agent y archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio donde se guardan/leen los archivos de /files
    #[arg(
        short,
        long,
        default_value = "/tmp/data/codecrafters.io/http-server-tester",
        env = "DATA_DIR"
    )]
    pub directory: String,

    /// Máximo de conexiones procesándose a la vez
    /// (por defecto, el paralelismo disponible del host)
    #[arg(short = 'w', long = "max-workers", env = "MAX_WORKERS")]
    pub max_workers: Option<usize>,

    /// Comprimir de verdad el body de /echo cuando el cliente pide gzip
    /// (sin esta opción solo se anuncia `Content-Encoding: gzip`)
    #[arg(long = "gzip-echo", env = "GZIP_ECHO")]
    pub gzip_echo: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use concurrent_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límite efectivo de workers concurrentes (nunca 0)
    pub fn worker_limit(&self) -> usize {
        self.max_workers
            .unwrap_or_else(|| {
                thread::available_parallelism()
                    .map(NonZeroUsize::get)
                    .unwrap_or(1)
            })
            .max(1)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.max_workers == Some(0) {
            return Err("Max workers must be >= 1".to_string());
        }

        if self.directory.trim().is_empty() {
            return Err("Storage directory must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║              concurrent_http Server Configuration            ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Storage:      {}", self.directory);
        println!();
        println!("👷 Concurrency:");
        match self.max_workers {
            Some(limit) => println!("   Max workers:  {}", limit),
            None => println!("   Max workers:  {} (available parallelism)", self.worker_limit()),
        }
        println!();
        println!("🗜️  Echo encoding:");
        if self.gzip_echo {
            println!("   gzip:         compressed");
        } else {
            println!("   gzip:         advertised only (body sent as-is)");
        }
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "0.0.0.0".to_string(),
            directory: "/tmp/data/codecrafters.io/http-server-tester".to_string(),
            max_workers: None,
            gzip_echo: false,
        }
    }
}
