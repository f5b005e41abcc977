//! # Sistema de Routing
//! src/router/mod.rs
//!
//! El router mapea (método, path) a un handler usando una tabla fija de
//! rutas evaluada en orden: gana la primera que coincide.
//!
//! ```text
//! método ∉ {GET, POST}   → 405
//! GET  /                 → 200
//! GET  /echo[/{text}]    → echo
//! GET  /user-agent       → user_agent
//! *    /files[/{name}]   → files (GET o POST)
//! resto                  → 404
//! ```
//!
//! Las rutas con prefijo capturan lo que sigue a `prefijo/` (puede
//! contener más `/`). Si el path empieza con el prefijo pero no sigue con
//! `/` ni termina ahí (ej: `/echoes`), la ruta lo reclama y responde 404.

use crate::handlers::{self, EchoEncoding};
use crate::http::{Method, Request, Response, StatusCode};
use crate::storage::BlobStore;
use std::sync::Arc;

/// Endpoint al que apunta una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Root,
    Echo,
    UserAgent,
    Files,
}

/// Cómo se compara el path contra la ruta
#[derive(Debug, Clone, Copy)]
enum PathPattern {
    /// El path debe ser exactamente este
    Exact(&'static str),

    /// El path empieza con este prefijo; captura el sufijo opcional
    Prefix(&'static str),
}

/// Métodos que acepta una ruta
#[derive(Debug, Clone, Copy)]
enum Methods {
    Get,
    GetOrPost,
}

impl Methods {
    fn allows(&self, method: &Method) -> bool {
        match self {
            Methods::Get => *method == Method::GET,
            Methods::GetOrPost => matches!(method, Method::GET | Method::POST),
        }
    }
}

struct Route {
    methods: Methods,
    pattern: PathPattern,
    endpoint: Endpoint,
}

/// Tabla de rutas en orden de prioridad
const ROUTES: [Route; 4] = [
    Route { methods: Methods::Get, pattern: PathPattern::Exact("/"), endpoint: Endpoint::Root },
    Route { methods: Methods::Get, pattern: PathPattern::Prefix("/echo"), endpoint: Endpoint::Echo },
    Route { methods: Methods::Get, pattern: PathPattern::Exact("/user-agent"), endpoint: Endpoint::UserAgent },
    Route { methods: Methods::GetOrPost, pattern: PathPattern::Prefix("/files"), endpoint: Endpoint::Files },
];

/// Resultado de resolver una ruta
///
/// Las variantes con `&str` llevan el sufijo capturado del path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a> {
    MethodNotAllowed,
    Root,
    Echo(&'a str),
    UserAgent,
    Files(&'a str),
    NotFound,
}

/// Resuelve (método, path) sin ejecutar ningún handler
///
/// # Ejemplo
/// ```
/// use concurrent_http::http::Method;
/// use concurrent_http::router::{resolve, Dispatch};
///
/// assert_eq!(resolve(&Method::GET, "/echo/a/b"), Dispatch::Echo("a/b"));
/// assert_eq!(resolve(&Method::POST, "/"), Dispatch::NotFound);
/// ```
pub fn resolve<'a>(method: &Method, path: &'a str) -> Dispatch<'a> {
    if !Methods::GetOrPost.allows(method) {
        return Dispatch::MethodNotAllowed;
    }

    for route in &ROUTES {
        if !route.methods.allows(method) {
            continue;
        }

        let captured = match route.pattern {
            PathPattern::Exact(exact) if path == exact => "",
            PathPattern::Exact(_) => continue,
            PathPattern::Prefix(prefix) => match path.strip_prefix(prefix) {
                Some(rest) => match capture_suffix(rest) {
                    Some(captured) => captured,
                    None => return Dispatch::NotFound,
                },
                None => continue,
            },
        };

        return match route.endpoint {
            Endpoint::Root => Dispatch::Root,
            Endpoint::Echo => Dispatch::Echo(captured),
            Endpoint::UserAgent => Dispatch::UserAgent,
            Endpoint::Files => Dispatch::Files(captured),
        };
    }

    Dispatch::NotFound
}

/// Sufijo opcional: nada, o `/` seguido de cualquier cosa
fn capture_suffix(rest: &str) -> Option<&str> {
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/')
    }
}

/// Router que ejecuta los handlers con sus dependencias
pub struct Router {
    store: Arc<dyn BlobStore>,
    echo_encoding: EchoEncoding,
}

impl Router {
    pub fn new(store: Arc<dyn BlobStore>, echo_encoding: EchoEncoding) -> Self {
        Self {
            store,
            echo_encoding,
        }
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request) -> Response {
        let headers = request.headers();

        match resolve(request.method(), request.path()) {
            Dispatch::MethodNotAllowed => Response::new(StatusCode::MethodNotAllowed),
            Dispatch::Root => Response::new(StatusCode::Ok),
            Dispatch::Echo(text) => handlers::echo_handler(text, headers, self.echo_encoding),
            Dispatch::UserAgent => handlers::user_agent_handler(headers),
            Dispatch::Files(name) => match request.method() {
                Method::POST => handlers::post_file_handler(
                    name,
                    request.body().unwrap_or_default(),
                    self.store.as_ref(),
                ),
                _ => handlers::get_file_handler(name, self.store.as_ref()),
            },
            Dispatch::NotFound => Response::new(StatusCode::NotFound),
        }
    }
}
