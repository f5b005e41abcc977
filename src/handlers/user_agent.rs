//! # User-Agent
//! src/handlers/user_agent.rs

use crate::http::{HeaderSet, Response, StatusCode};

/// Handler para /user-agent
///
/// Devuelve el valor del header `User-Agent` como texto plano, o un body
/// vacío si el cliente no lo mandó.
pub fn user_agent_handler(headers: &HeaderSet) -> Response {
    Response::text(StatusCode::Ok, headers.user_agent().unwrap_or_default())
}
