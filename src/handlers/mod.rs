//! # Handlers
//!
//! Cada handler recibe los datos ya parseados del request (y la parte del
//! path capturada por el router) y retorna una Response.
//!
//! - **echo**: `GET /echo/{text}`
//! - **user_agent**: `GET /user-agent`
//! - **files**: `GET|POST /files/{name}`

pub mod echo;
pub mod files;
pub mod user_agent;

pub use echo::{echo_handler, EchoEncoding};
pub use files::{get_file_handler, post_file_handler};
pub use user_agent::user_agent_handler;
