//! # Códigos de Estado HTTP
//!
//! Los únicos códigos que produce el servidor:
//!
//! - **2xx**: 200 OK, 201 Created
//! - **4xx**: 400, 404, 405
//! - **5xx**: 500 (fallo al escribir un archivo)

/// Códigos de estado que emite el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok = 200,

    /// 201 Created - Archivo escrito con POST /files/{name}
    Created = 201,

    /// 400 Bad Request - POST /files/ sin nombre
    BadRequest = 400,

    /// 404 Not Found - Ruta desconocida o archivo inexistente
    NotFound = 404,

    /// 405 Method Not Allowed - Método distinto de GET/POST
    MethodNotAllowed = 405,

    /// 500 Internal Server Error - Falló la escritura en el storage
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use concurrent_http::http::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Texto de razón (reason phrase) asociado al código
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::Created)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK", lo que va después de `HTTP/1.1 ` en la status line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
