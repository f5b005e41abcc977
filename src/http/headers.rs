//! # Headers Reconocidos
//! src/http/headers.rs
//!
//! El servidor solo entiende seis headers de request. Cualquier otro
//! header se descarta en silencio durante el parsing: no es una bolsa
//! genérica de headers.
//!
//! ```text
//! Host, User-Agent, Accept, Content-Length, Content-Type, Accept-Encoding
//! ```

/// Nombres de header que el servidor reconoce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderName {
    Host,
    UserAgent,
    Accept,
    ContentLength,
    ContentType,
    AcceptEncoding,
}

impl HeaderName {
    /// Todos los nombres reconocidos, en el orden del índice interno
    pub const ALL: [HeaderName; 6] = [
        HeaderName::Host,
        HeaderName::UserAgent,
        HeaderName::Accept,
        HeaderName::ContentLength,
        HeaderName::ContentType,
        HeaderName::AcceptEncoding,
    ];

    /// Busca un nombre de header sin distinguir mayúsculas/minúsculas
    ///
    /// Retorna `None` para headers no reconocidos (se ignoran).
    ///
    /// # Ejemplo
    /// ```
    /// use concurrent_http::http::HeaderName;
    ///
    /// assert_eq!(HeaderName::parse("user-AGENT"), Some(HeaderName::UserAgent));
    /// assert_eq!(HeaderName::parse("X-Custom"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|header| header.as_str().eq_ignore_ascii_case(name))
    }

    /// Forma canónica del nombre
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::Host => "Host",
            HeaderName::UserAgent => "User-Agent",
            HeaderName::Accept => "Accept",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::ContentType => "Content-Type",
            HeaderName::AcceptEncoding => "Accept-Encoding",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for HeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunto fijo de headers de un request
///
/// Un slot por cada `HeaderName`. Si un header llega repetido, gana la
/// última ocurrencia.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    values: [Option<String>; 6],
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarda un header si su nombre es reconocido
    ///
    /// Retorna `false` cuando el header fue descartado.
    pub fn insert_raw(&mut self, name: &str, value: &str) -> bool {
        match HeaderName::parse(name) {
            Some(header) => {
                self.set(header, value);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, name: HeaderName, value: &str) {
        self.values[name.index()] = Some(value.to_string());
    }

    pub fn get(&self, name: HeaderName) -> Option<&str> {
        self.values[name.index()].as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.get(HeaderName::UserAgent)
    }

    pub fn accept_encoding(&self) -> Option<&str> {
        self.get(HeaderName::AcceptEncoding)
    }

    /// Valor de `Content-Length` interpretado como número
    ///
    /// Un valor que no es un entero válido cuenta como 0.
    pub fn content_length(&self) -> Option<usize> {
        self.get(HeaderName::ContentLength)
            .map(|value| value.parse().unwrap_or(0))
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(HeaderName::parse("host"), Some(HeaderName::Host));
        assert_eq!(HeaderName::parse("CONTENT-LENGTH"), Some(HeaderName::ContentLength));
        assert_eq!(HeaderName::parse("Accept-Encoding"), Some(HeaderName::AcceptEncoding));
    }

    #[test]
    fn test_unknown_header_dropped() {
        let mut headers = HeaderSet::new();
        assert!(!headers.insert_raw("X-Forwarded-For", "1.2.3.4"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let mut headers = HeaderSet::new();
        headers.insert_raw("User-Agent", "first");
        headers.insert_raw("user-agent", "second");

        assert_eq!(headers.user_agent(), Some("second"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_content_length() {
        let mut headers = HeaderSet::new();
        assert_eq!(headers.content_length(), None);

        headers.set(HeaderName::ContentLength, "42");
        assert_eq!(headers.content_length(), Some(42));

        headers.set(HeaderName::ContentLength, "abc");
        assert_eq!(headers.content_length(), Some(0));
    }
}
