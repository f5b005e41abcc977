//! # Storage de Archivos
//! src/storage/mod.rs
//!
//! El handler de `/files` ve el sistema de archivos como un almacén
//! nombre → bytes. Cada acceso es independiente: no hay locks entre
//! requests, dos POST concurrentes al mismo nombre compiten a nivel del
//! sistema de archivos.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Almacén de blobs direccionado por nombre
pub trait BlobStore: Send + Sync {
    /// Lee el blob completo
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Escribe el blob, sobrescribiendo si ya existe
    fn write(&self, name: &str, contents: &[u8]) -> io::Result<()>;
}

/// Blobs guardados como archivos dentro de un directorio raíz
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ruta del blob: raíz + "/" + nombre, sin normalizar
    ///
    /// El nombre se concatena tal cual, así que puede contener `/`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let mut path = OsString::from(self.root.as_os_str());
        path.push("/");
        path.push(name);
        PathBuf::from(path)
    }
}

impl BlobStore for DirStore {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(name))
    }

    fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        fs::write(self.path_for(name), contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "concurrent_http_storage_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root); // Limpiar
        fs::create_dir_all(&root).unwrap();
        root
    }

    #[test]
    fn test_write_then_read() {
        let root = temp_root("roundtrip");
        let store = DirStore::new(&root);

        store.write("blob", b"\x00binary\xff").unwrap();
        assert_eq!(store.read("blob").unwrap(), b"\x00binary\xff".to_vec());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_write_overwrites() {
        let root = temp_root("overwrite");
        let store = DirStore::new(&root);

        store.write("blob", b"first version").unwrap();
        store.write("blob", b"v2").unwrap();
        assert_eq!(store.read("blob").unwrap(), b"v2".to_vec());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_read_missing() {
        let root = temp_root("missing");
        let store = DirStore::new(&root);

        let err = store.read("does-not-exist").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_write_into_missing_root_fails() {
        let store = DirStore::new("/nonexistent/concurrent_http/root");
        assert!(store.write("blob", b"data").is_err());
    }

    #[test]
    fn test_path_for_concatenates() {
        let store = DirStore::new("/srv/data");
        assert_eq!(store.path_for("a.txt"), PathBuf::from("/srv/data/a.txt"));
        assert_eq!(store.path_for("sub/b"), PathBuf::from("/srv/data/sub/b"));
    }
}
