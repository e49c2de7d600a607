//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with the operation name folded into the error.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Other(format!("{}: {}: {}", operation, path.display(), e)))
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::Other(format!("{}: {}: {}", operation, path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        write_file(&path, "hello", "write note").unwrap();
        assert_eq!(read_file(&path, "read note").unwrap(), "hello");
    }

    #[test]
    fn read_missing_file_names_operation() {
        let err = read_file(Path::new("/nonexistent/gw-io-test"), "read manifest").unwrap_err();
        assert!(err.to_string().contains("read manifest"));
    }
}
