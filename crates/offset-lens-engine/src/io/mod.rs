use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

/// Read a UTF-8 file into a [`Document`], detecting its line endings.
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(IoError::Io)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| IoError::InvalidUtf8(path.to_path_buf()))?;
    Ok(Document::from_text(text))
}

/// Write content to a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}
