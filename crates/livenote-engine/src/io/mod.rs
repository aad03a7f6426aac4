use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::Document;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Note is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

/// Read a markdown note into a fresh document (line endings normalized)
pub fn read_note(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Document::from_bytes(&bytes).map_err(|_| IoError::InvalidUtf8(path.to_path_buf()))
}

/// Write a document's text, creating parent directories as needed
pub fn write_note(path: &Path, doc: &Document) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, doc.text())?;
    Ok(())
}

/// Locate a note: `name` as given (relative to the working directory), then
/// relative to `notes_root`, each also tried with an `.md` extension.
pub fn resolve_note(name: &str, notes_root: Option<&Path>) -> Result<PathBuf, IoError> {
    let candidates = |base: &Path| {
        let plain = base.join(name);
        let with_ext = plain.with_extension("md");
        [plain, with_ext]
    };

    let mut tried = candidates(Path::new(""));
    if let Some(found) = tried.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    if let Some(root) = notes_root {
        tried = candidates(root);
        if let Some(found) = tried.iter().find(|p| p.is_file()) {
            return Ok(found.clone());
        }
    }
    Err(IoError::NotFound(PathBuf::from(name)))
}
