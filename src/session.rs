//! The document session: which file (if any) the editor is bound to.
//!
//! The buffer text itself lives in the text widget
//! ([`crate::editor::EditorBuffer`]); the session only tracks the path and
//! performs the raw reads and writes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while reading or writing a document.
///
/// The `Display` output is the raw OS (or decoding) error text, which is what
/// the error dialog shows.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Path of the file the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Read a document as text, exactly as stored (no newline normalization).
///
/// # Errors
///
/// Returns [`SessionError::Read`] when the file is missing, unreadable, or
/// not valid UTF-8.
pub fn read_document(path: &Path) -> Result<String, SessionError> {
    std::fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write text to `path`, replacing any previous contents.
///
/// # Errors
///
/// Returns [`SessionError::Write`] when the file cannot be created or
/// written.
pub fn write_document(path: &Path, text: &str) -> Result<(), SessionError> {
    std::fs::write(path, text).map_err(|source| SessionError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether the session has an associated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unbound,
    Bound,
}

/// The currently open document's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSession {
    path: Option<PathBuf>,
}

impl DocumentSession {
    /// A fresh session with no path.
    pub const fn new() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn state(&self) -> SessionState {
        if self.path.is_some() {
            SessionState::Bound
        } else {
            SessionState::Unbound
        }
    }

    /// Bind the session to a path after a successful open or save-as.
    ///
    /// There is no way back to [`SessionState::Unbound`].
    pub fn bind(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// Base name shown in titles, or `placeholder` when unbound.
    pub fn display_name(&self, placeholder: &str) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(
                || placeholder.to_string(),
                |name| name.to_string_lossy().to_string(),
            )
    }

    /// Window title: `"<file name or placeholder> - <app name>"`.
    pub fn title(&self, placeholder: &str, app_name: &str) -> String {
        format!("{} - {app_name}", self.display_name(placeholder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_session_is_unbound() {
        let session = DocumentSession::new();
        assert_eq!(session.state(), SessionState::Unbound);
        assert!(session.path().is_none());
    }

    #[test]
    fn test_unbound_title_uses_placeholder() {
        let session = DocumentSession::new();
        assert_eq!(
            session.title("Untitled", "TwezopadX"),
            "Untitled - TwezopadX"
        );
    }

    #[test]
    fn test_bound_title_uses_base_name() {
        let mut session = DocumentSession::new();
        session.bind(PathBuf::from("/tmp/notes/a.txt"));
        assert_eq!(session.state(), SessionState::Bound);
        assert_eq!(session.title("Untitled", "TwezopadX"), "a.txt - TwezopadX");
    }

    #[test]
    fn test_rebinding_replaces_path() {
        let mut session = DocumentSession::new();
        session.bind(PathBuf::from("one.txt"));
        session.bind(PathBuf::from("two.txt"));
        assert_eq!(session.path(), Some(Path::new("two.txt")));
    }

    #[test]
    fn test_read_document_preserves_line_endings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        std::fs::write(&path, "a\r\nb\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "a\r\nb\n");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, SessionError::Read { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_read_invalid_utf8_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        assert!(read_document(&path).is_err());
    }

    #[test]
    fn test_write_document_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old contents that are longer").unwrap();
        write_document(&path, "new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.txt");
        let err = write_document(&path, "x").unwrap_err();
        assert!(matches!(err, SessionError::Write { .. }));
    }
}
