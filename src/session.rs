//! On-disk bearer-token session with an explicit login/logout lifecycle.
//!
//! The token is loaded once at startup and injected into the API client at
//! construction; `login`/`logout` are the only places it changes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to read session file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove session file {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("refusing to store an empty token")]
    EmptyToken,
}

/// The admin session: a bearer token persisted in a single file.
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    token: Option<String>,
}

impl Session {
    /// Load the session from disk. A missing file is a signed-out session,
    /// not an error.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let token = match std::fs::read_to_string(path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(SessionError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        debug!(signed_in = token.is_some(), "loaded session");
        Ok(Self {
            path: path.to_path_buf(),
            token,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// Store a token, creating the session directory if needed.
    pub fn sign_in(&mut self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        std::fs::write(&self.path, token).map_err(|e| SessionError::Write {
            path: self.path.display().to_string(),
            source: e,
        })?;

        self.token = Some(token.to_string());
        Ok(())
    }

    /// Remove the stored token. Signing out of an already signed-out session
    /// is a no-op.
    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(SessionError::Remove {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        }

        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_signed_out() {
        let dir = TempDir::new().unwrap();
        let session = Session::load(&dir.path().join("token")).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_sign_in_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("token");

        let mut session = Session::load(&path).unwrap();
        session.sign_in("  abc123  ").unwrap();
        assert_eq!(session.token(), Some("abc123"));

        let reloaded = Session::load(&path).unwrap();
        assert_eq!(reloaded.token(), Some("abc123"));
    }

    #[test]
    fn test_sign_out_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");

        let mut session = Session::load(&path).unwrap();
        session.sign_in("abc123").unwrap();
        session.sign_out().unwrap();

        assert!(!session.is_signed_in());
        assert!(!path.exists());

        // Second sign-out is a no-op
        session.sign_out().unwrap();
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load(&dir.path().join("token")).unwrap();
        assert!(matches!(
            session.sign_in("   "),
            Err(SessionError::EmptyToken)
        ));
    }

    #[test]
    fn test_whitespace_only_file_is_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "\n  \n").unwrap();

        let session = Session::load(&path).unwrap();
        assert!(!session.is_signed_in());
    }
}
