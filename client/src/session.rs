//! Persistence of the logged-in user between runs.
//!
//! The store holds the `{token, username, name}` object returned by login.
//! [`FileSessionStore`] keeps it as JSON on disk, readable only by the
//! owner on Unix; [`MemorySessionStore`] keeps it in process for tests and
//! embedding.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::ClientError;
use crate::model::LoggedUser;

/// Storage for the current session.
pub trait SessionStore: Send + Sync {
    /// Return the saved session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the stored session is
    /// unreadable.
    fn load(&self) -> Result<Option<LoggedUser>, ClientError>;

    /// Replace the saved session with `user`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the session cannot be written.
    fn save(&self, user: &LoggedUser) -> Result<(), ClientError>;

    /// Forget the saved session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the session cannot be removed.
    fn clear(&self) -> Result<(), ClientError>;
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<LoggedUser>>,
}

impl MemorySessionStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already holding `user`.
    #[must_use]
    pub const fn with_user(user: LoggedUser) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }
}

// The guarded value is a plain `Option`, so a poisoned lock is still usable.
impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<LoggedUser>, ClientError> {
        Ok(self
            .user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, user: &LoggedUser) -> Result<(), ClientError> {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl std::fmt::Display) -> ClientError {
        ClientError::Storage {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<LoggedUser>, ClientError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.storage_error(err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| self.storage_error(format!("corrupt session: {err}")))
    }

    fn save(&self, user: &LoggedUser) -> Result<(), ClientError> {
        let json = serde_json::to_string(user).map_err(|err| self.storage_error(err))?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.storage_error(err))?;
        }
        write_private(&self.path, json.as_bytes()).map_err(|err| self.storage_error(err))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_error(err)),
        }
    }
}

/// Session file mode on Unix: the token is readable by its owner only.
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SESSION_FILE_MODE);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on creation; tighten files left by older runs too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(SESSION_FILE_MODE))?;
    }
    file.write_all(contents)
}
