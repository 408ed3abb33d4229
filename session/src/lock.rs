//! Advisory project-file lock.
//!
//! One process edits a project at a time. The lock is a sibling
//! `<input>.lock` file carrying an OS-level exclusive lock, taken
//! non-blocking before the project is read and released when the guard
//! drops.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{SessionError, SessionResult};

/// Exclusive advisory lock on one project file.
#[derive(Debug)]
pub struct ProjectLock {
    path: PathBuf,
    file: Option<File>,
}

impl ProjectLock {
    /// Take the lock for `project`. Fails fast with `Locked` when
    /// another process already holds it.
    pub fn acquire(project: &Path) -> SessionResult<Self> {
        let path = lock_path(project);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| SessionError::io(&path, source))?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                Err(SessionError::locked(project))
            }
            Err(source) => Err(SessionError::io(&path, source)),
        }
    }

    /// Path of the lock file itself, not the project.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Release early. Dropping the guard does the same.
    pub fn release(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        self.release();
    }
}

fn lock_path(project: &Path) -> PathBuf {
    let mut name = project.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}
