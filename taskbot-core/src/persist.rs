//! Durable, backup-protected persistence for the task list.
//!
//! [`TaskFile`] owns two locations: the canonical file (a JSON array of
//! strings, one element per task, order = display order) and a backup
//! directory. Every save first copies the existing canonical file into a
//! timestamped backup, then atomically replaces the canonical file via a
//! temp-file rename — the canonical slot is never empty mid-save, and the
//! previous good version always survives in the backup directory.
//!
//! Loading fails soft: a missing file is the expected first-run state, and
//! an unreadable or unparseable file is quarantined under a `.corrupt`
//! suffix and replaced with an empty list. A bad task file must never
//! prevent the bot from starting.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while saving the task list.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Failed to create the data or backup directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to copy the previous canonical file into the backup directory.
    #[error("failed to back up task file to {path}: {source}")]
    Backup {
        /// Backup path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to serialize the task list as JSON.
    #[error("failed to serialize task list: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the new contents to a temp file.
    #[error("failed to write task file: {source}")]
    WriteTemp {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to rename the temp file over the canonical path.
    #[error("failed to replace task file {path}: {source}")]
    Replace {
        /// Canonical path that was being replaced.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Durable storage for the task list: a canonical JSON file plus an
/// append-only backup directory.
///
/// Backups are named `todo_backup_<YYYYMMDD_HHMMSS>.json` and are never
/// pruned. Saves within the same second get a numeric suffix so no backup
/// is ever overwritten.
#[derive(Debug, Clone)]
pub struct TaskFile {
    canonical: PathBuf,
    backup_dir: PathBuf,
}

impl TaskFile {
    /// Creates a `TaskFile`, creating the canonical file's parent directory
    /// and the backup directory if they do not exist. The canonical file
    /// itself is not created until the first save.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::CreateDir`] if either directory cannot be
    /// created.
    pub fn new(
        canonical: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
    ) -> Result<Self, PersistError> {
        let canonical = canonical.into();
        let backup_dir = backup_dir.into();

        if let Some(parent) = canonical.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PersistError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::create_dir_all(&backup_dir).map_err(|source| PersistError::CreateDir {
            path: backup_dir.clone(),
            source,
        })?;

        Ok(Self {
            canonical,
            backup_dir,
        })
    }

    /// Returns the canonical file path.
    #[must_use]
    pub fn canonical_path(&self) -> &Path {
        &self.canonical
    }

    /// Returns the backup directory path.
    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Loads the task list from the canonical file.
    ///
    /// A missing file yields an empty list (the expected first-run state).
    /// An unreadable or unparseable file is renamed to
    /// `<canonical>.corrupt` for manual inspection and an empty list is
    /// returned; this never aborts startup.
    #[must_use]
    pub fn load(&self) -> Vec<String> {
        match fs::read_to_string(&self.canonical) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(tasks) => {
                    tracing::info!(
                        count = tasks.len(),
                        path = %self.canonical.display(),
                        "loaded task list"
                    );
                    tasks
                }
                Err(err) => {
                    tracing::warn!(
                        path = %self.canonical.display(),
                        error = %err,
                        "task file is not a valid JSON array of strings; starting empty"
                    );
                    self.quarantine();
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no task file found, starting with empty list");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.canonical.display(),
                    error = %err,
                    "failed to read task file; starting empty"
                );
                // Rename usually succeeds even when reading does not.
                self.quarantine();
                Vec::new()
            }
        }
    }

    /// Saves the task list to the canonical file.
    ///
    /// If a canonical file exists, it is first copied into the backup
    /// directory (backup-before-overwrite). The new contents are then
    /// written to a temp file in the same directory and renamed over the
    /// canonical path, so a crash mid-save never leaves the canonical
    /// slot empty or half-written.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the backup copy, the temp write, or the
    /// final rename fails. The caller's in-memory list remains the source
    /// of truth on failure.
    pub fn save(&self, tasks: &[String]) -> Result<(), PersistError> {
        if self.canonical.exists() {
            let backup = self.backup_path(&Local::now());
            fs::copy(&self.canonical, &backup).map_err(|source| PersistError::Backup {
                path: backup.clone(),
                source,
            })?;
            tracing::debug!(path = %backup.display(), "backed up previous task file");
        }

        let json = serde_json::to_string_pretty(tasks)?;
        let dir = self
            .canonical
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|source| PersistError::WriteTemp { source })?;
        tmp.write_all(json.as_bytes())
            .map_err(|source| PersistError::WriteTemp { source })?;
        tmp.as_file()
            .sync_all()
            .map_err(|source| PersistError::WriteTemp { source })?;
        tmp.persist(&self.canonical)
            .map_err(|err| PersistError::Replace {
                path: self.canonical.clone(),
                source: err.error,
            })?;

        tracing::info!(
            count = tasks.len(),
            path = %self.canonical.display(),
            "saved task list"
        );
        Ok(())
    }

    /// Picks an unused backup path for a save happening at `now`.
    ///
    /// Same-second saves get a `_<n>` suffix rather than overwriting an
    /// earlier backup.
    fn backup_path(&self, now: &DateTime<Local>) -> PathBuf {
        let stamp = now.format("%Y%m%d_%H%M%S");
        let first = self.backup_dir.join(format!("todo_backup_{stamp}.json"));
        if !first.exists() {
            return first;
        }
        let mut n = 1u32;
        loop {
            let candidate = self
                .backup_dir
                .join(format!("todo_backup_{stamp}_{n}.json"));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Moves a bad canonical file aside as `<canonical>.corrupt`.
    fn quarantine(&self) {
        let mut quarantined = self.canonical.as_os_str().to_os_string();
        quarantined.push(".corrupt");
        let quarantined = PathBuf::from(quarantined);
        match fs::rename(&self.canonical, &quarantined) {
            Ok(()) => {
                tracing::warn!(
                    path = %quarantined.display(),
                    "preserved bad task file for inspection"
                );
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.canonical.display(),
                    error = %err,
                    "could not quarantine bad task file"
                );
            }
        }
    }
}
