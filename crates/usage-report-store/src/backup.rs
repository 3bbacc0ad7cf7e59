//! Filesystem backup directory.
//!
//! This module provides the `BackupDirectory` implementation of `SnapshotSource`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use usage_report_core::Snapshot;

use crate::error::{Result, StoreError};
use crate::schema::{is_backup_extension, keys};
use crate::{LoadedSnapshot, SnapshotSource};

/// A directory of panel backups.
#[derive(Debug, Clone)]
pub struct BackupDirectory {
    dir: PathBuf,
}

impl BackupDirectory {
    /// Point at a backup directory. Nothing is read until a snapshot is loaded.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory being searched.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Find the backup file with the latest modification time.
    ///
    /// # Errors
    ///
    /// - `StoreError::DirectoryUnavailable` if the directory cannot be listed.
    /// - `StoreError::NotFound` if it holds no backup file.
    pub fn latest_backup(&self) -> Result<(PathBuf, SystemTime)> {
        let unavailable = |source| StoreError::DirectoryUnavailable {
            dir: self.dir.clone(),
            source,
        };

        let mut latest: Option<(PathBuf, SystemTime)> = None;
        for entry in fs::read_dir(&self.dir).map_err(unavailable)? {
            let entry = entry.map_err(unavailable)?;
            let path = entry.path();

            let is_backup = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(is_backup_extension);
            if !is_backup {
                continue;
            }

            // Symlinks are followed. Entries that vanish or cannot be stat'ed
            // mid-scan are skipped.
            let metadata = match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable backup entry");
                    continue;
                }
            };
            let modified = match metadata.modified() {
                Ok(modified) => modified,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping backup without mtime");
                    continue;
                }
            };

            debug!(path = %path.display(), modified = %DateTime::<Utc>::from(modified), "Backup candidate");

            if latest.as_ref().map_or(true, |(_, best)| modified > *best) {
                latest = Some((path, modified));
            }
        }

        latest.ok_or_else(|| StoreError::NotFound {
            dir: self.dir.clone(),
        })
    }
}

impl SnapshotSource for BackupDirectory {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn load_latest(&self) -> Result<LoadedSnapshot> {
        let (path, modified) = self.latest_backup()?;
        let snapshot = read_snapshot(&path)?;

        info!(
            path = %path.display(),
            modified = %DateTime::<Utc>::from(modified),
            users = snapshot.users.len(),
            admins = snapshot.admins.len(),
            "Loaded backup snapshot"
        );

        Ok(LoadedSnapshot {
            snapshot,
            path,
            modified,
        })
    }
}

/// Read and parse one backup file.
///
/// A missing `users` or `admin_users` key yields an empty collection.
///
/// # Errors
///
/// - `StoreError::Io` if the file cannot be read.
/// - `StoreError::Parse` if it is not a well-formed snapshot.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse = |source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_slice(&contents).map_err(parse)?;
    for key in [keys::USERS, keys::ADMINS] {
        if value.get(key).is_none() {
            debug!(path = %path.display(), key, "Backup has no such collection; treating as empty");
        }
    }

    serde_json::from_value(value).map_err(parse)
}
