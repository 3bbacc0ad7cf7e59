//! Backup snapshot loading for usage reports.
//!
//! This crate finds the most recent panel backup in a directory and parses it
//! into a [`Snapshot`].
//!
//! # Backup selection
//!
//! Every regular file with a `.json` extension is a candidate; the one with
//! the latest modification time wins, regardless of its name.
//!
//! # Example
//!
//! ```no_run
//! use usage_report_store::{BackupDirectory, SnapshotSource};
//!
//! let source = BackupDirectory::new("/opt/hiddify-manager/hiddify-panel/backup");
//! let loaded = source.load_latest().unwrap();
//! println!("{} users in {}", loaded.snapshot.users.len(), loaded.path.display());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backup;
pub mod error;
pub mod schema;

pub use backup::BackupDirectory;
pub use error::{Result, StoreError};

use std::path::PathBuf;
use std::time::SystemTime;

use usage_report_core::Snapshot;

/// A snapshot together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    /// The parsed users and administrators.
    pub snapshot: Snapshot,

    /// The backup file that was read.
    pub path: PathBuf,

    /// Modification time of that file.
    pub modified: SystemTime,
}

/// A place snapshots can be loaded from.
pub trait SnapshotSource {
    /// Load the most recent snapshot.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if there is no backup to load.
    /// - `StoreError::Parse` if the selected backup is not valid JSON.
    fn load_latest(&self) -> Result<LoadedSnapshot>;
}
