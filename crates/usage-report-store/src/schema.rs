//! Backup file layout.
//!
//! A backup is one JSON object. The report only reads two of its keys.

/// Top-level keys read from a backup.
pub mod keys {
    /// Array of user accounts.
    pub const USERS: &str = "users";

    /// Array of administrator accounts.
    pub const ADMINS: &str = "admin_users";
}

/// File extension of backup files, without the dot.
pub const BACKUP_EXTENSION: &str = "json";

/// Returns whether `extension` marks a backup file.
#[must_use]
pub fn is_backup_extension(extension: &str) -> bool {
    extension == BACKUP_EXTENSION
}
