//! Batch configuration.

use std::path::PathBuf;

use clap::ValueEnum;

/// Environment variable for the backup directory.
pub const BACKUP_DIR_ENV: &str = "USAGE_REPORT_BACKUP_DIR";
/// Environment variable for the output directory.
pub const OUTPUT_DIR_ENV: &str = "USAGE_REPORT_OUTPUT_DIR";
/// Environment variable for the body font.
pub const FONT_ENV: &str = "USAGE_REPORT_FONT";
/// Environment variable for the logo image.
pub const LOGO_ENV: &str = "USAGE_REPORT_LOGO";
/// Environment variable for the write-error policy.
pub const ON_WRITE_ERROR_ENV: &str = "USAGE_REPORT_ON_WRITE_ERROR";

const DEFAULT_BACKUP_DIR: &str = "/opt/hiddify-manager/hiddify-panel/backup";
const DEFAULT_OUTPUT_DIR: &str = "/media";
const DEFAULT_FONT: &str = "vazir.ttf";
const DEFAULT_LOGO: &str = "logo.png";

/// What to do when one administrator's document cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum WriteErrorPolicy {
    /// Report the failure and move on to the next administrator.
    #[default]
    Continue,
    /// Stop the batch at the first failure.
    Abort,
}

/// Batch configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory searched for backups (default: "/opt/hiddify-manager/hiddify-panel/backup").
    pub backup_dir: PathBuf,

    /// Directory reports are written to (default: "/media").
    pub output_dir: PathBuf,

    /// TrueType font for body text (default: "vazir.ttf").
    pub font_path: PathBuf,

    /// Logo drawn at the top of every report (default: "logo.png").
    pub logo_path: PathBuf,

    /// Write-failure handling (default: continue).
    pub on_write_error: WriteErrorPolicy,
}

impl ReportConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from `lookup`, falling back to defaults for unset
    /// or empty values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let on_write_error = match var(ON_WRITE_ERROR_ENV) {
            Some(value) => WriteErrorPolicy::from_str(value.trim(), true).unwrap_or_else(|_| {
                tracing::warn!(
                    key = ON_WRITE_ERROR_ENV,
                    value = %value,
                    "Unknown write-error policy, using continue"
                );
                defaults.on_write_error
            }),
            None => defaults.on_write_error,
        };

        Self {
            backup_dir: var(BACKUP_DIR_ENV).map_or(defaults.backup_dir, PathBuf::from),
            output_dir: var(OUTPUT_DIR_ENV).map_or(defaults.output_dir, PathBuf::from),
            font_path: var(FONT_ENV).map_or(defaults.font_path, PathBuf::from),
            logo_path: var(LOGO_ENV).map_or(defaults.logo_path, PathBuf::from),
            on_write_error,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            backup_dir: DEFAULT_BACKUP_DIR.into(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            font_path: DEFAULT_FONT.into(),
            logo_path: DEFAULT_LOGO.into(),
            on_write_error: WriteErrorPolicy::Continue,
        }
    }
}
