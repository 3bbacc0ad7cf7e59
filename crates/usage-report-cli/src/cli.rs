//! Command-line arguments.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Parser};
use usage_report_core::{CoreError, CutoffMode};

use crate::config::{ReportConfig, WriteErrorPolicy};

/// Scope names accepted by `--scope`, matched case-insensitively.
const SCOPES: [&str; 9] = [
    "daily", "day", "weekly", "week", "monthly", "month", "all", "all-time", "date",
];

/// Write one usage report per administrator from the newest panel backup.
#[derive(Parser, Debug, Clone)]
#[command(name = "usage-report", version, about)]
pub struct Cli {
    /// Report scope. Without it an interactive menu is shown.
    #[arg(long, ignore_case = true, value_parser = PossibleValuesParser::new(SCOPES))]
    pub scope: Option<String>,

    /// Earliest activation date for `--scope date`, as YYYY-MM-DD.
    #[arg(long, requires = "scope", required_if_eq("scope", "date"))]
    pub date: Option<String>,

    /// Directory searched for backups.
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,

    /// Directory reports are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// TrueType font for body text.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Logo drawn at the top of every report.
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// What to do when a report cannot be written.
    #[arg(long, value_enum)]
    pub on_write_error: Option<WriteErrorPolicy>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The cutoff mode selected by flags, or `None` when the menu should ask.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidDateFormat` if `--date` is not a valid date.
    /// - `CoreError::UnknownScope` if `--scope` names no report scope.
    pub fn cutoff_mode(&self) -> Result<Option<CutoffMode>, CoreError> {
        let Some(scope) = self.scope.as_deref() else {
            return Ok(None);
        };
        let mode = if scope.eq_ignore_ascii_case("date") {
            CutoffMode::explicit(self.date.as_deref().unwrap_or_default())?
        } else {
            scope.parse()?
        };
        Ok(Some(mode))
    }

    /// Apply flag overrides on top of `config`.
    #[must_use]
    pub fn apply(&self, mut config: ReportConfig) -> ReportConfig {
        if let Some(dir) = &self.backup_dir {
            config.backup_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(font) = &self.font {
            config.font_path.clone_from(font);
        }
        if let Some(logo) = &self.logo {
            config.logo_path.clone_from(logo);
        }
        if let Some(policy) = self.on_write_error {
            config.on_write_error = policy;
        }
        config
    }

    /// Log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("usage-report").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_scope_means_menu() {
        assert_eq!(parse(&[]).cutoff_mode().unwrap(), None);
    }

    #[test]
    fn scopes_map_to_modes() {
        assert_eq!(
            parse(&["--scope", "weekly"]).cutoff_mode().unwrap(),
            Some(CutoffMode::Weekly)
        );
        assert_eq!(
            parse(&["--scope", "all-time"]).cutoff_mode().unwrap(),
            Some(CutoffMode::AllTime)
        );
        assert_eq!(
            parse(&["--scope", "date", "--date", "2023-01-01"])
                .cutoff_mode()
                .unwrap(),
            Some(CutoffMode::Explicit(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
            ))
        );
    }

    #[test]
    fn scope_names_ignore_case() {
        assert_eq!(
            parse(&["--scope", "MONTHLY"]).cutoff_mode().unwrap(),
            Some(CutoffMode::Monthly)
        );
        assert_eq!(
            parse(&["--scope", "day"]).cutoff_mode().unwrap(),
            Some(CutoffMode::Daily)
        );
        assert!(Cli::try_parse_from(["usage-report", "--scope", "hourly"]).is_err());
    }

    #[test]
    fn date_without_scope_is_rejected() {
        let err = Cli::try_parse_from(["usage-report", "--date", "2024-01-01"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn date_scope_requires_a_valid_date() {
        let missing = Cli::try_parse_from(["usage-report", "--scope", "date"]);
        assert!(missing.is_err());

        let bad = parse(&["--scope", "date", "--date", "2024-13-40"]);
        assert!(matches!(
            bad.cutoff_mode(),
            Err(CoreError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "--output-dir",
            "/tmp/out",
            "--on-write-error",
            "abort",
        ]);
        let config = cli.apply(ReportConfig::default());

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.on_write_error, WriteErrorPolicy::Abort);
        assert_eq!(config.font_path, ReportConfig::default().font_path);
    }

    #[test]
    fn verbosity_sets_filter() {
        assert_eq!(parse(&[]).default_log_filter(), "warn");
        assert_eq!(parse(&["-v"]).default_log_filter(), "info");
        assert_eq!(parse(&["-vvv"]).default_log_filter(), "debug");
    }
}
