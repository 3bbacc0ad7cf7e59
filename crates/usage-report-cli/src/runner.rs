//! One report batch over every administrator.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, instrument};
use usage_report_core::{partition_snapshot, CutoffMode, Snapshot, DATE_FORMAT};
use usage_report_render::{DocumentEngine, PdfEngine, RenderError, ReportAssets, ReportBuilder};
use usage_report_store::{BackupDirectory, SnapshotSource};

use crate::config::{ReportConfig, WriteErrorPolicy};
use crate::error::Result;

/// The result of one administrator's report.
#[derive(Debug)]
pub struct AdminOutcome {
    /// Display name of the administrator.
    pub admin: String,
    /// Number of users in the report.
    pub included: usize,
    /// Where the report was written, or why it was not.
    pub result: std::result::Result<PathBuf, RenderError>,
}

impl fmt::Display for AdminOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(path) => write!(
                f,
                "{}: {} users -> {}",
                self.admin,
                self.included,
                path.display()
            ),
            Err(err) => write!(f, "{}: FAILED: {err}", self.admin),
        }
    }
}

/// Outcomes of a batch, in administrator order.
#[derive(Debug)]
pub struct BatchReport {
    /// One entry per administrator attempted.
    pub outcomes: Vec<AdminOutcome>,
    /// Whether the batch stopped early under `WriteErrorPolicy::Abort`.
    pub aborted: bool,
}

impl BatchReport {
    /// True when every administrator's report was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.aborted && self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &AdminOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Write one report per administrator in `snapshot`.
///
/// Partitions are built and written one at a time. With
/// `WriteErrorPolicy::Abort` the batch stops after the first failed write.
#[instrument(skip(snapshot, builder), fields(admins = snapshot.admins.len()))]
pub fn run_batch<E: DocumentEngine>(
    snapshot: &Snapshot,
    cutoff: NaiveDate,
    builder: &ReportBuilder<E>,
    policy: WriteErrorPolicy,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(snapshot.admins.len());
    let mut aborted = false;

    for partition in partition_snapshot(snapshot, cutoff) {
        info!(
            admin = %partition.admin.name,
            included = partition.len(),
            excluded = partition.excluded.len(),
            total_usage_gb = partition.total_usage_gb(),
            "Partition built"
        );
        for exclusion in &partition.excluded {
            debug!(
                admin = %partition.admin.name,
                user = %exclusion.user.uuid,
                reason = ?exclusion.reason,
                "User excluded"
            );
        }

        let result = builder.write_partition(&partition);
        if let Err(err) = &result {
            error!(admin = %partition.admin.name, error = %err, "Report failed");
        }
        let failed = result.is_err();

        outcomes.push(AdminOutcome {
            admin: partition.admin.name.clone(),
            included: partition.len(),
            result,
        });

        if failed && policy == WriteErrorPolicy::Abort {
            aborted = true;
            break;
        }
    }

    BatchReport { outcomes, aborted }
}

/// Load the newest backup and the assets, then run one batch.
///
/// # Errors
///
/// - `RunError::Store` if no backup can be loaded.
/// - `RunError::Render` if the font or logo cannot be loaded.
///
/// Per-administrator write failures are reported in the returned
/// `BatchReport` instead.
pub fn run(config: &ReportConfig, mode: CutoffMode) -> Result<BatchReport> {
    let source = BackupDirectory::new(&config.backup_dir);
    let loaded = source.load_latest()?;

    let cutoff = mode.resolve_now();
    info!(%mode, cutoff = %cutoff.format(DATE_FORMAT), "Cutoff resolved");

    let assets = Arc::new(ReportAssets::load(&config.font_path, &config.logo_path)?);
    let engine = PdfEngine::new(Arc::clone(&assets));
    let builder = ReportBuilder::new(assets, engine, &config.output_dir);

    Ok(run_batch(
        &loaded.snapshot,
        cutoff,
        &builder,
        config.on_write_error,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::image_crate::DynamicImage;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use usage_report_core::{AdminRecord, UserRecord};
    use usage_report_render::{
        Block, EngineError, FontAsset, ImageAsset, PassthroughShaper,
    };

    const FIXTURE_FONT: &[u8] =
        include_bytes!("../../usage-report-render/tests/fixtures/RobotoMedium.ttf");

    /// Writes the title as the file body and can be told to fail for one admin.
    #[derive(Default)]
    struct FakeEngine {
        fail_for: Option<&'static str>,
        titles: RefCell<Vec<String>>,
    }

    impl DocumentEngine for FakeEngine {
        fn extension(&self) -> &'static str {
            "pdf"
        }

        fn render(
            &self,
            title: &str,
            _blocks: &[Block],
            path: &Path,
        ) -> std::result::Result<(), EngineError> {
            self.titles.borrow_mut().push(title.to_string());
            if self.fail_for == Some(title) {
                return Err(EngineError::Document("disk full".into()));
            }
            fs::write(path, title)?;
            Ok(())
        }
    }

    fn assets() -> Arc<ReportAssets> {
        let font = FontAsset::from_bytes("font.ttf", FIXTURE_FONT.to_vec()).unwrap();
        let logo = ImageAsset::from_image("logo.png", DynamicImage::new_rgb8(2, 2));
        Arc::new(ReportAssets::new(font, logo))
    }

    fn builder(out: &Path, fail_for: Option<&'static str>) -> ReportBuilder<FakeEngine> {
        let engine = FakeEngine {
            fail_for,
            ..FakeEngine::default()
        };
        ReportBuilder::new(assets(), engine, out).with_shaper(PassthroughShaper)
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                UserRecord::new("u1", "one", "A1")
                    .with_start_date("2024-06-01")
                    .with_usage_limit_gb(10.0),
                UserRecord::new("u2", "two", "A1").with_start_date("not-a-date"),
                UserRecord::new("u3", "three", "A2")
                    .with_start_date("2024-06-02")
                    .with_usage_limit_gb(5.0),
            ],
            vec![
                AdminRecord::new("A1", "first"),
                AdminRecord::new("A2", "second"),
                AdminRecord::new("A3", "third"),
            ],
        )
    }

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
    }

    #[test]
    fn every_admin_gets_a_report() {
        let out = TempDir::new().unwrap();
        let builder = builder(out.path(), None);

        let report = run_batch(&snapshot(), epoch(), &builder, WriteErrorPolicy::Continue);

        assert!(report.is_success());
        let summary: Vec<(&str, usize)> = report
            .outcomes
            .iter()
            .map(|o| (o.admin.as_str(), o.included))
            .collect();
        assert_eq!(summary, [("first", 1), ("second", 1), ("third", 0)]);
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 3);
    }

    #[test]
    fn continue_policy_keeps_going_after_failure() {
        let out = TempDir::new().unwrap();
        let builder = builder(out.path(), Some("first"));

        let report = run_batch(&snapshot(), epoch(), &builder, WriteErrorPolicy::Continue);

        assert!(!report.is_success());
        assert!(!report.aborted);
        assert_eq!(report.outcomes.len(), 3);
        let failed: Vec<&str> = report.failures().map(|o| o.admin.as_str()).collect();
        assert_eq!(failed, ["first"]);
        assert!(report.outcomes[0].to_string().starts_with("first: FAILED"));
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 2);
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let out = TempDir::new().unwrap();
        let builder = builder(out.path(), Some("second"));

        let report = run_batch(&snapshot(), epoch(), &builder, WriteErrorPolicy::Abort);

        assert!(report.aborted);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(*builder.engine().titles.borrow(), ["first", "second"]);
    }

    #[test]
    fn missing_backup_dir_fails_before_assets() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            backup_dir: dir.path().join("missing"),
            output_dir: dir.path().join("out"),
            font_path: dir.path().join("missing.ttf"),
            logo_path: dir.path().join("missing.png"),
            on_write_error: WriteErrorPolicy::Continue,
        };

        let err = run(&config, CutoffMode::AllTime).unwrap_err();

        assert!(matches!(
            err,
            crate::RunError::Store(usage_report_store::StoreError::DirectoryUnavailable { .. })
        ));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn missing_font_fails_before_any_report() {
        let dir = TempDir::new().unwrap();
        let backups = dir.path().join("backups");
        fs::create_dir(&backups).unwrap();
        let backup = serde_json::json!({
            "users": [],
            "admin_users": [{"uuid": "A1", "name": "first"}],
        });
        fs::write(backups.join("b.json"), backup.to_string()).unwrap();

        let config = ReportConfig {
            backup_dir: backups,
            output_dir: dir.path().join("out"),
            font_path: dir.path().join("missing.ttf"),
            logo_path: dir.path().join("missing.png"),
            on_write_error: WriteErrorPolicy::Continue,
        };

        let err = run(&config, CutoffMode::AllTime).unwrap_err();

        assert!(matches!(err, crate::RunError::Render(RenderError::AssetLoad { .. })));
        assert!(!config.output_dir.exists());
    }
}
