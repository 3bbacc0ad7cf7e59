//! Usage Report - per-administrator usage reports from panel backups
//!
//! This is the main entry point for the `usage-report` binary.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use usage_report_cli::{prompt, run, Cli, MenuChoice, ReportConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.default_log_filter());

    match try_main(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.apply(ReportConfig::from_env());
    tracing::info!(
        backup_dir = %config.backup_dir.display(),
        output_dir = %config.output_dir.display(),
        font = %config.font_path.display(),
        logo = %config.logo_path.display(),
        on_write_error = ?config.on_write_error,
        "Configuration loaded"
    );

    let mode = match cli.cutoff_mode()? {
        Some(mode) => mode,
        None => {
            let stdin = io::stdin();
            match prompt(&mut stdin.lock(), &mut io::stdout().lock())
                .context("failed to read menu choice")?
            {
                MenuChoice::Run(mode) => mode,
                MenuChoice::Exit => return Ok(ExitCode::SUCCESS),
            }
        }
    };

    let report = run(&config, mode)?;
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    if report.aborted {
        eprintln!("batch aborted after a failed report");
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize tracing; `RUST_LOG` takes precedence over `default_filter`.
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
