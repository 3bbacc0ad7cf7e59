//! Usage report batch runner.
//!
//! Wires the snapshot loader, the partitioner and the report builder into one
//! batch over every administrator, behind an interactive menu or command-line
//! flags.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod menu;
pub mod runner;

pub use cli::Cli;
pub use config::{ReportConfig, WriteErrorPolicy};
pub use error::{Result, RunError};
pub use menu::{prompt, MenuChoice};
pub use runner::{run, run_batch, AdminOutcome, BatchReport};
