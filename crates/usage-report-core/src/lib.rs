//! Core types and filtering for usage reports.
//!
//! This crate provides the pieces of the report pipeline that do not touch the
//! filesystem or a document engine:
//!
//! - **Records**: `UserRecord`, `AdminRecord`, `Snapshot`
//! - **Cutoffs**: `CutoffMode` and the `YYYY-MM-DD` date parser
//! - **Partitioning**: `Partition`, `partition`, `partition_snapshot`
//!
//! # Partition rule
//!
//! A user belongs to an administrator's report when its `added_by_uuid` is the
//! administrator's uuid and its `start_date` parses and is on or after the
//! cutoff. Users with a missing or malformed `start_date` are routed to the
//! partition's excluded bucket instead of failing the run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cutoff;
pub mod error;
pub mod partition;
pub mod records;

pub use cutoff::{parse_date, CutoffMode, DATE_FORMAT};
pub use error::{CoreError, Result};
pub use partition::{partition, partition_snapshot, Exclusion, ExclusionReason, Partition};
pub use records::{AdminRecord, Snapshot, StartDateError, UserRecord};
