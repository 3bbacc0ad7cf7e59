//! Partitioning users by owning administrator and activation date.

use chrono::NaiveDate;

use crate::records::{AdminRecord, Snapshot, StartDateError, UserRecord};

/// The users attributable to one administrator on or after a cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    /// The administrator this partition belongs to.
    pub admin: &'a AdminRecord,

    /// The cutoff the partition was filtered with.
    pub cutoff: NaiveDate,

    /// Users in the report, in snapshot order.
    pub included: Vec<&'a UserRecord>,

    /// The administrator's own users that were filtered out, in snapshot order.
    pub excluded: Vec<Exclusion<'a>>,
}

impl Partition<'_> {
    /// Sum of `usage_limit_GB` over the included users.
    #[must_use]
    pub fn total_usage_gb(&self) -> f64 {
        self.included
            .iter()
            .map(|user| user.usage_limit_or_zero())
            .sum()
    }

    /// Number of included users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.included.len()
    }

    /// Whether no user qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }
}

/// A user owned by the administrator but left out of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Exclusion<'a> {
    /// The filtered-out user.
    pub user: &'a UserRecord,

    /// Why it was filtered out.
    pub reason: ExclusionReason,
}

/// Why an owned user is not in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// The backup has no uuid for the user.
    MissingUuid,

    /// The start date is missing or malformed.
    StartDate(StartDateError),

    /// The user was activated before the cutoff.
    BeforeCutoff(NaiveDate),
}

/// Select `admin`'s users whose start date is on or after `cutoff`.
///
/// Source order is preserved. Users with no uuid or with a missing or
/// malformed start date are recorded in [`Partition::excluded`] and never abort the operation.
#[must_use]
pub fn partition<'a>(
    users: &'a [UserRecord],
    admin: &'a AdminRecord,
    cutoff: NaiveDate,
) -> Partition<'a> {
    let mut included = Vec::new();
    let mut excluded = Vec::new();

    for user in users.iter().filter(|user| user.is_owned_by(admin)) {
        if user.uuid.is_empty() {
            excluded.push(Exclusion {
                user,
                reason: ExclusionReason::MissingUuid,
            });
            continue;
        }
        match user.activation_date() {
            Ok(date) if date >= cutoff => included.push(user),
            Ok(date) => excluded.push(Exclusion {
                user,
                reason: ExclusionReason::BeforeCutoff(date),
            }),
            Err(e) => excluded.push(Exclusion {
                user,
                reason: ExclusionReason::StartDate(e),
            }),
        }
    }

    Partition {
        admin,
        cutoff,
        included,
        excluded,
    }
}

/// Partition a whole snapshot, one entry per administrator in snapshot order.
///
/// Users whose `added_by_uuid` matches no administrator appear in no partition.
#[must_use]
pub fn partition_snapshot(snapshot: &Snapshot, cutoff: NaiveDate) -> Vec<Partition<'_>> {
    snapshot
        .admins
        .iter()
        .map(|admin| partition(&snapshot.users, admin, cutoff))
        .collect()
}
