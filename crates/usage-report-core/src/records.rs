//! Snapshot record types.
//!
//! These mirror the shape of the panel backup file. Only the fields the report
//! needs are modelled; every other key in the backup is ignored.
//!
//! User fields are read leniently. A value of the wrong JSON type degrades to
//! something the partitioner can route to the excluded bucket, so one odd user
//! never fails the whole snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cutoff::DATE_FORMAT;

/// A user account as exported in a backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's uuid. Empty when the backup has none.
    #[serde(default, deserialize_with = "lenient_text")]
    pub uuid: String,

    /// Display name, possibly right-to-left text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,

    /// Uuid of the administrator that owns this user.
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub added_by_uuid: Option<String>,

    /// Activation date as written in the backup (`YYYY-MM-DD`).
    ///
    /// Kept raw so a malformed value excludes only this user. Non-string
    /// values are kept as their JSON text.
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub start_date: Option<String>,

    /// Usage quota in GB. Numeric strings are accepted.
    #[serde(default, rename = "usage_limit_GB", deserialize_with = "lenient_number")]
    pub usage_limit_gb: Option<f64>,

    /// Package length in days. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub package_days: Option<i64>,
}

impl UserRecord {
    /// Create a user owned by `added_by_uuid` with no dates or quota set.
    #[must_use]
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        added_by_uuid: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            added_by_uuid: Some(added_by_uuid.into()),
            start_date: None,
            usage_limit_gb: None,
            package_days: None,
        }
    }

    /// Set the raw start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Set the usage limit.
    #[must_use]
    pub fn with_usage_limit_gb(mut self, usage_limit_gb: f64) -> Self {
        self.usage_limit_gb = Some(usage_limit_gb);
        self
    }

    /// Set the package length.
    #[must_use]
    pub fn with_package_days(mut self, package_days: i64) -> Self {
        self.package_days = Some(package_days);
        self
    }

    /// Validate and parse the activation date.
    ///
    /// # Errors
    ///
    /// Returns `StartDateError::Missing` for an absent or empty value and
    /// `StartDateError::Malformed` when it does not parse as `YYYY-MM-DD`.
    pub fn activation_date(&self) -> Result<NaiveDate, StartDateError> {
        let raw = self
            .start_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(StartDateError::Missing)?;

        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| StartDateError::Malformed(raw.to_string()))
    }

    /// Whether this user was added by the given administrator.
    #[must_use]
    pub fn is_owned_by(&self, admin: &AdminRecord) -> bool {
        self.added_by_uuid.as_deref() == Some(admin.uuid.as_str())
    }

    /// Usage limit, with an absent value counted as zero.
    #[must_use]
    pub fn usage_limit_or_zero(&self) -> f64 {
        self.usage_limit_gb.unwrap_or(0.0)
    }

    /// Package days, with an absent value counted as zero.
    #[must_use]
    pub fn package_days_or_zero(&self) -> i64 {
        self.package_days.unwrap_or(0)
    }
}

/// Why a user's `start_date` could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartDateError {
    /// The field is absent, null or empty.
    #[error("start date missing")]
    Missing,

    /// The field is present but not a valid `YYYY-MM-DD` date.
    #[error("malformed start date: {0:?}")]
    Malformed(String),
}

/// An administrator account; the partition key for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    /// The administrator's uuid.
    pub uuid: String,

    /// Display name, used in the output file name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl AdminRecord {
    /// Create an administrator record.
    #[must_use]
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }
}

/// Users and administrators read from one backup file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All user accounts, in backup order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<UserRecord>,

    /// All administrators, in backup order.
    #[serde(default, rename = "admin_users", deserialize_with = "null_as_default")]
    pub admins: Vec<AdminRecord>,
}

impl Snapshot {
    /// Build a snapshot from already-loaded collections.
    #[must_use]
    pub fn new(users: Vec<UserRecord>, admins: Vec<AdminRecord>) -> Self {
        Self { users, admins }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(number.filter(|n: &f64| n.is_finite()))
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}
