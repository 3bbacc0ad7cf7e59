//! Output file naming.
//!
//! Reports are named `{admin}_{suffix}.{ext}` where the suffix is a random
//! five-digit number. The suffix only keeps repeated runs from overwriting
//! each other.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use rand::Rng;

/// Range the random suffix is drawn from.
pub const SUFFIX_RANGE: RangeInclusive<u32> = 10_000..=99_999;

/// How many suffixes are tried before giving up on a free name.
pub const MAX_NAME_ATTEMPTS: usize = 32;

/// Stem used when an administrator has no usable display name.
const FALLBACK_STEM: &str = "admin";

/// Make an administrator name safe to use as a file name stem.
///
/// Path separators, characters reserved on common filesystems, control
/// characters and a leading dot are replaced with `_`.
#[must_use]
pub fn sanitize_file_stem(name: &str) -> String {
    let mut stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }
    if stem.is_empty() {
        stem.push_str(FALLBACK_STEM);
    }
    stem
}

/// Build a report file name.
#[must_use]
pub fn report_file_name(admin: &str, suffix: u32, extension: &str) -> String {
    format!("{}_{suffix}.{extension}", sanitize_file_stem(admin))
}

/// Pick a report path in `dir` that does not exist yet.
///
/// Returns `None` if every attempt collided with an existing file.
pub fn free_report_path<R: Rng>(
    dir: &Path,
    admin: &str,
    extension: &str,
    rng: &mut R,
) -> Option<PathBuf> {
    (0..MAX_NAME_ATTEMPTS)
        .map(|_| dir.join(report_file_name(admin, rng.gen_range(SUFFIX_RANGE), extension)))
        .find(|path| !path.exists())
}
