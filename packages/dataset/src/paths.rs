//! Location of the collision export on disk.

use std::path::PathBuf;

/// Environment variable overriding the dataset location.
pub const DATASET_PATH_ENV: &str = "DATASET_PATH";

/// File name used when [`DATASET_PATH_ENV`] is not set, resolved against
/// the working directory.
pub const DEFAULT_DATASET_FILE: &str = "df_full_features.csv";

/// Returns the dataset path from the environment, falling back to
/// [`DEFAULT_DATASET_FILE`].
#[must_use]
pub fn dataset_path() -> PathBuf {
    std::env::var(DATASET_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_DATASET_FILE), PathBuf::from)
}
