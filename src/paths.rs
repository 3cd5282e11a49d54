//! Path utilities for determining data storage locations.
//!
//! Data is stored in `~/.spaced-review/` unless configured otherwise.

use std::path::{Path, PathBuf};

/// The base directory name for spaced-review data.
const DATA_DIR_NAME: &str = ".spaced-review";

/// The database filename.
pub const DATABASE_FILENAME: &str = "tasks.sqlite3";

/// Get the base data directory.
///
/// Returns `~/.spaced-review/` or `None` if the home directory
/// cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the default database path, `~/.spaced-review/tasks.sqlite3`.
///
/// Falls back to a file in the working directory when there is no home directory.
#[must_use]
pub fn default_db_path() -> PathBuf {
    data_dir().map_or_else(
        || Path::new(".").join(DATABASE_FILENAME),
        |dir| dir.join(DATABASE_FILENAME),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_filename() {
        let path = default_db_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(DATABASE_FILENAME));
    }

    #[test]
    fn test_data_dir_under_home() {
        if let (Some(home), Some(dir)) = (dirs::home_dir(), data_dir()) {
            assert_eq!(dir, home.join(".spaced-review"));
            assert_eq!(default_db_path(), dir.join(DATABASE_FILENAME));
        }
    }
}
