//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "tableau";
const APPLICATION: &str = "tableau";

/// Used when no home directory can be determined.
const FALLBACK_DATA_DIR: &str = "tableau-data";

/// Directory for table collections.
///
/// - Linux: `$XDG_DATA_HOME/tableau` or `~/.local/share/tableau`
/// - macOS: `~/Library/Application Support/dev.tableau.tableau`
/// - Windows: `C:\Users\<User>\AppData\Roaming\tableau\tableau\data`
pub fn data_dir() -> PathBuf {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}
