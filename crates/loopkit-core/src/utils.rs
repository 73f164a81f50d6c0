//! Path helpers — data directory and tilde expansion.

use std::path::PathBuf;

/// Get the Loopkit data directory (e.g. `~/.loopkit/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".loopkit")
}

/// Expand `~` to the home directory in a path string.
pub fn expand_home(path: &str) -> PathBuf {
    if path.starts_with("~/") || path == "~" {
        let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(path.trim_start_matches("~/"))
    } else {
        PathBuf::from(path)
    }
}
