//! Cache key builders for all Archiva cache entries.
//!
//! Centralising key construction prevents typos and makes it easy to
//! find every key the application uses.

/// Prefix applied to all Archiva cache keys.
const PREFIX: &str = "archiva";

/// Cache key for the ancestor chain of a folder.
pub fn ancestors_of_folder(folder_id: i64) -> String {
    format!("{PREFIX}:ancestors:{folder_id}")
}

/// Pattern matching every ancestor-chain entry.
pub fn ancestors_pattern() -> String {
    format!("{PREFIX}:ancestors:*")
}
