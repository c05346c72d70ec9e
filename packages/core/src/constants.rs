use std::env;
use std::path::PathBuf;

/// Default port for the API server
pub const DEFAULT_PORT: u16 = 4020;

/// Get the path to the Letterhead directory (~/.letterhead)
pub fn letterhead_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".letterhead")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".letterhead")
    }
}

/// Get the path to the default database file (~/.letterhead/letterhead.db)
pub fn database_file() -> PathBuf {
    letterhead_dir().join("letterhead.db")
}
