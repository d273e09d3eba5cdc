//! Storage path resolution.
//!
//! The database location is the only configurable setting. It is taken from
//! the `--db` flag, then the `COMMERCE_DB` environment variable, then the
//! fixed default in the working directory.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the database file.
pub const DB_ENV_VAR: &str = "COMMERCE_DB";

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "e_commerce.db";

/// Resolves the database path from the flag and the process environment.
pub fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    resolve_from(flag, std::env::var_os(DB_ENV_VAR))
}

fn resolve_from(flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let path = resolve_from(Some("flag.db".into()), Some("env.db".into()));
        assert_eq!(path, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_env_used_without_flag() {
        let path = resolve_from(None, Some("env.db".into()));
        assert_eq!(path, PathBuf::from("env.db"));
    }

    #[test]
    fn test_default_when_unset_or_empty() {
        assert_eq!(resolve_from(None, None), PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(
            resolve_from(None, Some(OsString::new())),
            PathBuf::from(DEFAULT_DB_PATH)
        );
    }
}
