//! SQLite DSN helpers.

use std::path::{Path, PathBuf};

use crate::{DbError, Result};

/// True for `sqlite::memory:`, `sqlite://:memory:` and `mode=memory` DSNs.
pub fn is_memory_dsn(dsn: &str) -> bool {
    let lower = dsn.to_ascii_lowercase();
    lower.contains(":memory:") || lower.contains("mode=memory")
}

/// File path portion of a `sqlite://` / `sqlite:` DSN (query string stripped).
fn file_path_of(dsn: &str) -> Option<PathBuf> {
    if is_memory_dsn(dsn) {
        return None;
    }
    let tail = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    let path = tail.split_once('?').map_or(tail, |(p, _)| p);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Create the parent directory of a file-backed SQLite DSN.
pub fn ensure_parent_dir(dsn: &str) -> Result<()> {
    if let Some(parent) = file_path_of(dsn).as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as `sqlite::memory:`.
/// - Normalizes backslashes into forward slashes.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| DbError::InvalidDsn {
            dsn: dsn.to_string(),
            reason: "DSN must start with sqlite://".to_string(),
        })?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(DbError::InvalidDsn {
            dsn: dsn.to_string(),
            reason: "empty SQLite path".to_string(),
        });
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsns_are_detected() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite://file.db?mode=memory"));
        assert!(!is_memory_dsn("sqlite://data/crm.db"));
    }

    #[test]
    fn relative_dsn_is_joined_with_base_dir() {
        let out = absolutize_sqlite_dsn("sqlite://database/crm.db?mode=rwc", Path::new("/srv/crm"))
            .unwrap();
        assert_eq!(out, "sqlite:///srv/crm/database/crm.db?mode=rwc");
    }

    #[test]
    fn absolute_dsn_is_kept() {
        let out = absolutize_sqlite_dsn("sqlite:///var/lib/crm.db", Path::new("/srv")).unwrap();
        assert_eq!(out, "sqlite:///var/lib/crm.db");
    }

    #[test]
    fn memory_dsn_is_normalized() {
        let out = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/srv")).unwrap();
        assert_eq!(out, "sqlite::memory:");
    }

    #[test]
    fn non_sqlite_scheme_is_rejected() {
        assert!(absolutize_sqlite_dsn("postgres://x", Path::new("/srv")).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", Path::new("/srv")).is_err());
    }
}
