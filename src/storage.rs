//! Local JSON data files

use crate::{
    config::ClientConfig,
    error::{Error, Result},
};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// What bootstrap did with one data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    Created(PathBuf),
    Existing(PathBuf),
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
        }
        _ => Ok(()),
    }
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| Error::json(path.display().to_string(), e))?;
    fs::write(path, body).map_err(|e| Error::io(path, e))
}

/// Creates the leases and reservations files as empty lists when missing.
///
/// Existing files are never rewritten.
pub fn ensure_data_files(config: &ClientConfig) -> Result<Vec<Bootstrap>> {
    let mut outcomes = Vec::with_capacity(2);
    for path in [&config.leases_path, &config.reservations_path] {
        let abs = absolute(path);
        if path.exists() {
            tracing::debug!("Data file already present: {}", abs.display());
            outcomes.push(Bootstrap::Existing(abs));
            continue;
        }
        write_pretty(&abs, &[] as &[serde_json::Value])?;
        tracing::info!("Created data file {}", abs.display());
        outcomes.push(Bootstrap::Created(abs));
    }
    Ok(outcomes)
}

/// Overwrites `path` with the lease list, pretty-printed. Returns the absolute path.
pub fn write_leases(path: &Path, leases: &[serde_json::Value]) -> Result<PathBuf> {
    let abs = absolute(path);
    write_pretty(&abs, leases)?;
    tracing::info!("Wrote {} leases to {}", leases.len(), abs.display());
    Ok(abs)
}

/// Loads the raw reservation records, or `None` when the file does not exist.
///
/// The file must hold a JSON array; individual records are validated by the caller.
pub fn read_reservations(path: &Path) -> Result<Option<Vec<serde_json::Value>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let records =
        serde_json::from_str(&raw).map_err(|e| Error::json(path.display().to_string(), e))?;
    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_bootstrap_creates_missing_files() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::new("http://x", "t").with_data_dir(dir.path().join("nested/data"));

        let outcomes = ensure_data_files(&config).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o, Bootstrap::Created(_))));
        assert_eq!(fs::read_to_string(&config.leases_path).unwrap(), "[]");
        assert_eq!(fs::read_to_string(&config.reservations_path).unwrap(), "[]");
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::new("http://x", "t").with_data_dir(dir.path());

        ensure_data_files(&config).unwrap();
        fs::write(&config.reservations_path, r#"[{"hardwareAddress":"AA:BB","address":"10.0.0.5"}]"#)
            .unwrap();
        let before = fs::read_to_string(&config.reservations_path).unwrap();

        let outcomes = ensure_data_files(&config).unwrap();

        assert!(outcomes.iter().all(|o| matches!(o, Bootstrap::Existing(_))));
        assert_eq!(fs::read_to_string(&config.reservations_path).unwrap(), before);
    }

    #[test]
    fn test_write_leases_pretty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leases.json");
        let leases = vec![json!({"hardwareAddress": "AA:BB", "address": "10.0.0.5"})];

        write_leases(&path, &leases).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[\n  {\n    \"hardwareAddress\": \"AA:BB\",\n    \"address\": \"10.0.0.5\"\n  }\n]"
        );
    }

    #[test]
    fn test_read_reservations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reserved.json");
        assert_eq!(read_reservations(&path).unwrap(), None);

        fs::write(
            &path,
            r#"[{"hardwareAddress":"AA:BB","address":"10.0.0.5","hostName":"h1"}]"#,
        )
        .unwrap();
        let records = read_reservations(&path).unwrap().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["hostName"], "h1");
    }

    #[test]
    fn test_read_reservations_rejects_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reserved.json");
        fs::write(&path, "{\"hardwareAddress\": \"AA:BB\"").unwrap();

        let err = read_reservations(&path).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }
}
