//! JSON file helpers for the ledger and account files
//!
//! Writes go to a sibling temp file that is synced and renamed over the
//! target, so a crash leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BudgetError;

/// Read a JSON file, or `T::default()` when there is no file yet
pub fn read_json<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        BudgetError::Persistence(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        BudgetError::Persistence(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Replace `path` with the pretty-printed JSON form of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Persistence(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BudgetError::Persistence(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| BudgetError::Persistence(format!("Failed to serialize data: {}", e)))
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| BudgetError::Persistence(format!("Failed to flush data: {}", e)))
        })
        .and_then(|_| {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| BudgetError::Persistence(format!("Failed to sync data: {}", e)))
        });

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BudgetError::Persistence(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Move an unreadable file aside so it cannot be overwritten
///
/// The first copy goes to `<name>.corrupt`, later ones to `<name>.corrupt.1`,
/// `<name>.corrupt.2` and so on. Earlier copies are never replaced.
/// Returns the new location.
pub fn quarantine(path: &Path) -> Result<PathBuf, BudgetError> {
    let target = (0u32..)
        .map(|n| {
            let mut name = path.as_os_str().to_owned();
            name.push(".corrupt");
            if n > 0 {
                name.push(format!(".{}", n));
            }
            PathBuf::from(name)
        })
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| {
            BudgetError::Persistence(format!("No free name to move {} aside", path.display()))
        })?;

    fs::rename(path, &target).map_err(|e| {
        BudgetError::Persistence(format!("Failed to move {} aside: {}", path.display(), e))
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthKey, StateTree};
    use tempfile::TempDir;

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    #[test]
    fn test_first_run_reads_empty_ledger() {
        let temp = TempDir::new().unwrap();
        let tree: StateTree = read_json(temp.path().join("budgets.json")).unwrap();
        assert_eq!(tree, StateTree::new());
    }

    #[test]
    fn test_ledger_survives_rewrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("budgets.json");

        let mut tree = StateTree::new();
        tree.create_month(march()).unwrap();
        tree.set_income(&march(), Money::from_units(3000)).unwrap();
        write_json_atomic(&path, &tree).unwrap();

        tree.set_income(&march(), Money::from_units(3100)).unwrap();
        write_json_atomic(&path, &tree).unwrap();

        let loaded: StateTree = read_json(&path).unwrap();
        assert_eq!(loaded, tree);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_garbled_ledger_is_persistence_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("budgets.json");
        fs::write(&path, "{\"2024-03\": [").unwrap();

        let err = read_json::<StateTree, _>(&path).unwrap_err();
        assert!(matches!(err, BudgetError::Persistence(_)));
    }

    #[test]
    fn test_quarantine_keeps_original_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("budgets.json");
        fs::write(&path, "{{{").unwrap();

        let moved = quarantine(&path).unwrap();

        assert!(!path.exists());
        assert_eq!(moved, temp.path().join("budgets.json.corrupt"));
        assert_eq!(fs::read_to_string(moved).unwrap(), "{{{");
    }

    #[test]
    fn test_repeated_quarantine_keeps_every_copy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("budgets.json");

        fs::write(&path, "first broken ledger").unwrap();
        let first = quarantine(&path).unwrap();
        fs::write(&path, "second broken ledger").unwrap();
        let second = quarantine(&path).unwrap();
        fs::write(&path, "third broken ledger").unwrap();
        let third = quarantine(&path).unwrap();

        assert_eq!(first, temp.path().join("budgets.json.corrupt"));
        assert_eq!(second, temp.path().join("budgets.json.corrupt.1"));
        assert_eq!(third, temp.path().join("budgets.json.corrupt.2"));
        assert_eq!(fs::read_to_string(first).unwrap(), "first broken ledger");
        assert_eq!(fs::read_to_string(second).unwrap(), "second broken ledger");
        assert_eq!(fs::read_to_string(third).unwrap(), "third broken ledger");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 3);
    }
}
