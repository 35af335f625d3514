//! Storage initialization
//!
//! Handles first-run setup

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::StateTree;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directories and an empty ledger. An existing ledger is left
/// alone.
pub fn initialize_storage(paths: &BudgetPaths) -> Result<(), BudgetError> {
    paths.ensure_directories()?;

    if !paths.budgets_file().exists() {
        write_json_atomic(paths.budgets_file(), &StateTree::new())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.settings_file().exists() || !paths.budgets_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        let tree: StateTree = read_json(paths.budgets_file()).unwrap();
        assert!(tree.budgets.is_empty());
        assert_eq!(
            std::fs::read_to_string(paths.budgets_file())
                .unwrap()
                .replace(char::is_whitespace, ""),
            r#"{"budgets":{}}"#
        );
    }

    #[test]
    fn test_initialize_keeps_existing_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.budgets_file(), r#"{"budgets":{"2024-01":{}}}"#).unwrap();

        initialize_storage(&paths).unwrap();

        let tree: StateTree = read_json(paths.budgets_file()).unwrap();
        assert_eq!(tree.budgets.len(), 1);
    }
}
