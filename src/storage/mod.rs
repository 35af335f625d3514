//! Storage layer for Pocket Budget
//!
//! Provides JSON file storage with atomic writes, automatic directory
//! creation, and the audit trail of every change.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use ledger::{LedgerRepository, LoadOutcome};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator
pub struct Storage {
    paths: BudgetPaths,
    pub ledger: LedgerRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.budgets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    ///
    /// An unreadable ledger is recorded in the audit log before the empty
    /// replacement is handed back.
    pub fn load_all(&mut self) -> Result<LoadOutcome, BudgetError> {
        let outcome = self.ledger.load()?;
        if let LoadOutcome::Recovered { reason, .. } = &outcome {
            let file = self.ledger.path().display().to_string();
            self.audit.log(&AuditEntry::recovered(file, reason.clone()))?;
        }
        Ok(outcome)
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.ledger.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Append an entry to the audit log
    pub fn record(&self, entry: AuditEntry) -> Result<(), BudgetError> {
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_recovery_is_audited() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths.clone()).unwrap();
        std::fs::write(paths.budgets_file(), "garbage").unwrap();

        let outcome = storage.load_all().unwrap();
        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Recover);
    }
}
