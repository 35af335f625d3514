//! Path management for Pocket Budget
//!
//! ## Path Resolution Order
//!
//! 1. `POCKET_BUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on
//!    Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on
//!    Windows) joined with `pocket-budget`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BudgetError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "POCKET_BUDGET_DATA_DIR";

/// Where each Pocket Budget file lives
///
/// ```text
/// <base>/config.json
/// <base>/audit.log
/// <base>/data/budgets.json
/// <base>/data/account.json
/// <base>/data/session.json
/// ```
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// An empty `POCKET_BUDGET_DATA_DIR` counts as unset.
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => platform_config_dir()?,
        };

        Ok(Self::with_base_dir(base_dir))
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Every month's budget, keyed by `YYYY-MM`
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Email and password hash of the local account
    pub fn account_file(&self) -> PathBuf {
        self.data_dir().join("account.json")
    }

    /// Present only while someone is signed in
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            BudgetError::Io(format!("Failed to create {}: {}", data_dir.display(), e))
        })
    }

    /// `pocket init` has run when the config file exists
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn platform_config_dir() -> Result<PathBuf, BudgetError> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("pocket-budget"))
        .ok_or_else(|| BudgetError::Config("Could not determine home directory".into()))
}
