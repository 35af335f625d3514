//! User settings for Pocket Budget
//!
//! Manages user preferences: the currency symbol, the month commands act on
//! by default, and whether budgeting requires a signed-in account.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::storage::file_io::{read_json, write_json_atomic};
use crate::models::MonthKey;

/// User settings for Pocket Budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Month selected with `month select`; commands default to it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_month: Option<MonthKey>,

    /// Refuse budgeting commands unless an account is signed in
    #[serde(default)]
    pub require_sign_in: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            selected_month: None,
            require_sign_in: false,
        }
    }
}

impl Settings {
    /// Read `config.json`, falling back to defaults when it has not been written
    ///
    /// Nothing is written here; `save` persists the first copy.
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        read_json(paths.settings_file())
            .map_err(|e| BudgetError::Config(format!("Unreadable settings: {}", e)))
    }

    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Month a command acts on when none is given on the command line
    pub fn default_month(&self) -> Option<&MonthKey> {
        self.selected_month.as_ref()
    }
}
