//! Audit entry data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::MonthKey;

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    /// Stored data was unreadable and was replaced by an empty ledger
    Recover,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Recover => "RECOVER",
        })
    }
}

/// The kind of ledger entity an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Month,
    MonthlyCategory,
    AnnualCategory,
    Income,
    Expense,
    /// The budgets file as a whole
    Ledger,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::Month => "month",
            EntityType::MonthlyCategory => "monthly category",
            EntityType::AnnualCategory => "annual category",
            EntityType::Income => "income",
            EntityType::Expense => "expense",
            EntityType::Ledger => "ledger",
        })
    }
}

/// One line of the audit log
///
/// `before` and `after` hold the JSON form of the entity. A create has only
/// `after`; a recovery has neither and explains itself in `note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// The month the change was made in; absent for ledger-wide entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,

    /// Display name, such as a category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AuditEntry {
    fn base(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            month: None,
            label: None,
            before: None,
            after: None,
            note: None,
        }
    }

    /// An entity was added to a month
    pub fn created<T: Serialize>(
        month: MonthKey,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Self {
        Self {
            month: Some(month),
            after: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Create, entity_type, entity_id.into())
        }
    }

    /// A value in a month was replaced
    pub fn changed<T: Serialize>(
        month: MonthKey,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self {
            month: Some(month),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            ..Self::base(Operation::Update, entity_type, entity_id.into())
        }
    }

    /// The ledger file could not be read and was replaced
    pub fn recovered(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            note: Some(reason.into()),
            ..Self::base(Operation::Recover, EntityType::Ledger, file.into())
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Check whether the entry was made in the given month
    pub fn touches(&self, month: &MonthKey) -> bool {
        self.month.as_ref() == Some(month)
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<7} ",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation
        )?;
        if let Some(month) = &self.month {
            write!(f, "[{}] ", month)?;
        }
        write!(f, "{} {}", self.entity_type, self.entity_id)?;
        if let Some(label) = &self.label {
            write!(f, " \"{}\"", label)?;
        }
        if let Some(note) = &self.note {
            write!(f, "\n    {}", note)?;
        }
        Ok(())
    }
}
