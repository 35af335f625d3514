//! Audit logging system for Pocket Budget
//!
//! Records every change to the budget ledger, with before/after values, in
//! an append-only JSONL log next to the settings file. Unreadable ledger
//! files that had to be replaced with an empty ledger are recorded too.
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_budget::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::created(month, EntityType::MonthlyCategory, category.id.as_str(), &category)
//!     .with_label(category.name.clone());
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
