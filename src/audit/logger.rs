//! Append-only JSONL audit log

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BudgetError, BudgetResult};
use crate::models::MonthKey;

use super::entry::AuditEntry;

/// Writes and reads the audit log, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it to disk
    pub fn log(&self, entry: &AuditEntry) -> BudgetResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| BudgetError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BudgetError::Io(format!("Failed to open audit log: {}", e)))?;

        // A single write keeps each line whole
        file.write_all(line.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| BudgetError::Io(format!("Failed to write audit log: {}", e)))
    }

    /// Every entry, oldest first
    ///
    /// A malformed final line is what an interrupted append leaves behind
    /// and is skipped. A malformed line anywhere else is an error.
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BudgetError::Io(format!("Failed to read audit log: {}", e))),
        };

        let lines: Vec<(usize, &str)> = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();
        let last = lines.len().saturating_sub(1);

        let mut entries: Vec<AuditEntry> = Vec::with_capacity(lines.len());
        for (i, (line_no, line)) in lines.into_iter().enumerate() {
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(_) if i == last => break,
                Err(e) => {
                    return Err(BudgetError::Json(format!(
                        "Audit log line {} is malformed: {}",
                        line_no + 1,
                        e
                    )))
                }
            }
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BudgetResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// The last `count` entries made in one month, oldest first
    pub fn read_month(&self, month: &MonthKey, count: usize) -> BudgetResult<Vec<AuditEntry>> {
        let mut entries: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.touches(month))
            .collect();
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
