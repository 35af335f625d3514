//! Month resolution
//!
//! Turns what the user typed into a month key, and picks the month a command
//! acts on when none is given.

use chrono::{Datelike, Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::MonthKey;

const MONTH_NAMES: [(&str, u32); 24] = [
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

/// Resolves month references relative to today and the selected month
pub struct MonthResolver<'a> {
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> MonthResolver<'a> {
    /// Create a resolver anchored at today's local date
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_today(settings, Local::now().date_naive())
    }

    /// Create a resolver anchored at a fixed date
    pub fn with_today(settings: &'a Settings, today: NaiveDate) -> Self {
        Self { settings, today }
    }

    /// The current calendar month
    pub fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today)
    }

    /// The month a command acts on: the argument if given, else the selected
    /// month, else the current month
    pub fn resolve(&self, input: Option<&str>) -> BudgetResult<MonthKey> {
        match input {
            Some(s) => self.parse(s),
            None => Ok(self
                .settings
                .default_month()
                .copied()
                .unwrap_or_else(|| self.current_month())),
        }
    }

    /// Parse a month reference
    ///
    /// Formats supported:
    /// - "2024-03"
    /// - "current", "now", "this", "last", "prev", "previous", "next"
    /// - "March", "Mar", "March 2024", "mar 2024" (current year if omitted)
    pub fn parse(&self, s: &str) -> BudgetResult<MonthKey> {
        let s_lower = s.trim().to_lowercase();
        let current = self.current_month();

        match s_lower.as_str() {
            "current" | "now" | "this" => return Ok(current),
            "last" | "prev" | "previous" => return Ok(current.prev()),
            "next" => return Ok(current.next()),
            _ => {}
        }

        if let Some(month) = self.parse_month_name(&s_lower) {
            return Ok(month);
        }

        MonthKey::parse(&s_lower).map_err(|e| BudgetError::Validation(e.to_string()))
    }

    fn parse_month_name(&self, s: &str) -> Option<MonthKey> {
        for (name, month) in MONTH_NAMES {
            if let Some(rest) = s.strip_prefix(name) {
                let rest = rest.trim();
                let year = if rest.is_empty() {
                    self.today.year()
                } else {
                    rest.parse().ok()?
                };
                return MonthKey::new(year, month).ok();
            }
        }
        None
    }
}
