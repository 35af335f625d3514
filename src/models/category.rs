//! Category models
//!
//! Monthly categories are spending buckets that live in a single month.
//! Annual categories are savings targets: the definition lives in the month
//! it was added to, but spending against it is rolled up over the whole
//! calendar year.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// A spending bucket scoped to one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCategory {
    pub id: CategoryId,

    #[serde(default)]
    pub name: String,

    /// Amount planned for this category this month
    #[serde(default)]
    pub budgeted: Money,
}

impl MonthlyCategory {
    /// Create a new monthly category with a fresh id
    pub fn new(name: impl Into<String>, budgeted: Money) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            budgeted,
        }
    }

    /// Check whether user input names this category (by name or id)
    pub fn matches(&self, input: &str) -> bool {
        self.name.eq_ignore_ascii_case(input.trim()) || self.id.matches(input)
    }
}

impl fmt::Display for MonthlyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (budgeted: {})", self.name, self.budgeted)
    }
}

/// A yearly savings target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCategory {
    pub id: CategoryId,

    #[serde(default)]
    pub name: String,

    /// The yearly target amount
    #[serde(default)]
    pub target: Money,

    /// Additive adjustment on top of the target
    #[serde(default)]
    pub boost: Money,
}

impl AnnualCategory {
    /// Create a new annual category with a fresh id and no boost
    pub fn new(name: impl Into<String>, target: Money) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            target,
            boost: Money::zero(),
        }
    }

    /// Total amount available over the year (target plus boost)
    pub fn available(&self) -> Money {
        self.target + self.boost
    }

    /// Check whether user input names this category (by name or id)
    pub fn matches(&self, input: &str) -> bool {
        self.name.eq_ignore_ascii_case(input.trim()) || self.id.matches(input)
    }
}

impl fmt::Display for AnnualCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (target: {})", self.name, self.target)?;
        if !self.boost.is_zero() {
            write!(f, " + boost {}", self.boost)?;
        }
        Ok(())
    }
}
