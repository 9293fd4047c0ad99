//! # Store Policies
//!
//! Tunable rules the catalog evaluates against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CatalogPolicy                                   │
//! │                                                                         │
//! │  ReportingPeriod  ── month/year all recorded sales are attributed to   │
//! │  ReturnPolicy     ── how long a purchase stays returnable, and what    │
//! │                      a return does to the units sold counter           │
//! │  top_customers    ── default size of the top customers listing         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are not kept as a dated ledger. Revenue, unit counts, rankings and
//! purchase counts attribute every recorded sale to one reporting period;
//! queries for any other month or year report nothing.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::validate_month;
use crate::{DEFAULT_RETURN_WINDOW_DAYS, DEFAULT_TOP_CUSTOMERS};

// =============================================================================
// Reporting Period
// =============================================================================

/// The month and year that sales are attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    month: u32,
    year: i32,
}

impl ReportingPeriod {
    /// Creates a reporting period, rejecting months outside 1-12.
    pub fn new(month: u32, year: i32) -> Result<Self, ValidationError> {
        validate_month(month)?;
        Ok(ReportingPeriod { month, year })
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// True when `(month, year)` is this period.
    #[inline]
    pub const fn covers(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    /// True when `month` is this period's month, regardless of year.
    #[inline]
    pub const fn covers_month(&self, month: u32) -> bool {
        self.month == month
    }
}

impl Default for ReportingPeriod {
    /// July 2023.
    fn default() -> Self {
        ReportingPeriod {
            month: 7,
            year: 2023,
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

// =============================================================================
// Return Accounting
// =============================================================================

/// What a successful return does to the product's units sold counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnAccounting {
    /// The return is counted like another sale (the counter goes up).
    #[default]
    CountAsSale,

    /// The sale is reversed (the counter goes down, never below zero).
    Reverse,
}

impl fmt::Display for ReturnAccounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnAccounting::CountAsSale => write!(f, "count_as_sale"),
            ReturnAccounting::Reverse => write!(f, "reverse"),
        }
    }
}

impl FromStr for ReturnAccounting {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count_as_sale" | "count-as-sale" => Ok(ReturnAccounting::CountAsSale),
            "reverse" => Ok(ReturnAccounting::Reverse),
            _ => Err(ValidationError::NotAllowed {
                field: "return accounting".to_string(),
                allowed: vec!["count_as_sale".to_string(), "reverse".to_string()],
            }),
        }
    }
}

// =============================================================================
// Return Policy
// =============================================================================

/// How long after a purchase the product may be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnPolicy {
    pub window: Duration,
    pub accounting: ReturnAccounting,
}

impl ReturnPolicy {
    /// Creates a policy with a window of `days` days.
    pub fn with_window_days(days: i64, accounting: ReturnAccounting) -> Result<Self, ValidationError> {
        if !(0..=i64::from(i32::MAX)).contains(&days) {
            return Err(ValidationError::OutOfRange {
                field: "return window days".to_string(),
                min: 0,
                max: i64::from(i32::MAX),
            });
        }
        Ok(ReturnPolicy {
            window: Duration::days(days),
            accounting,
        })
    }
}

impl Default for ReturnPolicy {
    fn default() -> Self {
        ReturnPolicy {
            window: Duration::days(DEFAULT_RETURN_WINDOW_DAYS),
            accounting: ReturnAccounting::default(),
        }
    }
}

// =============================================================================
// Catalog Policy
// =============================================================================

/// Everything the catalog needs to know about store rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPolicy {
    pub reporting: ReportingPeriod,
    pub returns: ReturnPolicy,
    pub top_customers_limit: usize,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        CatalogPolicy {
            reporting: ReportingPeriod::default(),
            returns: ReturnPolicy::default(),
            top_customers_limit: DEFAULT_TOP_CUSTOMERS,
        }
    }
}
