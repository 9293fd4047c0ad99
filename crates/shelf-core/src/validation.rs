//! # Validation Module
//!
//! Input validation for records entering the catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Loader (shelf-io)                                            │
//! │  ├── Field counts, numeric parsing                                     │
//! │  └── THIS MODULE: field level rules                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog (purchase / return)                                  │
//! │  └── Business rules: adulthood, categories, return window              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Book categories are deliberately NOT checked here. A book with an
//! unknown category can be stocked; it is only refused at purchase time.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_RECOMMENDED_AGE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product id such as `L001` or `J001`.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_product_id;
///
/// assert!(validate_product_id("L001").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("L 001").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    require("product id", id)?;

    if id.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product title.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    require("title", title)
}

/// Validates a national id (DNI).
pub fn validate_national_id(national_id: &str) -> ValidationResult<()> {
    require("national id", national_id)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a calendar month (1-12).
pub fn validate_month(month: u32) -> ValidationResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        });
    }
    Ok(())
}

/// Validates a price. Zero is allowed (board games are free).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a board game's recommended minimum age.
pub fn validate_recommended_age(age: u32) -> ValidationResult<()> {
    if age > MAX_RECOMMENDED_AGE {
        return Err(ValidationError::OutOfRange {
            field: "recommended age".to_string(),
            min: 0,
            max: i64::from(MAX_RECOMMENDED_AGE),
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Builds a birth date from day, month and year, rejecting impossible dates.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_birth_date;
///
/// assert!(validate_birth_date(29, 2, 2000).is_ok());
/// assert!(validate_birth_date(29, 2, 2001).is_err());
/// ```
pub fn validate_birth_date(day: u32, month: u32, year: i32) -> ValidationResult<NaiveDate> {
    validate_month(month)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ValidationError::InvalidFormat {
        field: "birth date".to_string(),
        reason: format!("{:02}/{:02}/{} is not a calendar date", day, month, year),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
