//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CatalogError     - Purchase / return rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shelf-io errors (separate crate)                                      │
//! │  └── LoadError        - Malformed inventory / user files               │
//! │                                                                         │
//! │  shelf-cli errors (app)                                                │
//! │  └── CliError         - What the console driver reports                │
//! │                                                                         │
//! │  Flow: ValidationError → LoadError ┐                                   │
//! │        CatalogError ───────────────┴→ CliError → stderr / exit code    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending ids in every variant
//! 3. A returned error means no entity was mutated

use thiserror::Error;

use crate::product::ProductId;
use crate::user::NationalId;

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised by catalog operations.
///
/// Variants are checked in a fixed order by [`Catalog::purchase`]:
/// inventory, registration, adulthood, then the product specific rule.
///
/// [`Catalog::purchase`]: crate::catalog::Catalog::purchase
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product is not currently in the inventory.
    ///
    /// ## When This Occurs
    /// - Product was never registered
    /// - Product was unregistered before the purchase
    #[error("Product not in inventory: {0}")]
    NotInInventory(ProductId),

    /// User is not registered with the store.
    #[error("User not registered: {0}")]
    UnknownUser(NationalId),

    /// User is too young for the store or for the product.
    ///
    /// ## When This Occurs
    /// ```text
    /// purchase(user age 18, any product)
    ///      │
    ///      ▼
    /// age > 18? ── no ──► AgeRestricted { age: 18, required: 19 }
    ///      │
    ///     yes
    ///      │
    ///      ▼
    /// board game with recommended_age 21?
    ///      │
    ///      ▼
    /// age >= 21? ── no ──► AgeRestricted { age: 19, required: 21 }
    /// ```
    #[error("User {national_id} is {age} years old, at least {required} required")]
    AgeRestricted {
        national_id: NationalId,
        age: u32,
        required: u32,
    },

    /// Book category is not one of the categories the store sells.
    #[error("Book {product_id} has invalid category '{category}'")]
    InvalidCategory {
        product_id: ProductId,
        category: String,
    },

    /// The product was not bought by this user within the return window.
    #[error("User {national_id} cannot return {product_id}: not purchased recently")]
    ReturnWindowExpired {
        national_id: NationalId,
        product_id: ProductId,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the loaders and by policy constructors before any catalog
/// state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable price, impossible date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::AgeRestricted {
            national_id: NationalId::from("12345678A"),
            age: 18,
            required: 19,
        };
        assert_eq!(
            err.to_string(),
            "User 12345678A is 18 years old, at least 19 required"
        );

        let err = CatalogError::NotInInventory(ProductId::from("L001"));
        assert_eq!(err.to_string(), "Product not in inventory: L001");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        };
        assert_eq!(err.to_string(), "month must be between 1 and 12");
    }
}
