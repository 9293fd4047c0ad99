//! # shelf-core: Pure Bookkeeping for Shelf
//!
//! The inventory, user roster and sales rules of a small online store that
//! sells books and board games. Everything here is in-memory and free of I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shelf Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shelf-cli (console driver)                     │   │
//! │  │     demo ──► list ──► report (text or JSON)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               shelf-io (inventory / user loaders)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ product  │  │   user   │  │ catalog  │  │ policy/money │   │   │
//! │  │   │ Book     │  │ User     │  │ purchase │  │ validation   │   │   │
//! │  │   │ BoardGame│  │ Purchase │  │ return   │  │ report       │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO CONSOLE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Product, its Book / BoardGame kinds and sales figures
//! - [`user`] - Registered customers and their purchases
//! - [`catalog`] - The store service: registration, purchase, return, reports
//! - [`policy`] - Reporting period and return rules
//! - [`money`] - Integer cents money type
//! - [`report`] - Report data handed to presentation layers
//! - [`validation`] - Field level checks used by loaders
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shelf_core::{Catalog, Money, NationalId, Product, ProductId, ProductVariant, User};
//!
//! let mut catalog = Catalog::new();
//! catalog.register_product(Product::book(
//!     "L001", "El principito", "Antoine de Saint-Exupéry",
//!     Money::from_cents(1099), "Aventuras", true,
//! ));
//! catalog.register_user(User::new(
//!     "John", "Doe", "Smith", "12345678A",
//!     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), 30, "1234567890",
//! ));
//!
//! catalog
//!     .purchase(&NationalId::from("12345678A"), &ProductId::from("L001"))
//!     .unwrap();
//!
//! assert_eq!(catalog.revenue_for(ProductVariant::Book, 7, 2023).cents(), 1099);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod policy;
pub mod product;
pub mod report;
pub mod user;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use money::Money;
pub use policy::{CatalogPolicy, ReportingPeriod, ReturnAccounting, ReturnPolicy};
pub use product::{
    BoardGameDetails, BookCategory, BookDetails, Product, ProductId, ProductKind, ProductVariant,
    SalesPerformance,
};
pub use report::{CustomerSales, SalesReport, VariantSales};
pub use user::{NationalId, Purchase, User};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Users must be strictly older than this to buy anything.
pub const ADULT_AGE: u32 = 18;

/// Days a purchase stays returnable unless configured otherwise.
pub const DEFAULT_RETURN_WINDOW_DAYS: i64 = 14;

/// Size of the top customers listing unless configured otherwise.
pub const DEFAULT_TOP_CUSTOMERS: usize = 5;

/// Upper bound for a board game's recommended age.
pub const MAX_RECOMMENDED_AGE: u32 = 99;
