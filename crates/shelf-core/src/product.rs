//! # Products
//!
//! The sellable catalog entries: books and board games.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Product                                    │
//! │   id · title · price · units_sold · kind                               │
//! │                                │                                        │
//! │               ┌────────────────┴────────────────┐                       │
//! │               ▼                                 ▼                       │
//! │  ┌─────────────────────────┐      ┌─────────────────────────┐           │
//! │  │   ProductKind::Book     │      │ ProductKind::BoardGame  │           │
//! │  │  ─────────────────────  │      │  ─────────────────────  │           │
//! │  │  author                 │      │  recommended_age        │           │
//! │  │  category (raw text)    │      │  theme                  │           │
//! │  │  is_new                 │      │  price always 0         │           │
//! │  └─────────────────────────┘      └─────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reporting goes through [`SalesPerformance`], so callers never inspect the
//! kind themselves; they filter by [`ProductVariant`] and ask the product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::policy::ReportingPeriod;

// =============================================================================
// Product Id
// =============================================================================

/// Business identifier of a product (`L001`, `J001`, ...).
///
/// Uniqueness is the caller's responsibility; the catalog resolves an id to
/// the first matching product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Variant Tag
// =============================================================================

/// Which family a product belongs to. Used as a reporting filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductVariant {
    Book,
    BoardGame,
}

impl ProductVariant {
    pub const ALL: [ProductVariant; 2] = [ProductVariant::Book, ProductVariant::BoardGame];

    /// Plural label for report headings.
    pub fn plural(&self) -> &'static str {
        match self {
            ProductVariant::Book => "books",
            ProductVariant::BoardGame => "board games",
        }
    }
}

impl fmt::Display for ProductVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductVariant::Book => write!(f, "book"),
            ProductVariant::BoardGame => write!(f, "board game"),
        }
    }
}

// =============================================================================
// Book Category
// =============================================================================

/// The six categories the store is allowed to sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookCategory {
    Adventure,
    ScienceFiction,
    Romance,
    History,
    Art,
    SpanishNarrative,
}

impl BookCategory {
    pub const ALL: [BookCategory; 6] = [
        BookCategory::Adventure,
        BookCategory::ScienceFiction,
        BookCategory::Romance,
        BookCategory::History,
        BookCategory::Art,
        BookCategory::SpanishNarrative,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            BookCategory::Adventure => "Adventure",
            BookCategory::ScienceFiction => "Science Fiction",
            BookCategory::Romance => "Romance",
            BookCategory::History => "History",
            BookCategory::Art => "Art",
            BookCategory::SpanishNarrative => "Spanish Narrative",
        }
    }

    /// Label used by the Spanish inventory files.
    pub fn spanish_name(&self) -> &'static str {
        match self {
            BookCategory::Adventure => "Aventuras",
            BookCategory::ScienceFiction => "Ciencia Ficción",
            BookCategory::Romance => "Romántica",
            BookCategory::History => "Historia",
            BookCategory::Art => "Arte",
            BookCategory::SpanishNarrative => "Narrativa Española",
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact match against either label. `"adventure"` is not a category.
impl FromStr for BookCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookCategory::ALL
            .into_iter()
            .find(|c| c.name() == s || c.spanish_name() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: BookCategory::ALL.iter().map(|c| c.name().to_string()).collect(),
            })
    }
}

// =============================================================================
// Variant Details
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub author: String,
    /// Kept as written so that unsellable categories can still be stocked.
    pub category: String,
    pub is_new: bool,
}

impl BookDetails {
    /// The parsed category, or `None` if the store does not sell it.
    pub fn category(&self) -> Option<BookCategory> {
        self.category.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGameDetails {
    pub recommended_age: u32,
    pub theme: String,
}

impl BoardGameDetails {
    #[inline]
    pub fn is_suitable_for_age(&self, age: u32) -> bool {
        age >= self.recommended_age
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    Book(BookDetails),
    BoardGame(BoardGameDetails),
}

// =============================================================================
// Product
// =============================================================================

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: Money,
    units_sold: u64,
    kind: ProductKind,
}

impl Product {
    /// Creates a book with no sales.
    pub fn book(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        is_new: bool,
    ) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price,
            units_sold: 0,
            kind: ProductKind::Book(BookDetails {
                author: author.into(),
                category: category.into(),
                is_new,
            }),
        }
    }

    /// Creates a board game with no sales. Board games are priced at zero.
    pub fn board_game(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        recommended_age: u32,
        theme: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price: Money::zero(),
            units_sold: 0,
            kind: ProductKind::BoardGame(BoardGameDetails {
                recommended_age,
                theme: theme.into(),
            }),
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn units_sold(&self) -> u64 {
        self.units_sold
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn variant(&self) -> ProductVariant {
        match self.kind {
            ProductKind::Book(_) => ProductVariant::Book,
            ProductKind::BoardGame(_) => ProductVariant::BoardGame,
        }
    }

    pub fn as_book(&self) -> Option<&BookDetails> {
        match &self.kind {
            ProductKind::Book(book) => Some(book),
            ProductKind::BoardGame(_) => None,
        }
    }

    pub fn as_board_game(&self) -> Option<&BoardGameDetails> {
        match &self.kind {
            ProductKind::BoardGame(game) => Some(game),
            ProductKind::Book(_) => None,
        }
    }

    pub(crate) fn record_sale(&mut self) {
        self.units_sold += 1;
    }

    pub(crate) fn reverse_sale(&mut self) {
        self.units_sold = self.units_sold.saturating_sub(1);
    }
}

// =============================================================================
// Sales Performance
// =============================================================================

/// Per-product sales figures for reporting.
///
/// Every recorded sale is attributed to the reporting period, so a product
/// reports all of its units for that period and nothing for any other.
pub trait SalesPerformance {
    /// Money taken in `(month, year)`.
    fn revenue_in(&self, period: &ReportingPeriod, month: u32, year: i32) -> Money;

    /// Units sold in `month`.
    fn units_sold_in(&self, period: &ReportingPeriod, month: u32) -> u64;
}

impl SalesPerformance for Product {
    fn revenue_in(&self, period: &ReportingPeriod, month: u32, year: i32) -> Money {
        if period.covers(month, year) {
            self.price.multiply_quantity(self.units_sold)
        } else {
            Money::zero()
        }
    }

    fn units_sold_in(&self, period: &ReportingPeriod, month: u32) -> u64 {
        if period.covers_month(month) {
            self.units_sold
        } else {
            0
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
