//! # Sales Report
//!
//! Plain data gathered from the catalog's reporting queries, ready for a
//! presentation layer to print or serialize.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::product::ProductVariant;
use crate::user::NationalId;

/// Figures for one product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSales {
    pub variant: ProductVariant,
    pub revenue: Money,
    pub units_sold: u64,
    /// Titles with sales in the month, ascending.
    pub ranking: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSales {
    pub national_id: NationalId,
    pub full_name: String,
    pub purchases: usize,
}

/// Everything the store reports for one month and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub month: u32,
    pub year: i32,
    pub variants: Vec<VariantSales>,
    pub top_customers: Vec<CustomerSales>,
}

impl SalesReport {
    pub fn variant(&self, variant: ProductVariant) -> Option<&VariantSales> {
        self.variants.iter().find(|v| v.variant == variant)
    }

    pub fn total_revenue(&self) -> Money {
        self.variants.iter().map(|v| v.revenue).sum()
    }
}
