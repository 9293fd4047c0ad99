//! # Console Rendering
//!
//! Turns catalog data into the lines `shelf` prints, or into a JSON
//! document when `--json` is given. Everything writes to an
//! `impl Write` so output can be captured in tests.

use std::io::Write;

use serde::Serialize;
use shelf_core::{Catalog, Money, SalesReport};

use crate::error::CliResult;

// =============================================================================
// Output Shapes
// =============================================================================

/// One row of the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductLine {
    pub title: String,
    pub units_sold: u64,
}

impl ProductLine {
    pub fn from_catalog(catalog: &Catalog) -> Vec<ProductLine> {
        catalog
            .list_products()
            .map(|(title, units_sold)| ProductLine {
                title: title.to_string(),
                units_sold,
            })
            .collect()
    }
}

/// What the demo scenario prints once its purchases and return are done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub products: Vec<ProductLine>,
    pub book_revenue: Money,
    pub books_sold: u64,
    pub book_ranking: Vec<String>,
    pub top_customers: Vec<String>,
}

// =============================================================================
// Text Rendering
// =============================================================================

pub fn write_listing(out: &mut impl Write, products: &[ProductLine]) -> CliResult<()> {
    for line in products {
        writeln!(out, "Title: {} | Sold: {}", line.title, line.units_sold)?;
    }
    Ok(())
}

pub fn write_demo(out: &mut impl Write, demo: &DemoReport) -> CliResult<()> {
    write_listing(out, &demo.products)?;
    writeln!(out, "Book revenue: {}", demo.book_revenue)?;
    writeln!(out, "Books sold: {}", demo.books_sold)?;

    writeln!(out, "Book sales ranking:")?;
    for title in &demo.book_ranking {
        writeln!(out, "{title}")?;
    }

    writeln!(out, "Top customers:")?;
    for name in &demo.top_customers {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

pub fn write_sales_report(out: &mut impl Write, report: &SalesReport) -> CliResult<()> {
    writeln!(out, "Sales report for {:02}/{}", report.month, report.year)?;

    for sales in &report.variants {
        let plural = sales.variant.plural();
        writeln!(out)?;
        writeln!(out, "Revenue ({plural}): {}", sales.revenue)?;
        writeln!(out, "Units sold ({plural}): {}", sales.units_sold)?;
        writeln!(out, "Ranking ({plural}):")?;
        if sales.ranking.is_empty() {
            writeln!(out, "  (no sales)")?;
        }
        for title in &sales.ranking {
            writeln!(out, "  {title}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total revenue: {}", report.total_revenue())?;
    writeln!(out, "Top customers:")?;
    for customer in &report.top_customers {
        writeln!(
            out,
            "  {} ({}): {}",
            customer.full_name, customer.national_id, customer.purchases
        )?;
    }
    Ok(())
}

// =============================================================================
// JSON Rendering
// =============================================================================

pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{CustomerSales, NationalId, ProductVariant, VariantSales};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn demo() -> DemoReport {
        DemoReport {
            products: vec![
                ProductLine {
                    title: "El principito".to_string(),
                    units_sold: 2,
                },
                ProductLine {
                    title: "Catan".to_string(),
                    units_sold: 1,
                },
            ],
            book_revenue: Money::from_cents(2198),
            books_sold: 2,
            book_ranking: vec!["El principito".to_string()],
            top_customers: vec!["Lucía Martín Ruiz".to_string(), "Juan Pérez García".to_string()],
        }
    }

    #[test]
    fn test_listing_lines() {
        let text = render(|out| write_listing(out, &demo().products));
        assert_eq!(text, "Title: El principito | Sold: 2\nTitle: Catan | Sold: 1\n");
    }

    #[test]
    fn test_demo_text() {
        let text = render(|out| write_demo(out, &demo()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Title: El principito | Sold: 2",
                "Title: Catan | Sold: 1",
                "Book revenue: 21.98",
                "Books sold: 2",
                "Book sales ranking:",
                "El principito",
                "Top customers:",
                "Lucía Martín Ruiz",
                "Juan Pérez García",
            ]
        );
    }

    #[test]
    fn test_sales_report_text() {
        let report = SalesReport {
            month: 7,
            year: 2023,
            variants: vec![
                VariantSales {
                    variant: ProductVariant::Book,
                    revenue: Money::from_cents(1099),
                    units_sold: 1,
                    ranking: vec!["El principito".to_string()],
                },
                VariantSales {
                    variant: ProductVariant::BoardGame,
                    revenue: Money::zero(),
                    units_sold: 0,
                    ranking: vec![],
                },
            ],
            top_customers: vec![CustomerSales {
                national_id: NationalId::from("12345678A"),
                full_name: "Juan Pérez García".to_string(),
                purchases: 1,
            }],
        };

        let text = render(|out| write_sales_report(out, &report));
        assert!(text.starts_with("Sales report for 07/2023\n"));
        assert!(text.contains("Revenue (books): 10.99\n"));
        assert!(text.contains("Units sold (board games): 0\n"));
        assert!(text.contains("Ranking (board games):\n  (no sales)\n"));
        assert!(text.contains("Total revenue: 10.99\n"));
        assert!(text.ends_with("  Juan Pérez García (12345678A): 1\n"));
    }

    #[test]
    fn test_demo_json() {
        let text = render(|out| write_json(out, &demo()));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["book_revenue"], 2198);
        assert_eq!(value["books_sold"], 2);
        assert_eq!(value["products"][1]["title"], "Catan");
        assert_eq!(value["top_customers"][0], "Lucía Martín Ruiz");
    }
}
