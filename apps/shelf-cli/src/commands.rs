//! # Subcommands
//!
//! Each command receives a catalog already populated from the data files
//! and writes its output through [`crate::report`].

use std::io::Write;

use shelf_core::{Catalog, NationalId, ProductId, ProductVariant};
use tracing::info;

use crate::error::{CliError, CliResult};
use crate::report::{self, DemoReport, ProductLine};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

// =============================================================================
// demo
// =============================================================================

/// The scripted walk through a purchase, a second purchase and a return.
const DEMO_STEPS: [DemoStep; 3] = [
    DemoStep::Purchase("12345678A", "L001"),
    DemoStep::Purchase("98765432B", "J001"),
    DemoStep::Return("12345678A", "L001"),
];

#[derive(Debug, Clone, Copy)]
enum DemoStep {
    Purchase(&'static str, &'static str),
    Return(&'static str, &'static str),
}

/// Runs the demo scenario and prints the listing and book figures for the
/// reference period. The first refused step stops the scenario.
pub fn demo(catalog: &mut Catalog, format: OutputFormat, out: &mut impl Write) -> CliResult<()> {
    for step in DEMO_STEPS {
        match step {
            DemoStep::Purchase(user, product) => {
                catalog.purchase(&NationalId::from(user), &ProductId::from(product))?;
                info!(user, product, "Demo purchase done");
            }
            DemoStep::Return(user, product) => {
                catalog.return_product(&NationalId::from(user), &ProductId::from(product))?;
                info!(user, product, "Demo return done");
            }
        }
    }

    let period = catalog.policy().reporting;
    let (month, year) = (period.month(), period.year());
    let demo = DemoReport {
        products: ProductLine::from_catalog(catalog),
        book_revenue: catalog.revenue_for(ProductVariant::Book, month, year),
        books_sold: catalog.units_sold_count_for(ProductVariant::Book, month),
        book_ranking: catalog
            .sales_ranking_for(ProductVariant::Book, month)
            .into_iter()
            .map(|p| p.title().to_string())
            .collect(),
        top_customers: catalog
            .top_customers_default(month)
            .into_iter()
            .map(|u| u.full_name())
            .collect(),
    };

    match format {
        OutputFormat::Text => report::write_demo(out, &demo),
        OutputFormat::Json => report::write_json(out, &demo),
    }
}

// =============================================================================
// list
// =============================================================================

pub fn list(catalog: &Catalog, format: OutputFormat, out: &mut impl Write) -> CliResult<()> {
    let products = ProductLine::from_catalog(catalog);
    match format {
        OutputFormat::Text => report::write_listing(out, &products),
        OutputFormat::Json => report::write_json(out, &products),
    }
}

// =============================================================================
// report
// =============================================================================

/// Arguments of `shelf report`; `None` falls back to the configured policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportArgs {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub limit: Option<usize>,
}

pub fn report(
    catalog: &Catalog,
    args: ReportArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> CliResult<()> {
    let policy = catalog.policy();
    let month = args.month.unwrap_or(policy.reporting.month());
    let year = args.year.unwrap_or(policy.reporting.year());
    let limit = args.limit.unwrap_or(policy.top_customers_limit);

    shelf_core::validation::validate_month(month)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    if limit == 0 {
        return Err(CliError::InvalidArgument(
            "limit must be greater than 0".to_string(),
        ));
    }

    let sales = catalog.sales_report(month, year, limit);
    match format {
        OutputFormat::Text => report::write_sales_report(out, &sales),
        OutputFormat::Json => report::write_json(out, &sales),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shelf_core::{CatalogError, Money, Product, User};

    fn user(first_name: &str, national_id: &str, age: u32) -> User {
        User::new(
            first_name,
            "Pérez",
            "García",
            national_id,
            NaiveDate::from_ymd_opt(1990, 3, 15).unwrap(),
            age,
            "4111111111111111",
        )
    }

    fn demo_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register_product(Product::book(
            "L001",
            "El principito",
            "Antoine de Saint-Exupéry",
            Money::from_cents(1099),
            "Aventuras",
            true,
        ));
        catalog.register_product(Product::board_game("J001", "Catan", 10, "Estrategia"));
        catalog.register_user(user("Juan", "12345678A", 33));
        catalog.register_user(user("Ana", "98765432B", 25));
        catalog
    }

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_demo_scenario_text() {
        let mut catalog = demo_catalog();
        let text = capture(|out| demo(&mut catalog, OutputFormat::Text, out));

        // Purchase plus the counted return.
        assert!(text.contains("Title: El principito | Sold: 2\n"));
        assert!(text.contains("Title: Catan | Sold: 1\n"));
        assert!(text.contains("Book revenue: 21.98\n"));
        assert!(text.contains("Books sold: 2\n"));
        assert!(text.contains("Book sales ranking:\nEl principito\n"));
        // Ana still holds Catan; Juan returned his book.
        assert!(text.ends_with("Top customers:\nAna Pérez García\nJuan Pérez García\n"));
    }

    #[test]
    fn test_demo_halts_on_refusal() {
        let mut catalog = demo_catalog();
        catalog.unregister_user(&NationalId::from("98765432B"));

        let mut buf = Vec::new();
        let err = demo(&mut catalog, OutputFormat::Text, &mut buf).unwrap_err();

        assert!(matches!(err, CliError::Catalog(CatalogError::UnknownUser(_))));
        assert!(buf.is_empty());
        // The first purchase already happened and is not undone.
        assert_eq!(catalog.product(&ProductId::from("L001")).unwrap().units_sold(), 1);
    }

    #[test]
    fn test_demo_with_bundled_data() {
        let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let mut catalog = Catalog::new();
        shelf_io::populate(
            &mut catalog,
            data.join("inventario.txt"),
            data.join("usuarios.txt"),
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
        )
        .unwrap();

        let text = capture(|out| demo(&mut catalog, OutputFormat::Text, out));
        assert!(text.starts_with("Title: El principito | Sold: 2\n"));
        assert!(text.contains("Title: Catan | Sold: 1\n"));
        assert!(text.contains("Top customers:\nLucía Martín Ruiz\n"));
    }

    #[test]
    fn test_list_json() {
        let catalog = demo_catalog();
        let text = capture(|out| list(&catalog, OutputFormat::Json, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["title"], "El principito");
        assert_eq!(value[0]["units_sold"], 0);
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_report_defaults_to_policy_period() {
        let mut catalog = demo_catalog();
        catalog
            .purchase(&NationalId::from("12345678A"), &ProductId::from("L001"))
            .unwrap();

        let text = capture(|out| report(&catalog, ReportArgs::default(), OutputFormat::Text, out));
        assert!(text.starts_with("Sales report for 07/2023\n"));
        assert!(text.contains("Revenue (books): 10.99\n"));

        let args = ReportArgs {
            month: Some(8),
            ..ReportArgs::default()
        };
        let text = capture(|out| report(&catalog, args, OutputFormat::Text, out));
        assert!(text.contains("Revenue (books): 0.00\n"));
    }

    #[test]
    fn test_report_json_limit() {
        let catalog = demo_catalog();
        let args = ReportArgs {
            limit: Some(1),
            ..ReportArgs::default()
        };
        let text = capture(|out| report(&catalog, args, OutputFormat::Json, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["month"], 7);
        assert_eq!(value["top_customers"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_report_rejects_bad_arguments() {
        let catalog = demo_catalog();
        for args in [
            ReportArgs {
                month: Some(13),
                ..ReportArgs::default()
            },
            ReportArgs {
                limit: Some(0),
                ..ReportArgs::default()
            },
        ] {
            let err = report(&catalog, args, OutputFormat::Text, &mut Vec::new()).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument(_)));
        }
    }
}
