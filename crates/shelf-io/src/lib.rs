//! # shelf-io: Data File Loaders for Shelf
//!
//! Turns the store's pipe-delimited text files into shelf-core entities.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelf Data Flow                                  │
//! │                                                                         │
//! │  inventario.txt                    usuarios.txt                         │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-io (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   inventory.rs              users.rs            record.rs       │   │
//! │  │   LIBRO / JUEGO rows        user rows, age      split + parse   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog (shelf-core): register_product / register_user, file order    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_core::Catalog;
//!
//! let mut catalog = Catalog::new();
//! let today = chrono::Local::now().date_naive();
//! shelf_io::populate(&mut catalog, "inventario.txt", "usuarios.txt", today)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
mod record;
pub mod users;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LoadError, LoadResult};
pub use inventory::{load_inventory, parse_inventory};
pub use record::SEPARATOR;
pub use users::{load_users, parse_users};

use std::path::Path;

use chrono::NaiveDate;
use shelf_core::Catalog;
use tracing::info;

/// Counts of what [`populate`] registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub products: usize,
    pub users: usize,
}

/// Loads both files and registers everything in file order.
///
/// Both files are fully parsed before the catalog is touched, so a bad line
/// in either file leaves the catalog as it was.
pub fn populate(
    catalog: &mut Catalog,
    inventory_path: impl AsRef<Path>,
    users_path: impl AsRef<Path>,
    today: NaiveDate,
) -> LoadResult<LoadSummary> {
    let products = load_inventory(inventory_path)?;
    let users = load_users(users_path, today)?;

    let summary = LoadSummary {
        products: products.len(),
        users: users.len(),
    };

    products.into_iter().for_each(|p| catalog.register_product(p));
    users.into_iter().for_each(|u| catalog.register_user(u));

    info!(products = summary.products, users = summary.users, "Catalog populated");
    Ok(summary)
}
