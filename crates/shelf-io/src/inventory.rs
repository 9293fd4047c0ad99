//! # Inventory Loader
//!
//! ## File Format
//! ```text
//! LIBRO|id|title|author|price|category|isNew
//! JUEGO|id|title|recommendedAge|theme
//! ```
//!
//! `price` is decimal text (`10.99`) parsed straight into cents. `isNew` is
//! true only for the text `true` in any letter case. Book categories are
//! loaded as written; unsellable categories are refused later, at purchase.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use shelf_core::validation::{
    validate_price, validate_product_id, validate_recommended_age, validate_title,
};
use shelf_core::{Money, Product};
use tracing::info;

use crate::error::{LoadError, LoadResult};
use crate::record::{read_records, Record, SEPARATOR};

/// Row tag for books.
pub const BOOK_TAG: &str = "LIBRO";

/// Row tag for board games.
pub const BOARD_GAME_TAG: &str = "JUEGO";

const BOOK_FIELDS: usize = 7;
const BOARD_GAME_FIELDS: usize = 5;

/// Parses an inventory file's contents, in file order.
pub fn parse_inventory(reader: impl BufRead) -> LoadResult<Vec<Product>> {
    read_records(reader)?
        .iter()
        .map(parse_product)
        .collect()
}

/// Opens and parses the inventory file at `path`.
pub fn load_inventory(path: impl AsRef<Path>) -> LoadResult<Vec<Product>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let products = parse_inventory(BufReader::new(file))?;
    info!(path = %path.display(), products = products.len(), "Inventory loaded");
    Ok(products)
}

fn parse_product(record: &Record) -> LoadResult<Product> {
    let kind = record.text.split(SEPARATOR).next().unwrap_or_default().trim();
    match kind {
        BOOK_TAG => parse_book(record),
        BOARD_GAME_TAG => parse_board_game(record),
        other => Err(LoadError::UnknownRecordKind {
            line: record.line,
            kind: other.to_string(),
        }),
    }
}

fn parse_book(record: &Record) -> LoadResult<Product> {
    let f = record.fields(BOOK_FIELDS)?;
    let (id, title, author, price, category, is_new) = (f[1], f[2], f[3], f[4], f[5], f[6]);

    validate_product_id(id).map_err(|e| record.invalid(e))?;
    validate_title(title).map_err(|e| record.invalid(e))?;
    let price = Money::parse_decimal(price).map_err(|e| record.invalid(e))?;
    validate_price(price).map_err(|e| record.invalid(e))?;

    Ok(Product::book(
        id,
        title,
        author,
        price,
        category,
        is_new.eq_ignore_ascii_case("true"),
    ))
}

fn parse_board_game(record: &Record) -> LoadResult<Product> {
    let f = record.fields(BOARD_GAME_FIELDS)?;
    let (id, title, recommended_age, theme) = (f[1], f[2], f[3], f[4]);

    validate_product_id(id).map_err(|e| record.invalid(e))?;
    validate_title(title).map_err(|e| record.invalid(e))?;
    let recommended_age: u32 = record.number("recommended age", recommended_age)?;
    validate_recommended_age(recommended_age).map_err(|e| record.invalid(e))?;

    Ok(Product::board_game(id, title, recommended_age, theme))
}
