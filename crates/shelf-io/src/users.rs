//! # User Loader
//!
//! ## File Format
//! ```text
//! firstName|lastName1|lastName2|nationalId|day|month|year|cardNumber
//! ```
//!
//! Ages are not stored in the file. Each user's age is derived from the
//! birth date and the `today` given to the loader, once, at load time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use shelf_core::validation::{validate_birth_date, validate_national_id};
use shelf_core::User;
use tracing::info;

use crate::error::{LoadError, LoadResult};
use crate::record::{read_records, Record};

const USER_FIELDS: usize = 8;

/// Parses a user file's contents, in file order.
pub fn parse_users(reader: impl BufRead, today: NaiveDate) -> LoadResult<Vec<User>> {
    read_records(reader)?
        .iter()
        .map(|record| parse_user(record, today))
        .collect()
}

/// Opens and parses the user file at `path`.
pub fn load_users(path: impl AsRef<Path>, today: NaiveDate) -> LoadResult<Vec<User>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let users = parse_users(BufReader::new(file), today)?;
    info!(path = %path.display(), users = users.len(), "Users loaded");
    Ok(users)
}

fn parse_user(record: &Record, today: NaiveDate) -> LoadResult<User> {
    let f = record.fields(USER_FIELDS)?;
    let (first_name, last_name1, last_name2, national_id) = (f[0], f[1], f[2], f[3]);

    validate_national_id(national_id).map_err(|e| record.invalid(e))?;
    let day: u32 = record.number("day", f[4])?;
    let month: u32 = record.number("month", f[5])?;
    let year: i32 = record.number("year", f[6])?;
    let birth_date = validate_birth_date(day, month, year).map_err(|e| record.invalid(e))?;

    Ok(User::with_age_on(
        first_name,
        last_name1,
        last_name2,
        national_id,
        birth_date,
        f[7],
        today,
    ))
}
