//! # Users
//!
//! Registered customers and the products they currently hold.
//!
//! A user's age is computed once, when the user is created, and never
//! recomputed afterwards. Purchases are kept in purchase order together with
//! the moment they were made, which is what the return window is checked
//! against.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::ReportingPeriod;
use crate::product::ProductId;
use crate::ADULT_AGE;

// =============================================================================
// National Id
// =============================================================================

/// National identity document number (DNI), the user's business key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    pub fn new(id: impl Into<String>) -> Self {
        NationalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NationalId {
    fn from(id: &str) -> Self {
        NationalId(id.to_string())
    }
}

impl From<String> for NationalId {
    fn from(id: String) -> Self {
        NationalId(id)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// One product currently held by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub product_id: ProductId,
    pub purchased_at: DateTime<Utc>,
}

// =============================================================================
// Age
// =============================================================================

/// Whole years between `birth_date` and `today`.
///
/// One year is subtracted when this year's birthday has not happened yet.
/// Dates in the future yield 0.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use shelf_core::user::age_on;
///
/// let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2020, 6, 14).unwrap()), 19);
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()), 20);
/// ```
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (birth_date.month(), birth_date.day()) > (today.month(), today.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

// =============================================================================
// User
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
    national_id: NationalId,
    birth_date: NaiveDate,
    age: u32,
    pub card_number: String,
    purchases: Vec<Purchase>,
}

impl User {
    /// Creates a user with an explicitly given age.
    pub fn new(
        first_name: impl Into<String>,
        last_name1: impl Into<String>,
        last_name2: impl Into<String>,
        national_id: impl Into<NationalId>,
        birth_date: NaiveDate,
        age: u32,
        card_number: impl Into<String>,
    ) -> Self {
        User {
            first_name: first_name.into(),
            last_name1: last_name1.into(),
            last_name2: last_name2.into(),
            national_id: national_id.into(),
            birth_date,
            age,
            card_number: card_number.into(),
            purchases: Vec::new(),
        }
    }

    /// Creates a user whose age is derived from `birth_date` as of `today`.
    pub fn with_age_on(
        first_name: impl Into<String>,
        last_name1: impl Into<String>,
        last_name2: impl Into<String>,
        national_id: impl Into<NationalId>,
        birth_date: NaiveDate,
        card_number: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        let age = age_on(birth_date, today);
        User::new(
            first_name,
            last_name1,
            last_name2,
            national_id,
            birth_date,
            age,
            card_number,
        )
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// `"first last1 last2"`.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name1, self.last_name2)
    }

    /// Strictly older than [`ADULT_AGE`]; a user of exactly 18 is not.
    pub fn is_adult(&self) -> bool {
        self.age > ADULT_AGE
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Product ids currently held, in purchase order.
    pub fn purchased_products(&self) -> impl Iterator<Item = &ProductId> + '_ {
        self.purchases.iter().map(|p| &p.product_id)
    }

    pub fn has_purchased(&self, product_id: &ProductId) -> bool {
        self.purchased_products().any(|id| id == product_id)
    }

    pub(crate) fn record_purchase(&mut self, product_id: ProductId, at: DateTime<Utc>) {
        self.purchases.push(Purchase {
            product_id,
            purchased_at: at,
        });
    }

    /// Index of the first copy of `product_id` bought within `window` of `now`.
    fn recent_purchase_index(
        &self,
        product_id: &ProductId,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Option<usize> {
        self.purchases.iter().position(|p| {
            let elapsed = now.signed_duration_since(p.purchased_at);
            &p.product_id == product_id && -window <= elapsed && elapsed <= window
        })
    }

    /// True when `product_id` was bought no more than `window` before `now`.
    pub fn purchased_recently(
        &self,
        product_id: &ProductId,
        now: DateTime<Utc>,
        window: Duration,
    ) -> bool {
        self.recent_purchase_index(product_id, now, window).is_some()
    }

    /// Removes the first copy of `product_id` that is still returnable.
    pub(crate) fn remove_recent_purchase(
        &mut self,
        product_id: &ProductId,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Option<Purchase> {
        let index = self.recent_purchase_index(product_id, now, window)?;
        Some(self.purchases.remove(index))
    }

    /// Purchases attributed to `month`.
    ///
    /// All held purchases count towards the reporting period's month; any
    /// other month has none.
    pub fn purchase_count_in(&self, period: &ReportingPeriod, month: u32) -> usize {
        if period.covers_month(month) {
            self.purchases.len()
        } else {
            0
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
