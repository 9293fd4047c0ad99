//! # Catalog
//!
//! The store service: owns the inventory and the user roster and implements
//! every use case on top of them.
//!
//! ## Use Cases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Catalog                                      │
//! │                                                                         │
//! │  inventory: Vec<Product>        users: Vec<User>                        │
//! │  (listing order = registration order for both)                          │
//! │                                                                         │
//! │  Registration   register_product / unregister_product                  │
//! │                 register_user    / unregister_user                     │
//! │                                                                         │
//! │  Purchase       in inventory? ─► registered? ─► adult? ─► product rule │
//! │                 ─► user.purchases += product, product.units_sold += 1  │
//! │                                                                         │
//! │  Return         registered? ─► bought within window?                   │
//! │                 ─► user.purchases -= product, units_sold adjusted      │
//! │                                                                         │
//! │  Reporting      list, revenue, units, ranking, top customers (read-only)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Every check runs before the first write. A returned error means neither
//! the user nor the product changed.
//!
//! ## Concurrency
//! The catalog is a plain owned value. Callers that share it across threads
//! must wrap the whole catalog in one lock, since a purchase reads and writes
//! a user and a product together.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::money::Money;
use crate::policy::{CatalogPolicy, ReturnAccounting};
use crate::product::{Product, ProductId, ProductKind, ProductVariant, SalesPerformance};
use crate::report::{CustomerSales, SalesReport, VariantSales};
use crate::user::{NationalId, User};
use crate::ADULT_AGE;

/// In-memory store of products and users.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inventory: Vec<Product>,
    users: Vec<User>,
    policy: CatalogPolicy,
}

impl Catalog {
    /// Creates an empty catalog with default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with the given policies.
    pub fn with_policy(policy: CatalogPolicy) -> Self {
        Catalog {
            inventory: Vec::new(),
            users: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &CatalogPolicy {
        &self.policy
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Adds a product to the inventory. Duplicate ids are not checked.
    pub fn register_product(&mut self, product: Product) {
        debug!(product_id = %product.id(), title = product.title(), "Product registered");
        self.inventory.push(product);
    }

    /// Removes the first product with `product_id`, if any.
    pub fn unregister_product(&mut self, product_id: &ProductId) -> Option<Product> {
        let index = self.product_index(product_id)?;
        debug!(%product_id, "Product unregistered");
        Some(self.inventory.remove(index))
    }

    /// Adds a user to the roster. Duplicate national ids are not checked.
    pub fn register_user(&mut self, user: User) {
        debug!(national_id = %user.national_id(), "User registered");
        self.users.push(user);
    }

    /// Removes the first user with `national_id`, if any.
    pub fn unregister_user(&mut self, national_id: &NationalId) -> Option<User> {
        let index = self.user_index(national_id)?;
        debug!(%national_id, "User unregistered");
        Some(self.users.remove(index))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn product(&self, product_id: &ProductId) -> Option<&Product> {
        self.inventory.iter().find(|p| p.id() == product_id)
    }

    pub fn user(&self, national_id: &NationalId) -> Option<&User> {
        self.users.iter().find(|u| u.national_id() == national_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.inventory
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn product_index(&self, product_id: &ProductId) -> Option<usize> {
        self.inventory.iter().position(|p| p.id() == product_id)
    }

    fn user_index(&self, national_id: &NationalId) -> Option<usize> {
        self.users.iter().position(|u| u.national_id() == national_id)
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Sells `product_id` to `national_id`, timestamped now.
    pub fn purchase(&mut self, national_id: &NationalId, product_id: &ProductId) -> CatalogResult<()> {
        self.purchase_at(national_id, product_id, Utc::now())
    }

    /// Sells `product_id` to `national_id`, timestamped `at`.
    ///
    /// ## Checks (in order)
    /// 1. product in inventory, else [`CatalogError::NotInInventory`]
    /// 2. user registered, else [`CatalogError::UnknownUser`]
    /// 3. user older than 18, else [`CatalogError::AgeRestricted`]
    /// 4. book: category is sellable, else [`CatalogError::InvalidCategory`]
    /// 5. board game: user meets recommended age, else [`CatalogError::AgeRestricted`]
    pub fn purchase_at(
        &mut self,
        national_id: &NationalId,
        product_id: &ProductId,
        at: DateTime<Utc>,
    ) -> CatalogResult<()> {
        let (product_index, user_index) = self
            .check_purchase(national_id, product_id)
            .inspect_err(|err| warn!(%national_id, %product_id, error = %err, "Purchase rejected"))?;

        self.users[user_index].record_purchase(product_id.clone(), at);
        let product = &mut self.inventory[product_index];
        product.record_sale();

        debug!(
            %national_id,
            %product_id,
            units_sold = product.units_sold(),
            "Purchase recorded"
        );
        Ok(())
    }

    fn check_purchase(
        &self,
        national_id: &NationalId,
        product_id: &ProductId,
    ) -> CatalogResult<(usize, usize)> {
        let product_index = self
            .product_index(product_id)
            .ok_or_else(|| CatalogError::NotInInventory(product_id.clone()))?;
        let user_index = self
            .user_index(national_id)
            .ok_or_else(|| CatalogError::UnknownUser(national_id.clone()))?;

        let product = &self.inventory[product_index];
        let user = &self.users[user_index];

        if !user.is_adult() {
            return Err(CatalogError::AgeRestricted {
                national_id: national_id.clone(),
                age: user.age(),
                required: ADULT_AGE + 1,
            });
        }

        match product.kind() {
            ProductKind::Book(book) => {
                if book.category().is_none() {
                    return Err(CatalogError::InvalidCategory {
                        product_id: product_id.clone(),
                        category: book.category.clone(),
                    });
                }
            }
            ProductKind::BoardGame(game) => {
                if !game.is_suitable_for_age(user.age()) {
                    return Err(CatalogError::AgeRestricted {
                        national_id: national_id.clone(),
                        age: user.age(),
                        required: game.recommended_age,
                    });
                }
            }
        }

        Ok((product_index, user_index))
    }

    // =========================================================================
    // Return
    // =========================================================================

    /// Takes back `product_id` from `national_id`, evaluated now.
    pub fn return_product(
        &mut self,
        national_id: &NationalId,
        product_id: &ProductId,
    ) -> CatalogResult<()> {
        self.return_product_at(national_id, product_id, Utc::now())
    }

    /// Takes back `product_id` from `national_id`, evaluated at `now`.
    ///
    /// The product must have been bought by the user within the return
    /// window. The product does not need to still be in the inventory; if it
    /// was unregistered meanwhile, only the user's holdings change.
    pub fn return_product_at(
        &mut self,
        national_id: &NationalId,
        product_id: &ProductId,
        now: DateTime<Utc>,
    ) -> CatalogResult<()> {
        let window = self.policy.returns.window;

        let user_index = match self.user_index(national_id) {
            Some(index) => index,
            None => {
                let err = CatalogError::UnknownUser(national_id.clone());
                warn!(%national_id, %product_id, error = %err, "Return rejected");
                return Err(err);
            }
        };

        if self.users[user_index]
            .remove_recent_purchase(product_id, now, window)
            .is_none()
        {
            let err = CatalogError::ReturnWindowExpired {
                national_id: national_id.clone(),
                product_id: product_id.clone(),
            };
            warn!(%national_id, %product_id, error = %err, "Return rejected");
            return Err(err);
        }

        match self.product_index(product_id) {
            Some(index) => {
                let product = &mut self.inventory[index];
                match self.policy.returns.accounting {
                    ReturnAccounting::CountAsSale => product.record_sale(),
                    ReturnAccounting::Reverse => product.reverse_sale(),
                }
                debug!(
                    %national_id,
                    %product_id,
                    units_sold = product.units_sold(),
                    "Return recorded"
                );
            }
            None => debug!(%national_id, %product_id, "Return recorded for unlisted product"),
        }

        Ok(())
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// `(title, units_sold)` for every product, in inventory order.
    pub fn list_products(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.inventory.iter().map(|p| (p.title(), p.units_sold()))
    }

    fn products_of(&self, variant: ProductVariant) -> impl Iterator<Item = &Product> + '_ {
        self.inventory.iter().filter(move |p| p.variant() == variant)
    }

    /// Revenue from `variant` products in `(month, year)`.
    pub fn revenue_for(&self, variant: ProductVariant, month: u32, year: i32) -> Money {
        let period = &self.policy.reporting;
        self.products_of(variant)
            .map(|p| p.revenue_in(period, month, year))
            .sum()
    }

    /// Units of `variant` products sold in `month`.
    pub fn units_sold_count_for(&self, variant: ProductVariant, month: u32) -> u64 {
        let period = &self.policy.reporting;
        self.products_of(variant)
            .map(|p| p.units_sold_in(period, month))
            .sum()
    }

    /// `variant` products with sales in `month`, ascending by title.
    pub fn sales_ranking_for(&self, variant: ProductVariant, month: u32) -> Vec<&Product> {
        let period = &self.policy.reporting;
        let mut ranking: Vec<&Product> = self
            .products_of(variant)
            .filter(|p| p.units_sold_in(period, month) > 0)
            .collect();
        ranking.sort_by(|a, b| a.title().cmp(b.title()));
        ranking
    }

    /// Up to `limit` users with their purchase count in `month`, highest
    /// count first. Equal counts keep registration order.
    pub fn top_customers_with_counts(&self, month: u32, limit: usize) -> Vec<(&User, usize)> {
        let period = &self.policy.reporting;
        let mut counts: Vec<(&User, usize)> = self
            .users
            .iter()
            .map(|u| (u, u.purchase_count_in(period, month)))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        counts
    }

    /// Up to `limit` users, highest purchase count in `month` first.
    pub fn top_customers(&self, month: u32, limit: usize) -> Vec<&User> {
        self.top_customers_with_counts(month, limit)
            .into_iter()
            .map(|(user, _)| user)
            .collect()
    }

    /// [`Catalog::top_customers`] with the policy's default limit.
    pub fn top_customers_default(&self, month: u32) -> Vec<&User> {
        self.top_customers(month, self.policy.top_customers_limit)
    }

    /// Every reporting query for `(month, year)` gathered into one value.
    pub fn sales_report(&self, month: u32, year: i32, limit: usize) -> SalesReport {
        let variants = ProductVariant::ALL
            .into_iter()
            .map(|variant| VariantSales {
                variant,
                revenue: self.revenue_for(variant, month, year),
                units_sold: self.units_sold_count_for(variant, month),
                ranking: self
                    .sales_ranking_for(variant, month)
                    .into_iter()
                    .map(|p| p.title().to_string())
                    .collect(),
            })
            .collect();

        let top_customers = self
            .top_customers_with_counts(month, limit)
            .into_iter()
            .map(|(user, purchases)| CustomerSales {
                national_id: user.national_id().clone(),
                full_name: user.full_name(),
                purchases,
            })
            .collect();

        SalesReport {
            month,
            year,
            variants,
            top_customers,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ReturnPolicy;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn adult(national_id: &str, age: u32) -> User {
        User::new(
            "John",
            "Doe",
            national_id,
            national_id,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            age,
            "1234567890",
        )
    }

    fn book(id: &str, title: &str, cents: i64, category: &str) -> Product {
        Product::book(id, title, "Author", Money::from_cents(cents), category, true)
    }

    fn july() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 7, 10, 12, 0, 0).unwrap()
    }

    fn pid(id: &str) -> ProductId {
        ProductId::from(id)
    }

    fn nid(id: &str) -> NationalId {
        NationalId::from(id)
    }

    fn store() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register_user(adult("U1", 30));
        catalog.register_product(book("L001", "El principito", 1099, "Aventuras"));
        catalog.register_product(Product::board_game("J001", "Catan", 12, "Strategy"));
        catalog
    }

    #[test]
    fn test_registration_round_trip() {
        let mut catalog = store();
        assert_eq!(catalog.products().len(), 2);
        assert!(catalog.product(&pid("L001")).is_some());

        let removed = catalog.unregister_product(&pid("L001")).unwrap();
        assert_eq!(removed.title(), "El principito");
        assert!(catalog.product(&pid("L001")).is_none());
        assert!(catalog.unregister_product(&pid("L001")).is_none());

        assert!(catalog.unregister_user(&nid("U1")).is_some());
        assert!(catalog.user(&nid("U1")).is_none());
        assert!(catalog.unregister_user(&nid("U1")).is_none());
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut catalog = Catalog::new();
        catalog.register_product(book("L001", "First", 100, "Arte"));
        catalog.register_product(book("L001", "Second", 200, "Arte"));
        assert_eq!(catalog.product(&pid("L001")).unwrap().title(), "First");

        catalog.unregister_product(&pid("L001"));
        assert_eq!(catalog.product(&pid("L001")).unwrap().title(), "Second");
    }

    #[test]
    fn test_purchase_success() {
        let mut catalog = store();
        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();

        assert_eq!(catalog.product(&pid("L001")).unwrap().units_sold(), 1);
        let user = catalog.user(&nid("U1")).unwrap();
        assert!(user.has_purchased(&pid("L001")));
        assert_eq!(user.purchases()[0].purchased_at, july());
    }

    #[test]
    fn test_purchase_check_order() {
        let mut catalog = store();
        catalog.register_user(adult("KID", 10));

        // Missing product wins over missing user.
        let err = catalog.purchase_at(&nid("NOBODY"), &pid("X"), july()).unwrap_err();
        assert!(matches!(err, CatalogError::NotInInventory(_)));

        let err = catalog.purchase_at(&nid("NOBODY"), &pid("L001"), july()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownUser(_)));

        let err = catalog.purchase_at(&nid("KID"), &pid("L001"), july()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::AgeRestricted { age: 10, required: 19, .. }
        ));
    }

    #[test]
    fn test_failed_purchase_changes_nothing() {
        let mut catalog = store();
        catalog.register_product(book("L666", "It", 2000, "Terror"));
        let before = catalog.clone();

        let err = catalog.purchase_at(&nid("U1"), &pid("L666"), july()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCategory { .. }));
        assert_eq!(catalog.products(), before.products());
        assert_eq!(catalog.users(), before.users());
    }

    #[test]
    fn test_board_game_recommended_age() {
        let mut catalog = store();
        catalog.register_user(adult("YOUNG", 19));
        catalog.register_product(Product::board_game("J021", "Pandemic Legacy", 21, "Coop"));

        let err = catalog.purchase_at(&nid("YOUNG"), &pid("J021"), july()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::AgeRestricted { age: 19, required: 21, .. }
        ));
        assert!(catalog.purchase_at(&nid("YOUNG"), &pid("J001"), july()).is_ok());
    }

    #[test]
    fn test_return_counts_as_sale_by_default() {
        let mut catalog = store();
        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();
        catalog
            .return_product_at(&nid("U1"), &pid("L001"), july() + Duration::days(3))
            .unwrap();

        assert!(!catalog.user(&nid("U1")).unwrap().has_purchased(&pid("L001")));
        assert_eq!(catalog.product(&pid("L001")).unwrap().units_sold(), 2);
    }

    #[test]
    fn test_return_reverse_accounting() {
        let policy = CatalogPolicy {
            returns: ReturnPolicy {
                accounting: ReturnAccounting::Reverse,
                ..ReturnPolicy::default()
            },
            ..CatalogPolicy::default()
        };
        let mut catalog = Catalog::with_policy(policy);
        catalog.register_user(adult("U1", 30));
        catalog.register_product(book("L001", "El principito", 1099, "Aventuras"));

        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();
        catalog.return_product_at(&nid("U1"), &pid("L001"), july()).unwrap();
        assert_eq!(catalog.product(&pid("L001")).unwrap().units_sold(), 0);
    }

    #[test]
    fn test_return_rejections() {
        let mut catalog = store();

        let err = catalog.return_product_at(&nid("NOBODY"), &pid("L001"), july()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownUser(_)));

        let err = catalog.return_product_at(&nid("U1"), &pid("L001"), july()).unwrap_err();
        assert!(matches!(err, CatalogError::ReturnWindowExpired { .. }));

        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();
        let err = catalog
            .return_product_at(&nid("U1"), &pid("L001"), july() + Duration::days(15))
            .unwrap_err();
        assert!(matches!(err, CatalogError::ReturnWindowExpired { .. }));
        assert!(catalog.user(&nid("U1")).unwrap().has_purchased(&pid("L001")));
        assert_eq!(catalog.product(&pid("L001")).unwrap().units_sold(), 1);
    }

    #[test]
    fn test_return_of_unregistered_product() {
        let mut catalog = store();
        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();
        catalog.unregister_product(&pid("L001"));

        catalog.return_product_at(&nid("U1"), &pid("L001"), july()).unwrap();
        assert!(!catalog.user(&nid("U1")).unwrap().has_purchased(&pid("L001")));
    }

    #[test]
    fn test_list_products_in_inventory_order() {
        let mut catalog = store();
        catalog.purchase_at(&nid("U1"), &pid("J001"), july()).unwrap();

        let listing: Vec<(&str, u64)> = catalog.list_products().collect();
        assert_eq!(listing, [("El principito", 0), ("Catan", 1)]);
    }

    #[test]
    fn test_revenue_and_units() {
        let mut catalog = store();
        catalog.register_product(book("L002", "Dune", 1500, "Ciencia Ficción"));
        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();
        catalog.purchase_at(&nid("U1"), &pid("L002"), july()).unwrap();
        catalog.purchase_at(&nid("U1"), &pid("L002"), july()).unwrap();
        catalog.purchase_at(&nid("U1"), &pid("J001"), july()).unwrap();

        assert_eq!(catalog.revenue_for(ProductVariant::Book, 7, 2023), Money::from_cents(4099));
        assert_eq!(catalog.revenue_for(ProductVariant::Book, 8, 2023), Money::zero());
        assert_eq!(catalog.revenue_for(ProductVariant::BoardGame, 7, 2023), Money::zero());
        assert_eq!(catalog.units_sold_count_for(ProductVariant::Book, 7), 3);
        assert_eq!(catalog.units_sold_count_for(ProductVariant::BoardGame, 7), 1);
        assert_eq!(catalog.units_sold_count_for(ProductVariant::Book, 1), 0);
    }

    #[test]
    fn test_sales_ranking_sorted_by_title() {
        let mut catalog = store();
        catalog.register_product(book("L002", "Dune", 1500, "Ciencia Ficción"));
        catalog.register_product(book("L003", "Arte de la guerra", 900, "Historia"));
        catalog.register_product(book("L004", "Unsold", 900, "Historia"));
        for id in ["L001", "L002", "L003"] {
            catalog.purchase_at(&nid("U1"), &pid(id), july()).unwrap();
        }

        let titles: Vec<&str> = catalog
            .sales_ranking_for(ProductVariant::Book, 7)
            .into_iter()
            .map(Product::title)
            .collect();
        assert_eq!(titles, ["Arte de la guerra", "Dune", "El principito"]);
        assert!(catalog.sales_ranking_for(ProductVariant::Book, 3).is_empty());
    }

    #[test]
    fn test_top_customers_order_and_ties() {
        let mut catalog = store();
        for id in ["U2", "U3", "U4"] {
            catalog.register_user(adult(id, 40));
        }
        catalog.purchase_at(&nid("U3"), &pid("L001"), july()).unwrap();
        catalog.purchase_at(&nid("U3"), &pid("L001"), july()).unwrap();
        catalog.purchase_at(&nid("U2"), &pid("L001"), july()).unwrap();
        catalog.purchase_at(&nid("U4"), &pid("L001"), july()).unwrap();

        let ids: Vec<&str> = catalog
            .top_customers(7, 3)
            .into_iter()
            .map(|u| u.national_id().as_str())
            .collect();
        assert_eq!(ids, ["U3", "U2", "U4"]);

        // Outside the reporting month everybody ties at zero.
        let ids: Vec<&str> = catalog
            .top_customers(8, 10)
            .into_iter()
            .map(|u| u.national_id().as_str())
            .collect();
        assert_eq!(ids, ["U1", "U2", "U3", "U4"]);
    }

    #[test]
    fn test_sales_report() {
        let mut catalog = store();
        catalog.purchase_at(&nid("U1"), &pid("L001"), july()).unwrap();

        let report = catalog.sales_report(7, 2023, 5);
        assert_eq!(report.variants.len(), 2);
        let books = report.variant(ProductVariant::Book).unwrap();
        assert_eq!(books.revenue, Money::from_cents(1099));
        assert_eq!(books.units_sold, 1);
        assert_eq!(books.ranking, ["El principito"]);
        assert_eq!(report.top_customers[0].purchases, 1);
        assert_eq!(report.top_customers[0].full_name, "John Doe U1");
    }
}
