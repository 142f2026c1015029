//! # In-Memory Backend
//!
//! An implementation of every service contract over process-local tables.
//! Used by the tests and by the demo `register` binary.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        InMemoryBackend                                  │
//! │                                                                         │
//! │   catalog     RwLock<CatalogTables>   categories, products, variants   │
//! │   promotions  RwLock<Vec<Promotion>>                                    │
//! │   sales       RwLock<SalesTables>     customers, sales, lines, tickets │
//! │   identity    RwLock<IdentityTables>  users, current session           │
//! │   faults      Mutex<HashMap<Operation, BackendError>>                  │
//! │   auth_tx     broadcast::Sender<AuthEvent>                             │
//! │                                                                         │
//! │   fail_next(op, err) ──► next call of `op` returns `err`, then clears  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locks are never held across a call into another table group.

mod catalog;
mod identity;
mod promotion;
mod sale;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use mostrador_core::{
    CatalogEntry, Category, Customer, Money, Promotion, SaleLineRecord, SaleRecord,
};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::warn;

use crate::error::{BackendError, BackendResult};
use crate::service::{AuthEvent, Session, User};

/// Capacity of the auth change channel. Slow subscribers lag, they never block.
const AUTH_CHANNEL_CAPACITY: usize = 16;

// =============================================================================
// Operations (fault injection keys)
// =============================================================================

/// One service call, used as a key for [`InMemoryBackend::fail_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCatalogEntries,
    ListByCategory,
    Search,
    UpdateVariantPrices,
    ListCategories,
    CreateCategory,
    CreateProduct,
    ListActivePromotions,
    ListAllPromotions,
    CreatePromotion,
    UpdatePromotion,
    SetPromotionActive,
    FindOrCreateCustomer,
    RecordSale,
    RecordSaleLineItems,
    GetSale,
    SalesOn,
    DailyReport,
    ListCustomers,
    SignIn,
    SignOut,
    CurrentUser,
}

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Clone)]
pub(crate) struct ProductRow {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct VariantRow {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub unit_cost: Money,
    pub unit_price: Money,
    pub active: bool,
}

#[derive(Debug, Default)]
pub(crate) struct CatalogTables {
    pub categories: Vec<Category>,
    pub products: Vec<ProductRow>,
    pub variants: Vec<VariantRow>,
}

impl CatalogTables {
    /// Joins a variant with its product and category.
    fn join(&self, variant: &VariantRow) -> Option<CatalogEntry> {
        let product = self.products.iter().find(|p| p.id == variant.product_id)?;
        let category = self.categories.iter().find(|c| c.id == product.category_id)?;

        Some(CatalogEntry {
            variant_id: variant.id.clone(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            variant_name: variant.name.clone(),
            category: category.name.clone(),
            category_color: category.color.clone(),
            description: product.description.clone(),
            unit_price: variant.unit_price,
            unit_cost: variant.unit_cost,
        })
    }

    /// Active variants of active products, ordered by category then product.
    /// Variants of one product keep their creation order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .variants
            .iter()
            .filter(|v| v.active)
            .filter(|v| {
                self.products
                    .iter()
                    .any(|p| p.id == v.product_id && p.active)
            })
            .filter_map(|v| self.join(v))
            .collect();

        entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        entries
    }

    pub fn entry(&self, variant_id: &str) -> Option<CatalogEntry> {
        self.variants
            .iter()
            .find(|v| v.id == variant_id)
            .and_then(|v| self.join(v))
    }
}

#[derive(Debug, Default)]
pub(crate) struct SalesTables {
    pub customers: Vec<Customer>,
    pub sales: Vec<SaleRecord>,
    pub lines: Vec<SaleLineRecord>,
    ticket_day: Option<NaiveDate>,
    ticket_seq: u32,
}

impl SalesTables {
    /// `YYYYMMDD-NNNN`, with NNNN restarting at 0001 each day.
    pub fn next_ticket(&mut self, now: DateTime<Utc>) -> String {
        let today = now.date_naive();
        if self.ticket_day != Some(today) {
            self.ticket_day = Some(today);
            self.ticket_seq = 0;
        }
        self.ticket_seq += 1;

        format!("{}-{:04}", today.format("%Y%m%d"), self.ticket_seq)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UserRow {
    pub user: User,
    pub password: String,
}

#[derive(Debug, Default)]
pub(crate) struct IdentityTables {
    pub users: Vec<UserRow>,
    pub session: Option<Session>,
}

// =============================================================================
// Backend
// =============================================================================

/// Process-local implementation of every service contract.
pub struct InMemoryBackend {
    catalog: RwLock<CatalogTables>,
    promotions: RwLock<Vec<Promotion>>,
    sales: RwLock<SalesTables>,
    identity: RwLock<IdentityTables>,
    faults: Mutex<HashMap<Operation, BackendError>>,
    auth_tx: broadcast::Sender<AuthEvent>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::from_tables(
            CatalogTables::default(),
            Vec::new(),
            SalesTables::default(),
            IdentityTables::default(),
        )
    }

    pub(crate) fn from_tables(
        catalog: CatalogTables,
        promotions: Vec<Promotion>,
        sales: SalesTables,
        identity: IdentityTables,
    ) -> Self {
        let (auth_tx, _) = broadcast::channel(AUTH_CHANNEL_CAPACITY);

        InMemoryBackend {
            catalog: RwLock::new(catalog),
            promotions: RwLock::new(promotions),
            sales: RwLock::new(sales),
            identity: RwLock::new(identity),
            faults: Mutex::new(HashMap::new()),
            auth_tx,
        }
    }

    /// Adds a user that can sign in with `email` / `password`.
    pub async fn add_user(&self, email: &str, password: &str, display_name: &str) -> User {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
        };

        self.identity.write().await.users.push(UserRow {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Makes the next call of `operation` fail with `error`.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// use mostrador_backend::{BackendError, InMemoryBackend, Operation, SaleService};
    ///
    /// let backend = InMemoryBackend::new();
    /// backend
    ///     .fail_next(Operation::ListCustomers, BackendError::Unavailable("offline".into()))
    ///     .await;
    ///
    /// assert!(backend.list_customers().await.is_err());
    /// assert!(backend.list_customers().await.is_ok());
    /// ```
    pub async fn fail_next(&self, operation: Operation, error: BackendError) {
        self.faults.lock().await.insert(operation, error);
    }

    /// Consumes the queued fault for `operation`, if any.
    async fn check_fault(&self, operation: Operation) -> BackendResult<()> {
        match self.faults.lock().await.remove(&operation) {
            Some(err) => {
                warn!(?operation, error = %err, "Injected backend failure");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ticket_numbers_restart_daily() {
        let mut tables = SalesTables::default();
        let day1 = Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap();

        assert_eq!(tables.next_ticket(day1), "20260314-0001");
        assert_eq!(tables.next_ticket(day1), "20260314-0002");
        assert_eq!(tables.next_ticket(day2), "20260315-0001");
    }

    #[tokio::test]
    async fn test_fault_is_consumed_once() {
        let backend = InMemoryBackend::new();
        backend
            .fail_next(Operation::SignOut, BackendError::Internal("boom".into()))
            .await;

        assert!(backend.check_fault(Operation::SignIn).await.is_ok());
        assert_eq!(
            backend.check_fault(Operation::SignOut).await,
            Err(BackendError::Internal("boom".into()))
        );
        assert!(backend.check_fault(Operation::SignOut).await.is_ok());
    }
}
