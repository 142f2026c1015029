//! # Sale Service
//!
//! ## Finalize Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. find_or_create_customer(name, phone)     → Customer                │
//! │  2. record_sale(customer.id, priced, promo)  → SaleReceipt             │
//! │  3. record_sale_line_items(sale_id, lines)   → ()                      │
//! │                                                                         │
//! │  The three calls are independent. A failure at step 3 leaves the       │
//! │  header from step 2 stored without lines.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use mostrador_core::{
    Customer, DailyReport, LineItem, PricedCart, SaleLineRecord, SaleReceipt, SaleRecord,
};
use serde::{Deserialize, Serialize};

use crate::error::BackendResult;

/// A sale with its customer and lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub sale: SaleRecord,
    pub customer: Customer,
    pub lines: Vec<SaleLineRecord>,
}

/// Customers, sales and reports.
#[async_trait]
pub trait SaleService: Send + Sync {
    /// Looks the customer up by phone when one is given, otherwise creates one.
    async fn find_or_create_customer(
        &self,
        name: &str,
        phone: Option<&str>,
    ) -> BackendResult<Customer>;

    /// Stores a sale header and assigns its ticket number.
    async fn record_sale(
        &self,
        customer_id: &str,
        totals: &PricedCart,
        promotion_id: Option<&str>,
    ) -> BackendResult<SaleReceipt>;

    /// Stores the lines of a recorded sale with price and cost frozen.
    async fn record_sale_line_items(&self, sale_id: &str, items: &[LineItem])
        -> BackendResult<()>;

    async fn get_sale(&self, sale_id: &str) -> BackendResult<SaleDetail>;

    /// Sales recorded on `date` (UTC), newest first.
    async fn sales_on(&self, date: NaiveDate) -> BackendResult<Vec<SaleRecord>>;

    async fn daily_report(&self, date: NaiveDate) -> BackendResult<DailyReport>;

    /// Customers ordered by name.
    async fn list_customers(&self) -> BackendResult<Vec<Customer>>;
}
