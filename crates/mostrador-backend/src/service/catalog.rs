//! # Catalog Service

use async_trait::async_trait;
use mostrador_core::{CatalogEntry, Category, Money, NewCategory, NewProduct};

use crate::error::BackendResult;

/// Read and maintain the product catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every active variant, ordered by category then product name.
    async fn list_catalog_entries(&self) -> BackendResult<Vec<CatalogEntry>>;

    /// Active variants in the named category.
    async fn list_by_category(&self, category: &str) -> BackendResult<Vec<CatalogEntry>>;

    /// Case-insensitive match on product name, category or description.
    async fn search(&self, term: &str) -> BackendResult<Vec<CatalogEntry>>;

    /// Sets a variant's cost and selling price. Returns the updated entry.
    async fn update_variant_prices(
        &self,
        variant_id: &str,
        unit_cost: Money,
        unit_price: Money,
    ) -> BackendResult<CatalogEntry>;

    /// Active categories ordered by name.
    async fn list_categories(&self) -> BackendResult<Vec<Category>>;

    async fn create_category(&self, category: NewCategory) -> BackendResult<Category>;

    /// Creates a product with its variants and returns the resulting entries.
    async fn create_product(&self, product: NewProduct) -> BackendResult<Vec<CatalogEntry>>;
}
