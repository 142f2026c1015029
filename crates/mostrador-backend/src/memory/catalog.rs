//! Catalog tables behind [`CatalogService`].

use async_trait::async_trait;
use mostrador_core::{CatalogEntry, Category, Money, NewCategory, NewProduct};
use tracing::{debug, info};
use uuid::Uuid;

use super::{InMemoryBackend, Operation, ProductRow, VariantRow};
use crate::error::{BackendError, BackendResult};
use crate::service::CatalogService;

#[async_trait]
impl CatalogService for InMemoryBackend {
    async fn list_catalog_entries(&self) -> BackendResult<Vec<CatalogEntry>> {
        self.check_fault(Operation::ListCatalogEntries).await?;

        let entries = self.catalog.read().await.entries();
        debug!(count = entries.len(), "Listed catalog entries");
        Ok(entries)
    }

    async fn list_by_category(&self, category: &str) -> BackendResult<Vec<CatalogEntry>> {
        self.check_fault(Operation::ListByCategory).await?;

        let entries: Vec<CatalogEntry> = self
            .catalog
            .read()
            .await
            .entries()
            .into_iter()
            .filter(|e| e.category == category)
            .collect();

        debug!(category = %category, count = entries.len(), "Listed category");
        Ok(entries)
    }

    async fn search(&self, term: &str) -> BackendResult<Vec<CatalogEntry>> {
        self.check_fault(Operation::Search).await?;

        let entries: Vec<CatalogEntry> = self
            .catalog
            .read()
            .await
            .entries()
            .into_iter()
            .filter(|e| e.matches(term))
            .collect();

        debug!(term = %term, count = entries.len(), "Searched catalog");
        Ok(entries)
    }

    async fn update_variant_prices(
        &self,
        variant_id: &str,
        unit_cost: Money,
        unit_price: Money,
    ) -> BackendResult<CatalogEntry> {
        self.check_fault(Operation::UpdateVariantPrices).await?;

        if unit_cost.is_negative() || unit_price.is_negative() {
            return Err(BackendError::ConstraintViolation(
                "cost and price must be non-negative".to_string(),
            ));
        }

        let mut catalog = self.catalog.write().await;
        let variant = catalog
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| BackendError::not_found("Variant", variant_id))?;

        variant.unit_cost = unit_cost;
        variant.unit_price = unit_price;

        info!(
            variant_id = %variant_id,
            unit_cost = unit_cost.cents(),
            unit_price = unit_price.cents(),
            "Variant prices updated"
        );

        catalog
            .entry(variant_id)
            .ok_or_else(|| BackendError::Internal(format!("variant {} lost its product", variant_id)))
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        self.check_fault(Operation::ListCategories).await?;

        let mut categories: Vec<Category> = self
            .catalog
            .read()
            .await
            .categories
            .iter()
            .filter(|c| c.active)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(categories)
    }

    async fn create_category(&self, category: NewCategory) -> BackendResult<Category> {
        self.check_fault(Operation::CreateCategory).await?;

        let name = category.name.trim().to_string();
        let mut catalog = self.catalog.write().await;

        if catalog
            .categories
            .iter()
            .any(|c| c.name.to_lowercase() == name.to_lowercase())
        {
            return Err(BackendError::duplicate("category name", name));
        }

        let created = Category {
            id: Uuid::new_v4().to_string(),
            name,
            description: category.description,
            color: category.color,
            active: true,
        };
        catalog.categories.push(created.clone());

        info!(id = %created.id, name = %created.name, "Category created");
        Ok(created)
    }

    async fn create_product(&self, product: NewProduct) -> BackendResult<Vec<CatalogEntry>> {
        self.check_fault(Operation::CreateProduct).await?;

        if product.variants.is_empty() {
            return Err(BackendError::ConstraintViolation(
                "a product needs at least one variant".to_string(),
            ));
        }

        let mut catalog = self.catalog.write().await;

        if !catalog.categories.iter().any(|c| c.id == product.category_id) {
            return Err(BackendError::not_found("Category", product.category_id));
        }

        let product_id = Uuid::new_v4().to_string();
        catalog.products.push(ProductRow {
            id: product_id.clone(),
            category_id: product.category_id,
            name: product.name.trim().to_string(),
            description: product.description,
            active: true,
        });

        let mut variant_ids = Vec::with_capacity(product.variants.len());
        for variant in product.variants {
            let id = Uuid::new_v4().to_string();
            catalog.variants.push(VariantRow {
                id: id.clone(),
                product_id: product_id.clone(),
                name: variant.name,
                unit_cost: variant.unit_cost,
                unit_price: variant.unit_price,
                active: true,
            });
            variant_ids.push(id);
        }

        info!(
            product_id = %product_id,
            variants = variant_ids.len(),
            "Product created"
        );

        Ok(variant_ids
            .iter()
            .filter_map(|id| catalog.entry(id))
            .collect())
    }
}
