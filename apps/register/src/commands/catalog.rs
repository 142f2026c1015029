//! # Catalog Commands
//!
//! Browsing the catalog at the register and maintaining it from the back
//! office: categories, products with their variants, and variant prices.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier types "dino"                                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate_search_term ── too long ──► VALIDATION_ERROR                 │
//! │        │                                                                │
//! │        ├── blank ──► list_catalog_entries()                            │
//! │        └── term ───► search(term)                                      │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  CatalogEntryView { name, price, formattedPrice, margin }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mostrador_core::validation::{
    validate_category_name, validate_price, validate_product_name, validate_sale_price,
    validate_search_term,
};
use mostrador_core::{
    CatalogEntry, Category, Margin, Money, NewCategory, NewProduct, Percent,
    DEFAULT_CATEGORY_COLOR,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, Services};

/// Profit and margin, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginView {
    pub profit: Money,
    pub percent: Option<Percent>,
    pub formatted_profit: String,
    /// "25%", or "n/a" for a zero price.
    pub formatted_percent: String,
}

impl MarginView {
    fn new(margin: Margin, config: &ConfigState) -> Self {
        MarginView {
            profit: margin.profit,
            percent: margin.percent,
            formatted_profit: config.format_money(margin.profit),
            formatted_percent: margin
                .percent
                .map_or_else(|| "n/a".to_string(), |p| p.to_string()),
        }
    }
}

/// A catalog entry with display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryView {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub formatted_price: String,
    pub margin: MarginView,
}

impl CatalogEntryView {
    fn new(entry: CatalogEntry, config: &ConfigState) -> Self {
        CatalogEntryView {
            formatted_price: config.format_money(entry.unit_price),
            margin: MarginView::new(entry.margin(), config),
            entry,
        }
    }
}

fn views(entries: Vec<CatalogEntry>, config: &ConfigState) -> Vec<CatalogEntryView> {
    entries
        .into_iter()
        .map(|entry| CatalogEntryView::new(entry, config))
        .collect()
}

/// Lists every active variant, grouped by category.
pub async fn list_catalog(
    services: &Services,
    config: &ConfigState,
) -> Result<Vec<CatalogEntryView>, ApiError> {
    debug!("list_catalog command");

    let entries = services.catalog.list_catalog_entries().await?;
    Ok(views(entries, config))
}

/// Lists the variants of one category.
pub async fn list_category(
    services: &Services,
    config: &ConfigState,
    category: &str,
) -> Result<Vec<CatalogEntryView>, ApiError> {
    debug!(category = %category, "list_category command");

    let entries = services.catalog.list_by_category(category).await?;
    Ok(views(entries, config))
}

/// Searches by product name, category or description. A blank term lists
/// everything.
pub async fn search_catalog(
    services: &Services,
    config: &ConfigState,
    term: &str,
) -> Result<Vec<CatalogEntryView>, ApiError> {
    debug!(term = %term, "search_catalog command");

    let term = validate_search_term(term)?;
    let entries = if term.is_empty() {
        services.catalog.list_catalog_entries().await?
    } else {
        services.catalog.search(&term).await?
    };

    Ok(views(entries, config))
}

pub async fn list_categories(services: &Services) -> Result<Vec<Category>, ApiError> {
    debug!("list_categories command");
    Ok(services.catalog.list_categories().await?)
}

/// Creates a category. A missing color gets the default swatch.
pub async fn create_category(
    services: &Services,
    name: &str,
    description: Option<&str>,
    color: Option<&str>,
) -> Result<Category, ApiError> {
    debug!(name = %name, "create_category command");

    validate_category_name(name)?;

    let category = services
        .catalog
        .create_category(NewCategory {
            name: name.trim().to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            color: color
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CATEGORY_COLOR)
                .to_string(),
        })
        .await?;

    info!(id = %category.id, name = %category.name, "Category created");
    Ok(category)
}

/// Creates a product with its variants.
///
/// ## Validation
/// - Product and variant names required
/// - At least one variant
/// - Cost ≥ 0, price > 0 for every variant
pub async fn create_product(
    services: &Services,
    config: &ConfigState,
    product: NewProduct,
) -> Result<Vec<CatalogEntryView>, ApiError> {
    debug!(
        name = %product.name,
        variants = product.variants.len(),
        "create_product command"
    );

    validate_product_name(&product.name)?;
    if product.variants.is_empty() {
        return Err(ApiError::validation("A product needs at least one variant"));
    }
    for variant in &product.variants {
        validate_product_name(&variant.name)?;
        validate_price("unit cost", variant.unit_cost)?;
        validate_sale_price(variant.unit_price)?;
    }

    let entries = services.catalog.create_product(product).await?;
    info!(variants = entries.len(), "Product created");
    Ok(views(entries, config))
}

/// Sets a variant's cost and selling price.
pub async fn update_variant_prices(
    services: &Services,
    config: &ConfigState,
    variant_id: &str,
    unit_cost: Money,
    unit_price: Money,
) -> Result<CatalogEntryView, ApiError> {
    debug!(
        variant_id = %variant_id,
        unit_cost = unit_cost.cents(),
        unit_price = unit_price.cents(),
        "update_variant_prices command"
    );

    validate_price("unit cost", unit_cost)?;
    validate_sale_price(unit_price)?;

    let entry = services
        .catalog
        .update_variant_prices(variant_id, unit_cost, unit_price)
        .await?;
    Ok(CatalogEntryView::new(entry, config))
}

/// Margin for a price/cost pair before it is saved.
pub fn preview_margin(config: &ConfigState, unit_price: Money, unit_cost: Money) -> MarginView {
    debug!("preview_margin command");
    MarginView::new(Margin::of(unit_price, unit_cost), config)
}
