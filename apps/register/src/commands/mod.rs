//! # Register Commands Module
//!
//! Every operation the register shell can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── cart.rs        ◄─── Cart, promotion and customer selection
//! ├── sale.rs        ◄─── Finalizing and looking up sales
//! ├── catalog.rs     ◄─── Catalog browsing, products and prices
//! ├── promotions.rs  ◄─── Promotion listing and editing
//! ├── auth.rs        ◄─── Sign in / sign out
//! └── report.rs      ◄─── Daily report
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the sale
//! fn get_cart(sale: &SaleState, config: &ConfigState)
//!
//! // Needs the catalog service and the sale
//! async fn add_to_cart(services: &Services, sale: &SaleState, config: &ConfigState, ...)
//! ```
//!
//! Every command returns `Result<T, ApiError>` where `T: Serialize`.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod promotions;
pub mod report;
pub mod sale;

use chrono::{NaiveDate, Utc};

pub use auth::{current_user, sign_in, sign_out};
pub use cart::{
    add_to_cart, clear_cart, get_cart, remove_from_cart, set_customer, set_promotion,
    CartLineView, CartResponse, PromotionSummary,
};
pub use catalog::{
    create_category, create_product, list_catalog, list_categories, list_category,
    preview_margin, search_catalog, update_variant_prices, CatalogEntryView, MarginView,
};
pub use promotions::{
    create_promotion, list_active_promotions, list_all_promotions, toggle_promotion,
    update_promotion, PromotionView,
};
pub use report::{daily_report, sales_on, DailyReportView};
pub use sale::{finalize_sale, get_sale, SaleResponse};

/// The register's business date (UTC).
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::sync::Arc;

    use mostrador_backend::{seed, InMemoryBackend};

    use crate::state::{ConfigState, SaleState, Services, SessionState};

    /// Register state over the demo backend.
    pub struct Fixture {
        pub backend: Arc<InMemoryBackend>,
        pub services: Services,
        pub sale: SaleState,
        pub session: SessionState,
        pub config: ConfigState,
    }

    pub fn demo() -> Fixture {
        let backend = Arc::new(seed::demo());
        Fixture {
            services: Services::from_backend(backend.clone()),
            backend,
            sale: SaleState::new(),
            session: SessionState::new(),
            config: ConfigState::default(),
        }
    }

    impl Fixture {
        pub async fn signed_in(self) -> Self {
            super::sign_in(
                &self.services,
                &self.session,
                seed::DEMO_EMAIL,
                seed::DEMO_PASSWORD,
            )
            .await
            .unwrap();
            self
        }
    }
}
