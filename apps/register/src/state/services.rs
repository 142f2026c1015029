//! # Services State
//!
//! Handles to the four data service contracts. Commands only see the
//! traits, so the in-memory backend and a hosted one are interchangeable.

use std::sync::Arc;

use mostrador_backend::{CatalogService, IdentityService, PromotionService, SaleService};

/// The data service handles a command may need.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogService>,
    pub promotions: Arc<dyn PromotionService>,
    pub sales: Arc<dyn SaleService>,
    pub identity: Arc<dyn IdentityService>,
}

impl Services {
    /// Uses one backend for all four contracts.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CatalogService + PromotionService + SaleService + IdentityService + 'static,
    {
        Services {
            catalog: backend.clone(),
            promotions: backend.clone(),
            sales: backend.clone(),
            identity: backend,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
