//! # Promotion Service

use async_trait::async_trait;
use mostrador_core::{NewPromotion, Promotion, PromotionChanges};

use crate::error::BackendResult;

/// Read and maintain promotions.
#[async_trait]
pub trait PromotionService: Send + Sync {
    /// Promotions with `active = true`, ordered by name.
    async fn list_active_promotions(&self) -> BackendResult<Vec<Promotion>>;

    /// Every promotion, newest first.
    async fn list_all_promotions(&self) -> BackendResult<Vec<Promotion>>;

    async fn create_promotion(&self, promotion: NewPromotion) -> BackendResult<Promotion>;

    /// Applies a partial update. Fields left `None` keep their value.
    async fn update_promotion(
        &self,
        id: &str,
        changes: PromotionChanges,
    ) -> BackendResult<Promotion>;

    async fn set_promotion_active(&self, id: &str, active: bool) -> BackendResult<Promotion>;
}
