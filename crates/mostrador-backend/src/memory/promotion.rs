//! Promotion table behind [`PromotionService`].

use async_trait::async_trait;
use chrono::Utc;
use mostrador_core::{NewPromotion, Promotion, PromotionChanges};
use tracing::{debug, info};
use uuid::Uuid;

use super::{InMemoryBackend, Operation};
use crate::error::{BackendError, BackendResult};
use crate::service::PromotionService;

#[async_trait]
impl PromotionService for InMemoryBackend {
    async fn list_active_promotions(&self) -> BackendResult<Vec<Promotion>> {
        self.check_fault(Operation::ListActivePromotions).await?;

        let mut active: Vec<Promotion> = self
            .promotions
            .read()
            .await
            .iter()
            .filter(|p| p.active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = active.len(), "Listed active promotions");
        Ok(active)
    }

    async fn list_all_promotions(&self) -> BackendResult<Vec<Promotion>> {
        self.check_fault(Operation::ListAllPromotions).await?;

        // reversed first so equal timestamps still come out newest first
        let mut all: Vec<Promotion> = self.promotions.read().await.iter().rev().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all)
    }

    async fn create_promotion(&self, promotion: NewPromotion) -> BackendResult<Promotion> {
        self.check_fault(Operation::CreatePromotion).await?;

        let now = Utc::now();
        let created = Promotion {
            id: Uuid::new_v4().to_string(),
            name: promotion.name.trim().to_string(),
            description: promotion.description.filter(|d| !d.trim().is_empty()),
            rule: promotion.rule,
            window: promotion.window,
            active: promotion.active,
            created_at: now,
            updated_at: now,
        };

        self.promotions.write().await.push(created.clone());

        info!(
            id = %created.id,
            name = %created.name,
            kind = %created.rule.kind(),
            "Promotion created"
        );
        Ok(created)
    }

    async fn update_promotion(
        &self,
        id: &str,
        changes: PromotionChanges,
    ) -> BackendResult<Promotion> {
        self.check_fault(Operation::UpdatePromotion).await?;

        let mut promotions = self.promotions.write().await;
        let promotion = promotions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BackendError::not_found("Promotion", id))?;

        changes.apply_to(promotion);
        promotion.updated_at = Utc::now();

        info!(id = %id, "Promotion updated");
        Ok(promotion.clone())
    }

    async fn set_promotion_active(&self, id: &str, active: bool) -> BackendResult<Promotion> {
        self.check_fault(Operation::SetPromotionActive).await?;

        let mut promotions = self.promotions.write().await;
        let promotion = promotions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BackendError::not_found("Promotion", id))?;

        promotion.active = active;
        promotion.updated_at = Utc::now();

        info!(id = %id, active, "Promotion toggled");
        Ok(promotion.clone())
    }
}
