//! # Promotion Commands
//!
//! Listing promotions for the register picker and editing them from the
//! back office.

use chrono::NaiveDate;
use mostrador_core::validation::{
    validate_promotion_name, validate_promotion_rule, validate_promotion_window,
};
use mostrador_core::{NewPromotion, Promotion, PromotionChanges};
use serde::Serialize;
use tracing::{debug, info};

use super::today;
use crate::error::ApiError;
use crate::state::Services;

/// A promotion with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionView {
    #[serde(flatten)]
    pub promotion: Promotion,
    pub label: String,
    /// Active and inside its date window today.
    pub available_today: bool,
}

impl PromotionView {
    fn new(promotion: Promotion, date: NaiveDate) -> Self {
        PromotionView {
            label: promotion.rule.label(),
            available_today: promotion.is_available_on(date),
            promotion,
        }
    }
}

fn views(promotions: Vec<Promotion>) -> Vec<PromotionView> {
    let date = today();
    promotions
        .into_iter()
        .map(|p| PromotionView::new(p, date))
        .collect()
}

/// Active promotions, ordered by name, for the register picker.
pub async fn list_active_promotions(services: &Services) -> Result<Vec<PromotionView>, ApiError> {
    debug!("list_active_promotions command");

    let promotions = services.promotions.list_active_promotions().await?;
    Ok(views(promotions))
}

/// Every promotion, newest first.
pub async fn list_all_promotions(services: &Services) -> Result<Vec<PromotionView>, ApiError> {
    debug!("list_all_promotions command");

    let promotions = services.promotions.list_all_promotions().await?;
    Ok(views(promotions))
}

/// Creates a promotion after checking its name, value and dates.
pub async fn create_promotion(
    services: &Services,
    promotion: NewPromotion,
) -> Result<PromotionView, ApiError> {
    debug!(name = %promotion.name, kind = %promotion.rule.kind(), "create_promotion command");

    validate_promotion_name(&promotion.name)?;
    validate_promotion_rule(&promotion.rule)?;
    validate_promotion_window(&promotion.window)?;

    let created = services.promotions.create_promotion(promotion).await?;
    info!(id = %created.id, label = %created.rule.label(), "Promotion created");
    Ok(PromotionView::new(created, today()))
}

/// Applies a partial update. Only the fields present are checked.
pub async fn update_promotion(
    services: &Services,
    id: &str,
    changes: PromotionChanges,
) -> Result<PromotionView, ApiError> {
    debug!(id = %id, "update_promotion command");

    if let Some(name) = &changes.name {
        validate_promotion_name(name)?;
    }
    if let Some(rule) = &changes.rule {
        validate_promotion_rule(rule)?;
    }
    if let Some(window) = &changes.window {
        validate_promotion_window(window)?;
    }

    let updated = services.promotions.update_promotion(id, changes).await?;
    info!(id = %id, "Promotion changed");
    Ok(PromotionView::new(updated, today()))
}

/// Switches a promotion on or off.
pub async fn toggle_promotion(
    services: &Services,
    id: &str,
    active: bool,
) -> Result<PromotionView, ApiError> {
    debug!(id = %id, active, "toggle_promotion command");

    let updated = services.promotions.set_promotion_active(id, active).await?;
    info!(id = %id, active, "Promotion toggled");
    Ok(PromotionView::new(updated, today()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixture;
    use crate::error::ErrorCode;
    use mostrador_backend::seed::{PROMO_APERTURA, PROMO_LLEVA_5};
    use mostrador_core::{Money, Percent, PromotionRule, PromotionWindow};

    fn fixed_off(name: &str, amount: Money) -> NewPromotion {
        NewPromotion {
            name: name.to_string(),
            description: None,
            rule: PromotionRule::FixedAmountOff { amount },
            window: PromotionWindow::always(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_list_active_has_labels() {
        let f = fixture::demo();

        let promotions = list_active_promotions(&f.services).await.unwrap();

        let apertura = promotions
            .iter()
            .find(|p| p.promotion.id == PROMO_APERTURA)
            .unwrap();
        assert_eq!(apertura.label, "15%");
        assert!(apertura.available_today);

        let lleva = promotions
            .iter()
            .find(|p| p.promotion.id == PROMO_LLEVA_5)
            .unwrap();
        assert_eq!(lleva.label, "Buy 5, get the cheapest free");
    }

    #[tokio::test]
    async fn test_create_promotion() {
        let f = fixture::demo();

        let created = create_promotion(&f.services, fixed_off("Cincuenta", Money::from_major(50)))
            .await
            .unwrap();

        assert_eq!(created.label, "$50.00");
        let all = list_all_promotions(&f.services).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].promotion.id, created.promotion.id);
    }

    #[tokio::test]
    async fn test_create_promotion_validation() {
        let f = fixture::demo();

        let err = create_promotion(&f.services, fixed_off("Cero", Money::zero()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_promotion(&f.services, fixed_off("", Money::from_major(5)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let start = today();
        let mut backwards = fixed_off("Al revés", Money::from_major(5));
        backwards.window = PromotionWindow {
            starts_on: Some(start),
            ends_on: start.pred_opt(),
        };
        let err = create_promotion(&f.services, backwards).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_promotion() {
        let f = fixture::demo();

        let updated = update_promotion(
            &f.services,
            PROMO_APERTURA,
            PromotionChanges {
                rule: Some(PromotionRule::PercentOff {
                    rate: Percent::from_whole(20),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.label, "20%");
        assert_eq!(updated.promotion.name, "Apertura 15%");

        let err = update_promotion(
            &f.services,
            PROMO_APERTURA,
            PromotionChanges {
                rule: Some(PromotionRule::PercentOff {
                    rate: Percent::from_whole(101),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_toggle_promotion() {
        let f = fixture::demo();

        let off = toggle_promotion(&f.services, PROMO_LLEVA_5, false)
            .await
            .unwrap();
        assert!(!off.available_today);

        let active = list_active_promotions(&f.services).await.unwrap();
        assert_eq!(active.len(), 1);

        let err = toggle_promotion(&f.services, "nope", true)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
