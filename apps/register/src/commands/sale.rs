//! # Sale Commands
//!
//! Finalizing the current sale and looking up recorded ones.
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    finalize_sale                                        │
//! │                                                                         │
//! │  1. require session ──────────────────────────► UNAUTHORIZED           │
//! │  2. snapshot draft, validate_checkout ────────► CART_ERROR / VALIDATION│
//! │  3. find_or_create_customer ─────┐                                      │
//! │  4. record_sale ─────────────────┼── any failure ──► error, draft kept │
//! │  5. record_sale_line_items ──────┘                                      │
//! │  6. reset draft, return ticket                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The three data service calls are not atomic. When step 5 fails the sale
//! header from step 4 stays behind without lines; the draft is kept so the
//! cashier can retry.

use mostrador_backend::SaleDetail;
use mostrador_core::validation::{validate_checkout, validate_uuid};
use mostrador_core::PricedCart;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, SaleState, Services, SessionState};

/// Result of a finalized sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub sale_id: String,
    pub ticket_number: String,
    pub customer_id: String,
    pub totals: PricedCart,
    pub formatted_total: String,
}

/// Records the current sale with the data service.
///
/// On success the draft is reset for the next customer. On any failure the
/// cart, promotion and customer are left exactly as they were.
pub async fn finalize_sale(
    services: &Services,
    sale: &SaleState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<SaleResponse, ApiError> {
    let user = session.require().await?.user;
    let draft = sale.snapshot();
    debug!(
        user_id = %user.id,
        lines = draft.cart.line_count(),
        "finalize_sale command"
    );

    let customer = validate_checkout(&draft.cart, &draft.customer)?;
    let totals = draft.cart.priced();
    let promotion_id = draft.cart.promotion().map(|p| p.id.as_str());

    let customer = services
        .sales
        .find_or_create_customer(&customer.name, customer.phone.as_deref())
        .await?;

    let receipt = services
        .sales
        .record_sale(&customer.id, &totals, promotion_id)
        .await?;

    if let Err(e) = services
        .sales
        .record_sale_line_items(&receipt.sale_id, draft.cart.items())
        .await
    {
        warn!(
            sale_id = %receipt.sale_id,
            ticket = %receipt.ticket_number,
            error = %e,
            "Sale recorded without its lines"
        );
        return Err(e.into());
    }

    sale.reset();

    info!(
        ticket = %receipt.ticket_number,
        total = %totals.total,
        promotion_id = ?promotion_id,
        "Sale finalized"
    );

    Ok(SaleResponse {
        sale_id: receipt.sale_id,
        ticket_number: receipt.ticket_number,
        customer_id: customer.id,
        totals,
        formatted_total: config.format_money(totals.total),
    })
}

/// Gets a recorded sale with its customer and lines.
pub async fn get_sale(services: &Services, sale_id: &str) -> Result<SaleDetail, ApiError> {
    debug!(sale_id = %sale_id, "get_sale command");

    validate_uuid(sale_id)?;
    Ok(services.sales.get_sale(sale_id).await?)
}
