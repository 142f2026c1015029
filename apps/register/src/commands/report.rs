//! # Report Commands
//!
//! End-of-day figures for the register.
//!
//! ```text
//! revenue = Σ sale.total               (after discounts)
//! profit  = revenue − Σ unit_cost × quantity
//! ```

use chrono::NaiveDate;
use mostrador_core::{DailyReport, SaleRecord};
use serde::Serialize;
use tracing::debug;

use super::today;
use crate::error::ApiError;
use crate::state::{ConfigState, Services};

/// A daily report with display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportView {
    #[serde(flatten)]
    pub report: DailyReport,
    pub formatted_revenue: String,
    pub formatted_profit: String,
}

/// Sales count, revenue and profit for `date`, today when `None`.
pub async fn daily_report(
    services: &Services,
    config: &ConfigState,
    date: Option<NaiveDate>,
) -> Result<DailyReportView, ApiError> {
    let date = date.unwrap_or_else(today);
    debug!(date = %date, "daily_report command");

    let report = services.sales.daily_report(date).await?;
    Ok(DailyReportView {
        formatted_revenue: config.format_money(report.revenue),
        formatted_profit: config.format_money(report.profit),
        report,
    })
}

/// Sales recorded on `date`, newest first.
pub async fn sales_on(
    services: &Services,
    date: Option<NaiveDate>,
) -> Result<Vec<SaleRecord>, ApiError> {
    let date = date.unwrap_or_else(today);
    debug!(date = %date, "sales_on command");

    Ok(services.sales.sales_on(date).await?)
}
