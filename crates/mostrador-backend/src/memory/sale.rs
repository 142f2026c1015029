//! Customer and sale tables behind [`SaleService`].

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use mostrador_core::{
    Customer, DailyReport, LineItem, Money, PricedCart, SaleLineRecord, SaleReceipt, SaleRecord,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{InMemoryBackend, Operation};
use crate::error::{BackendError, BackendResult};
use crate::service::{SaleDetail, SaleService};

#[async_trait]
impl SaleService for InMemoryBackend {
    async fn find_or_create_customer(
        &self,
        name: &str,
        phone: Option<&str>,
    ) -> BackendResult<Customer> {
        self.check_fault(Operation::FindOrCreateCustomer).await?;

        let mut sales = self.sales.write().await;

        if let Some(phone) = phone {
            if let Some(existing) = sales
                .customers
                .iter()
                .find(|c| c.phone.as_deref() == Some(phone))
            {
                debug!(customer_id = %existing.id, "Found customer by phone");
                return Ok(existing.clone());
            }
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            phone: phone.map(str::to_string),
        };
        sales.customers.push(customer.clone());

        debug!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    async fn record_sale(
        &self,
        customer_id: &str,
        totals: &PricedCart,
        promotion_id: Option<&str>,
    ) -> BackendResult<SaleReceipt> {
        self.check_fault(Operation::RecordSale).await?;

        if let Some(promotion_id) = promotion_id {
            if !self.promotions.read().await.iter().any(|p| p.id == promotion_id) {
                return Err(BackendError::not_found("Promotion", promotion_id));
            }
        }

        let mut sales = self.sales.write().await;

        if !sales.customers.iter().any(|c| c.id == customer_id) {
            return Err(BackendError::not_found("Customer", customer_id));
        }

        let now = Utc::now();
        let record = SaleRecord {
            id: Uuid::new_v4().to_string(),
            ticket_number: sales.next_ticket(now),
            customer_id: customer_id.to_string(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            promotion_id: promotion_id.map(str::to_string),
            recorded_at: now,
        };

        let receipt = SaleReceipt {
            sale_id: record.id.clone(),
            ticket_number: record.ticket_number.clone(),
        };
        sales.sales.push(record);

        info!(
            sale_id = %receipt.sale_id,
            ticket = %receipt.ticket_number,
            total = totals.total.cents(),
            "Sale recorded"
        );
        Ok(receipt)
    }

    async fn record_sale_line_items(
        &self,
        sale_id: &str,
        items: &[LineItem],
    ) -> BackendResult<()> {
        self.check_fault(Operation::RecordSaleLineItems).await?;

        let mut sales = self.sales.write().await;

        if !sales.sales.iter().any(|s| s.id == sale_id) {
            return Err(BackendError::not_found("Sale", sale_id));
        }
        if let Some(line) = items.iter().find(|line| line.quantity == 0) {
            return Err(BackendError::ConstraintViolation(format!(
                "line {} has zero quantity",
                line.variant_id
            )));
        }

        sales.lines.extend(items.iter().map(|line| SaleLineRecord {
            sale_id: sale_id.to_string(),
            variant_id: line.variant_id.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            unit_cost: line.unit_cost,
        }));

        debug!(sale_id = %sale_id, lines = items.len(), "Recorded sale lines");
        Ok(())
    }

    async fn get_sale(&self, sale_id: &str) -> BackendResult<SaleDetail> {
        self.check_fault(Operation::GetSale).await?;

        let sales = self.sales.read().await;

        let sale = sales
            .sales
            .iter()
            .find(|s| s.id == sale_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("Sale", sale_id))?;

        let customer = sales
            .customers
            .iter()
            .find(|c| c.id == sale.customer_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("Customer", &sale.customer_id))?;

        let lines = sales
            .lines
            .iter()
            .filter(|l| l.sale_id == sale_id)
            .cloned()
            .collect();

        Ok(SaleDetail {
            sale,
            customer,
            lines,
        })
    }

    async fn sales_on(&self, date: NaiveDate) -> BackendResult<Vec<SaleRecord>> {
        self.check_fault(Operation::SalesOn).await?;

        let mut day: Vec<SaleRecord> = self
            .sales
            .read()
            .await
            .sales
            .iter()
            .rev()
            .filter(|s| s.recorded_at.date_naive() == date)
            .cloned()
            .collect();
        day.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        Ok(day)
    }

    async fn daily_report(&self, date: NaiveDate) -> BackendResult<DailyReport> {
        self.check_fault(Operation::DailyReport).await?;

        let sales = self.sales.read().await;
        let mut report = DailyReport::empty(date);
        let mut cost_of_goods = Money::zero();

        for sale in sales.sales.iter().filter(|s| s.recorded_at.date_naive() == date) {
            report.sale_count += 1;
            report.revenue += sale.total;
            cost_of_goods += sales
                .lines
                .iter()
                .filter(|l| l.sale_id == sale.id)
                .map(SaleLineRecord::line_cost)
                .sum::<Money>();
        }
        report.profit = report.revenue - cost_of_goods;

        debug!(
            date = %date,
            sales = report.sale_count,
            revenue = report.revenue.cents(),
            "Built daily report"
        );
        Ok(report)
    }

    async fn list_customers(&self) -> BackendResult<Vec<Customer>> {
        self.check_fault(Operation::ListCustomers).await?;

        let mut customers = self.sales.read().await.customers.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::service::CatalogService;
    use mostrador_core::{Cart, CartEvent};

    async fn two_line_cart(backend: &InMemoryBackend) -> Cart {
        let entries = backend.list_catalog_entries().await.unwrap();
        Cart::new()
            .apply(CartEvent::AddItem(entries[0].clone()))
            .apply(CartEvent::AddItem(entries[0].clone()))
            .apply(CartEvent::AddItem(entries[1].clone()))
    }

    #[tokio::test]
    async fn test_find_or_create_customer_by_phone() {
        let backend = InMemoryBackend::new();

        let first = backend
            .find_or_create_customer("Ana", Some("5550101"))
            .await
            .unwrap();
        let again = backend
            .find_or_create_customer("Ana María", Some("5550101"))
            .await
            .unwrap();
        assert_eq!(first, again);

        let walk_in_1 = backend.find_or_create_customer("Luis", None).await.unwrap();
        let walk_in_2 = backend.find_or_create_customer("Luis", None).await.unwrap();
        assert_ne!(walk_in_1.id, walk_in_2.id);

        assert_eq!(backend.list_customers().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_record_sale_round_trip() {
        let backend = seed::demo();
        let cart = two_line_cart(&backend).await;
        let customer = backend.find_or_create_customer("Ana", None).await.unwrap();

        let receipt = backend
            .record_sale(&customer.id, &cart.priced(), None)
            .await
            .unwrap();
        backend
            .record_sale_line_items(&receipt.sale_id, cart.items())
            .await
            .unwrap();

        let detail = backend.get_sale(&receipt.sale_id).await.unwrap();
        assert_eq!(detail.sale.ticket_number, receipt.ticket_number);
        assert_eq!(detail.sale.total, cart.priced().total);
        assert_eq!(detail.customer.name, "Ana");
        assert_eq!(detail.lines.len(), 2);
        assert_eq!(detail.lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_ticket_numbers_increase() {
        let backend = seed::demo();
        let customer = backend.find_or_create_customer("Ana", None).await.unwrap();
        let totals = PricedCart::default();

        let first = backend.record_sale(&customer.id, &totals, None).await.unwrap();
        let second = backend.record_sale(&customer.id, &totals, None).await.unwrap();

        let today = Utc::now().format("%Y%m%d").to_string();
        assert_eq!(first.ticket_number, format!("{}-0001", today));
        assert_eq!(second.ticket_number, format!("{}-0002", today));
    }

    #[tokio::test]
    async fn test_record_sale_rejects_unknown_references() {
        let backend = seed::demo();
        let totals = PricedCart::default();

        let err = backend.record_sale("ghost", &totals, None).await.unwrap_err();
        assert_eq!(err, BackendError::not_found("Customer", "ghost"));

        let customer = backend.find_or_create_customer("Ana", None).await.unwrap();
        let err = backend
            .record_sale(&customer.id, &totals, Some("ghost-promo"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));

        let err = backend.record_sale_line_items("ghost", &[]).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_daily_report() {
        let backend = seed::demo();
        let cart = two_line_cart(&backend).await;
        let customer = backend.find_or_create_customer("Ana", None).await.unwrap();

        for _ in 0..2 {
            let receipt = backend
                .record_sale(&customer.id, &cart.priced(), None)
                .await
                .unwrap();
            backend
                .record_sale_line_items(&receipt.sale_id, cart.items())
                .await
                .unwrap();
        }

        let today = Utc::now().date_naive();
        let report = backend.daily_report(today).await.unwrap();

        let cost: Money = cart.items().iter().map(|l| l.unit_cost * l.quantity).sum();
        assert_eq!(report.sale_count, 2);
        assert_eq!(report.revenue, cart.priced().total * 2u32);
        assert_eq!(report.profit, (cart.priced().total - cost) * 2u32);

        assert_eq!(backend.sales_on(today).await.unwrap().len(), 2);

        let yesterday = today.pred_opt().unwrap();
        assert_eq!(backend.daily_report(yesterday).await.unwrap(), DailyReport::empty(yesterday));
        assert!(backend.sales_on(yesterday).await.unwrap().is_empty());
    }
}
