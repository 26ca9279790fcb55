//! Joins and aggregates over one snapshot of the tables.
//!
//! A dangling reference (client, supplier, order or product id that no longer
//! resolves) drops the affected view and logs a warning.

use chrono::{DateTime, Utc};
use models::{
    money, DashboardStats, Delivery, DeliveryWithOrder, Order, OrderItemWithProduct, OrderStatus, OrderWithDetails,
    OrderWithParties,
};
use tracing::warn;

use super::tables::Tables;

impl Tables {
    fn order_parties(&self, order: &Order) -> Option<OrderWithParties> {
        let Some(client) = self.clients.get(&order.client_id) else {
            warn!(order_id = %order.id, client_id = %order.client_id, "order references a missing client; skipped");
            return None;
        };
        let Some(supplier) = self.suppliers.get(&order.supplier_id) else {
            warn!(order_id = %order.id, supplier_id = %order.supplier_id, "order references a missing supplier; skipped");
            return None;
        };
        Some(OrderWithParties { order: order.clone(), client: client.clone(), supplier: supplier.clone() })
    }

    pub(crate) fn order_details(&self, order: &Order) -> Option<OrderWithDetails> {
        let OrderWithParties { order, client, supplier } = self.order_parties(order)?;
        let items = self
            .order_items
            .iter()
            .filter(|item| item.order_id == order.id)
            .filter_map(|item| match self.products.get(&item.product_id) {
                Some(product) => Some(OrderItemWithProduct { item: item.clone(), product: product.clone() }),
                None => {
                    warn!(order_id = %order.id, item_id = %item.id, product_id = %item.product_id, "order item references a missing product; skipped");
                    None
                }
            })
            .collect();
        let deliveries = self.deliveries.iter().filter(|d| d.order_id == order.id).cloned().collect();
        let invoices = self.invoices.iter().filter(|i| i.order_id == order.id).cloned().collect();
        Some(OrderWithDetails { order, client, supplier, items, deliveries, invoices })
    }

    /// Newest first; equal timestamps keep insertion order.
    pub(crate) fn orders_with_details(&self) -> Vec<OrderWithDetails> {
        let mut orders: Vec<&Order> = self.orders.iter().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.into_iter().filter_map(|o| self.order_details(o)).collect()
    }

    pub(crate) fn delivery_details(&self, delivery: &Delivery) -> Option<DeliveryWithOrder> {
        let Some(order) = self.orders.get(&delivery.order_id) else {
            warn!(delivery_id = %delivery.id, order_id = %delivery.order_id, "delivery references a missing order; skipped");
            return None;
        };
        let order = self.order_parties(order)?;
        Some(DeliveryWithOrder { delivery: delivery.clone(), order })
    }

    fn deliveries_matching<F>(&self, mut pred: F) -> Vec<DeliveryWithOrder>
    where
        F: FnMut(&Delivery) -> bool,
    {
        let mut deliveries: Vec<&Delivery> = self.deliveries.iter().filter(|d| pred(*d)).collect();
        deliveries.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
        deliveries.into_iter().filter_map(|d| self.delivery_details(d)).collect()
    }

    /// Latest scheduled first.
    pub(crate) fn deliveries_with_details(&self) -> Vec<DeliveryWithOrder> {
        self.deliveries_matching(|_| true)
    }

    /// Deliveries scheduled in `[start, end)`.
    pub(crate) fn deliveries_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DeliveryWithOrder> {
        self.deliveries_matching(|d| d.scheduled_date >= start && d.scheduled_date < end)
    }

    pub(crate) fn dashboard_stats(
        &self,
        day: (DateTime<Utc>, DateTime<Utc>),
        month_start: DateTime<Utc>,
    ) -> DashboardStats {
        let (day_start, day_end) = day;
        let pending_orders = self.orders.iter().filter(|o| o.status == OrderStatus::Pending).count();
        let today_deliveries = self
            .deliveries
            .iter()
            .filter(|d| d.scheduled_date >= day_start && d.scheduled_date < day_end)
            .count();
        let active_clients = self.clients.iter().filter(|c| c.active).count();
        let revenue = money::sum(
            self.orders
                .iter()
                .filter(|o| o.created_at >= month_start)
                .map(|o| o.total_value.as_str()),
        );
        DashboardStats { pending_orders, today_deliveries, active_clients, monthly_revenue: money::format(revenue) }
    }
}
