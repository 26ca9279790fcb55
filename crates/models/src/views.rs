//! Denormalised read models served to the admin UI.

use serde::Serialize;

use crate::{Client, Delivery, Invoice, Order, OrderItem, Product, Supplier};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemWithProduct {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Product,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub client: Client,
    pub supplier: Supplier,
    pub items: Vec<OrderItemWithProduct>,
    pub deliveries: Vec<Delivery>,
    pub invoices: Vec<Invoice>,
}

/// Order with its two parties, as embedded in a delivery view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithParties {
    #[serde(flatten)]
    pub order: Order,
    pub client: Client,
    pub supplier: Supplier,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryWithOrder {
    #[serde(flatten)]
    pub delivery: Delivery,
    pub order: OrderWithParties,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending_orders: usize,
    pub today_deliveries: usize,
    pub active_clients: usize,
    /// Sum of order totals since the first day of the current month.
    pub monthly_revenue: String,
}
