//! Storage contract and its in-memory implementation.
//!
//! Every operation sees one consistent snapshot of all tables: a persistent
//! backend would implement `Storage` with the same join and cascade semantics.

mod details;
mod memory;
mod seed;
mod table;
mod tables;

use async_trait::async_trait;
use models::{
    Client, ClientPatch, CreateOrder, DashboardStats, Delivery, DeliveryPatch, DeliveryWithOrder, Invoice,
    InvoicePatch, NewClient, NewDelivery, NewInvoice, NewProduct, NewSupplier, Order, OrderItem, OrderPatch,
    OrderWithDetails, Product, ProductPatch, Supplier, SupplierPatch,
};

use crate::errors::ServiceError;

pub use memory::MemStorage;
pub use table::Table;

/// Outcome of a delivery update.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryUpdate {
    pub delivery: Delivery,
    /// This update moved the delivery to `delivered` and stamped `delivered_at`.
    pub completed: bool,
}

/// Operations over the full entity set.
///
/// Lookups of a missing id yield `Ok(None)`; updates of a missing id yield
/// `Ok(None)`; deletes report whether a row was removed. Errors are reserved
/// for invalid input and backend failures.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_client(&self, id: &str) -> Result<Option<Client>, ServiceError>;
    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError>;
    async fn create_client(&self, input: NewClient) -> Result<Client, ServiceError>;
    async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Option<Client>, ServiceError>;
    async fn delete_client(&self, id: &str) -> Result<bool, ServiceError>;

    async fn get_supplier(&self, id: &str) -> Result<Option<Supplier>, ServiceError>;
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, ServiceError>;
    async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier, ServiceError>;
    async fn update_supplier(&self, id: &str, patch: SupplierPatch) -> Result<Option<Supplier>, ServiceError>;

    async fn get_product(&self, id: &str) -> Result<Option<Product>, ServiceError>;
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn create_product(&self, input: NewProduct) -> Result<Product, ServiceError>;
    async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, ServiceError>;

    async fn get_order(&self, id: &str) -> Result<Option<Order>, ServiceError>;
    async fn order_with_details(&self, id: &str) -> Result<Option<OrderWithDetails>, ServiceError>;
    /// Newest first.
    async fn orders_with_details(&self) -> Result<Vec<OrderWithDetails>, ServiceError>;
    /// The first `limit` entries of `orders_with_details`.
    async fn recent_orders(&self, limit: usize) -> Result<Vec<OrderWithDetails>, ServiceError>;
    async fn order_items(&self, order_id: &str) -> Result<Vec<OrderItem>, ServiceError>;
    /// Items of an existing order; `None` when the order is unknown.
    async fn items_of_order(&self, order_id: &str) -> Result<Option<Vec<OrderItem>>, ServiceError>;
    async fn create_order(&self, input: CreateOrder) -> Result<Order, ServiceError>;
    async fn update_order(&self, id: &str, patch: OrderPatch) -> Result<Option<Order>, ServiceError>;
    /// Removes the order's items, deliveries and invoices before the order itself.
    async fn delete_order(&self, id: &str) -> Result<bool, ServiceError>;

    async fn get_delivery(&self, id: &str) -> Result<Option<Delivery>, ServiceError>;
    async fn delivery_with_details(&self, id: &str) -> Result<Option<DeliveryWithOrder>, ServiceError>;
    /// Latest scheduled first.
    async fn deliveries_with_details(&self) -> Result<Vec<DeliveryWithOrder>, ServiceError>;
    async fn deliveries_by_order(&self, order_id: &str) -> Result<Vec<Delivery>, ServiceError>;
    /// Deliveries scheduled within the current local calendar day.
    async fn today_deliveries(&self) -> Result<Vec<DeliveryWithOrder>, ServiceError>;
    async fn create_delivery(&self, input: NewDelivery) -> Result<Delivery, ServiceError>;
    async fn update_delivery(&self, id: &str, patch: DeliveryPatch) -> Result<Option<DeliveryUpdate>, ServiceError>;

    async fn get_invoice(&self, id: &str) -> Result<Option<Invoice>, ServiceError>;
    async fn list_invoices(&self) -> Result<Vec<Invoice>, ServiceError>;
    async fn invoices_by_order(&self, order_id: &str) -> Result<Vec<Invoice>, ServiceError>;
    /// Invoices of an existing order; `None` when the order is unknown.
    async fn invoices_of_order(&self, order_id: &str) -> Result<Option<Vec<Invoice>>, ServiceError>;
    async fn create_invoice(&self, input: NewInvoice) -> Result<Invoice, ServiceError>;
    async fn update_invoice(&self, id: &str, patch: InvoicePatch) -> Result<Option<Invoice>, ServiceError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError>;
}

#[cfg(test)]
mod tests;
