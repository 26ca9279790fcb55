use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use models::{
    Client, ClientPatch, CreateOrder, DashboardStats, Delivery, DeliveryPatch, DeliveryWithOrder, Invoice,
    InvoicePatch, NewClient, NewDelivery, NewInvoice, NewProduct, NewSupplier, Order, OrderItem, OrderPatch,
    OrderWithDetails, Product, ProductPatch, Supplier, SupplierPatch,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{seed, tables::Tables, DeliveryUpdate, Storage};
use crate::{calendar, clock::Clock, errors::ServiceError};

/// In-memory storage. State is lost on restart.
///
/// One `RwLock` guards all tables so cascades, joins and aggregates never
/// observe a half-applied mutation.
pub struct MemStorage {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl MemStorage {
    /// Empty storage.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use models::NewClient;
    /// use service::{MemStorage, Storage, SystemClock};
    ///
    /// let store = MemStorage::new(Arc::new(SystemClock));
    /// let input = NewClient { name: "Horizon Builders".into(), ..Default::default() };
    /// let client = tokio_test::block_on(store.create_client(input)).unwrap();
    /// assert!(client.active);
    /// ```
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { tables: RwLock::new(Tables::default()), clock }
    }

    /// Storage pre-loaded with the fixed sample rows, dated relative to `clock`.
    pub fn with_sample_data(clock: Arc<dyn Clock>) -> Result<Self, ServiceError> {
        let mut tables = Tables::default();
        seed::load(&mut tables, clock.now())?;
        info!(
            clients = tables.clients.len(),
            suppliers = tables.suppliers.len(),
            products = tables.products.len(),
            orders = tables.orders.len(),
            deliveries = tables.deliveries.len(),
            invoices = tables.invoices.len(),
            "sample data loaded"
        );
        Ok(Self { tables: RwLock::new(tables), clock })
    }

    fn today(&self) -> (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) {
        calendar::day_bounds(&self.clock.now().with_timezone(&Local))
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_client(&self, id: &str) -> Result<Option<Client>, ServiceError> {
        Ok(self.tables.read().await.clients.get(id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        Ok(self.tables.read().await.clients.list())
    }

    async fn create_client(&self, input: NewClient) -> Result<Client, ServiceError> {
        let now = self.clock.now();
        let client = self.tables.write().await.create_client(input, now)?;
        debug!(client_id = %client.id, "client created");
        Ok(client)
    }

    async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Option<Client>, ServiceError> {
        self.tables.write().await.update_client(id, patch)
    }

    async fn delete_client(&self, id: &str) -> Result<bool, ServiceError> {
        let removed = self.tables.write().await.clients.remove(id).is_some();
        if removed {
            debug!(client_id = %id, "client removed");
        }
        Ok(removed)
    }

    async fn get_supplier(&self, id: &str) -> Result<Option<Supplier>, ServiceError> {
        Ok(self.tables.read().await.suppliers.get(id).cloned())
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, ServiceError> {
        Ok(self.tables.read().await.suppliers.list())
    }

    async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier, ServiceError> {
        let now = self.clock.now();
        self.tables.write().await.create_supplier(input, now)
    }

    async fn update_supplier(&self, id: &str, patch: SupplierPatch) -> Result<Option<Supplier>, ServiceError> {
        self.tables.write().await.update_supplier(id, patch)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, ServiceError> {
        Ok(self.tables.read().await.products.get(id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.tables.read().await.products.list())
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let now = self.clock.now();
        self.tables.write().await.create_product(input, now)
    }

    async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, ServiceError> {
        self.tables.write().await.update_product(id, patch)
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>, ServiceError> {
        Ok(self.tables.read().await.orders.get(id).cloned())
    }

    async fn order_with_details(&self, id: &str) -> Result<Option<OrderWithDetails>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(id).and_then(|o| tables.order_details(o)))
    }

    async fn orders_with_details(&self) -> Result<Vec<OrderWithDetails>, ServiceError> {
        Ok(self.tables.read().await.orders_with_details())
    }

    async fn recent_orders(&self, limit: usize) -> Result<Vec<OrderWithDetails>, ServiceError> {
        let mut orders = self.tables.read().await.orders_with_details();
        orders.truncate(limit);
        Ok(orders)
    }

    async fn order_items(&self, order_id: &str) -> Result<Vec<OrderItem>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.order_items.iter().filter(|i| i.order_id == order_id).cloned().collect())
    }

    async fn items_of_order(&self, order_id: &str) -> Result<Option<Vec<OrderItem>>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.children_of(order_id, &tables.order_items, |i| i.order_id == order_id))
    }

    async fn create_order(&self, input: CreateOrder) -> Result<Order, ServiceError> {
        let now = self.clock.now();
        let items = input.items.len();
        let order = self.tables.write().await.create_order(input, now)?;
        debug!(order_id = %order.id, order_number = order.order_number, items, "order created");
        Ok(order)
    }

    async fn update_order(&self, id: &str, patch: OrderPatch) -> Result<Option<Order>, ServiceError> {
        let now = self.clock.now();
        self.tables.write().await.update_order(id, patch, now)
    }

    async fn delete_order(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.tables.write().await.delete_order(id))
    }

    async fn get_delivery(&self, id: &str) -> Result<Option<Delivery>, ServiceError> {
        Ok(self.tables.read().await.deliveries.get(id).cloned())
    }

    async fn delivery_with_details(&self, id: &str) -> Result<Option<DeliveryWithOrder>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.deliveries.get(id).and_then(|d| tables.delivery_details(d)))
    }

    async fn deliveries_with_details(&self) -> Result<Vec<DeliveryWithOrder>, ServiceError> {
        Ok(self.tables.read().await.deliveries_with_details())
    }

    async fn deliveries_by_order(&self, order_id: &str) -> Result<Vec<Delivery>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.deliveries.iter().filter(|d| d.order_id == order_id).cloned().collect())
    }

    async fn today_deliveries(&self) -> Result<Vec<DeliveryWithOrder>, ServiceError> {
        let (start, end) = self.today();
        Ok(self.tables.read().await.deliveries_between(start, end))
    }

    async fn create_delivery(&self, input: NewDelivery) -> Result<Delivery, ServiceError> {
        let now = self.clock.now();
        let delivery = self.tables.write().await.create_delivery(input, now)?;
        debug!(delivery_id = %delivery.id, order_id = %delivery.order_id, "delivery scheduled");
        Ok(delivery)
    }

    async fn update_delivery(&self, id: &str, patch: DeliveryPatch) -> Result<Option<DeliveryUpdate>, ServiceError> {
        let now = self.clock.now();
        self.tables.write().await.update_delivery(id, patch, now)
    }

    async fn get_invoice(&self, id: &str) -> Result<Option<Invoice>, ServiceError> {
        Ok(self.tables.read().await.invoices.get(id).cloned())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, ServiceError> {
        Ok(self.tables.read().await.invoices.list())
    }

    async fn invoices_by_order(&self, order_id: &str) -> Result<Vec<Invoice>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.invoices.iter().filter(|i| i.order_id == order_id).cloned().collect())
    }

    async fn invoices_of_order(&self, order_id: &str) -> Result<Option<Vec<Invoice>>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.children_of(order_id, &tables.invoices, |i| i.order_id == order_id))
    }

    async fn create_invoice(&self, input: NewInvoice) -> Result<Invoice, ServiceError> {
        let now = self.clock.now();
        self.tables.write().await.create_invoice(input, now)
    }

    async fn update_invoice(&self, id: &str, patch: InvoicePatch) -> Result<Option<Invoice>, ServiceError> {
        self.tables.write().await.update_invoice(id, patch)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError> {
        let now = self.clock.now().with_timezone(&Local);
        let day = calendar::day_bounds(&now);
        let month_start = calendar::month_start(&now);
        Ok(self.tables.read().await.dashboard_stats(day, month_start))
    }
}
