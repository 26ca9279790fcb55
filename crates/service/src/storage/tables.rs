use chrono::{DateTime, Utc};
use models::errors::{ModelError, Violations};
use models::{
    Client, ClientPatch, CreateOrder, Delivery, DeliveryPatch, Invoice, InvoicePatch, NewClient, NewDelivery,
    NewInvoice, NewProduct, NewSupplier, Order, OrderItem, OrderPatch, Product, ProductPatch, Supplier,
    SupplierPatch, ORDER_NUMBER_SEED,
};
use tracing::debug;
use uuid::Uuid;

use super::table::Table;
use super::DeliveryUpdate;
use crate::errors::ServiceError;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The complete entity set. Always accessed under one lock.
#[derive(Debug)]
pub(crate) struct Tables {
    pub(crate) clients: Table<Client>,
    pub(crate) suppliers: Table<Supplier>,
    pub(crate) products: Table<Product>,
    pub(crate) orders: Table<Order>,
    pub(crate) order_items: Table<OrderItem>,
    pub(crate) deliveries: Table<Delivery>,
    pub(crate) invoices: Table<Invoice>,
    last_order_number: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            clients: Table::default(),
            suppliers: Table::default(),
            products: Table::default(),
            orders: Table::default(),
            order_items: Table::default(),
            deliveries: Table::default(),
            invoices: Table::default(),
            last_order_number: ORDER_NUMBER_SEED,
        }
    }
}

impl Tables {
    pub(crate) fn create_client(&mut self, input: NewClient, now: DateTime<Utc>) -> Result<Client, ServiceError> {
        input.validate()?;
        let client = input.into_client(new_id(), now);
        self.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    pub(crate) fn update_client(&mut self, id: &str, patch: ClientPatch) -> Result<Option<Client>, ServiceError> {
        patch.validate()?;
        let Some(client) = self.clients.get_mut(id) else { return Ok(None) };
        client.apply(patch);
        Ok(Some(client.clone()))
    }

    pub(crate) fn create_supplier(&mut self, input: NewSupplier, now: DateTime<Utc>) -> Result<Supplier, ServiceError> {
        input.validate()?;
        let supplier = input.into_supplier(new_id(), now);
        self.suppliers.insert(supplier.id.clone(), supplier.clone());
        Ok(supplier)
    }

    pub(crate) fn update_supplier(&mut self, id: &str, patch: SupplierPatch) -> Result<Option<Supplier>, ServiceError> {
        patch.validate()?;
        let Some(supplier) = self.suppliers.get_mut(id) else { return Ok(None) };
        supplier.apply(patch);
        Ok(Some(supplier.clone()))
    }

    pub(crate) fn create_product(&mut self, input: NewProduct, now: DateTime<Utc>) -> Result<Product, ServiceError> {
        input.validate()?;
        let product = input.into_product(new_id(), now);
        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    pub(crate) fn update_product(&mut self, id: &str, patch: ProductPatch) -> Result<Option<Product>, ServiceError> {
        patch.validate()?;
        let Some(product) = self.products.get_mut(id) else { return Ok(None) };
        product.apply(patch);
        Ok(Some(product.clone()))
    }

    /// Store an order and its items. The order's `total_value` is kept as supplied.
    pub(crate) fn create_order(&mut self, input: CreateOrder, now: DateTime<Utc>) -> Result<Order, ServiceError> {
        input.validate()?;
        let mut v = Violations::new();
        if !self.clients.contains(&input.order.client_id) {
            v.push("order.clientId", "does not reference an existing client");
        }
        if !self.suppliers.contains(&input.order.supplier_id) {
            v.push("order.supplierId", "does not reference an existing supplier");
        }
        for (i, item) in input.items.iter().enumerate() {
            if !self.products.contains(&item.product_id) {
                v.push(&format!("items[{i}].productId"), "does not reference an existing product");
            }
        }
        v.into_result()?;

        self.last_order_number += 1;
        let order = input.order.into_order(new_id(), self.last_order_number, now);
        for item in input.items {
            let item = item.into_item(new_id(), &order.id);
            self.order_items.insert(item.id.clone(), item);
        }
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    pub(crate) fn update_order(
        &mut self,
        id: &str,
        patch: OrderPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>, ServiceError> {
        patch.validate()?;
        if !self.orders.contains(id) {
            return Ok(None);
        }
        let mut v = Violations::new();
        if let Some(client_id) = &patch.client_id {
            if !self.clients.contains(client_id) {
                v.push("clientId", "does not reference an existing client");
            }
        }
        if let Some(supplier_id) = &patch.supplier_id {
            if !self.suppliers.contains(supplier_id) {
                v.push("supplierId", "does not reference an existing supplier");
            }
        }
        v.into_result()?;

        let Some(order) = self.orders.get_mut(id) else { return Ok(None) };
        order.apply(patch, now);
        Ok(Some(order.clone()))
    }

    pub(crate) fn delete_order(&mut self, id: &str) -> bool {
        if !self.orders.contains(id) {
            return false;
        }
        let items = self.order_items.remove_where(|i| i.order_id == id);
        let deliveries = self.deliveries.remove_where(|d| d.order_id == id);
        let invoices = self.invoices.remove_where(|i| i.order_id == id);
        self.orders.remove(id);
        debug!(order_id = %id, items, deliveries, invoices, "order removed with children");
        true
    }

    pub(crate) fn create_delivery(&mut self, input: NewDelivery, now: DateTime<Utc>) -> Result<Delivery, ServiceError> {
        input.validate()?;
        if !self.orders.contains(&input.order_id) {
            return Err(ModelError::field("orderId", "does not reference an existing order").into());
        }
        let delivery = input.into_delivery(new_id(), now);
        self.deliveries.insert(delivery.id.clone(), delivery.clone());
        Ok(delivery)
    }

    pub(crate) fn update_delivery(
        &mut self,
        id: &str,
        patch: DeliveryPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<DeliveryUpdate>, ServiceError> {
        patch.validate()?;
        let Some(delivery) = self.deliveries.get_mut(id) else { return Ok(None) };
        let completed = delivery.apply(patch, now);
        if completed {
            debug!(delivery_id = %id, "delivery completed");
        }
        Ok(Some(DeliveryUpdate { delivery: delivery.clone(), completed }))
    }

    /// Children of an existing order, or `None` when the order is unknown.
    pub(crate) fn children_of<T: Clone>(
        &self,
        order_id: &str,
        table: &Table<T>,
        belongs: impl Fn(&T) -> bool,
    ) -> Option<Vec<T>> {
        if !self.orders.contains(order_id) {
            return None;
        }
        Some(table.iter().filter(|row| belongs(row)).cloned().collect())
    }

    pub(crate) fn create_invoice(&mut self, input: NewInvoice, now: DateTime<Utc>) -> Result<Invoice, ServiceError> {
        input.validate()?;
        if !self.orders.contains(&input.order_id) {
            return Err(ModelError::field("orderId", "does not reference an existing order").into());
        }
        let invoice = input.into_invoice(new_id(), now);
        self.invoices.insert(invoice.id.clone(), invoice.clone());
        Ok(invoice)
    }

    pub(crate) fn update_invoice(&mut self, id: &str, patch: InvoicePatch) -> Result<Option<Invoice>, ServiceError> {
        patch.validate()?;
        let Some(invoice) = self.invoices.get_mut(id) else { return Ok(None) };
        invoice.apply(patch);
        Ok(Some(invoice.clone()))
    }
}
