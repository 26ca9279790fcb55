use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Violations};
use crate::money;
use crate::patch::{deserialize_some, merge, set};

/// Display numbers are assigned above this value.
pub const ORDER_NUMBER_SEED: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

/// Purchase order placed by a client with one supplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: i64,
    pub client_id: String,
    pub supplier_id: String,
    pub status: OrderStatus,
    /// Caller-computed sum of item totals; stored as given.
    pub total_value: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub total_price: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub client_id: String,
    pub supplier_id: String,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub total_value: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: String,
    pub unit_price: String,
    /// Computed from quantity and unit price when omitted.
    #[serde(default)]
    pub total_price: Option<String>,
}

/// Order creation payload: the order and its line items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub order: NewOrder,
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
}

impl CreateOrder {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required("order.clientId", &self.order.client_id);
        v.required("order.supplierId", &self.order.supplier_id);
        money::check_amount(&mut v, "order.totalValue", &self.order.total_value);
        if self.items.is_empty() {
            v.push("items", "at least one item is required");
        }
        for (i, item) in self.items.iter().enumerate() {
            v.required(&format!("items[{i}].productId"), &item.product_id);
            money::check_quantity(&mut v, &format!("items[{i}].quantity"), &item.quantity);
            money::check_amount(&mut v, &format!("items[{i}].unitPrice"), &item.unit_price);
            if let Some(total) = &item.total_price {
                money::check_amount(&mut v, &format!("items[{i}].totalPrice"), total);
            }
        }
        v.into_result()
    }
}

impl NewOrder {
    pub fn into_order(self, id: String, order_number: i64, now: DateTime<Utc>) -> Order {
        Order {
            id,
            order_number,
            client_id: self.client_id,
            supplier_id: self.supplier_id,
            status: self.status.unwrap_or_default(),
            total_value: self.total_value,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl NewOrderItem {
    pub fn into_item(self, id: String, order_id: &str) -> OrderItem {
        let total_price = match self.total_price {
            Some(total) => total,
            None => money::line_total(&self.quantity, &self.unit_price),
        };
        OrderItem {
            id,
            order_id: order_id.to_string(),
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub total_value: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

impl OrderPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required_opt("clientId", self.client_id.as_deref());
        v.required_opt("supplierId", self.supplier_id.as_deref());
        if let Some(total) = &self.total_value {
            money::check_amount(&mut v, "totalValue", total);
        }
        v.into_result()
    }
}

impl Order {
    pub fn apply(&mut self, patch: OrderPatch, now: DateTime<Utc>) {
        set(&mut self.client_id, patch.client_id);
        set(&mut self.supplier_id, patch.supplier_id);
        set(&mut self.status, patch.status);
        set(&mut self.total_value, patch.total_value);
        merge(&mut self.notes, patch.notes);
        self.updated_at = now;
    }
}
