//! Entity records, insert and patch shapes for the admin backend.
//!
//! Records carry server-assigned fields (`id`, timestamps). `New*` types are the
//! insertable shapes accepted on create; `*Patch` types are partial updates where
//! nullable fields use `Option<Option<T>>` to tell "absent" from `null`.

pub mod errors;
pub mod money;
pub mod patch;
pub mod client;
pub mod supplier;
pub mod product;
pub mod order;
pub mod delivery;
pub mod invoice;
pub mod views;

pub use client::{Client, ClientPatch, ClientType, NewClient};
pub use delivery::{Delivery, DeliveryPatch, DeliveryStatus, NewDelivery};
pub use invoice::{Invoice, InvoicePatch, NewInvoice};
pub use order::{CreateOrder, NewOrder, NewOrderItem, Order, OrderItem, OrderPatch, OrderStatus, ORDER_NUMBER_SEED};
pub use product::{NewProduct, Product, ProductPatch};
pub use supplier::{NewSupplier, Supplier, SupplierPatch};
pub use views::{DashboardStats, DeliveryWithOrder, OrderItemWithProduct, OrderWithDetails, OrderWithParties};
