//! Schema-only mirrors of the request bodies for the generated OpenAPI document.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewClientDoc {
    /// `individual` or `organization`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: String,
    pub trade_name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub active: Option<bool>,
}

/// Every field optional; `null` clears a nullable field.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatchDoc {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub trade_name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub notes: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct NewSupplierDoc {
    pub name: String,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct SupplierPatchDoc {
    pub name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct NewProductDoc {
    pub name: String,
    /// e.g. `m³`, `t`
    pub unit: String,
    pub description: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderDoc {
    pub client_id: String,
    pub supplier_id: String,
    /// `pending` (default), `confirmed`, `delivered` or `cancelled`
    pub status: Option<String>,
    /// Decimal string, stored as given.
    #[schema(example = "8250.00")]
    pub total_value: String,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItemDoc {
    pub product_id: String,
    #[schema(example = "30")]
    pub quantity: String,
    #[schema(example = "150.00")]
    pub unit_price: String,
    /// Defaults to quantity × unit price rounded to cents.
    pub total_price: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CreateOrderDoc {
    pub order: NewOrderDoc,
    pub items: Vec<NewOrderItemDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatchDoc {
    pub client_id: Option<String>,
    pub supplier_id: Option<String>,
    pub status: Option<String>,
    pub total_value: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDeliveryDoc {
    pub order_id: String,
    /// RFC 3339 timestamp
    #[schema(example = "2026-07-15T09:00:00-03:00")]
    pub scheduled_date: String,
    /// `pending` (default), `in_transit`, `delivered` or `cancelled`
    pub status: Option<String>,
    pub address: Option<String>,
    pub driver_name: Option<String>,
    pub vehicle_plate: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPatchDoc {
    pub scheduled_date: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub driver_name: Option<String>,
    pub vehicle_plate: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoiceDoc {
    pub order_id: String,
    pub number: String,
    pub series: Option<String>,
    #[schema(example = "2026-07-15")]
    pub issue_date: String,
    pub value: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatchDoc {
    pub number: Option<String>,
    pub series: Option<String>,
    pub issue_date: Option<String>,
    pub value: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDoc {
    pub pending_orders: u64,
    pub today_deliveries: u64,
    pub active_clients: u64,
    #[schema(example = "8250.00")]
    pub monthly_revenue: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::clients::list,
        crate::routes::clients::create,
        crate::routes::clients::get,
        crate::routes::clients::update,
        crate::routes::clients::delete,
        crate::routes::suppliers::list,
        crate::routes::suppliers::create,
        crate::routes::suppliers::get,
        crate::routes::suppliers::update,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::orders::list,
        crate::routes::orders::recent,
        crate::routes::orders::create,
        crate::routes::orders::get,
        crate::routes::orders::update,
        crate::routes::orders::delete,
        crate::routes::orders::items,
        crate::routes::orders::invoices,
        crate::routes::deliveries::list,
        crate::routes::deliveries::today,
        crate::routes::deliveries::create,
        crate::routes::deliveries::get,
        crate::routes::deliveries::update,
        crate::routes::invoices::list,
        crate::routes::invoices::create,
        crate::routes::invoices::get,
        crate::routes::invoices::update,
        crate::routes::dashboard::stats,
    ),
    components(
        schemas(
            HealthResponse,
            NewClientDoc,
            ClientPatchDoc,
            NewSupplierDoc,
            SupplierPatchDoc,
            NewProductDoc,
            ProductPatchDoc,
            NewOrderDoc,
            NewOrderItemDoc,
            CreateOrderDoc,
            OrderPatchDoc,
            NewDeliveryDoc,
            DeliveryPatchDoc,
            NewInvoiceDoc,
            InvoicePatchDoc,
            DashboardStatsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "clients"),
        (name = "suppliers"),
        (name = "products"),
        (name = "orders"),
        (name = "deliveries"),
        (name = "invoices"),
        (name = "dashboard")
    )
)]
pub struct ApiDoc;
