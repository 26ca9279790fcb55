use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use models::{
    ClientPatch, CreateOrder, DeliveryPatch, DeliveryStatus, NewClient, NewDelivery, NewInvoice, NewOrder,
    NewOrderItem, NewProduct, NewSupplier, OrderPatch, OrderStatus, ORDER_NUMBER_SEED,
};

use super::{MemStorage, Storage};
use crate::clock::{FixedClock, SystemClock};
use crate::errors::ServiceError;

struct Fixture {
    client_id: String,
    supplier_id: String,
    gravel_id: String,
    stone_id: String,
}

async fn fixture(store: &MemStorage) -> anyhow::Result<Fixture> {
    let client = store.create_client(NewClient { name: "Horizon Builders".into(), ..Default::default() }).await?;
    let supplier = store.create_supplier(NewSupplier { name: "Ridge Quarry".into(), ..Default::default() }).await?;
    let gravel = store
        .create_product(NewProduct { name: "Gravel #1".into(), unit: "t".into(), ..Default::default() })
        .await?;
    let stone = store
        .create_product(NewProduct { name: "Crushed stone".into(), unit: "t".into(), ..Default::default() })
        .await?;
    Ok(Fixture { client_id: client.id, supplier_id: supplier.id, gravel_id: gravel.id, stone_id: stone.id })
}

fn order_input(f: &Fixture, total: &str, items: Vec<NewOrderItem>) -> CreateOrder {
    CreateOrder {
        order: NewOrder {
            client_id: f.client_id.clone(),
            supplier_id: f.supplier_id.clone(),
            status: None,
            total_value: total.into(),
            notes: None,
        },
        items,
    }
}

fn item(product_id: &str, quantity: &str, unit_price: &str) -> NewOrderItem {
    NewOrderItem {
        product_id: product_id.into(),
        quantity: quantity.into(),
        unit_price: unit_price.into(),
        total_price: None,
    }
}

fn delivery_at(order_id: &str, at: DateTime<Utc>) -> NewDelivery {
    NewDelivery {
        order_id: order_id.into(),
        scheduled_date: at,
        status: None,
        address: None,
        driver_name: None,
        vehicle_plate: None,
        notes: None,
    }
}

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Local.with_ymd_and_hms(y, m, d, h, min, 0).earliest().unwrap().with_timezone(&Utc)
}

fn system_store() -> MemStorage {
    MemStorage::new(Arc::new(SystemClock))
}

#[tokio::test]
async fn created_ids_are_unique_and_non_empty() -> anyhow::Result<()> {
    let store = system_store();
    let mut ids = HashSet::new();
    for i in 0..50 {
        let c = store.create_client(NewClient { name: format!("client {i}"), ..Default::default() }).await?;
        assert!(!c.id.is_empty());
        assert!(ids.insert(c.id));
    }
    assert_eq!(store.list_clients().await?.len(), 50);
    Ok(())
}

#[tokio::test]
async fn client_round_trip_applies_defaults() -> anyhow::Result<()> {
    let store = system_store();
    let input = NewClient {
        name: "Joana Silva".into(),
        document: Some("123.456.789-00".into()),
        city: Some("Jundiai".into()),
        ..Default::default()
    };
    let created = store.create_client(input.clone()).await?;
    let found = store.get_client(&created.id).await?.expect("client stored");
    assert_eq!(found, created);
    assert_eq!(found.name, input.name);
    assert_eq!(found.document, input.document);
    assert_eq!(found.city, input.city);
    assert!(found.active);
    Ok(())
}

#[tokio::test]
async fn missing_ids_are_not_errors() -> anyhow::Result<()> {
    let store = system_store();
    assert!(store.get_client("nope").await?.is_none());
    assert!(store.get_order("nope").await?.is_none());
    assert!(store.order_with_details("nope").await?.is_none());
    assert!(store.update_client("nope", ClientPatch::default()).await?.is_none());
    assert!(store.update_delivery("nope", DeliveryPatch::default()).await?.is_none());
    assert!(!store.delete_client("nope").await?);
    assert!(!store.delete_order("nope").await?);
    Ok(())
}

#[tokio::test]
async fn order_keeps_caller_total_and_item_totals() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let order = store
        .create_order(order_input(&f, "8250.00", vec![item(&f.gravel_id, "30", "150.00"), item(&f.stone_id, "15", "250.00")]))
        .await?;
    assert_eq!(order.status, OrderStatus::Pending);

    let detail = store.order_with_details(&order.id).await?.expect("order detail");
    assert_eq!(detail.order.total_value, "8250.00");
    let totals: Vec<_> = detail.items.iter().map(|i| i.item.total_price.as_str()).collect();
    assert_eq!(totals, ["4500.00", "3750.00"]);
    assert_eq!(detail.items[0].product.name, "Gravel #1");
    assert_eq!(detail.client.id, f.client_id);
    assert_eq!(detail.supplier.id, f.supplier_id);

    // storage never recomputes the order total
    let odd = store.create_order(order_input(&f, "1.00", vec![item(&f.gravel_id, "30", "150.00")])).await?;
    assert_eq!(store.get_order(&odd.id).await?.unwrap().total_value, "1.00");
    Ok(())
}

#[tokio::test]
async fn order_numbers_increase_and_are_not_reused() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let a = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
    let b = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
    assert_eq!(a.order_number, ORDER_NUMBER_SEED + 1);
    assert_eq!(b.order_number, a.order_number + 1);

    assert!(store.delete_order(&b.id).await?);
    let c = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
    assert_eq!(c.order_number, b.order_number + 1);
    Ok(())
}

#[tokio::test]
async fn unknown_references_are_rejected() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let mut input = order_input(&f, "10", vec![item("ghost", "1", "10")]);
    input.order.client_id = "ghost".into();
    let err = store.create_order(input).await.unwrap_err();
    let ServiceError::Model(model) = err else { panic!("expected validation error") };
    let fields: Vec<_> = model.fields().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["order.clientId", "items[0].productId"]);
    assert!(store.orders_with_details().await?.is_empty());

    let err = store.create_delivery(delivery_at("ghost", Utc::now())).await.unwrap_err();
    assert!(matches!(err, ServiceError::Model(_)));
    Ok(())
}

#[tokio::test]
async fn oversized_orders_are_rejected_before_anything_is_stored() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let huge_total = order_input(&f, "70000000000000000000000000000", vec![item(&f.gravel_id, "1", "10")]);
    let err = store.create_order(huge_total).await.unwrap_err();
    let ServiceError::Model(model) = err else { panic!("expected validation error") };
    assert_eq!(model.fields()[0].field, "order.totalValue");

    let huge_quantity = order_input(&f, "10", vec![item(&f.gravel_id, "100000000000000000000", "100000000000000000000")]);
    let err = store.create_order(huge_quantity).await.unwrap_err();
    let ServiceError::Model(model) = err else { panic!("expected validation error") };
    let fields: Vec<_> = model.fields().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["items[0].quantity", "items[0].unitPrice"]);

    assert!(store.orders_with_details().await?.is_empty());
    store.dashboard_stats().await?;
    let ok = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
    assert_eq!(ok.order_number, ORDER_NUMBER_SEED + 1);
    Ok(())
}

#[tokio::test]
async fn order_children_distinguish_missing_orders() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    assert!(store.items_of_order("ghost").await?.is_none());
    assert!(store.invoices_of_order("ghost").await?.is_none());

    let order = store.create_order(order_input(&f, "30", vec![item(&f.gravel_id, "2", "10"), item(&f.stone_id, "1", "10")])).await?;
    let items = store.items_of_order(&order.id).await?.expect("order exists");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.order_id == order.id));
    assert_eq!(store.invoices_of_order(&order.id).await?, Some(vec![]));

    assert!(store.delete_order(&order.id).await?);
    assert!(store.items_of_order(&order.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn deleting_an_order_cascades() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let order = store.create_order(order_input(&f, "20", vec![item(&f.gravel_id, "2", "10")])).await?;
    let keep = store.create_order(order_input(&f, "10", vec![item(&f.stone_id, "1", "10")])).await?;
    store.create_delivery(delivery_at(&order.id, Utc::now())).await?;
    store.create_delivery(delivery_at(&keep.id, Utc::now())).await?;
    store
        .create_invoice(NewInvoice {
            order_id: order.id.clone(),
            number: "42".into(),
            series: None,
            issue_date: Utc::now().date_naive(),
            value: "20".into(),
        })
        .await?;

    assert!(store.delete_order(&order.id).await?);
    assert!(store.get_order(&order.id).await?.is_none());
    assert!(store.order_items(&order.id).await?.is_empty());
    assert!(store.invoices_by_order(&order.id).await?.is_empty());
    assert!(store.deliveries_by_order(&order.id).await?.is_empty());
    assert!(store.deliveries_with_details().await?.iter().all(|d| d.delivery.order_id != order.id));

    // siblings untouched
    assert_eq!(store.order_items(&keep.id).await?.len(), 1);
    assert_eq!(store.deliveries_by_order(&keep.id).await?.len(), 1);

    assert!(!store.delete_order(&order.id).await?);
    Ok(())
}

#[tokio::test]
async fn delivered_at_is_stamped_once() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let order = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
    let d = store.create_delivery(delivery_at(&order.id, Utc::now())).await?;
    assert_eq!(d.status, DeliveryStatus::Pending);
    assert!(d.delivered_at.is_none());

    let in_transit = DeliveryPatch { status: Some(DeliveryStatus::InTransit), ..Default::default() };
    let moved = store.update_delivery(&d.id, in_transit).await?.unwrap();
    assert!(moved.delivery.delivered_at.is_none());
    assert!(!moved.completed);

    let before = Utc::now();
    let delivered = DeliveryPatch { status: Some(DeliveryStatus::Delivered), ..Default::default() };
    let first = store.update_delivery(&d.id, delivered.clone()).await?.unwrap();
    assert!(first.completed);
    let stamp = first.delivery.delivered_at.expect("stamped");
    assert!(stamp >= before);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = store.update_delivery(&d.id, delivered).await?.unwrap();
    assert!(!second.completed);
    assert_eq!(second.delivery.delivered_at, Some(stamp));

    let renamed = DeliveryPatch { driver_name: Some(Some("Carlos".into())), ..Default::default() };
    let third = store.update_delivery(&d.id, renamed).await?.unwrap();
    assert!(!third.completed);
    let third = third.delivery;
    assert_eq!(third.delivered_at, Some(stamp));
    assert_eq!(third.driver_name.as_deref(), Some("Carlos"));
    Ok(())
}

#[tokio::test]
async fn pending_orders_are_counted() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let mut ids = Vec::new();
    for _ in 0..4 {
        let o = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
        ids.push(o.id);
    }
    store
        .update_order(&ids[0], OrderPatch { status: Some(OrderStatus::Confirmed), ..Default::default() })
        .await?;
    store
        .update_order(&ids[1], OrderPatch { status: Some(OrderStatus::Cancelled), ..Default::default() })
        .await?;

    let stats = store.dashboard_stats().await?;
    assert_eq!(stats.pending_orders, 2);
    // reads in between do not change the answer
    store.orders_with_details().await?;
    assert_eq!(store.dashboard_stats().await?.pending_orders, 2);
    Ok(())
}

#[tokio::test]
async fn recent_orders_is_a_prefix_of_the_full_list() -> anyhow::Result<()> {
    let clock = Arc::new(FixedClock::new(Utc::now()));
    let store = MemStorage::new(clock.clone());
    let f = fixture(&store).await?;
    for i in 0..6 {
        clock.advance(Duration::minutes(1));
        store.create_order(order_input(&f, &format!("{i}0"), vec![item(&f.gravel_id, "1", "10")])).await?;
    }

    let all = store.orders_with_details().await?;
    assert_eq!(all.len(), 6);
    assert!(all.windows(2).all(|w| w[0].order.created_at >= w[1].order.created_at));

    let recent = store.recent_orders(3).await?;
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[..], all[..3]);
    assert_eq!(recent[0].order.total_value, "50");

    assert_eq!(store.recent_orders(100).await?.len(), 6);
    assert!(store.recent_orders(0).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn today_deliveries_use_local_day_bounds() -> anyhow::Result<()> {
    let noon = local(2026, 7, 15, 12, 0);
    let clock = Arc::new(FixedClock::new(noon));
    let store = MemStorage::new(clock.clone());
    let f = fixture(&store).await?;
    let order = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;

    let yesterday_late = store.create_delivery(delivery_at(&order.id, local(2026, 7, 14, 23, 59))).await?;
    let midnight = store.create_delivery(delivery_at(&order.id, local(2026, 7, 15, 0, 0))).await?;
    let afternoon = store.create_delivery(delivery_at(&order.id, local(2026, 7, 15, 16, 30))).await?;
    let late = store.create_delivery(delivery_at(&order.id, local(2026, 7, 15, 23, 59))).await?;
    let tomorrow = store.create_delivery(delivery_at(&order.id, local(2026, 7, 16, 0, 0))).await?;

    let today = store.today_deliveries().await?;
    let ids: Vec<_> = today.iter().map(|d| d.delivery.id.as_str()).collect();
    assert_eq!(ids, [late.id.as_str(), afternoon.id.as_str(), midnight.id.as_str()]);
    assert!(!ids.contains(&yesterday_late.id.as_str()));
    assert!(!ids.contains(&tomorrow.id.as_str()));
    assert_eq!(today[0].order.client.id, f.client_id);

    assert_eq!(store.dashboard_stats().await?.today_deliveries, 3);

    // the window moves with the clock
    clock.set(local(2026, 7, 16, 12, 0));
    let next_day = store.today_deliveries().await?;
    assert_eq!(next_day.len(), 1);
    assert_eq!(next_day[0].delivery.id, tomorrow.id);
    Ok(())
}

#[tokio::test]
async fn monthly_revenue_counts_orders_since_first_of_month() -> anyhow::Result<()> {
    let clock = Arc::new(FixedClock::new(local(2026, 6, 28, 10, 0)));
    let store = MemStorage::new(clock.clone());
    let f = fixture(&store).await?;
    store.create_order(order_input(&f, "999.99", vec![item(&f.gravel_id, "1", "10")])).await?;

    clock.set(local(2026, 7, 1, 0, 0));
    store.create_order(order_input(&f, "8250.00", vec![item(&f.gravel_id, "1", "10")])).await?;
    clock.set(local(2026, 7, 10, 9, 0));
    store.create_order(order_input(&f, "", vec![item(&f.gravel_id, "1", "10")])).await?;
    store.create_order(order_input(&f, "1749.5", vec![item(&f.gravel_id, "1", "10")])).await?;

    clock.set(local(2026, 7, 20, 12, 0));
    let stats = store.dashboard_stats().await?;
    assert_eq!(stats.monthly_revenue, "9999.50");
    assert_eq!(stats.pending_orders, 4);
    assert_eq!(stats.active_clients, 1);
    Ok(())
}

#[tokio::test]
async fn active_clients_follow_updates_and_deletes() -> anyhow::Result<()> {
    let store = system_store();
    let a = store.create_client(NewClient { name: "A".into(), ..Default::default() }).await?;
    let b = store.create_client(NewClient { name: "B".into(), ..Default::default() }).await?;
    store.create_client(NewClient { name: "C".into(), active: Some(false), ..Default::default() }).await?;
    assert_eq!(store.dashboard_stats().await?.active_clients, 2);

    let patch = ClientPatch { active: Some(false), ..Default::default() };
    let updated = store.update_client(&a.id, patch).await?.unwrap();
    assert!(!updated.active);
    assert_eq!(updated.name, "A");
    assert!(store.delete_client(&b.id).await?);
    assert_eq!(store.dashboard_stats().await?.active_clients, 0);
    Ok(())
}

#[tokio::test]
async fn dangling_client_drops_order_views() -> anyhow::Result<()> {
    let store = system_store();
    let f = fixture(&store).await?;
    let order = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;
    store.create_delivery(delivery_at(&order.id, Utc::now())).await?;

    assert!(store.delete_client(&f.client_id).await?);
    assert!(store.get_order(&order.id).await?.is_some());
    assert!(store.order_with_details(&order.id).await?.is_none());
    assert!(store.orders_with_details().await?.is_empty());
    assert!(store.deliveries_with_details().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn order_update_rejects_unknown_parties() -> anyhow::Result<()> {
    let clock = Arc::new(FixedClock::new(Utc::now()));
    let store = MemStorage::new(clock.clone());
    let f = fixture(&store).await?;
    let order = store.create_order(order_input(&f, "10", vec![item(&f.gravel_id, "1", "10")])).await?;

    let bad = OrderPatch { client_id: Some("ghost".into()), ..Default::default() };
    assert!(matches!(store.update_order(&order.id, bad).await, Err(ServiceError::Model(_))));

    clock.advance(Duration::minutes(3));
    let patch = OrderPatch { notes: Some(Some("call first".into())), ..Default::default() };
    let updated = store.update_order(&order.id, patch).await?.unwrap();
    assert_eq!(updated.notes.as_deref(), Some("call first"));
    assert_eq!(updated.created_at, order.created_at);
    assert_eq!(updated.updated_at, order.created_at + Duration::minutes(3));
    Ok(())
}

#[tokio::test]
async fn sample_storage_has_deliveries_today() -> anyhow::Result<()> {
    let store = MemStorage::with_sample_data(Arc::new(SystemClock))?;
    let stats = store.dashboard_stats().await?;
    assert_eq!(stats.today_deliveries, 2);
    assert_eq!(stats.active_clients, 2);
    assert_eq!(stats.pending_orders, 1);
    assert_eq!(store.today_deliveries().await?.len(), 2);
    Ok(())
}
