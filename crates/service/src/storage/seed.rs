//! Fixed sample rows loaded at startup, dated relative to the current time so
//! the dashboard always has something scheduled today.

use chrono::{DateTime, Duration, Local, Utc};
use models::{
    ClientType, CreateOrder, DeliveryPatch, DeliveryStatus, NewClient, NewDelivery, NewInvoice, NewOrder,
    NewOrderItem, NewProduct, NewSupplier, OrderStatus,
};

use super::tables::Tables;
use crate::{calendar, errors::ServiceError};

fn item(product_id: &str, quantity: &str, unit_price: &str) -> NewOrderItem {
    NewOrderItem {
        product_id: product_id.to_string(),
        quantity: quantity.to_string(),
        unit_price: unit_price.to_string(),
        total_price: None,
    }
}

fn delivery(order_id: &str, at: DateTime<Utc>, driver: &str, plate: &str, address: &str) -> NewDelivery {
    NewDelivery {
        order_id: order_id.to_string(),
        scheduled_date: at,
        status: None,
        address: Some(address.to_string()),
        driver_name: Some(driver.to_string()),
        vehicle_plate: Some(plate.to_string()),
        notes: None,
    }
}

pub(crate) fn load(t: &mut Tables, now: DateTime<Utc>) -> Result<(), ServiceError> {
    let (today, _) = calendar::day_bounds(&now.with_timezone(&Local));

    let horizon = t.create_client(
        NewClient {
            kind: ClientType::Organization,
            name: "Horizon Builders Ltd".into(),
            trade_name: Some("Horizon".into()),
            document: Some("12.345.678/0001-90".into()),
            phone: Some("(11) 3456-7890".into()),
            email: Some("purchasing@horizonbuilders.com".into()),
            street: Some("Industrial Avenue".into()),
            number: Some("1500".into()),
            district: Some("Industrial District".into()),
            city: Some("Campinas".into()),
            state: Some("SP".into()),
            zip_code: Some("13050-000".into()),
            ..Default::default()
        },
        now - Duration::days(90),
    )?;
    let silva = t.create_client(
        NewClient {
            kind: ClientType::Individual,
            name: "Joana Silva".into(),
            document: Some("123.456.789-00".into()),
            phone: Some("(11) 98765-4321".into()),
            street: Some("Rua das Flores".into()),
            number: Some("42".into()),
            city: Some("Jundiai".into()),
            state: Some("SP".into()),
            ..Default::default()
        },
        now - Duration::days(60),
    )?;
    t.create_client(
        NewClient {
            kind: ClientType::Organization,
            name: "Old Town Paving".into(),
            city: Some("Sorocaba".into()),
            state: Some("SP".into()),
            notes: Some("Account closed".into()),
            active: Some(false),
            ..Default::default()
        },
        now - Duration::days(300),
    )?;

    let quarry = t.create_supplier(
        NewSupplier {
            name: "Ridge Quarry".into(),
            document: Some("98.765.432/0001-10".into()),
            phone: Some("(11) 4002-8922".into()),
            email: Some("sales@ridgequarry.com".into()),
            active: None,
        },
        now - Duration::days(120),
    )?;
    let sandpit = t.create_supplier(
        NewSupplier { name: "Riverbend Sand Co.".into(), phone: Some("(19) 3232-1010".into()), ..Default::default() },
        now - Duration::days(120),
    )?;

    let washed_sand = t.create_product(
        NewProduct { name: "Washed sand".into(), unit: "m³".into(), description: Some("Medium grain".into()), active: None },
        now - Duration::days(120),
    )?;
    let gravel = t.create_product(
        NewProduct { name: "Gravel #1".into(), unit: "t".into(), description: Some("9.5 to 19 mm".into()), active: None },
        now - Duration::days(120),
    )?;
    let crushed = t.create_product(
        NewProduct { name: "Crushed stone".into(), unit: "t".into(), description: None, active: None },
        now - Duration::days(120),
    )?;
    t.create_product(
        NewProduct { name: "Stone dust".into(), unit: "m³".into(), description: None, active: Some(false) },
        now - Duration::days(120),
    )?;

    let first = t.create_order(
        CreateOrder {
            order: NewOrder {
                client_id: horizon.id.clone(),
                supplier_id: quarry.id.clone(),
                status: Some(OrderStatus::Confirmed),
                total_value: "8250.00".into(),
                notes: Some("Deliver in two loads".into()),
            },
            items: vec![item(&gravel.id, "30", "150.00"), item(&crushed.id, "15", "250.00")],
        },
        now - Duration::days(3),
    )?;
    let second = t.create_order(
        CreateOrder {
            order: NewOrder {
                client_id: silva.id.clone(),
                supplier_id: sandpit.id.clone(),
                status: None,
                total_value: "1200.00".into(),
                notes: None,
            },
            items: vec![item(&washed_sand.id, "12", "100.00")],
        },
        now - Duration::hours(5),
    )?;
    let delivered = t.create_order(
        CreateOrder {
            order: NewOrder {
                client_id: horizon.id.clone(),
                supplier_id: sandpit.id.clone(),
                status: Some(OrderStatus::Delivered),
                total_value: "2000.00".into(),
                notes: None,
            },
            items: vec![item(&washed_sand.id, "20", "100.00")],
        },
        now - Duration::days(10),
    )?;

    t.create_delivery(
        delivery(&first.id, today + Duration::hours(9), "Carlos Souza", "ABC-1234", "Industrial Avenue, 1500"),
        now - Duration::days(2),
    )?;
    t.create_delivery(
        delivery(&first.id, today + Duration::hours(14), "Carlos Souza", "ABC-1234", "Industrial Avenue, 1500"),
        now - Duration::days(2),
    )?;
    t.create_delivery(
        delivery(&second.id, today + Duration::days(1) + Duration::hours(8), "Pedro Lima", "XYZ-9876", "Rua das Flores, 42"),
        now - Duration::hours(4),
    )?;
    let done = t.create_delivery(
        delivery(&delivered.id, today - Duration::days(8) + Duration::hours(10), "Pedro Lima", "XYZ-9876", "Industrial Avenue, 1500"),
        now - Duration::days(9),
    )?;
    t.update_delivery(
        &done.id,
        DeliveryPatch { status: Some(DeliveryStatus::Delivered), ..Default::default() },
        today - Duration::days(8) + Duration::hours(11),
    )?;

    t.create_invoice(
        NewInvoice {
            order_id: delivered.id.clone(),
            number: "000123".into(),
            series: Some("1".into()),
            issue_date: (now - Duration::days(8)).date_naive(),
            value: "2000.00".into(),
        },
        now - Duration::days(8),
    )?;

    Ok(())
}
