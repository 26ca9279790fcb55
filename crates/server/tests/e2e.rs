use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{MemStorage, SystemClock};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, AppState};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server(seeded: bool) -> anyhow::Result<TestApp> {
    let clock = Arc::new(SystemClock);
    let storage = if seeded { MemStorage::with_sample_data(clock)? } else { MemStorage::new(clock) };
    let app: Router = routes::build_router(AppState::new(Arc::new(storage)), CorsLayer::very_permissive(), None);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn post_json(c: &reqwest::Client, url: String, body: Value) -> anyhow::Result<(HttpStatusCode, Value)> {
    let res = c.post(url).json(&body).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

/// Client, supplier and two products; returns their ids.
async fn seed_parties(app: &TestApp, c: &reqwest::Client) -> anyhow::Result<(String, String, String, String)> {
    let (_, client) = post_json(c, app.url("/api/clients"), json!({"name": "Horizon Builders", "type": "organization"})).await?;
    let (_, supplier) = post_json(c, app.url("/api/suppliers"), json!({"name": "Ridge Quarry"})).await?;
    let (_, gravel) = post_json(c, app.url("/api/products"), json!({"name": "Gravel #1", "unit": "t"})).await?;
    let (_, stone) = post_json(c, app.url("/api/products"), json!({"name": "Crushed stone", "unit": "t"})).await?;
    Ok((
        client["id"].as_str().unwrap().to_string(),
        supplier["id"].as_str().unwrap().to_string(),
        gravel["id"].as_str().unwrap().to_string(),
        stone["id"].as_str().unwrap().to_string(),
    ))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_client_crud() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();

    let (status, created) = post_json(
        &c,
        app.url("/api/clients"),
        json!({"name": "Joana Silva", "document": "123.456.789-00", "id": "ignored", "createdAt": "1999-01-01T00:00:00Z"}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_ne!(id, "ignored");
    assert_eq!(created["type"], "individual");
    assert_eq!(created["active"], true);
    assert_ne!(created["createdAt"], "1999-01-01T00:00:00Z");

    let res = c.get(app.url(&format!("/api/clients/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = c
        .patch(app.url(&format!("/api/clients/{id}")))
        .json(&json!({"city": "Jundiai", "document": null}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["city"], "Jundiai");
    assert!(updated["document"].is_null());
    assert_eq!(updated["name"], "Joana Silva");

    let list = c.get(app.url("/api/clients")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 1);

    let res = c.delete(app.url(&format!("/api/clients/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(app.url(&format!("/api/clients/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(app.url(&format!("/api/clients/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_ids_are_404() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();
    for path in [
        "/api/clients/missing",
        "/api/suppliers/missing",
        "/api/products/missing",
        "/api/orders/missing",
        "/api/orders/missing/items",
        "/api/orders/missing/invoices",
        "/api/deliveries/missing",
        "/api/invoices/missing",
    ] {
        let res = c.get(app.url(path)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND, "{path}");
        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], "Not Found");
    }
    let res = c.patch(app.url("/api/products/missing")).json(&json!({"name": "x"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(app.url("/api/orders/missing")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_bad_bodies_are_400() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();

    let res = c
        .post(app.url("/api/clients"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid Request Body");

    let (status, body) = post_json(&c, app.url("/api/clients"), json!({"name": "  ", "email": "nope"})).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    let fields: Vec<&str> = body["details"].as_array().unwrap().iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));

    let (status, body) = post_json(
        &c,
        app.url("/api/orders"),
        json!({"order": {"clientId": "ghost", "supplierId": "ghost", "totalValue": "10"}, "items": []}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (status, body) = post_json(
        &c,
        app.url("/api/deliveries"),
        json!({"orderId": "ghost", "scheduledDate": "2026-07-15T09:00:00Z"}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "orderId");
    Ok(())
}

#[tokio::test]
async fn e2e_order_lifecycle_and_cascade() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();
    let (client_id, supplier_id, gravel, stone) = seed_parties(&app, &c).await?;

    let (status, order) = post_json(
        &c,
        app.url("/api/orders"),
        json!({
            "order": {"clientId": client_id, "supplierId": supplier_id, "totalValue": "8250.00", "orderNumber": 1},
            "items": [
                {"productId": gravel, "quantity": "30", "unitPrice": "150.00"},
                {"productId": stone, "quantity": "15", "unitPrice": "250.00"}
            ]
        }),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["totalValue"], "8250.00");
    assert!(order["orderNumber"].as_i64().unwrap() > 1000);
    let order_id = order["id"].as_str().unwrap().to_string();

    let items = c.get(app.url(&format!("/api/orders/{order_id}/items"))).send().await?.json::<Vec<Value>>().await?;
    let totals: Vec<&str> = items.iter().map(|i| i["totalPrice"].as_str().unwrap()).collect();
    assert_eq!(totals, ["4500.00", "3750.00"]);

    let (status, delivery) = post_json(
        &c,
        app.url("/api/deliveries"),
        json!({"orderId": order_id, "scheduledDate": chrono::Utc::now().to_rfc3339(), "vehiclePlate": "ABC-1234"}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let (status, _) = post_json(
        &c,
        app.url("/api/invoices"),
        json!({"orderId": order_id, "number": "000123", "issueDate": "2026-07-15", "value": "8250.00"}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);

    let detail = c.get(app.url(&format!("/api/orders/{order_id}"))).send().await?.json::<Value>().await?;
    assert_eq!(detail["client"]["id"], client_id.as_str());
    assert_eq!(detail["items"][0]["product"]["name"], "Gravel #1");
    assert_eq!(detail["deliveries"].as_array().unwrap().len(), 1);
    assert_eq!(detail["invoices"].as_array().unwrap().len(), 1);

    let delivery_id = delivery["id"].as_str().unwrap();
    let res = c
        .patch(app.url(&format!("/api/deliveries/{delivery_id}")))
        .json(&json!({"status": "delivered"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let delivered = res.json::<Value>().await?;
    assert!(delivered["deliveredAt"].is_string());

    let res = c.delete(app.url(&format!("/api/orders/{order_id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(app.url(&format!("/api/deliveries/{delivery_id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let invoices = c.get(app.url("/api/invoices")).send().await?.json::<Vec<Value>>().await?;
    assert!(invoices.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_oversized_order_is_400_and_stats_survive() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();
    let (client_id, supplier_id, gravel, _) = seed_parties(&app, &c).await?;

    let (status, body) = post_json(
        &c,
        app.url("/api/orders"),
        json!({
            "order": {"clientId": client_id, "supplierId": supplier_id, "totalValue": "70000000000000000000000000000"},
            "items": [{"productId": gravel, "quantity": "100000000000000000000", "unitPrice": "100000000000000000000"}]
        }),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    let fields: Vec<&str> = body["details"].as_array().unwrap().iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert_eq!(fields, ["order.totalValue", "items[0].quantity", "items[0].unitPrice"]);

    let res = c.get(app.url("/api/dashboard/stats")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["monthlyRevenue"], "0.00");
    let res = c.get(app.url("/api/orders")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.json::<Vec<Value>>().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_recent_orders_default_and_limit() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();
    let (client_id, supplier_id, gravel, _) = seed_parties(&app, &c).await?;
    for i in 0..7 {
        let (status, _) = post_json(
            &c,
            app.url("/api/orders"),
            json!({
                "order": {"clientId": client_id, "supplierId": supplier_id, "totalValue": format!("{i}00.00")},
                "items": [{"productId": gravel, "quantity": "1", "unitPrice": "100.00"}]
            }),
        )
        .await?;
        assert_eq!(status, HttpStatusCode::CREATED);
    }

    let all = c.get(app.url("/api/orders")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), 7);
    let recent = c.get(app.url("/api/orders/recent")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[..], all[..5]);
    let two = c.get(app.url("/api/orders/recent?limit=2")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(two[..], all[..2]);
    Ok(())
}

#[tokio::test]
async fn e2e_seeded_dashboard() -> anyhow::Result<()> {
    let app = start_server(true).await?;
    let c = client();

    let stats = c.get(app.url("/api/dashboard/stats")).send().await?.json::<Value>().await?;
    assert_eq!(stats["pendingOrders"], 1);
    assert_eq!(stats["todayDeliveries"], 2);
    assert_eq!(stats["activeClients"], 2);
    assert!(stats["monthlyRevenue"].is_string());

    let today = c.get(app.url("/api/deliveries/today")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(today.len(), 2);
    assert!(today.iter().all(|d| d["order"]["client"]["name"].is_string()));

    let products = c.get(app.url("/api/products")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(products.len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = client().get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/api/orders/{id}"].is_object());
    assert!(doc["paths"]["/api/dashboard/stats"]["get"].is_object());
    Ok(())
}
