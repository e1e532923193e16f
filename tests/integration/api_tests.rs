//! API integration tests
//!
//! Run against a live server with a migrated database:
//! `cargo test --test api_tests -- --ignored`. Tokens are minted with the
//! server's `JWT_SECRET`.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use mix_production_server::models::user::{Role, UserClaims};

const BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_SECRET: &str = "change-this-secret-in-production";

fn token(role: Role) -> String {
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
    UserClaims::new(1, role, 1)
        .create_token(&secret)
        .expect("Failed to sign token")
}

/// Unique suffix so repeated runs do not collide on unique keys
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_employee(client: &Client, admin: &str) -> i64 {
    let response = client
        .post(format!("{}/employees", BASE_URL))
        .bearer_auth(admin)
        .json(&json!({ "name": unique("Operator"), "department": "Assembly" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().unwrap()
}

async fn create_equipment(client: &Client, admin: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(admin)
        .json(&json!({ "modelName": unique("MX") }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["currentStock"], 0);
    assert_eq!(body["totalResets"], 0);
    body["id"].as_i64().unwrap()
}

async fn counters(client: &Client, token: &str, equipment_id: i64) -> (i64, i64) {
    let body: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    (
        body["currentStock"].as_i64().unwrap(),
        body["totalResets"].as_i64().unwrap(),
    )
}

async fn post_production(client: &Client, token: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/production", BASE_URL))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[ignore]
async fn test_normal_and_reset_entries_drive_separate_counters() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let user = token(Role::User);
    let employee = create_employee(&client, &admin).await;
    let equipment = create_equipment(&client, &admin).await;

    let response = post_production(
        &client,
        &user,
        json!({ "employeeId": employee, "equipmentId": equipment, "quantity": 10, "date": "2025-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let normal: Value = response.json().await.unwrap();
    assert_eq!(counters(&client, &user, equipment).await, (10, 0));

    let response = post_production(
        &client,
        &user,
        json!({ "employeeId": employee, "equipmentId": equipment, "quantity": 5, "date": "2025-01-01", "isReset": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let reset: Value = response.json().await.unwrap();
    assert_eq!(counters(&client, &user, equipment).await, (10, 5));

    // Quantity change applies the difference
    let response = client
        .put(format!("{}/production/{}", BASE_URL, normal["id"]))
        .bearer_auth(&admin)
        .json(&json!({ "quantity": 15 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counters(&client, &user, equipment).await, (15, 5));

    // Deleting the reset entry only touches totalResets
    let response = client
        .delete(format!("{}/production/{}", BASE_URL, reset["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(counters(&client, &user, equipment).await, (15, 0));

    // The normal entry left one inbound movement behind
    let movements: Value = client
        .get(format!("{}/movements?equipmentId={}", BASE_URL, equipment))
        .bearer_auth(&user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let movements = movements.as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["type"], "entrada");
    assert_eq!(movements[0]["quantity"], 15);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_entry_is_rejected_without_touching_counters() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let user = token(Role::User);
    let employee = create_employee(&client, &admin).await;
    let equipment = create_equipment(&client, &admin).await;

    let entry = json!({ "employeeId": employee, "equipmentId": equipment, "quantity": 8, "date": "2025-02-01" });
    let first = post_production(&client, &user, entry.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_production(&client, &user, entry).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["code"], 5);

    assert_eq!(counters(&client, &user, equipment).await, (8, 0));
}

#[tokio::test]
#[ignore]
async fn test_reset_flag_flip_moves_quantity_between_counters() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let employee = create_employee(&client, &admin).await;
    let equipment = create_equipment(&client, &admin).await;

    let created: Value = post_production(
        &client,
        &admin,
        json!({ "employeeId": employee, "equipmentId": equipment, "quantity": 7, "date": "2025-03-01" }),
    )
    .await
    .json()
    .await
    .unwrap();

    let response = client
        .put(format!("{}/production/{}", BASE_URL, created["id"]))
        .bearer_auth(&admin)
        .json(&json!({ "isReset": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counters(&client, &admin, equipment).await, (0, 7));
}

#[tokio::test]
#[ignore]
async fn test_outbound_movement_cannot_exceed_stock() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let equipment = create_equipment(&client, &admin).await;

    let response = client
        .post(format!("{}/movements", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({
            "equipmentId": equipment,
            "quantity": 1,
            "type": "saida",
            "description": "Consumo",
            "date": "2025-04-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(counters(&client, &admin, equipment).await, (0, 0));
}

#[tokio::test]
#[ignore]
async fn test_consumed_production_cannot_be_deleted() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let employee = create_employee(&client, &admin).await;
    let equipment = create_equipment(&client, &admin).await;

    let created: Value = post_production(
        &client,
        &admin,
        json!({ "employeeId": employee, "equipmentId": equipment, "quantity": 10, "date": "2025-05-01" }),
    )
    .await
    .json()
    .await
    .unwrap();

    let response = client
        .post(format!("{}/movements", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({
            "equipmentId": equipment,
            "quantity": 10,
            "type": "saida",
            "description": "Consumo",
            "date": "2025-05-02"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(counters(&client, &admin, equipment).await, (0, 0));

    let response = client
        .delete(format!("{}/production/{}", BASE_URL, created["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_production(
        &client,
        &admin,
        json!({ "employeeId": employee, "equipmentId": equipment, "quantity": 10, "date": "2025-05-03" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(counters(&client, &admin, equipment).await, (10, 0));

    let report: Value = client
        .get(format!("{}/reconciliation", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let item = report["equipment"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["equipmentId"] == equipment)
        .cloned()
        .unwrap();
    assert_eq!(item["stored"], item["expected"]);
}

#[tokio::test]
#[ignore]
async fn test_oversized_quantity_is_rejected() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let employee = create_employee(&client, &admin).await;
    let equipment = create_equipment(&client, &admin).await;

    let response = post_production(
        &client,
        &admin,
        json!({ "employeeId": employee, "equipmentId": equipment, "quantity": i64::MAX, "date": "2025-06-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(counters(&client, &admin, equipment).await, (0, 0));
}

#[tokio::test]
#[ignore]
async fn test_unknown_equipment_is_not_found() {
    let client = Client::new();
    let admin = token(Role::Admin);
    let employee = create_employee(&client, &admin).await;

    let response = post_production(
        &client,
        &admin,
        json!({ "employeeId": employee, "equipmentId": 999_999, "quantity": 1, "date": "2025-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_separation_listing_requires_date() {
    let client = Client::new();
    let user = token(Role::User);

    let response = client
        .get(format!("{}/separacao-macs", BASE_URL))
        .bearer_auth(&user)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_reconciliation_report_for_admin() {
    let client = Client::new();
    let admin = token(Role::Admin);

    let response = client
        .get(format!("{}/reconciliation", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["equipment"].is_array());
}
