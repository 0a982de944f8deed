//! API integration tests
//!
//! These run against a live server with a migrated database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so tests can re-run against the same database
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_equipment(client: &Client, body: Value) -> Value {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn delete_equipment(client: &Client, id: i64) {
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_category_create_and_duplicate() {
    let client = Client::new();
    let name = unique("Dock Station");

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": name, "description": "USB-C docks" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let category_id = body["id"].as_i64().expect("No category ID");
    assert_eq!(body["name"], name.as_str());

    // Exact same name again must conflict
    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Cleanup: no equipment references it, so delete succeeds
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_category_empty_name_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_equipment_auto_creates_category_once() {
    let client = Client::new();
    let category = unique("Thin Client");

    let first = create_equipment(&client, json!({ "category": category })).await;
    let second = create_equipment(&client, json!({ "category": category })).await;

    let categories: Value = client
        .get(format!("{}/categories", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let matching: Vec<&Value> = categories
        .as_array()
        .expect("Category list is not an array")
        .iter()
        .filter(|c| c["name"] == category.as_str())
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["description"], "user-defined");

    // Still referenced: delete must report the count and change nothing
    let category_id = matching[0]["id"].as_i64().expect("No category ID");
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("2 equipment"));

    // Cleanup
    delete_equipment(&client, first["id"].as_i64().unwrap()).await;
    delete_equipment(&client, second["id"].as_i64().unwrap()).await;
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_return_drive_status() {
    let client = Client::new();
    let equipment = create_equipment(
        &client,
        json!({ "category": "Laptop", "brand": "Lenovo", "model": "T14" }),
    )
    .await;
    let id = equipment["id"].as_i64().unwrap();
    assert_eq!(equipment["status"], "in_storage");

    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "movement_type": "check_out",
            "user_name": "Jane Doe",
            "department": "Accounting"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["status"], "in_use");

    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({ "equipment_id": id, "movement_type": "return" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["status"], "in_storage");

    delete_equipment(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_transfer_leaves_status_alone() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({ "category": "Printer" })).await;
    let id = equipment["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "movement_type": "transfer",
            "department": "Legal",
            "location": "Building B, room 204"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["status"], "in_storage");

    delete_equipment(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_partial_update_touches_only_named_fields() {
    let client = Client::new();
    let equipment = create_equipment(
        &client,
        json!({ "category": "Monitor", "brand": "Dell", "model": "U2720Q" }),
    )
    .await;
    let id = equipment["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .json(&json!({ "notes": "screen scratched" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["notes"], "screen scratched");
    assert_eq!(body["brand"], "Dell");
    assert_eq!(body["model"], "U2720Q");

    // Explicit null clears the field, unlike an absent key
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .json(&json!({ "brand": null }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["brand"].is_null());
    assert_eq!(body["notes"], "screen scratched");

    delete_equipment(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number_conflict() {
    let client = Client::new();
    let serial = unique("SN");
    let equipment = create_equipment(
        &client,
        json!({ "category": "Laptop", "serial_number": serial }),
    )
    .await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "category": "Laptop", "serial_number": serial }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains(&serial));

    delete_equipment(&client, equipment["id"].as_i64().unwrap()).await;
}

#[tokio::test]
#[ignore]
async fn test_malformed_acquisition_date_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "category": "Scanner", "acquisition_date": "not-a-date" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_equipment_delete_cascades_movements() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({ "category": "Router" })).await;
    let id = equipment["id"].as_i64().unwrap();

    for movement_type in ["check_in", "check_out", "return"] {
        let response = client
            .post(format!("{}/movements", BASE_URL))
            .json(&json!({ "equipment_id": id, "movement_type": movement_type }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    delete_equipment(&client, id).await;

    let body: Value = client
        .get(format!("{}/movements?equipment_id={}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body.as_array().expect("Not an array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_movement_for_unknown_equipment_is_404() {
    let client = Client::new();

    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({ "equipment_id": 999_999_999, "movement_type": "check_out" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let category = unique("Tablet");
    let a = create_equipment(&client, json!({ "category": category })).await;
    let b = create_equipment(&client, json!({ "category": category, "status": "in_use" })).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_equipment"].as_i64().unwrap() >= 2);
    assert!(body["in_storage"].as_i64().unwrap() >= 1);
    assert!(body["in_use"].as_i64().unwrap() >= 1);
    assert!(body["faulty"].is_number());

    let entry = body["by_category"]
        .as_array()
        .expect("by_category is not an array")
        .iter()
        .find(|e| e["label"] == category.as_str())
        .expect("category missing from distribution");
    assert_eq!(entry["value"], 2);

    delete_equipment(&client, a["id"].as_i64().unwrap()).await;
    delete_equipment(&client, b["id"].as_i64().unwrap()).await;
}
