//! Cafe management integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use spotbook_core::CafeId;

#[tokio::test]
async fn create_cafe_success() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/cafes/")
        .json(&json!({
            "name": "The Coffee Corner",
            "address": {
                "street": "123 Main St",
                "city": "San Francisco",
                "state": "CA"
            },
            "average_rating": 4.0,
            "website": "https://coffeecorner.example"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "The Coffee Corner");
    assert_eq!(body["address"]["city"], "San Francisco");
    assert_eq!(body["website"], "https://coffeecorner.example");
}

#[tokio::test]
async fn get_cafe_success() {
    let harness = TestHarness::new();
    let cafe_id = harness.create_cafe("Spot A").await;

    let response = harness.server.get(&format!("/cafes/{cafe_id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], cafe_id);
    assert_eq!(body["name"], "Spot A");
}

#[tokio::test]
async fn get_unknown_cafe_not_found() {
    let harness = TestHarness::new();
    let missing = CafeId::generate().to_string();

    let response = harness.server.get(&format!("/cafes/{missing}")).await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn list_cafes_in_insertion_order() {
    let harness = TestHarness::new();
    let mut names = Vec::new();
    for name in ["First", "Second", "Third"] {
        harness.create_cafe(name).await;
        names.push(name);
    }

    let response = harness.server.get("/cafes/").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let listed: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, names);
}

#[tokio::test]
async fn search_cafes_matches_name_city_or_street() {
    let harness = TestHarness::new();
    harness.create_cafe("Blue Bottle").await;
    harness.create_cafe("Red Rock").await;

    // Name match, case-insensitive.
    let response = harness
        .server
        .get("/cafes/search/")
        .add_query_param("query", "BLUE")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Blue Bottle");

    // City match hits both (the harness uses the same address).
    let response = harness
        .server
        .get("/cafes/search/")
        .add_query_param("query", "madison")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    // No match yields an empty list, not an error.
    let response = harness
        .server
        .get("/cafes/search/")
        .add_query_param("query", "zzz")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_cafes_by_minimum_rating() {
    let harness = TestHarness::new();
    for (name, rating) in [("Low", 2.0), ("Mid", 3.5), ("High", 4.8)] {
        let response = harness
            .server
            .post("/cafes/")
            .json(&json!({
                "name": name,
                "address": {
                    "street": "123 Main St",
                    "city": "Madison",
                    "state": "WI"
                },
                "average_rating": rating
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = harness
        .server
        .get("/cafes/by-rating/")
        .add_query_param("min_rating", 3.5)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let listed: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, ["Mid", "High"]);

    // Out-of-range minimum is rejected.
    let response = harness
        .server
        .get("/cafes/by-rating/")
        .add_query_param("min_rating", 0.5)
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn update_cafe_merges_only_supplied_fields() {
    let harness = TestHarness::new();
    let cafe_id = harness.create_cafe("Spot A").await;

    let response = harness
        .server
        .put(&format!("/cafes/{cafe_id}"))
        .json(&json!({ "average_rating": 4.8 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["average_rating"], 4.8);
    assert_eq!(body["name"], "Spot A");
    assert_eq!(body["address"]["street"], "123 Main St");
}

#[tokio::test]
async fn delete_cafe_then_get_not_found() {
    let harness = TestHarness::new();
    let cafe_id = harness.create_cafe("Spot A").await;

    harness
        .server
        .delete(&format!("/cafes/{cafe_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    harness
        .server
        .get(&format!("/cafes/{cafe_id}"))
        .await
        .assert_status_not_found();

    harness
        .server
        .delete(&format!("/cafes/{cafe_id}"))
        .await
        .assert_status_not_found();
}
