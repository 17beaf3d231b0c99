mod common;

use axum::http::StatusCode;
use common::TestApp;
use product_service::services::ProductStore;
use serde_json::json;

#[tokio::test]
async fn laptop_lifecycle() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/products",
            json!({ "name": "Laptop", "price": 1200, "category": "Electronics" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let (status, body) = app.get(&format!("/products/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Laptop");
    assert_eq!(body["data"]["price"], 1200);
    assert_eq!(body["data"]["category"], "Electronics");

    let (status, body) = app
        .put(&format!("/products/{}", id), json!({ "price": 999 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 999);
    assert_eq!(body["data"]["name"], "Laptop");
    assert_eq!(body["data"]["category"], "Electronics");

    let (status, body) = app.delete(&format!("/products/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted");
    assert_eq!(body["data"]["price"], 999);

    let (status, body) = app.get(&format!("/products/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn created_product_round_trips_through_list() {
    let app = TestApp::new();
    let id = app
        .create(json!({ "name": "Winter Jacket", "price": 89.5, "category": "Clothing" }))
        .await;

    let (status, body) = app.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["source"], "store");
    assert_eq!(body["degraded"], false);

    let product = &body["data"][0];
    assert_eq!(product["id"], id.as_str());
    assert_eq!(product["name"], "Winter Jacket");
    assert_eq!(product["price"], 89.5);
    assert_eq!(product["category"], "Clothing");
    assert!(product["createdAt"].is_string());
    assert_eq!(product["createdAt"], product["updatedAt"]);
}

#[tokio::test]
async fn short_name_is_rejected_without_writing() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/products", json!({ "name": "Ab", "price": 10 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(
        body["error"].as_str().unwrap().contains("name"),
        "error should name the field: {}",
        body
    );

    let (_, body) = app.get("/products").await;
    assert_eq!(body["count"], 0);
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn price_below_minimum_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/products", json!({ "name": "Chewing Gum", "price": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("price"));
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_fields_are_reported_together() {
    let app = TestApp::new();

    let (status, body) = app.post("/products", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("name: Product name is required"), "{}", error);
    assert!(error.contains("price: Product price is required"), "{}", error);
}

#[tokio::test]
async fn category_defaults_to_other_and_name_is_trimmed() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/products", json!({ "name": "  Rice Bag  ", "price": 12 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Rice Bag");
    assert_eq!(body["data"]["category"], "Other");
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/products",
            json!({ "name": "Robot Kit", "price": 40, "category": "Toys" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Toys"));
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .raw_request("POST", "/products", Some("{\"name\": ".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .post("/products", json!({ "name": "Laptop", "price": "cheap" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = TestApp::new();

    for id in ["686f5c106b7e1b4605d09e60", "not-an-object-id", "42"] {
        let uri = format!("/products/{}", id);

        let (status, body) = app.get(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(body["error"], "Product not found");

        let (status, _) = app.put(&uri, json!({ "price": 5 })).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);

        let (status, _) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let app = TestApp::new();
    let id = app
        .create(json!({ "name": "Wireless Mouse", "price": 25, "category": "Accessories" }))
        .await;
    let uri = format!("/products/{}", id);
    let (_, before) = app.get(&uri).await;

    let (status, body) = app
        .put(&uri, json!({ "name": "  Gaming Mouse ", "category": "Electronics" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gaming Mouse");
    assert_eq!(body["data"]["category"], "Electronics");
    assert_eq!(body["data"]["price"], 25);
    assert_eq!(body["data"]["createdAt"], before["data"]["createdAt"]);

    let (_, after) = app.get(&uri).await;
    assert_eq!(after["data"], body["data"]);
}

#[tokio::test]
async fn invalid_update_leaves_product_untouched() {
    let app = TestApp::new();
    let id = app
        .create(json!({ "name": "Notebook", "price": 5, "category": "Stationery" }))
        .await;
    let uri = format!("/products/{}", id);
    let (_, before) = app.get(&uri).await;

    let (status, body) = app.put(&uri, json!({ "name": "No", "price": 7 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, body) = app.put(&uri, json!({ "price": -3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("price"));

    let (_, after) = app.get(&uri).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn deleted_product_is_gone_for_every_operation() {
    let app = TestApp::new();
    let id = app
        .create(json!({ "name": "Smartphone", "price": 699, "category": "Electronics" }))
        .await;
    let uri = format!("/products/{}", id);

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.get(&uri).await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        app.put(&uri, json!({ "price": 1 })).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.delete(&uri).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_products_in_insertion_order() {
    let app = TestApp::new();
    for (name, price) in [("Apples", 3), ("Bread Loaf", 2), ("Cheese", 8)] {
        app.create(json!({ "name": name, "price": price, "category": "Food" }))
            .await;
    }

    let (status, body) = app.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Apples", "Bread Loaf", "Cheese"]);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/orders").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
