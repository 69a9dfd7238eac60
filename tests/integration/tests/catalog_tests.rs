use medifind_integration::harness::TestHarness;
use medifind_integration::FIXED_DISTANCE_KM;
use reqwest::{Method, StatusCode};
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_by_price_range() {
    let h = TestHarness::setup().await;
    let (status, body) = h
        .get("/api/medicines/search?minPrice=30&maxPrice=50&sort=price-low")
        .await;
    assert_eq!(status, StatusCode::OK);
    let prices: Vec<f64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![32.0, 38.0, 45.0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_by_text_matches_composition() {
    let h = TestHarness::setup().await;
    let (_, body) = h.get("/api/medicines/search?q=paracetamol").await;
    let names: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dolo 650", "Crocin Advance"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn category_all_returns_everything_up_to_limit() {
    let h = TestHarness::setup().await;
    let (status, body) = h.get("/api/medicines/category/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);

    let (_, body) = h.get("/api/medicines/category/all?limit=4").await;
    assert_eq!(body["total"], 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn availability_uses_distance_estimate() {
    let h = TestHarness::setup().await;
    let (status, body) = h.get("/api/medicines/1/availability").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["availability"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row["distance_km"], FIXED_DISTANCE_KM);
        assert_eq!(row["deliveryTime"], "1 hours");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn best_prices_follow_shelf_price() {
    let h = TestHarness::setup().await;
    h.set_price(3, 1, 41.0).await;
    let (_, body) = h.get("/api/reports/best-prices/1").await;
    assert_eq!(body["best_price"]["pharmacy_name"], "Fortis Healthcare");
    assert_eq!(body["best_price"]["price"], 41.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_route_returns_json_404() {
    let h = TestHarness::setup().await;
    let (status, body) = h.get("/api/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["requested_url"], "/api/does-not-exist");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn admin_login_rejects_bad_password() {
    let h = TestHarness::setup().await;
    let (status, body) = h
        .send(
            Method::POST,
            "/api/admin/login",
            json!({ "username": "medplus_admin", "password": "nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn inventory_update_rejects_unstocked_medicine() {
    let h = TestHarness::setup().await;
    // Allegra 120 is only at MedPlus.
    let (status, body) = h
        .send(
            Method::PUT,
            "/api/admin/inventory/1/medicine/7",
            json!({ "price": 100.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Medicine not available at this pharmacy");
}
