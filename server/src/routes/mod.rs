pub mod admin;
pub mod alerts;
pub mod health;
pub mod medicines;
pub mod params;
pub mod pharmacies;
pub mod records;
pub mod reports;
pub mod ws;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{OriginalUri, Request, State};
use axum::handler::HandlerWithoutStateExt;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[derive(Serialize)]
pub struct RouteNotFound {
    pub error: &'static str,
    pub requested_url: String,
    pub timestamp: DateTime<Utc>,
}

async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            error: "Route not found",
            requested_url: uri.to_string(),
            timestamp: Utc::now(),
        }),
    )
}

/// `/` doubles as the real-time endpoint: upgrade requests get the event
/// socket, everything else gets the site index.
async fn root(
    State(state): State<Arc<AppState>>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    index: Option<ServeFile>,
    request: Request,
) -> Response {
    match (upgrade, index) {
        (Ok(upgrade), _) => ws::accept(upgrade, &state),
        (Err(_), Some(index)) => match index.oneshot(request).await {
            Ok(resp) => resp.into_response(),
            Err(never) => match never {},
        },
        (Err(_), None) => not_found(OriginalUri(request.uri().clone()))
            .await
            .into_response(),
    }
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health))
        .route("/medicines/search", get(medicines::search))
        .route("/medicines/category/{category}", get(medicines::by_category))
        .route("/medicines/check-interactions", post(medicines::check_interactions))
        .route("/medicines/{id}", get(medicines::get_medicine))
        .route("/medicines/{id}/availability", get(medicines::availability))
        .route("/pharmacies", get(pharmacies::list))
        .route("/pharmacies/{id}", get(pharmacies::get_pharmacy))
        .route("/disease-trends", get(pharmacies::disease_trends))
        .route("/prescriptions/upload", post(records::upload_prescription))
        .route("/prescriptions", get(records::list_prescriptions))
        .route("/consultations/book", post(records::book_consultation))
        .route("/consultations", get(records::list_consultations))
        .route("/orders", post(records::create_order))
        .route("/orders/{id}", get(records::get_order))
        .route("/contact", post(records::contact))
        .route("/admin/login", post(admin::login))
        .route("/admin/inventory/{pharmacy_id}", get(admin::inventory))
        .route(
            "/admin/inventory/{pharmacy_id}/medicine/{medicine_id}",
            put(admin::update_inventory),
        )
        .route("/alerts/price", post(alerts::create).get(alerts::list))
        .route("/alerts/price/{id}", delete(alerts::deactivate))
        .route("/reports/price-trends/{medicine_id}", get(reports::price_trends))
        .route("/reports/popular-medicines", get(reports::popular_medicines))
        .route("/reports/best-prices/{medicine_id}", get(reports::best_prices))
        .fallback(not_found)
}

/// Build the full application router.
///
/// Unknown `/api` paths always get the JSON 404. Other paths are served from
/// `static_dir` when one is configured, with `/admin` mapped to `admin.html`.
/// WebSocket clients may connect at `/` or `/ws`.
pub fn build_router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let index = static_dir
        .as_ref()
        .map(|dir| ServeFile::new(dir.join("index.html")));

    let router = Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(ws::upgrade))
        .route(
            "/",
            get(
                move |state: State<Arc<AppState>>,
                      upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
                      request: Request| root(state, upgrade, index.clone(), request),
            ),
        );

    let router = match static_dir {
        Some(dir) => router
            .route_service("/admin", ServeFile::new(dir.join("admin.html")))
            .fallback_service(ServeDir::new(dir).fallback(not_found.into_service())),
        None => router.fallback(not_found),
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
