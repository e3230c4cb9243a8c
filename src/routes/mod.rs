// Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

mod api;
mod enquiry;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/cars", get(api::get_cars))
        .route("/cars/:id", get(api::get_car))
        .route("/stock", get(api::get_stock))
        .route("/stock/options", get(api::get_stock_options))
        .route("/enquiries", post(enquiry::post_enquiry))
        .with_state(app_state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}
