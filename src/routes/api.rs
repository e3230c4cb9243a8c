// Handlers for stock listing endpoints

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use chrono::Datelike;
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    filter::{Choice, Dimension, FilterOptions, FilterSelection, StockView, derive_options},
    models::Vehicle,
};

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    // Window size the client already shows; kept across a refresh
    shown: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OptionsQuery {
    #[serde(default)]
    make: Choice,
}

// `+` decodes to a space in a query string, so an open-ended token typed
// straight into a URL (`?priceRange=150000+`) arrives as "150000 ".
fn restore_open_ended(selection: &mut FilterSelection) {
    for dimension in [Dimension::PriceRange, Dimension::Mileage, Dimension::Year] {
        let raw = selection.get(dimension);
        if let Some(min) = raw.strip_suffix(' ') {
            if !min.ends_with(' ') {
                selection.set(dimension, &format!("{}+", min));
            }
        }
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub async fn get_cars(State(app_state): State<AppState>) -> Json<Vec<Vehicle>> {
    let vehicles = app_state
        .inventory
        .snapshot()
        .await
        .map(|snapshot| snapshot.vehicles.clone())
        .unwrap_or_default();
    tracing::debug!("[HANDLER] /api/cars - Returning {} vehicles", vehicles.len());
    Json(vehicles)
}

pub async fn get_car(State(app_state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Vehicle>> {
    let snapshot = app_state.inventory.snapshot().await;
    snapshot
        .as_deref()
        .and_then(|s| s.find(&id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
}

pub async fn get_stock(
    State(app_state): State<AppState>,
    Query(mut selection): Query<FilterSelection>,
    Query(page): Query<PageQuery>,
) -> Response {
    restore_open_ended(&mut selection);
    let snapshot = app_state.inventory.snapshot().await;
    let mut view = StockView::with_state(snapshot, selection, app_state.settings.cursor());
    if let Some(shown) = page.shown {
        view.restore_window(shown);
    }

    let active: Vec<String> = view.selection().active_dimensions().map(|d| d.to_string()).collect();
    tracing::info!(
        filters = ?active,
        total = view.result().len(),
        status = ?view.status(),
        "[HANDLER] /api/stock - Filtered stock"
    );
    Json(view.page()).into_response()
}

pub async fn get_stock_options(
    State(app_state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> Json<FilterOptions> {
    let snapshot = app_state.inventory.snapshot().await;
    let vehicles = snapshot.as_deref().map(|s| s.vehicles.as_slice()).unwrap_or(&[]);
    Json(derive_options(vehicles, &query.make, current_year()))
}
