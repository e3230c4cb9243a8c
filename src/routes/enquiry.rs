// Customer enquiry and test-drive requests

use axum::{
    extract::{Json as JsonExtract, State},
    response::Json,
};
use serde::Serialize;

use crate::{
    AppState,
    email::compose_enquiry,
    error::{AppError, AppResult},
    models::EnquiryRequest,
};

#[derive(Serialize, Debug)]
pub struct EnquiryResponse {
    success: bool,
    id: String,
}

pub async fn post_enquiry(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<EnquiryRequest>,
) -> AppResult<Json<EnquiryResponse>> {
    tracing::info!(
        kind = ?request.kind,
        car_id = ?request.car_id,
        "[HANDLER] /api/enquiries - Request received."
    );

    let Some(mailer) = app_state.mailer.as_deref() else {
        return Err(AppError::NotConfigured(
            "Email service is not configured. Please set APP_RESEND_API_KEY.".to_string(),
        ));
    };

    if !request.has_required_fields() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let snapshot = app_state.inventory.snapshot().await;
    let car = match (snapshot.as_deref(), request.car_id.as_deref()) {
        (Some(snapshot), Some(id)) => snapshot.find(id),
        _ => None,
    };
    if request.car_id.is_some() && car.is_none() {
        tracing::warn!(
            car_id = ?request.car_id,
            "Enquiry names a car that is not in stock, using submitted details"
        );
    }

    let email = compose_enquiry(&request, car, app_state.settings.site_url())
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    let id = mailer.send(&email).await.map_err(|e| AppError::Upstream {
        message: "Failed to send email".to_string(),
        details: e.to_string(),
    })?;

    Ok(Json(EnquiryResponse { success: true, id }))
}
