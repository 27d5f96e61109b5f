use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::WrappedReport;
use crate::services::{pincode, report};
use crate::AppState;

#[derive(Deserialize)]
pub struct CreatePinCode {
    pub address: String,
}

#[derive(Serialize)]
pub struct PinCodeCreated {
    pub code: String,
    pub address: String,
    pub expires_at: DateTime<Utc>,
}

/// `POST /api/pincode`: mint a share code for an address (operator only).
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePinCode>,
) -> Result<Json<PinCodeCreated>, AppError> {
    if !report::is_valid_address(&body.address) {
        return Err(AppError::BadRequest("Invalid address".into()));
    }

    let pin = pincode::mint(&state, &body.address).await?;

    Ok(Json(PinCodeCreated {
        code: pin.code,
        address: pin.address,
        expires_at: pin.expires_at,
    }))
}

/// `GET /api/pincode/:code`: resolve a share code to its wrapped report.
pub async fn resolve(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<WrappedReport>, AppError> {
    let report = pincode::resolve(&state, &code).await?;
    Ok(Json(report))
}
