use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::WrappedReport;
use crate::services::report;
use crate::AppState;

/// `GET /api/wrapped/:address`: the year-in-review snapshot.
pub async fn generate(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<WrappedReport>, AppError> {
    if !report::is_valid_address(&address) {
        tracing::warn!(address = %address, "Rejected malformed address");
        return Err(AppError::BadRequest("Invalid address".into()));
    }

    let report = report::build_wrapped_report(&state, &address).await?;
    Ok(Json(report))
}
