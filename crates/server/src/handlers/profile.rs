//! # Profile Enrichment Handler

use super::{AppError, AppState};
use axum::{extract::State, Json};
use profilescout::{EnrichmentResponse, ProfileRequest};
use tracing::info;

/// The handler for `POST /get_profile`.
///
/// Rejects the request with `400 Missing args` before any outbound call when
/// `company`, `participants`, or `purpose` is absent. Otherwise every
/// participant is enriched and the outcomes are returned in input order.
pub async fn get_profile_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<EnrichmentResponse>, AppError> {
    let request = payload.validate()?;
    info!(
        company = %request.company,
        participants = request.participants.len(),
        "Received profile request"
    );

    let response = app_state.enricher.enrich(&request).await;

    Ok(Json(response))
}
