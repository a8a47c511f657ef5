//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with a store connectivity check.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response Codes
///
/// - **200 OK**: store answered
/// - **503 Service Unavailable**: store timed out or failed
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Probes the store with a cheap lookup; the probe code never exists, a
/// clean miss is a healthy answer.
async fn check_store(state: &AppState) -> CheckStatus {
    match state.store.find_by_code("HEALTHZ-PROBE").await {
        Ok(_) => CheckStatus {
            status: "ok".to_string(),
            message: "Store reachable".to_string(),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: e.reason_code().to_string(),
        },
    }
}
