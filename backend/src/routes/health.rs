//! Health probes
//!
//! - `/health` and `/health/live` answer whenever the process does;
//!   neither touches a dependency.
//! - `/health/ready` round-trips a query to Postgres, the only
//!   dependency this service has, and returns 503 until it answers.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<ReadinessChecks>,
}

/// Per-dependency results reported by the readiness probe
#[derive(Serialize)]
pub struct ReadinessChecks {
    pub database: DependencyStatus,
}

#[derive(Serialize)]
pub struct DependencyStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn probe_response(status: &str, checks: Option<ReadinessChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(probe_response("healthy", None))
}

/// GET /health/ready
///
/// Ready only once the database answers; 503 with the failing check
/// attached otherwise.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(_) => DependencyStatus {
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => DependencyStatus {
            status: "unhealthy".to_string(),
            message: Some(e.to_string()),
        },
    };

    let db_healthy = database.status == "healthy";
    let status = if db_healthy { "ready" } else { "not_ready" };
    let response = probe_response(status, Some(ReadinessChecks { database }));

    if db_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(probe_response("alive", None))
}
