use axum::Json;

use difygate_types::health::HealthReport;

/// GET /api/health - Fixed liveness payload; checks no dependency.
pub async fn health() -> Json<HealthReport> {
    Json(HealthReport::healthy())
}
