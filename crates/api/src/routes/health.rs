use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    /// Up, but applications cannot be stored.
    Degraded,
}

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Salary floor the submit endpoint is enforcing.
    pub min_monthly_salary: f64,
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = cardapply_db::health_check(&state.pool).await.is_ok();

    Json(HealthReport {
        status: if db_healthy {
            ServiceStatus::Ok
        } else {
            ServiceStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        min_monthly_salary: state.config.min_monthly_salary,
    })
}

/// `/health` sits beside `/api`, not under it.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
