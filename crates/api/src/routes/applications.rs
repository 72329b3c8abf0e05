use axum::routing::get;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Application submission routes, merged into `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/applications",
        get(applications::list_applications).post(applications::submit_application),
    )
}
