pub mod applications;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET    /applications            list_applications (?limit)
/// POST   /applications            submit_application
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(applications::router())
}
