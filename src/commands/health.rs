//! Health Check Commands
//!
//! Commands for checking the reachability of the analysis backend.

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Get the health status of the backend
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    CommandResponse::ok(state.check_health().await)
}
