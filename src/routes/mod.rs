/// Application routes configuration
use crate::handlers::{
    get_apod, get_epic, get_epic_dates, get_epic_latest, get_mars_photos, get_rover_manifest,
    health, missing_rover_manifest, AppState,
};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // APOD
        .route("/apod", get(get_apod))
        // EPIC endpoints
        .route("/epic", get(get_epic))
        .route("/epic/dates", get(get_epic_dates))
        .route("/epic/latest", get(get_epic_latest))
        // Mars rover endpoints
        .route("/mars-photos", get(get_mars_photos))
        .route("/rover-manifests", get(missing_rover_manifest))
        .route("/rover-manifests/", get(missing_rover_manifest))
        .route("/rover-manifests/:rover", get(get_rover_manifest))
        .with_state(state)
}
