//! Route definitions for the Wastewater Operations Platform

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Dispersion diagnostics
        .route("/dispersion/curve", get(handlers::get_decay_curve))
        // Emission source management
        .nest("/sites/:site_id/sources", source_routes())
        // Weather observations
        .nest("/sites/:site_id/weather", weather_routes())
        // Odour predictions
        .nest("/sites/:site_id/predictions", prediction_routes())
        // Nuisance-odour incidents
        .nest("/sites/:site_id/incidents", incident_routes())
}

/// Emission source routes
fn source_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sources).post(handlers::create_source))
        .route(
            "/:source_id",
            get(handlers::get_source)
                .put(handlers::update_source)
                .delete(handlers::delete_source),
        )
}

/// Weather observation routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_observations).post(handlers::store_observation),
        )
        .route("/latest", get(handlers::get_latest_observation))
}

/// Odour prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_current_predictions))
        .route("/generate", post(handlers::generate_predictions))
        .route("/expired", delete(handlers::delete_expired_predictions))
}

/// Odour incident routes
fn incident_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_incidents).post(handlers::report_incident),
        )
        .route(
            "/:incident_id",
            get(handlers::get_incident).delete(handlers::delete_incident),
        )
        .route("/:incident_id/status", put(handlers::update_incident_status))
}
