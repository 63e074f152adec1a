use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        .route("/api/regions", get(handlers::list_regions))
        // Static segments must be registered alongside {id}
        .route("/api/regions/by-severity", get(handlers::list_regions_by_severity))
        .route("/api/regions/economic-stats", get(handlers::get_economic_stats))
        .route(
            "/api/regions/{id}",
            get(handlers::get_region).patch(handlers::update_region),
        )
        .route("/api/regions/{id}/prediction", put(handlers::update_prediction))
        .with_state(service)
}
