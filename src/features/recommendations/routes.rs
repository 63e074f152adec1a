use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::recommendations::handlers;
use crate::features::recommendations::services::RecommendationService;

pub fn routes(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route(
            "/api/regions/{id}/recommendation",
            get(handlers::get_recommendation),
        )
        .with_state(service)
}
