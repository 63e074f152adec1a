use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::organizations::handlers;
use crate::features::organizations::services::OrganizationService;

pub fn routes(service: Arc<OrganizationService>) -> Router {
    Router::new()
        .route(
            "/api/organizations",
            get(handlers::list_organizations).post(handlers::create_organization),
        )
        .route(
            "/api/organizations/{id}",
            get(handlers::get_organization).patch(handlers::update_organization),
        )
        .route("/api/organizations/{id}/stats", get(handlers::get_organization_stats))
        .route(
            "/api/organizations/{id}/verification",
            put(handlers::set_organization_verification),
        )
        .route(
            "/api/regions/{id}/organizations",
            get(handlers::list_region_organizations),
        )
        .with_state(service)
}
