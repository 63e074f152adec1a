use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::donations::handlers;
use crate::features::donations::services::DonationService;

pub fn routes(service: Arc<DonationService>) -> Router {
    Router::new()
        .route("/api/me/donations", get(handlers::list_my_donations))
        .route("/api/users/{user_id}/donations", get(handlers::list_user_donations))
        .route("/api/regions/{id}/donations", get(handlers::list_region_donations))
        .route(
            "/api/regions/{id}/donations/stats",
            get(handlers::get_region_donation_stats),
        )
        .route(
            "/api/regions/{id}/donations/top-donors",
            get(handlers::get_top_donors),
        )
        .route("/api/donations", post(handlers::create_donation))
        .route("/api/donations/stats", get(handlers::get_donation_stats_by_date_range))
        .route("/api/donations/recent", get(handlers::list_recent_donations))
        .with_state(service)
}
