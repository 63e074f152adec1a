use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::recommendations::models::Recommendation;
use crate::features::recommendations::services::RecommendationService;
use crate::shared::types::ApiResponse;

/// Ask the completion service for a donation recommendation for a region
#[utoipa::path(
    get,
    path = "/api/regions/{id}/recommendation",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    responses(
        (status = 200, description = "Validated recommendation", body = ApiResponse<Recommendation>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found"),
        (status = 502, description = "Completion service failed or returned an invalid recommendation")
    ),
    tag = "recommendations",
    security(("bearer_auth" = []))
)]
pub async fn get_recommendation(
    _user: AuthenticatedUser,
    State(service): State<Arc<RecommendationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Recommendation>>> {
    let recommendation = service.recommend(id).await?;
    Ok(Json(ApiResponse::success(Some(recommendation), None, None)))
}
