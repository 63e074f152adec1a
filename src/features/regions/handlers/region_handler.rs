use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::regions::dtos::{
    RegionResponseDto, RegionSearchQuery, SeverityQuery, UpdatePredictionDto, UpdateRegionDto,
};
use crate::features::regions::models::EconomicStats;
use crate::features::regions::services::RegionService;
use crate::shared::types::ApiResponse;

/// List regions, most severe first
#[utoipa::path(
    get,
    path = "/api/regions",
    params(RegionSearchQuery),
    responses(
        (status = 200, description = "List of regions", body = ApiResponse<Vec<RegionResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn list_regions(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    AppQuery(query): AppQuery<RegionSearchQuery>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let regions = service.list(query.search.as_deref()).await?;
    let dtos: Vec<RegionResponseDto> = regions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/regions/{id}",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    responses(
        (status = 200, description = "Region details", body = ApiResponse<RegionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn get_region(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    let region = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(region.into()), None, None)))
}

/// Regions at or above a severity threshold
#[utoipa::path(
    get,
    path = "/api/regions/by-severity",
    params(SeverityQuery),
    responses(
        (status = 200, description = "Regions at or above the threshold", body = ApiResponse<Vec<RegionResponseDto>>),
        (status = 400, description = "Missing or invalid threshold"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn list_regions_by_severity(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    AppQuery(query): AppQuery<SeverityQuery>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let regions = service.list_by_severity(query.min_severity).await?;
    let dtos: Vec<RegionResponseDto> = regions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Economic loss totals across all regions
#[utoipa::path(
    get,
    path = "/api/regions/economic-stats",
    responses(
        (status = 200, description = "Summed loss figures", body = ApiResponse<EconomicStats>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn get_economic_stats(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
) -> Result<Json<ApiResponse<EconomicStats>>> {
    let stats = service.economic_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Partially update a region (admin only)
#[utoipa::path(
    patch,
    path = "/api/regions/{id}",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    request_body = UpdateRegionDto,
    responses(
        (status = 200, description = "Updated region", body = ApiResponse<RegionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn update_region(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRegionDto>,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let region = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(region.into()),
        Some("Region updated".to_string()),
        None,
    )))
}

/// Replace a region's predicted loss (admin only)
#[utoipa::path(
    put,
    path = "/api/regions/{id}/prediction",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    request_body = UpdatePredictionDto,
    responses(
        (status = 200, description = "Updated region", body = ApiResponse<RegionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn update_prediction(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdatePredictionDto>,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let region = service.update_prediction(id, dto.predicted_loss).await?;
    Ok(Json(ApiResponse::success(
        Some(region.into()),
        Some("Prediction updated".to_string()),
        None,
    )))
}
