use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::individuals::dtos::{
    IndividualResponseDto, ListIndividualsQuery, RegionFilterQuery,
};
use crate::features::individuals::models::IndividualStatistics;
use crate::features::individuals::services::IndividualService;
use crate::shared::listing::Page;
use crate::shared::types::ApiResponse;

/// Paginated individuals with optional search, filters and sort
#[utoipa::path(
    get,
    path = "/api/individuals",
    params(ListIndividualsQuery),
    responses(
        (status = 200, description = "Page of individuals", body = ApiResponse<Page<IndividualResponseDto>>),
        (status = 400, description = "Invalid cursor or query"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "individuals",
    security(("bearer_auth" = []))
)]
pub async fn list_individuals(
    _user: AuthenticatedUser,
    State(service): State<Arc<IndividualService>>,
    AppQuery(query): AppQuery<ListIndividualsQuery>,
) -> Result<Json<ApiResponse<Page<IndividualResponseDto>>>> {
    let page = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(page.map(Into::into)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/individuals/statistics",
    params(RegionFilterQuery),
    responses(
        (status = 200, description = "Population statistics", body = ApiResponse<IndividualStatistics>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "individuals",
    security(("bearer_auth" = []))
)]
pub async fn get_statistics(
    _user: AuthenticatedUser,
    State(service): State<Arc<IndividualService>>,
    AppQuery(query): AppQuery<RegionFilterQuery>,
) -> Result<Json<ApiResponse<IndividualStatistics>>> {
    let stats = service.statistics(query.region_id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Download individuals as CSV
#[utoipa::path(
    get,
    path = "/api/individuals/export",
    params(RegionFilterQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized")
    ),
    tag = "individuals",
    security(("bearer_auth" = []))
)]
pub async fn export_individuals(
    _user: AuthenticatedUser,
    State(service): State<Arc<IndividualService>>,
    AppQuery(query): AppQuery<RegionFilterQuery>,
) -> Result<Response> {
    let csv = service.export_csv(query.region_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"individuals.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
