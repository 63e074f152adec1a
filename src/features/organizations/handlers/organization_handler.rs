use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::organizations::dtos::{
    CreateOrganizationDto, OrganizationListQuery, OrganizationResponseDto, UpdateOrganizationDto,
    VerificationDto,
};
use crate::features::organizations::models::{Organization, OrganizationStats};
use crate::features::organizations::services::OrganizationService;
use crate::shared::types::ApiResponse;

fn to_dtos(organizations: Vec<Organization>) -> Vec<OrganizationResponseDto> {
    organizations.into_iter().map(Into::into).collect()
}

#[utoipa::path(
    get,
    path = "/api/organizations",
    params(OrganizationListQuery),
    responses(
        (status = 200, description = "Organizations sorted by name", body = ApiResponse<Vec<OrganizationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn list_organizations(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    AppQuery(query): AppQuery<OrganizationListQuery>,
) -> Result<Json<ApiResponse<Vec<OrganizationResponseDto>>>> {
    let organizations = service
        .list(query.verified_only, query.search.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(to_dtos(organizations)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    params(
        ("id" = Uuid, Path, description = "Organization ID")
    ),
    responses(
        (status = 200, description = "Organization details", body = ApiResponse<OrganizationResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn get_organization(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrganizationResponseDto>>> {
    let organization = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(organization.into()), None, None)))
}

/// Organizations operating in a region
#[utoipa::path(
    get,
    path = "/api/regions/{id}/organizations",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    responses(
        (status = 200, description = "Organizations in the region", body = ApiResponse<Vec<OrganizationResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn list_region_organizations(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<OrganizationResponseDto>>>> {
    let organizations = service.list_by_region(id).await?;
    Ok(Json(ApiResponse::success(Some(to_dtos(organizations)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/organizations/{id}/stats",
    params(
        ("id" = Uuid, Path, description = "Organization ID")
    ),
    responses(
        (status = 200, description = "Donation statistics", body = ApiResponse<OrganizationStats>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn get_organization_stats(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrganizationStats>>> {
    let stats = service.stats(id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Register an organization. It starts unverified.
#[utoipa::path(
    post,
    path = "/api/organizations",
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = ApiResponse<OrganizationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn create_organization(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    AppJson(dto): AppJson<CreateOrganizationDto>,
) -> Result<(StatusCode, Json<ApiResponse<OrganizationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let organization = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(organization.into()),
            Some("Organization created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/organizations/{id}",
    params(
        ("id" = Uuid, Path, description = "Organization ID")
    ),
    request_body = UpdateOrganizationDto,
    responses(
        (status = 200, description = "Organization updated", body = ApiResponse<OrganizationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization or region not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn update_organization(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateOrganizationDto>,
) -> Result<Json<ApiResponse<OrganizationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let organization = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(organization.into()),
        Some("Organization updated".to_string()),
        None,
    )))
}

/// Set the verification flag (admin only)
#[utoipa::path(
    put,
    path = "/api/organizations/{id}/verification",
    params(
        ("id" = Uuid, Path, description = "Organization ID")
    ),
    request_body = VerificationDto,
    responses(
        (status = 200, description = "Verification updated", body = ApiResponse<OrganizationResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Organization not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn set_organization_verification(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OrganizationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<VerificationDto>,
) -> Result<Json<ApiResponse<OrganizationResponseDto>>> {
    let organization = service.set_verification(id, dto.verified).await?;
    Ok(Json(ApiResponse::success(
        Some(organization.into()),
        Some("Verification updated".to_string()),
        None,
    )))
}
