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
use crate::features::auth::model::AuthenticatedUser;
use crate::features::donations::dtos::{
    CreateDonationDto, DateRangeQuery, DonationResponseDto, RecentDonationsQuery, TopDonorDto,
    TopDonorsQuery,
};
use crate::features::donations::models::{Donation, DonationTotals};
use crate::features::donations::services::DonationService;
use crate::shared::constants::DEFAULT_TOP_DONORS_LIMIT;
use crate::shared::listing::{Page, PageRequest};
use crate::shared::types::ApiResponse;

fn to_dtos(donations: Vec<Donation>) -> Vec<DonationResponseDto> {
    donations.into_iter().map(Into::into).collect()
}

/// Donations made by the current user, newest first
#[utoipa::path(
    get,
    path = "/api/me/donations",
    responses(
        (status = 200, description = "Caller's donations", body = ApiResponse<Vec<DonationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn list_my_donations(
    user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
) -> Result<Json<ApiResponse<Vec<DonationResponseDto>>>> {
    let donations = service.list_by_user(&user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(to_dtos(donations)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/donations",
    params(
        ("user_id" = String, Path, description = "User ID (token subject)")
    ),
    responses(
        (status = 200, description = "User's donations", body = ApiResponse<Vec<DonationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn list_user_donations(
    _user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DonationResponseDto>>>> {
    let donations = service.list_by_user(&user_id).await?;
    Ok(Json(ApiResponse::success(Some(to_dtos(donations)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/regions/{id}/donations",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    responses(
        (status = 200, description = "Donations to the region", body = ApiResponse<Vec<DonationResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn list_region_donations(
    _user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<DonationResponseDto>>>> {
    let donations = service.list_by_region(id).await?;
    Ok(Json(ApiResponse::success(Some(to_dtos(donations)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/regions/{id}/donations/stats",
    params(
        ("id" = Uuid, Path, description = "Region ID")
    ),
    responses(
        (status = 200, description = "Donation totals for the region", body = ApiResponse<DonationTotals>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn get_region_donation_stats(
    _user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DonationTotals>>> {
    let stats = service.region_stats(id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Largest donors to a region by summed amount
#[utoipa::path(
    get,
    path = "/api/regions/{id}/donations/top-donors",
    params(
        ("id" = Uuid, Path, description = "Region ID"),
        TopDonorsQuery
    ),
    responses(
        (status = 200, description = "Top donors", body = ApiResponse<Vec<TopDonorDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn get_top_donors(
    _user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    Path(id): Path<Uuid>,
    AppQuery(query): AppQuery<TopDonorsQuery>,
) -> Result<Json<ApiResponse<Vec<TopDonorDto>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_DONORS_LIMIT);
    let donors = service.top_donors(id, limit).await?;
    Ok(Json(ApiResponse::success(Some(donors), None, None)))
}

/// Donation totals within an inclusive time window
#[utoipa::path(
    get,
    path = "/api/donations/stats",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Donation totals", body = ApiResponse<DonationTotals>),
        (status = 400, description = "Missing, malformed or inverted range"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn get_donation_stats_by_date_range(
    _user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    AppQuery(query): AppQuery<DateRangeQuery>,
) -> Result<Json<ApiResponse<DonationTotals>>> {
    let stats = service.stats_by_date_range(query.start, query.end).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/donations/recent",
    params(RecentDonationsQuery),
    responses(
        (status = 200, description = "Page of donations, newest first", body = ApiResponse<Page<DonationResponseDto>>),
        (status = 400, description = "Invalid cursor"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn list_recent_donations(
    _user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    AppQuery(query): AppQuery<RecentDonationsQuery>,
) -> Result<Json<ApiResponse<Page<DonationResponseDto>>>> {
    let request = PageRequest::new(query.num_items, query.cursor);
    let page = service.recent(&request).await?;
    Ok(Json(ApiResponse::success(Some(page.map(Into::into)), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = CreateDonationDto,
    responses(
        (status = 201, description = "Donation recorded", body = ApiResponse<DonationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region or organization not found")
    ),
    tag = "donations",
    security(("bearer_auth" = []))
)]
pub async fn create_donation(
    user: AuthenticatedUser,
    State(service): State<Arc<DonationService>>,
    AppJson(dto): AppJson<CreateDonationDto>,
) -> Result<(StatusCode, Json<ApiResponse<DonationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let donation = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(donation.into()),
            Some("Donation recorded".to_string()),
            None,
        )),
    ))
}
