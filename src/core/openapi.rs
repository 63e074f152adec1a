use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::donations::{
    dtos as donations_dtos, handlers as donations_handlers, models as donations_models,
};
use crate::features::individuals::{
    dtos as individuals_dtos, handlers as individuals_handlers, models as individuals_models,
};
use crate::features::organizations::{
    dtos as organizations_dtos, handlers as organizations_handlers,
    models as organizations_models,
};
use crate::features::recommendations::{
    handlers as recommendations_handlers, models as recommendations_models,
};
use crate::features::regions::{
    dtos as regions_dtos, handlers as regions_handlers, models as regions_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::listing::{Page, SortOrder};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::get_me,
        // Regions
        regions_handlers::list_regions,
        regions_handlers::get_region,
        regions_handlers::list_regions_by_severity,
        regions_handlers::get_economic_stats,
        regions_handlers::update_region,
        regions_handlers::update_prediction,
        // Donations
        donations_handlers::list_my_donations,
        donations_handlers::list_user_donations,
        donations_handlers::list_region_donations,
        donations_handlers::get_region_donation_stats,
        donations_handlers::get_top_donors,
        donations_handlers::get_donation_stats_by_date_range,
        donations_handlers::list_recent_donations,
        donations_handlers::create_donation,
        // Organizations
        organizations_handlers::list_organizations,
        organizations_handlers::get_organization,
        organizations_handlers::list_region_organizations,
        organizations_handlers::get_organization_stats,
        organizations_handlers::create_organization,
        organizations_handlers::update_organization,
        organizations_handlers::set_organization_verification,
        // Individuals
        individuals_handlers::list_individuals,
        individuals_handlers::get_statistics,
        individuals_handlers::export_individuals,
        // Recommendations
        recommendations_handlers::get_recommendation,
    ),
    components(
        schemas(
            // Shared
            Meta,
            SortOrder,
            auth::model::AuthenticatedUser,
            // Users
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            // Regions
            regions_dtos::RegionResponseDto,
            regions_dtos::CoordinatesDto,
            regions_dtos::EconomicLossInput,
            regions_dtos::UpdateRegionDto,
            regions_dtos::UpdatePredictionDto,
            regions_models::EconomicLoss,
            regions_models::EconomicStats,
            ApiResponse<Vec<regions_dtos::RegionResponseDto>>,
            ApiResponse<regions_dtos::RegionResponseDto>,
            ApiResponse<regions_models::EconomicStats>,
            // Donations
            donations_models::DonationType,
            donations_models::DonationTotals,
            donations_dtos::CreateDonationDto,
            donations_dtos::DonationResponseDto,
            donations_dtos::TopDonorDto,
            Page<donations_dtos::DonationResponseDto>,
            ApiResponse<Vec<donations_dtos::DonationResponseDto>>,
            ApiResponse<donations_dtos::DonationResponseDto>,
            ApiResponse<donations_models::DonationTotals>,
            ApiResponse<Vec<donations_dtos::TopDonorDto>>,
            ApiResponse<Page<donations_dtos::DonationResponseDto>>,
            // Organizations
            organizations_dtos::CreateOrganizationDto,
            organizations_dtos::UpdateOrganizationDto,
            organizations_dtos::VerificationDto,
            organizations_dtos::OrganizationResponseDto,
            organizations_models::OrganizationStats,
            organizations_models::TypeTotal,
            ApiResponse<Vec<organizations_dtos::OrganizationResponseDto>>,
            ApiResponse<organizations_dtos::OrganizationResponseDto>,
            ApiResponse<organizations_models::OrganizationStats>,
            // Individuals
            individuals_dtos::IndividualSortField,
            individuals_dtos::IndividualResponseDto,
            individuals_models::IndividualStatistics,
            Page<individuals_dtos::IndividualResponseDto>,
            ApiResponse<Page<individuals_dtos::IndividualResponseDto>>,
            ApiResponse<individuals_models::IndividualStatistics>,
            // Recommendations
            recommendations_models::Recommendation,
            recommendations_models::UrgencyLevel,
            ApiResponse<recommendations_models::Recommendation>,
        )
    ),
    tags(
        (name = "users", description = "Current user record"),
        (name = "regions", description = "Conflict regions, severity and economic loss"),
        (name = "donations", description = "Donations, totals and donor rankings"),
        (name = "organizations", description = "Aid organizations and verification"),
        (name = "individuals", description = "Displaced individuals, statistics and CSV export"),
        (name = "recommendations", description = "Completion-backed donation recommendations"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "AidBridge API",
        version = "0.1.0",
        description = "API documentation for AidBridge",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
