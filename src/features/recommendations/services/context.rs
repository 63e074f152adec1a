use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::organizations::models::Organization;
use crate::features::organizations::OrganizationService;
use crate::features::regions::models::Region;
use crate::features::regions::RegionService;

/// Facts a recommendation is assembled from
#[async_trait]
pub trait RecommendationContextSource: Send + Sync {
    async fn region(&self, region_id: Uuid) -> Result<Option<Region>>;

    /// Organizations whose region set contains `region_id`
    async fn organizations_in(&self, region_id: Uuid) -> Result<Vec<Organization>>;
}

pub struct PgContextSource {
    regions: Arc<RegionService>,
    organizations: Arc<OrganizationService>,
}

impl PgContextSource {
    pub fn new(regions: Arc<RegionService>, organizations: Arc<OrganizationService>) -> Self {
        Self {
            regions,
            organizations,
        }
    }
}

#[async_trait]
impl RecommendationContextSource for PgContextSource {
    async fn region(&self, region_id: Uuid) -> Result<Option<Region>> {
        self.regions.find(region_id).await
    }

    async fn organizations_in(&self, region_id: Uuid) -> Result<Vec<Organization>> {
        self.organizations.list_by_region(region_id).await
    }
}
