use std::collections::HashMap;
use std::sync::Arc;

use minijinja::Value;
use serde::Serialize;
use uuid::Uuid;

use super::RecommendationContextSource;
use crate::core::error::{AppError, Result};
use crate::features::organizations::models::Organization;
use crate::features::recommendations::models::{RawRecommendation, Recommendation};
use crate::features::regions::models::Region;
use crate::shared::llm::{parse_validated, CompletionClient, CompletionRequest, LlmResponse};
use crate::shared::prompts::render_template;

const SYSTEM_TEMPLATE: &str = "recommendation/system.jinja";
const USER_TEMPLATE: &str = "recommendation/user.jinja";

#[derive(Debug, Serialize)]
struct RegionFacts<'a> {
    name: &'a str,
    severity_level: i32,
    housing_loss: f64,
    income_loss: f64,
    assets_loss: f64,
    total_loss: f64,
    predicted_loss: f64,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct OrganizationFacts<'a> {
    name: &'a str,
    verified: bool,
    description: &'a str,
}

/// Render the system and user prompts for one region
pub fn build_request(region: &Region, organizations: &[Organization]) -> Result<CompletionRequest> {
    let loss = region.economic_loss();
    let facts = RegionFacts {
        name: &region.name,
        severity_level: region.severity_level,
        housing_loss: loss.housing,
        income_loss: loss.income,
        assets_loss: loss.assets,
        total_loss: loss.total,
        predicted_loss: region.predicted_loss,
        description: &region.description,
    };
    let orgs: Vec<OrganizationFacts<'_>> = organizations
        .iter()
        .map(|o| OrganizationFacts {
            name: &o.name,
            verified: o.verified,
            description: &o.description,
        })
        .collect();

    let mut system_ctx = HashMap::new();
    system_ctx.insert("json_schema", Value::from(RawRecommendation::json_schema_string()));

    let mut user_ctx = HashMap::new();
    user_ctx.insert("region", Value::from_serialize(&facts));
    user_ctx.insert("organizations", Value::from_serialize(&orgs));

    Ok(CompletionRequest {
        system: render_template(SYSTEM_TEMPLATE, &system_ctx)?,
        user: render_template(USER_TEMPLATE, &user_ctx)?,
    })
}

/// Assembles region context, asks the completion service and validates the answer
pub struct RecommendationService {
    context: Arc<dyn RecommendationContextSource>,
    client: Arc<dyn CompletionClient>,
}

impl RecommendationService {
    pub fn new(
        context: Arc<dyn RecommendationContextSource>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self { context, client }
    }

    /// One completion call per invocation, no retry. NotFound if the region
    /// is unknown, in which case the completion service is never called.
    pub async fn recommend(&self, region_id: Uuid) -> Result<Recommendation> {
        let region = self
            .context
            .region(region_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", region_id)))?;
        let organizations = self.context.organizations_in(region_id).await?;

        let request = build_request(&region, &organizations)?;

        tracing::info!(
            "Requesting recommendation for region {} ({} organizations)",
            region_id,
            organizations.len()
        );
        let text = self.client.complete(request).await?;

        parse_validated::<RawRecommendation>(&text).map_err(AppError::InvalidCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::donations::models::DonationType;
    use crate::features::recommendations::models::UrgencyLevel;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    struct InMemorySource {
        regions: Vec<Region>,
        organizations: Vec<Organization>,
    }

    #[async_trait]
    impl RecommendationContextSource for InMemorySource {
        async fn region(&self, region_id: Uuid) -> Result<Option<Region>> {
            Ok(self.regions.iter().find(|r| r.id == region_id).cloned())
        }

        async fn organizations_in(&self, region_id: Uuid) -> Result<Vec<Organization>> {
            Ok(self
                .organizations
                .iter()
                .filter(|o| o.operates_in(region_id))
                .cloned()
                .collect())
        }
    }

    /// Replies with a canned answer and records every request
    struct FakeClient {
        reply: Result<String>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(AppError::ExternalServiceError("quota exceeded".to_string())),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<CompletionRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            self.calls.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(AppError::ExternalServiceError(msg)) => {
                    Err(AppError::ExternalServiceError(msg.clone()))
                }
                Err(e) => Err(AppError::Internal(e.to_string())),
            }
        }
    }

    const VALID: &str = r#"{"recommendation":"Send water purification supplies","suggestedAmount":250,"urgencyLevel":"medium","donationType":"supplies","reasoning":"Water access is the main gap"}"#;

    fn region() -> Region {
        Region {
            id: Uuid::now_v7(),
            name: "Yemen - Sana'a".to_string(),
            lat: 15.3694,
            lng: 44.191,
            severity_level: 8,
            housing_loss: 1_800_000_000.0,
            income_loss: 1_500_000_000.0,
            assets_loss: 2_200_000_000.0,
            total_loss: 5_500_000_000.0,
            predicted_loss: 6_800_000_000.0,
            description: "Prolonged conflict affecting civilian infrastructure".to_string(),
            last_updated: Utc::now(),
        }
    }

    fn organization(name: &str, region_id: Uuid, verified: bool) -> Organization {
        Organization {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: format!("{} mission", name),
            region_ids: vec![region_id],
            contact_email: "org@example.org".to_string(),
            website: None,
            verified,
            volunteers_available: 0,
            shelter_capacity: 0,
            food_stock_tons: 0.0,
            water_stock_liters: 0.0,
            medical_supply_units: 0,
            transport_vehicles: 0,
            emergency_fund_usd: 0.0,
            field_hospitals: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(source: InMemorySource, client: Arc<FakeClient>) -> RecommendationService {
        RecommendationService::new(Arc::new(source), client)
    }

    #[tokio::test]
    async fn test_unknown_region_never_calls_client() {
        let client = FakeClient::replying(VALID);
        let svc = service(
            InMemorySource {
                regions: vec![region()],
                organizations: Vec::new(),
            },
            client.clone(),
        );

        let result = svc.recommend(Uuid::now_v7()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_completion_is_returned() {
        let r = region();
        let id = r.id;
        let client = FakeClient::replying(VALID);
        let svc = service(
            InMemorySource {
                regions: vec![r],
                organizations: vec![organization("Water for Peace", id, false)],
            },
            client.clone(),
        );

        let rec = svc.recommend(id).await.unwrap();

        assert_eq!(rec.urgency_level, UrgencyLevel::Medium);
        assert_eq!(rec.donation_type, DonationType::Supplies);
        assert_eq!(rec.suggested_amount, 250.0);
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_region_and_organizations() {
        let r = region();
        let id = r.id;
        let client = FakeClient::replying(VALID);
        let svc = service(
            InMemorySource {
                regions: vec![r],
                organizations: vec![
                    organization("Water for Peace", id, false),
                    organization("Children's Hope Foundation", id, true),
                    organization("Elsewhere Relief", Uuid::now_v7(), true),
                ],
            },
            client.clone(),
        );

        svc.recommend(id).await.unwrap();

        let request = &client.calls()[0];
        assert!(request.system.contains("humanitarian aid"));
        assert!(request.system.contains("urgencyLevel"));
        assert!(request.user.contains("Region: Yemen - Sana'a"));
        assert!(request.user.contains("Severity Level: 8/10"));
        assert!(request.user.contains("- Water for Peace (Unverified): Water for Peace mission"));
        assert!(request.user.contains("- Children's Hope Foundation (Verified)"));
        assert!(!request.user.contains("Elsewhere Relief"));
    }

    #[test]
    fn test_prompt_without_organizations() {
        let r = region();
        let request = build_request(&r, &[]).unwrap();

        assert!(request.user.contains("None on record"));
    }

    #[tokio::test]
    async fn test_invalid_urgency_is_invalid_completion() {
        let r = region();
        let id = r.id;
        let client = FakeClient::replying(&VALID.replace("medium", "critical"));
        let svc = service(
            InMemorySource {
                regions: vec![r],
                organizations: Vec::new(),
            },
            client,
        );

        let result = svc.recommend(id).await;

        assert!(matches!(result, Err(AppError::InvalidCompletion(msg)) if msg.contains("urgencyLevel")));
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_completion() {
        let r = region();
        let id = r.id;
        let client = FakeClient::replying(r#"{"recommendation":"Give","suggestedAmount":10}"#);
        let svc = service(
            InMemorySource {
                regions: vec![r],
                organizations: Vec::new(),
            },
            client,
        );

        let result = svc.recommend(id).await;

        assert!(matches!(result, Err(AppError::InvalidCompletion(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let r = region();
        let id = r.id;
        let client = FakeClient::failing();
        let svc = service(
            InMemorySource {
                regions: vec![r],
                organizations: Vec::new(),
            },
            client.clone(),
        );

        let result = svc.recommend(id).await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(msg)) if msg == "quota exceeded"));
        assert_eq!(client.calls().len(), 1);
    }
}
