use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    // Application roles live under a namespaced claim set by the identity provider
    #[serde(rename = "https://aidbridge.org/claims", default)]
    custom_claims: Option<CustomClaims>,
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(claims_to_user(token_data.claims))
    }
}

fn claims_to_user(claims: Claims) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: claims.sub,
        name: claims.name.filter(|n| !n.is_empty()),
        email: claims.email.filter(|e| !e.is_empty()),
        roles: claims.custom_claims.unwrap_or_default().roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_custom_namespace_have_no_roles() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "user-1",
            "name": "Amal",
            "email": ""
        }))
        .unwrap();

        let user = claims_to_user(claims);

        assert_eq!(user.user_id, "user-1");
        assert_eq!(user.name.as_deref(), Some("Amal"));
        assert!(user.email.is_none());
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_roles_read_from_custom_namespace() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "user-2",
            "https://aidbridge.org/claims": { "roles": ["admin"] }
        }))
        .unwrap();

        let user = claims_to_user(claims);

        assert!(user.is_admin());
    }
}
