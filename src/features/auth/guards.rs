//! Role-based authorization guards.
//!
//! Any authenticated caller may browse data, donate and register organizations.
//! Verifying organizations and editing region figures requires the `admin` role.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for privileged mutations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{with_admin_auth, with_user_auth};
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.user_id
    }

    fn router() -> Router {
        Router::new().route("/admin", get(admin_only))
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();

        let response = server.get("/admin").await;

        response.assert_status_ok();
        response.assert_text("test-admin");
    }

    #[tokio::test]
    async fn test_regular_user_is_forbidden() {
        let server = TestServer::new(with_user_auth(router())).unwrap();

        let response = server.get("/admin").await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/admin").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
