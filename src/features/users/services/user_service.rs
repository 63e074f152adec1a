use std::collections::HashMap;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::models::User;

/// User directory backing donor display records
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or refresh the caller's record from token claims.
    ///
    /// Claims that are absent leave stored values untouched.
    pub async fn upsert(&self, user: &AuthenticatedUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                email = COALESCE(EXCLUDED.email, users.email),
                updated_at = NOW()
            RETURNING id, name, email, image, created_at, updated_at
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert user {}: {:?}", user.user_id, e);
            AppError::Database(e)
        })
    }

    /// Resolve many users at once. Ids without a record are simply absent from the map.
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<HashMap<String, User>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, image, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch users by ids: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
    }
}
