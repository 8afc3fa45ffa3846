use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::organization::Organization;
use crate::models::user::User;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves the token subject to a user row, provisioning the user (and
    /// an organization when none exists yet) on first login.
    pub async fn current(&self, claims: &Claims) -> Result<User> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| Error::Unauthorized("Token subject is not a user id".into()))?;

        let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        if let Some(user) = existing {
            return Ok(user);
        }

        self.bootstrap(user_id, claims).await
    }

    pub async fn organization(&self, organization_id: Uuid) -> Result<Organization> {
        let organization = sqlx::query_as::<_, Organization>(
            "SELECT * FROM organizations WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(organization)
    }

    async fn bootstrap(&self, user_id: Uuid, claims: &Claims) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let existing_org = sqlx::query_scalar::<_, Uuid>(
            "SELECT organization_id FROM organizations ORDER BY created_at LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let organization_id = match existing_org {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, Uuid>(
                    "INSERT INTO organizations (organization_name) VALUES ($1) RETURNING organization_id",
                )
                .bind("My Organization")
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let email = claims.email.clone().unwrap_or_default();
        let full_name = claims.name.clone().or_else(|| {
            email
                .split('@')
                .next()
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        });

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, organization_id, role, email, full_name)
            VALUES ($1, $2, 'recruiter', $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(organization_id)
        .bind(email)
        .bind(full_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(user_id = %user_id, "provisioned user on first login");
        Ok(user)
    }
}
