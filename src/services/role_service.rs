use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::role_dto::CreateRoleRequest;
use crate::error::Result;
use crate::models::role::Role;

#[derive(Clone)]
pub struct RoleService {
    pool: PgPool,
}

impl RoleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT * FROM roles
            WHERE organization_id = $1
            ORDER BY role_name
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn create(&self, organization_id: Uuid, payload: CreateRoleRequest) -> Result<Role> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (organization_id, role_name, department, seniority)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(payload.role_name)
        .bind(payload.department)
        .bind(payload.seniority)
        .fetch_one(&self.pool)
        .await?;
        Ok(role)
    }
}
