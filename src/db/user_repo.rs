// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
        name: &str,
        role: Role,
        tenant_id: Option<Uuid>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, role, tenant_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .bind(tenant_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    pub async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_user(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        name: Option<&str>,
        role: Option<Role>,
        direction_id: Option<Uuid>,
        department_id: Option<Uuid>,
        section_id: Option<Uuid>,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name          = COALESCE($3, name),
                role          = COALESCE($4, role),
                direction_id  = COALESCE($5, direction_id),
                department_id = COALESCE($6, department_id),
                section_id    = COALESCE($7, section_id),
                updated_at    = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(name)
        .bind(role)
        .bind(direction_id)
        .bind(department_id)
        .bind(section_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // "Excluir" usuário é desativar: a linha nunca é removida.
    pub async fn deactivate(&self, tenant_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = now()
             WHERE id = $2 AND tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lista RBAC emitida pelo servidor para o par (usuário, tenant).
    /// É a entrada de maior precedência do resolvedor de permissões.
    pub async fn list_grants(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Vec<String>, AppError> {
        let grants = sqlx::query_scalar::<_, String>(
            "SELECT permission FROM user_grants
             WHERE user_id = $1 AND tenant_id = $2
             ORDER BY permission",
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grants)
    }
}
