// src/db/client_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::org::ClientCompany};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        name: &str,
        document: Option<&str>,
    ) -> Result<ClientCompany, AppError> {
        let client = sqlx::query_as::<_, ClientCompany>(
            r#"
            INSERT INTO client_companies (tenant_id, name, document)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(document)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Já existe uma empresa com esse nome.".into());
                }
            }
            e.into()
        })?;

        Ok(client)
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<ClientCompany>, AppError> {
        let clients = sqlx::query_as::<_, ClientCompany>(
            "SELECT * FROM client_companies WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn find(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<ClientCompany>, AppError> {
        let client = sqlx::query_as::<_, ClientCompany>(
            "SELECT * FROM client_companies WHERE id = $2 AND tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }
}
