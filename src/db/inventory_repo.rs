// src/db/inventory_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Asset, AssetKind, AssetStatus, License, LicenseStatus},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ATIVOS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_asset(
        &self,
        tenant_id: Uuid,
        name: &str,
        kind: AssetKind,
        status: AssetStatus,
        client_id: Option<Uuid>,
        user_id: Option<Uuid>,
        hardware: Option<&serde_json::Value>,
        financial: Option<&serde_json::Value>,
    ) -> Result<Asset, AppError> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                tenant_id, name, kind, status,
                client_id, user_id, hardware, financial
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(kind)
        .bind(status)
        .bind(client_id)
        .bind(user_id)
        .bind(hardware)
        .bind(financial)
        .fetch_one(&self.pool)
        .await?;

        Ok(asset)
    }

    pub async fn list_assets(&self, tenant_id: Uuid) -> Result<Vec<Asset>, AppError> {
        let assets = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_asset(
        &self,
        tenant_id: Uuid,
        asset_id: Uuid,
        name: Option<&str>,
        kind: Option<AssetKind>,
        status: Option<AssetStatus>,
        client_id: Option<Uuid>,
        user_id: Option<Uuid>,
        hardware: Option<&serde_json::Value>,
        financial: Option<&serde_json::Value>,
    ) -> Result<Option<Asset>, AppError> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                name       = COALESCE($3, name),
                kind       = COALESCE($4, kind),
                status     = COALESCE($5, status),
                client_id  = COALESCE($6, client_id),
                user_id    = COALESCE($7, user_id),
                hardware   = COALESCE($8, hardware),
                financial  = COALESCE($9, financial),
                updated_at = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(asset_id)
        .bind(name)
        .bind(kind)
        .bind(status)
        .bind(client_id)
        .bind(user_id)
        .bind(hardware)
        .bind(financial)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }

    // Exclusão definitiva, como na API original.
    pub async fn delete_asset(&self, tenant_id: Uuid, asset_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $2 AND tenant_id = $1")
            .bind(tenant_id)
            .bind(asset_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  LICENÇAS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_license(
        &self,
        tenant_id: Uuid,
        software: &str,
        license_key: Option<&str>,
        seats: i32,
        status: LicenseStatus,
        expires_on: Option<NaiveDate>,
        client_id: Option<Uuid>,
        financial: Option<&serde_json::Value>,
    ) -> Result<License, AppError> {
        let license = sqlx::query_as::<_, License>(
            r#"
            INSERT INTO licenses (
                tenant_id, software, license_key, seats,
                status, expires_on, client_id, financial
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(software)
        .bind(license_key)
        .bind(seats)
        .bind(status)
        .bind(expires_on)
        .bind(client_id)
        .bind(financial)
        .fetch_one(&self.pool)
        .await?;

        Ok(license)
    }

    pub async fn list_licenses(&self, tenant_id: Uuid) -> Result<Vec<License>, AppError> {
        let licenses = sqlx::query_as::<_, License>(
            "SELECT * FROM licenses WHERE tenant_id = $1 ORDER BY software ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(licenses)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_license(
        &self,
        tenant_id: Uuid,
        license_id: Uuid,
        software: Option<&str>,
        license_key: Option<&str>,
        seats: Option<i32>,
        status: Option<LicenseStatus>,
        expires_on: Option<NaiveDate>,
        client_id: Option<Uuid>,
        financial: Option<&serde_json::Value>,
    ) -> Result<Option<License>, AppError> {
        let license = sqlx::query_as::<_, License>(
            r#"
            UPDATE licenses SET
                software    = COALESCE($3, software),
                license_key = COALESCE($4, license_key),
                seats       = COALESCE($5, seats),
                status      = COALESCE($6, status),
                expires_on  = COALESCE($7, expires_on),
                client_id   = COALESCE($8, client_id),
                financial   = COALESCE($9, financial),
                updated_at  = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(license_id)
        .bind(software)
        .bind(license_key)
        .bind(seats)
        .bind(status)
        .bind(expires_on)
        .bind(client_id)
        .bind(financial)
        .fetch_optional(&self.pool)
        .await?;

        Ok(license)
    }

    pub async fn delete_license(
        &self,
        tenant_id: Uuid,
        license_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $2 AND tenant_id = $1")
            .bind(tenant_id)
            .bind(license_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
