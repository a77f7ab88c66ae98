// src/services/inventory.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{Asset, AssetKind, AssetStatus, License, LicenseStatus},
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository) -> Self {
        Self { repo }
    }

    // --- Ativos ---

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
        self.repo
            .create_asset(tenant_id, name, kind, status, client_id, user_id, hardware, financial)
            .await
    }

    pub async fn list_assets(&self, tenant_id: Uuid) -> Result<Vec<Asset>, AppError> {
        self.repo.list_assets(tenant_id).await
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
    ) -> Result<Asset, AppError> {
        self.repo
            .update_asset(
                tenant_id, asset_id, name, kind, status, client_id, user_id, hardware, financial,
            )
            .await?
            .ok_or(AppError::NotFound("Ativo"))
    }

    pub async fn delete_asset(&self, tenant_id: Uuid, asset_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_asset(tenant_id, asset_id).await? {
            return Err(AppError::NotFound("Ativo"));
        }
        Ok(())
    }

    // --- Licenças ---

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
        self.repo
            .create_license(
                tenant_id, software, license_key, seats, status, expires_on, client_id, financial,
            )
            .await
    }

    pub async fn list_licenses(&self, tenant_id: Uuid) -> Result<Vec<License>, AppError> {
        self.repo.list_licenses(tenant_id).await
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
    ) -> Result<License, AppError> {
        self.repo
            .update_license(
                tenant_id, license_id, software, license_key, seats, status, expires_on,
                client_id, financial,
            )
            .await?
            .ok_or(AppError::NotFound("Licença"))
    }

    pub async fn delete_license(&self, tenant_id: Uuid, license_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_license(tenant_id, license_id).await? {
            return Err(AppError::NotFound("Licença"));
        }
        Ok(())
    }
}
