// src/handlers/inventory.rs
//
// Inventário: ativos de hardware e licenças de software. Os campos
// específicos (hardware, financeiro) viajam como JSON livre.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        guard::{
            InventoryManage, InventoryView, LicensesManage, LicensesView, RequireAccess,
        },
        tenancy::TenantContext,
    },
    models::inventory::{Asset, AssetKind, AssetStatus, License, LicenseStatus},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub kind: AssetKind,
    pub status: AssetStatus,
    pub client_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    #[schema(value_type = Option<Object>)]
    pub hardware: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub financial: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetPayload {
    pub name: Option<String>,
    pub kind: Option<AssetKind>,
    pub status: Option<AssetStatus>,
    pub client_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    #[schema(value_type = Option<Object>)]
    pub hardware: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub financial: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicensePayload {
    #[validate(length(min = 1, message = "O nome do software é obrigatório."))]
    pub software: String,
    pub license_key: Option<String>,

    #[validate(range(min = 1, message = "A quantidade de assentos deve ser no mínimo 1."))]
    pub seats: i32,

    pub status: LicenseStatus,
    pub expires_on: Option<NaiveDate>,
    pub client_id: Option<Uuid>,
    #[schema(value_type = Option<Object>)]
    pub financial: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicensePayload {
    pub software: Option<String>,
    pub license_key: Option<String>,
    pub seats: Option<i32>,
    pub status: Option<LicenseStatus>,
    pub expires_on: Option<NaiveDate>,
    pub client_id: Option<Uuid>,
    #[schema(value_type = Option<Object>)]
    pub financial: Option<serde_json::Value>,
}

// ---
// Ativos
// ---

#[utoipa::path(post, path = "/api/assets", request_body = CreateAssetPayload,
    responses((status = 201, body = Asset)), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn create_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<InventoryManage>,
    Json(payload): Json<CreateAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let asset = app_state
        .inventory_service
        .create_asset(
            tenant.0,
            &payload.name,
            payload.kind,
            payload.status,
            payload.client_id,
            payload.user_id,
            payload.hardware.as_ref(),
            payload.financial.as_ref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

#[utoipa::path(get, path = "/api/assets",
    responses((status = 200, body = [Asset])), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn list_assets(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<InventoryView>,
) -> Result<impl IntoResponse, AppError> {
    let assets = app_state.inventory_service.list_assets(tenant.0).await?;
    Ok(Json(assets))
}

#[utoipa::path(put, path = "/api/assets/{id}", request_body = UpdateAssetPayload,
    responses((status = 200, body = Asset)), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn update_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<InventoryManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    let asset = app_state
        .inventory_service
        .update_asset(
            tenant.0,
            id,
            payload.name.as_deref(),
            payload.kind,
            payload.status,
            payload.client_id,
            payload.user_id,
            payload.hardware.as_ref(),
            payload.financial.as_ref(),
        )
        .await?;

    Ok(Json(asset))
}

#[utoipa::path(delete, path = "/api/assets/{id}",
    responses((status = 204)), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn delete_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<InventoryManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_asset(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Licenças
// ---

#[utoipa::path(post, path = "/api/licenses", request_body = CreateLicensePayload,
    responses((status = 201, body = License)), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn create_license(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<LicensesManage>,
    Json(payload): Json<CreateLicensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let license = app_state
        .inventory_service
        .create_license(
            tenant.0,
            &payload.software,
            payload.license_key.as_deref(),
            payload.seats,
            payload.status,
            payload.expires_on,
            payload.client_id,
            payload.financial.as_ref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(license)))
}

#[utoipa::path(get, path = "/api/licenses",
    responses((status = 200, body = [License])), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn list_licenses(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<LicensesView>,
) -> Result<impl IntoResponse, AppError> {
    let licenses = app_state.inventory_service.list_licenses(tenant.0).await?;
    Ok(Json(licenses))
}

#[utoipa::path(put, path = "/api/licenses/{id}", request_body = UpdateLicensePayload,
    responses((status = 200, body = License)), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn update_license(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<LicensesManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLicensePayload>,
) -> Result<impl IntoResponse, AppError> {
    let license = app_state
        .inventory_service
        .update_license(
            tenant.0,
            id,
            payload.software.as_deref(),
            payload.license_key.as_deref(),
            payload.seats,
            payload.status,
            payload.expires_on,
            payload.client_id,
            payload.financial.as_ref(),
        )
        .await?;

    Ok(Json(license))
}

#[utoipa::path(delete, path = "/api/licenses/{id}",
    responses((status = 204)), security(("api_jwt" = [])), tag = "Inventário")]
pub async fn delete_license(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<LicensesManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_license(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
