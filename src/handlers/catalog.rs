// src/handlers/catalog.rs
//
// Catálogo de serviços: categorias hierárquicas e itens solicitáveis. Itens
// herdam da categoria o roteamento organizacional que não definirem.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        guard::{CatalogManage, CatalogView, RequireAccess},
        tenancy::TenantContext,
    },
    models::catalog::{CatalogCategory, CatalogItem, CatalogItemType},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    #[validate(required(message = "O campo 'categoryId' é obrigatório."))]
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub item_type: CatalogItemType,
    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub item_type: Option<CatalogItemType>,
    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

// ---
// Categorias
// ---

#[utoipa::path(post, path = "/api/catalog/categories", request_body = CreateCategoryPayload,
    responses((status = 201, body = CatalogCategory)), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn create_category(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogManage>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state
        .catalog_service
        .create_category(
            tenant.0,
            payload.parent_id,
            &payload.name,
            payload.description.as_deref(),
            payload.direction_id,
            payload.department_id,
            payload.section_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(get, path = "/api/catalog/categories",
    responses((status = 200, body = [CatalogCategory])), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn list_categories(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogView>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories(tenant.0).await?;
    Ok(Json(categories))
}

#[utoipa::path(delete, path = "/api/catalog/categories/{id}",
    responses((status = 204), (status = 409, description = "Possui subcategorias ou itens")),
    security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn delete_category(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_category(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Itens
// ---

#[utoipa::path(post, path = "/api/catalog/items", request_body = CreateItemPayload,
    responses((status = 201, body = CatalogItem)), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn create_item(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogManage>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category_id = payload
        .category_id
        .ok_or_else(|| AppError::BadRequest("O campo 'categoryId' é obrigatório.".into()))?;

    let item = app_state
        .catalog_service
        .create_item(
            tenant.0,
            category_id,
            &payload.name,
            payload.description.as_deref(),
            payload.item_type,
            payload.direction_id,
            payload.department_id,
            payload.section_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(get, path = "/api/catalog/items",
    responses((status = 200, body = [CatalogItem])), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn list_items(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogView>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.catalog_service.list_items(tenant.0).await?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/api/catalog/categories/{id}/items",
    responses((status = 200, body = [CatalogItem])), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn list_items_by_category(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state
        .catalog_service
        .list_items_by_category(tenant.0, id)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(put, path = "/api/catalog/items/{id}", request_body = UpdateItemPayload,
    responses((status = 200, body = CatalogItem)), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn update_item(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .catalog_service
        .update_item(
            tenant.0,
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.item_type,
            payload.direction_id,
            payload.department_id,
            payload.section_id,
        )
        .await?;

    Ok(Json(item))
}

#[utoipa::path(delete, path = "/api/catalog/items/{id}",
    responses((status = 204)), security(("api_jwt" = [])), tag = "Catálogo")]
pub async fn delete_item(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<CatalogManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_item(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
