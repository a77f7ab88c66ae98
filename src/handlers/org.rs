// src/handlers/org.rs
//
// CRUD da hierarquia organizacional (Diretoria -> Departamento -> Seção).
// Leitura exige organization.view; mutações exigem organization.manage.

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
        guard::{OrgManage, OrgView, RequireAccess},
        tenancy::TenantContext,
    },
    models::org::{Department, Direction, Section, SectionWithHierarchy},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectionPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDirectionPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub direction_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub direction_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,

    #[validate(required(message = "O campo 'departmentId' é obrigatório."))]
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<Uuid>,
}

// ---
// Diretorias
// ---

#[utoipa::path(post, path = "/api/client/directions", request_body = CreateDirectionPayload,
    responses((status = 201, body = Direction)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn create_direction(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Json(payload): Json<CreateDirectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let direction = app_state
        .org_service
        .create_direction(tenant.0, &payload.name, payload.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(direction)))
}

#[utoipa::path(get, path = "/api/client/directions",
    responses((status = 200, body = [Direction])), security(("api_jwt" = [])), tag = "Organização")]
pub async fn list_directions(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgView>,
) -> Result<impl IntoResponse, AppError> {
    let directions = app_state.org_service.list_directions(tenant.0).await?;
    Ok(Json(directions))
}

#[utoipa::path(put, path = "/api/client/directions/{id}", request_body = UpdateDirectionPayload,
    responses((status = 200, body = Direction)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn update_direction(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDirectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let direction = app_state
        .org_service
        .update_direction(
            tenant.0,
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok(Json(direction))
}

#[utoipa::path(delete, path = "/api/client/directions/{id}",
    responses((status = 204), (status = 409, description = "Possui departamentos vinculados")),
    security(("api_jwt" = [])), tag = "Organização")]
pub async fn delete_direction(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.org_service.delete_direction(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Departamentos
// ---

#[utoipa::path(post, path = "/api/client/departments", request_body = CreateDepartmentPayload,
    responses((status = 201, body = Department)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn create_department(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Json(payload): Json<CreateDepartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let department = app_state
        .org_service
        .create_department(
            tenant.0,
            payload.direction_id,
            &payload.name,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(department)))
}

#[utoipa::path(get, path = "/api/client/departments",
    responses((status = 200, body = [Department])), security(("api_jwt" = [])), tag = "Organização")]
pub async fn list_departments(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgView>,
) -> Result<impl IntoResponse, AppError> {
    let departments = app_state.org_service.list_departments(tenant.0).await?;
    Ok(Json(departments))
}

#[utoipa::path(put, path = "/api/client/departments/{id}", request_body = UpdateDepartmentPayload,
    responses((status = 200, body = Department)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn update_department(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let department = app_state
        .org_service
        .update_department(
            tenant.0,
            id,
            payload.direction_id,
            payload.name.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok(Json(department))
}

#[utoipa::path(delete, path = "/api/client/departments/{id}",
    responses((status = 204), (status = 409, description = "Possui seções vinculadas")),
    security(("api_jwt" = [])), tag = "Organização")]
pub async fn delete_department(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .org_service
        .delete_department(tenant.0, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Seções
// ---

#[utoipa::path(post, path = "/api/client/sections", request_body = CreateSectionPayload,
    responses((status = 201, body = Section)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn create_section(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Json(payload): Json<CreateSectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let department_id = payload
        .department_id
        .ok_or_else(|| AppError::BadRequest("O campo 'departmentId' é obrigatório.".into()))?;

    let section = app_state
        .org_service
        .create_section(
            tenant.0,
            department_id,
            &payload.name,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(section)))
}

// A listagem traz a diretoria herdada via departamento.
#[utoipa::path(get, path = "/api/client/sections",
    responses((status = 200, body = [SectionWithHierarchy])), security(("api_jwt" = [])), tag = "Organização")]
pub async fn list_sections(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgView>,
) -> Result<impl IntoResponse, AppError> {
    let sections = app_state.org_service.list_sections(tenant.0).await?;
    Ok(Json(sections))
}

#[utoipa::path(put, path = "/api/client/sections/{id}", request_body = UpdateSectionPayload,
    responses((status = 200, body = Section)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn update_section(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let section = app_state
        .org_service
        .update_section(
            tenant.0,
            id,
            payload.department_id,
            payload.name.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok(Json(section))
}

#[utoipa::path(delete, path = "/api/client/sections/{id}",
    responses((status = 204)), security(("api_jwt" = [])), tag = "Organização")]
pub async fn delete_section(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<OrgManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.org_service.delete_section(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
