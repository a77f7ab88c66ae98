// src/handlers/users.rs
//
// Administração de usuários do tenant. A criação reaproveita o fluxo de
// registro (hash de senha fora do executor async); exclusão é sempre
// desativação lógica.

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
        guard::{RequireAccess, UsersManage, UsersView},
        tenancy::TenantContext,
    },
    models::auth::{Role, User},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 8, message = "A senha deve ter no mínimo 8 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

#[utoipa::path(get, path = "/api/client/users",
    responses((status = 200, body = [User])), security(("api_jwt" = [])), tag = "Users")]
pub async fn list_users(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<UsersView>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_repo.list_by_tenant(tenant.0).await?;
    Ok(Json(users))
}

#[utoipa::path(post, path = "/api/client/users", request_body = CreateUserPayload,
    responses((status = 201, body = User), (status = 409, description = "E-mail já cadastrado")),
    security(("api_jwt" = [])), tag = "Users")]
pub async fn create_user(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<UsersManage>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .auth_service
        .create_user(
            &payload.email,
            &payload.password,
            &payload.name,
            payload.role,
            Some(tenant.0),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(put, path = "/api/client/users/{id}", request_body = UpdateUserPayload,
    responses((status = 200, body = User)), security(("api_jwt" = [])), tag = "Users")]
pub async fn update_user(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<UsersManage>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_repo
        .update_user(
            tenant.0,
            id,
            payload.name.as_deref(),
            payload.role,
            payload.direction_id,
            payload.department_id,
            payload.section_id,
        )
        .await?
        .ok_or(AppError::NotFound("Usuário"))?;

    Ok(Json(user))
}

#[utoipa::path(delete, path = "/api/client/users/{id}",
    responses((status = 204, description = "Usuário desativado")),
    security(("api_jwt" = [])), tag = "Users")]
pub async fn deactivate_user(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<UsersManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.user_repo.deactivate(tenant.0, id).await? {
        return Err(AppError::NotFound("Usuário"));
    }
    Ok(StatusCode::NO_CONTENT)
}
