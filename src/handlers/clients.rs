// src/handlers/clients.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        guard::{ClientsManage, ClientsView, RequireAccess},
        tenancy::TenantContext,
    },
    models::org::ClientCompany,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub document: Option<String>,
}

#[utoipa::path(post, path = "/api/client/companies", request_body = CreateClientPayload,
    responses((status = 201, body = ClientCompany)), security(("api_jwt" = [])), tag = "Clientes")]
pub async fn create_client(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<ClientsManage>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_repo
        .create(tenant.0, &payload.name, payload.document.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(get, path = "/api/client/companies",
    responses((status = 200, body = [ClientCompany])), security(("api_jwt" = [])), tag = "Clientes")]
pub async fn list_clients(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<ClientsView>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_repo.list(tenant.0).await?;
    Ok(Json(clients))
}
