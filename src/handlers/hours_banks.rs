// src/handlers/hours_banks.rs
//
// API do banco de horas. As regras de saldo moram no service; aqui só
// validamos o formato do payload e identificamos quem executou a operação
// para a trilha de transações.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        guard::{HoursManage, HoursView, RequireAccess},
        tenancy::TenantContext,
    },
    models::hours_bank::{HoursBank, HoursBankDetail, HoursBankTransaction},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankPayload {
    #[validate(required(message = "O campo 'clientId' é obrigatório."))]
    pub client_id: Option<Uuid>,

    #[schema(value_type = f64, example = 40.0)]
    pub total_hours: Decimal,

    #[serde(default)]
    pub allow_negative_balance: bool,

    /// Saldo mais negativo permitido (<= 0). Só é aceito junto com
    /// `allowNegativeBalance`.
    #[schema(value_type = Option<f64>)]
    pub min_balance: Option<Decimal>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddHoursPayload {
    #[schema(value_type = f64, example = 10.0)]
    pub hours: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumeHoursPayload {
    #[schema(value_type = f64, example = 2.5)]
    pub hours: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    /// Chamado concluído que originou o consumo, quando houver.
    pub ticket_id: Option<Uuid>,
}

#[utoipa::path(post, path = "/api/hours-banks", request_body = CreateBankPayload,
    responses((status = 201, body = HoursBank)), security(("api_jwt" = [])), tag = "Banco de Horas")]
pub async fn create_bank(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<HoursManage>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBankPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client_id = payload
        .client_id
        .ok_or_else(|| AppError::BadRequest("O campo 'clientId' é obrigatório.".into()))?;

    let bank = app_state
        .hours_bank_service
        .create_bank(
            tenant.0,
            client_id,
            payload.total_hours,
            payload.allow_negative_balance,
            payload.min_balance,
            payload.start_date,
            payload.end_date,
            user.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(bank)))
}

#[utoipa::path(get, path = "/api/hours-banks",
    responses((status = 200, body = [HoursBank])), security(("api_jwt" = [])), tag = "Banco de Horas")]
pub async fn list_banks(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<HoursView>,
) -> Result<impl IntoResponse, AppError> {
    let banks = app_state.hours_bank_service.list_banks(tenant.0).await?;
    Ok(Json(banks))
}

#[utoipa::path(get, path = "/api/hours-banks/{id}",
    responses((status = 200, body = HoursBankDetail)), security(("api_jwt" = [])), tag = "Banco de Horas")]
pub async fn get_bank(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<HoursView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.hours_bank_service.get_detail(tenant.0, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(post, path = "/api/hours-banks/{id}/add", request_body = AddHoursPayload,
    responses((status = 200, body = HoursBank)), security(("api_jwt" = [])), tag = "Banco de Horas")]
pub async fn add_hours(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<HoursManage>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddHoursPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let bank = app_state
        .hours_bank_service
        .add_hours(tenant.0, id, payload.hours, &payload.description, user.id)
        .await?;

    Ok(Json(bank))
}

#[utoipa::path(post, path = "/api/hours-banks/{id}/consume", request_body = ConsumeHoursPayload,
    responses(
        (status = 200, body = HoursBank),
        (status = 422, description = "Saldo insuficiente para o consumo")
    ),
    security(("api_jwt" = [])), tag = "Banco de Horas")]
pub async fn consume_hours(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<HoursManage>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConsumeHoursPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let bank = app_state
        .hours_bank_service
        .consume_hours(
            tenant.0,
            id,
            payload.hours,
            &payload.description,
            payload.ticket_id,
            user.id,
        )
        .await?;

    Ok(Json(bank))
}

#[utoipa::path(get, path = "/api/hours-banks/{id}/transactions",
    responses((status = 200, body = [HoursBankTransaction])), security(("api_jwt" = [])), tag = "Banco de Horas")]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireAccess<HoursView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state
        .hours_bank_service
        .list_transactions(tenant.0, id)
        .await?;

    Ok(Json(transactions))
}
