// src/handlers/notifications.rs
//
// Notificações são sempre do próprio usuário autenticado; não há guarda de
// permissão além da autenticação.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::notification::Notification,
};

#[utoipa::path(get, path = "/api/notifications",
    responses((status = 200, body = [Notification])), security(("api_jwt" = [])), tag = "Notificações")]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = app_state.notification_repo.list_for_user(user.id).await?;
    Ok(Json(notifications))
}

#[utoipa::path(put, path = "/api/notifications/{id}/read",
    responses((status = 204)), security(("api_jwt" = [])), tag = "Notificações")]
pub async fn mark_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.notification_repo.mark_read(user.id, id).await? {
        return Err(AppError::NotFound("Notificação"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(put, path = "/api/notifications/read-all",
    responses((status = 200, description = "Quantidade de notificações marcadas")),
    security(("api_jwt" = [])), tag = "Notificações")]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.notification_repo.mark_all_read(user.id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}
