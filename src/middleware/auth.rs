// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::{TenantContext, TENANT_ID_HEADER},
    models::auth::User,
    services::permissions,
};

/// Valida o Bearer token, carrega o usuário e resolve o conjunto efetivo de
/// permissões (grants do servidor > override do usuário > defaults do papel).
/// Usuário e permissões vão para os extensions; o guard de rota decide depois.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)?;

    let user = app_state
        .auth_service
        .validate_token(bearer.token())
        .await?;

    // Conta desativada (soft-delete) não autentica mais.
    if !user.is_active {
        return Err(AppError::InvalidToken);
    }

    // O tenant vem do cabeçalho quando a rota é multi-tenant; sem ele os
    // grants do servidor não se aplicam e caímos nos defaults do papel.
    let tenant_id = headers
        .get(TENANT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok());

    let server_grants = match tenant_id {
        Some(tid) => app_state.user_repo.list_grants(user.id, tid).await?,
        None => Vec::new(),
    };

    let perms = permissions::resolve(Some(user.role), user.permissions.as_deref(), &server_grants);

    request.extensions_mut().insert(perms);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Igual ao `auth_guard`, mas exige o cabeçalho de tenant e insere o
/// `TenantContext` nos extensions. Usado nos grupos de rotas multi-tenant.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let tenant = TenantContext::from_headers(request.headers())?;
    request.extensions_mut().insert(tenant);

    auth_guard(State(app_state), request, next).await
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
