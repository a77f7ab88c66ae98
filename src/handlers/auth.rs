// src/handlers/auth.rs

use axum::{extract::State, http::HeaderMap, Extension, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, User},
    services::permissions::{self, EffectivePermissions, MenuItem},
};

/// Registro de conta. A resposta já carrega a lista de permissões efetivas
/// (aqui sempre os defaults do papel: não há grants antes do primeiro login).
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterUserPayload,
    responses((status = 200, body = AuthResponse)),
    tag = "Auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, user) = app_state
        .auth_service
        .register_user(
            &payload.email,
            &payload.password,
            &payload.name,
            payload.role,
            payload.tenant_id,
        )
        .await?;

    let perms = permissions::resolve(Some(user.role), user.permissions.as_deref(), &[]);

    Ok(Json(AuthResponse {
        token,
        permissions: perms.to_sorted_list(),
        permission_source: perms.source().as_str().to_string(),
    }))
}

/// Login. O frontend consome daqui a lista RBAC: se o cabeçalho de tenant
/// vier na requisição, os grants do servidor entram na resolução com
/// precedência máxima.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginUserPayload,
    responses((status = 200, body = AuthResponse), (status = 401, description = "Credenciais inválidas")),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, user) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    let server_grants = match TenantContext::from_headers(&headers) {
        Ok(tenant) => app_state.user_repo.list_grants(user.id, tenant.0).await?,
        Err(_) => Vec::new(),
    };

    let perms = permissions::resolve(Some(user.role), user.permissions.as_deref(), &server_grants);

    Ok(Json(AuthResponse {
        token,
        permissions: perms.to_sorted_list(),
        permission_source: perms.source().as_str().to_string(),
    }))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses((status = 200, body = User)),
    security(("api_jwt" = [])),
    tag = "Users"
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

/// Conjunto efetivo resolvido pelo middleware para a requisição corrente.
#[utoipa::path(
    get,
    path = "/api/users/me/permissions",
    responses((status = 200, description = "Permissões efetivas da sessão")),
    security(("api_jwt" = [])),
    tag = "Users"
)]
pub async fn get_my_permissions(
    Extension(perms): Extension<EffectivePermissions>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "permissions": perms.to_sorted_list(),
        "source": perms.source().as_str(),
        "isAdmin": perms.is_admin(),
    }))
}

/// Menu declarativo filtrado pelas permissões: itens sem permissão declarada
/// aparecem para todo mundo.
#[utoipa::path(
    get,
    path = "/api/users/me/menu",
    responses((status = 200, body = [MenuItem])),
    security(("api_jwt" = [])),
    tag = "Users"
)]
pub async fn get_my_menu(
    Extension(perms): Extension<EffectivePermissions>,
) -> Json<Vec<MenuItem>> {
    let menu = vec![
        MenuItem {
            label: "Dashboard".into(),
            path: "/".into(),
            permission: None,
        },
        MenuItem {
            label: "Catálogo de Serviços".into(),
            path: "/catalog".into(),
            permission: Some("catalog.view".into()),
        },
        MenuItem {
            label: "Organização".into(),
            path: "/organization".into(),
            permission: Some("organization.view".into()),
        },
        MenuItem {
            label: "Usuários".into(),
            path: "/users".into(),
            permission: Some("users.view".into()),
        },
        MenuItem {
            label: "Banco de Horas".into(),
            path: "/hours-banks".into(),
            permission: Some("hours.view".into()),
        },
        MenuItem {
            label: "Inventário".into(),
            path: "/assets".into(),
            permission: Some("inventory.view".into()),
        },
        MenuItem {
            label: "Licenças".into(),
            path: "/licenses".into(),
            permission: Some("licenses.view".into()),
        },
        MenuItem {
            label: "Empresas Clientes".into(),
            path: "/clients".into(),
            permission: Some("clients.view".into()),
        },
    ];

    Json(perms.filter_menu(menu))
}
