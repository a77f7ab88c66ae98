// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

// Armazena o UUID do tenant (organização provedora) que o utilizador
// quer aceder. Toda consulta das rotas de negócio é escopada por ele.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl TenantContext {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let value = headers
            .get(TENANT_ID_HEADER)
            .ok_or_else(|| AppError::BadRequest("O cabeçalho X-Tenant-ID é obrigatório.".into()))?;

        let value_str = value.to_str().map_err(|_| {
            AppError::BadRequest("Cabeçalho X-Tenant-ID contém caracteres inválidos.".into())
        })?;

        let tenant_id = Uuid::parse_str(value_str).map_err(|_| {
            AppError::BadRequest("Cabeçalho X-Tenant-ID inválido (não é um UUID).".into())
        })?;

        Ok(TenantContext(tenant_id))
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // O tenant_guard já validou e inseriu o contexto; o fallback lê o
        // cabeçalho direto (rotas que usam só o auth_guard).
        if let Some(ctx) = parts.extensions.get::<TenantContext>() {
            return Ok(*ctx);
        }
        Self::from_headers(&parts.headers)
    }
}
