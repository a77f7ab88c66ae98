// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Papéis conhecidos do sistema. Os nomes em kebab-case são o vocabulário
/// que o frontend e o banco usam ("org-admin", "client-user", ...).
/// `Gerente` e `Agente` são nomes legados que continuam em produção.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    OrgAdmin,
    Admin,
    SuperAdmin,
    ProviderAdmin,
    ClientAdmin,
    OrgManager,
    Gerente,
    Supervisor,
    Agent,
    Agente,
    Technician,
    ClientManager,
    ClientUser,
}

impl Role {
    /// Todos os papéis conhecidos, na ordem da declaração. Usado pela
    /// validação das tabelas de permissão e pelos testes.
    pub const ALL: [Role; 13] = [
        Role::OrgAdmin,
        Role::Admin,
        Role::SuperAdmin,
        Role::ProviderAdmin,
        Role::ClientAdmin,
        Role::OrgManager,
        Role::Gerente,
        Role::Supervisor,
        Role::Agent,
        Role::Agente,
        Role::Technician,
        Role::ClientManager,
        Role::ClientUser,
    ];

    /// Papéis administrativos: curto-circuito em toda verificação de acesso.
    pub fn is_admin_role(&self) -> bool {
        matches!(
            self,
            Role::OrgAdmin | Role::Admin | Role::SuperAdmin | Role::ProviderAdmin
        )
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub name: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,

    // Override explícito por usuário; quando presente, vence os defaults do papel.
    pub permissions: Option<Vec<String>>,

    // Lotação organizacional (Diretoria -> Departamento -> Seção)
    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub role: Option<Role>,
    pub tenant_id: Option<Uuid>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação: o token e a lista de permissões efetivas que o
// frontend consome no login para montar o menu.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[schema(example = json!(["dashboard.view", "catalog.view"]))]
    pub permissions: Vec<String>,
    #[schema(example = "role-default")]
    pub permission_source: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
