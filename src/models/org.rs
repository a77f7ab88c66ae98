// src/models/org.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Hierarquia organizacional estrita de três níveis:
// Diretoria -> Departamento -> Seção.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Direction {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Diretoria de Tecnologia")]
    pub name: String,

    pub description: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    // Vínculo opcional com a diretoria
    pub direction_id: Option<Uuid>,

    #[schema(example = "Suporte Técnico")]
    pub name: String,

    pub description: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// A seção NÃO tem ponteiro próprio para a diretoria: a diretoria exibida
// vem sempre do departamento (coluna direction_name resolvida via JOIN).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub department_id: Uuid,

    #[schema(example = "Seção de Redes")]
    pub name: String,

    pub description: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Projeção de listagem: seção com os nomes herdados do departamento e,
// transitivamente, da diretoria do departamento.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithHierarchy {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub department_id: Uuid,
    pub name: String,
    pub description: Option<String>,

    #[schema(example = "Suporte Técnico")]
    pub department_name: String,

    // Herdada: departments.direction -> directions.name
    #[schema(example = "Diretoria de Tecnologia")]
    pub direction_name: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientCompany {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Acme Ltda")]
    pub name: String,

    pub document: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}
