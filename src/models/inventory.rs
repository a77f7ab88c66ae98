// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Desktop,
    Notebook,
    Server,
    Printer,
    Network,
    Peripheral,
    Mobile,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    InUse,       // Em uso
    InStock,     // Em estoque
    Maintenance, // Em manutenção
    Retired,     // Baixado
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "license_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Expired,
    Suspended,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Notebook Dell Latitude 5440")]
    pub name: String,

    pub kind: AssetKind,
    pub status: AssetStatus,

    // Propriedade opcional (empresa cliente e/ou usuário final)
    pub client_id: Option<Uuid>,
    pub user_id: Option<Uuid>,

    // Bolsas de atributos livres (CPU, RAM, nota fiscal, garantia...)
    #[schema(value_type = Object)]
    pub hardware: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub financial: Option<serde_json::Value>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Microsoft 365 Business")]
    pub software: String,

    #[schema(example = "XXXXX-XXXXX-XXXXX")]
    pub license_key: Option<String>,

    #[schema(example = 25)]
    pub seats: i32,

    pub status: LicenseStatus,

    #[schema(value_type = String, format = Date, example = "2027-03-31")]
    pub expires_on: Option<NaiveDate>,

    pub client_id: Option<Uuid>,

    #[schema(value_type = Object)]
    pub financial: Option<serde_json::Value>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
