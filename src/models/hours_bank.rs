// src/models/hours_bank.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Addition,    // Crédito de horas contratadas
    Consumption, // Consumo vinculado a um chamado concluído
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoursBank {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub client_id: Uuid,

    #[schema(example = "40.00")]
    pub total_hours: Decimal,

    #[schema(example = "12.50")]
    pub used_hours: Decimal,

    pub allow_negative_balance: bool,

    // Piso do saldo quando o crédito é permitido (sempre <= 0).
    #[schema(example = "-10.00")]
    pub min_balance: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-01-01")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = String, format = Date, example = "2026-12-31")]
    pub end_date: Option<NaiveDate>,

    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HoursBank {
    /// Saldo disponível. Só pode ser negativo sob a política de crédito.
    pub fn available(&self) -> Decimal {
        self.total_hours - self.used_hours
    }
}

// Registro imutável da trilha de auditoria: criado apenas pelas operações
// de crédito/consumo, nunca alterado ou removido.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoursBankTransaction {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub kind: TransactionKind,

    #[schema(example = "2.50")]
    pub hours: Decimal,

    #[schema(example = "Atendimento chamado #4821")]
    pub description: String,

    // Presente apenas em consumos
    pub ticket_id: Option<Uuid>,

    pub performed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

// Detalhe do banco com o extrato (mais recentes primeiro).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoursBankDetail {
    #[serde(flatten)]
    pub bank: HoursBank,

    #[schema(example = "27.50")]
    pub available_hours: Decimal,

    pub transactions: Vec<HoursBankTransaction>,
}
