// src/db/hours_bank_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::hours_bank::{HoursBank, HoursBankTransaction, TransactionKind},
};

#[derive(Clone)]
pub struct HoursBankRepository {
    pool: PgPool,
}

impl HoursBankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_bank<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        client_id: Uuid,
        total_hours: Decimal,
        allow_negative_balance: bool,
        min_balance: Decimal,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<HoursBank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bank = sqlx::query_as::<_, HoursBank>(
            r#"
            INSERT INTO hours_banks (
                tenant_id, client_id, total_hours,
                allow_negative_balance, min_balance, start_date, end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .bind(total_hours)
        .bind(allow_negative_balance)
        .bind(min_balance)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(executor)
        .await?;

        Ok(bank)
    }

    pub async fn list_banks(&self, tenant_id: Uuid) -> Result<Vec<HoursBank>, AppError> {
        let banks = sqlx::query_as::<_, HoursBank>(
            "SELECT * FROM hours_banks WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(banks)
    }

    pub async fn find_bank(
        &self,
        tenant_id: Uuid,
        bank_id: Uuid,
    ) -> Result<Option<HoursBank>, AppError> {
        let bank = sqlx::query_as::<_, HoursBank>(
            "SELECT * FROM hours_banks WHERE id = $2 AND tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(bank_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bank)
    }

    /// Relê a linha do banco com trava de linha. Crédito e consumo
    /// concorrentes sobre o mesmo banco serializam aqui; a checagem de saldo
    /// nunca corre contra um consumo paralelo.
    pub async fn get_bank_for_update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        bank_id: Uuid,
    ) -> Result<Option<HoursBank>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bank = sqlx::query_as::<_, HoursBank>(
            "SELECT * FROM hours_banks WHERE id = $2 AND tenant_id = $1 FOR UPDATE",
        )
        .bind(tenant_id)
        .bind(bank_id)
        .fetch_optional(executor)
        .await?;

        Ok(bank)
    }

    pub async fn apply_addition<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        hours: Decimal,
    ) -> Result<HoursBank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bank = sqlx::query_as::<_, HoursBank>(
            r#"
            UPDATE hours_banks
            SET total_hours = total_hours + $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(hours)
        .fetch_one(executor)
        .await?;

        Ok(bank)
    }

    pub async fn apply_consumption<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        hours: Decimal,
    ) -> Result<HoursBank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bank = sqlx::query_as::<_, HoursBank>(
            r#"
            UPDATE hours_banks
            SET used_hours = used_hours + $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(hours)
        .fetch_one(executor)
        .await?;

        Ok(bank)
    }

    // Trilha de auditoria: só INSERT, nunca UPDATE/DELETE.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_transaction<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        kind: TransactionKind,
        hours: Decimal,
        description: &str,
        ticket_id: Option<Uuid>,
        performed_by: Uuid,
    ) -> Result<HoursBankTransaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tx = sqlx::query_as::<_, HoursBankTransaction>(
            r#"
            INSERT INTO hours_bank_transactions (
                bank_id, kind, hours, description, ticket_id, performed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(kind)
        .bind(hours)
        .bind(description)
        .bind(ticket_id)
        .bind(performed_by)
        .fetch_one(executor)
        .await?;

        Ok(tx)
    }

    /// Extrato em ordem cronológica inversa (reiniciável: é um re-query).
    pub async fn list_transactions(
        &self,
        bank_id: Uuid,
    ) -> Result<Vec<HoursBankTransaction>, AppError> {
        let transactions = sqlx::query_as::<_, HoursBankTransaction>(
            "SELECT * FROM hours_bank_transactions
             WHERE bank_id = $1
             ORDER BY created_at DESC",
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
