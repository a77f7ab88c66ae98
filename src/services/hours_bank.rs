// src/services/hours_bank.rs
//
// O livro-razão do banco de horas: aritmética de saldo com `Decimal` (nada
// de float acumulando deriva) e trilha de transações imutável. As regras de
// saldo são funções puras; o service só as envolve em uma transação com
// trava de linha para serializar crédito/consumo concorrentes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, HoursBankRepository},
    models::hours_bank::{HoursBank, HoursBankDetail, HoursBankTransaction, TransactionKind},
};

// =========================================================================
//  REGRAS PURAS
// =========================================================================

/// Piso do saldo: `min_balance` quando o crédito é permitido, zero caso
/// contrário.
pub fn consumption_floor(allow_negative_balance: bool, min_balance: Decimal) -> Decimal {
    if allow_negative_balance {
        min_balance
    } else {
        Decimal::ZERO
    }
}

/// Valida um consumo prospectivo e devolve o novo `used_hours`.
/// Rejeita quando `total - (used + hours)` furaria o piso.
pub fn check_consumption(
    total_hours: Decimal,
    used_hours: Decimal,
    allow_negative_balance: bool,
    min_balance: Decimal,
    hours: Decimal,
) -> Result<Decimal, AppError> {
    if hours <= Decimal::ZERO {
        return Err(validation_error(
            "hours",
            "range",
            "As horas consumidas devem ser maiores que zero.",
        ));
    }

    let floor = consumption_floor(allow_negative_balance, min_balance);
    let new_used = used_hours + hours;

    if total_hours - new_used < floor {
        return Err(AppError::InsufficientBalance {
            available: total_hours - used_hours,
            requested: hours,
            floor,
        });
    }

    Ok(new_used)
}

/// Valida os parâmetros de criação e devolve o `min_balance` efetivo.
/// `min_balance` só faz sentido sob a política de crédito e representa o
/// saldo mais negativo permitido (portanto <= 0).
pub fn validate_new_bank(
    total_hours: Decimal,
    allow_negative_balance: bool,
    min_balance: Option<Decimal>,
) -> Result<Decimal, AppError> {
    if total_hours < Decimal::ZERO {
        return Err(validation_error(
            "totalHours",
            "range",
            "O total de horas contratadas não pode ser negativo.",
        ));
    }

    match (allow_negative_balance, min_balance) {
        (false, Some(_)) => Err(validation_error(
            "minBalance",
            "policy",
            "minBalance só pode ser definido quando o saldo negativo é permitido.",
        )),
        (true, Some(min)) if min > Decimal::ZERO => Err(validation_error(
            "minBalance",
            "range",
            "minBalance deve ser menor ou igual a zero.",
        )),
        (true, Some(min)) => Ok(min),
        _ => Ok(Decimal::ZERO),
    }
}

fn validation_error(field: &'static str, code: &'static str, message: &'static str) -> AppError {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.into());
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::ValidationError(errors)
}

// =========================================================================
//  SERVICE
// =========================================================================

#[derive(Clone)]
pub struct HoursBankService {
    repo: HoursBankRepository,
    client_repo: ClientRepository,
    pool: PgPool,
}

impl HoursBankService {
    pub fn new(repo: HoursBankRepository, client_repo: ClientRepository, pool: PgPool) -> Self {
        Self {
            repo,
            client_repo,
            pool,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_bank(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
        total_hours: Decimal,
        allow_negative_balance: bool,
        min_balance: Option<Decimal>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        performed_by: Uuid,
    ) -> Result<HoursBank, AppError> {
        let effective_min = validate_new_bank(total_hours, allow_negative_balance, min_balance)?;

        self.client_repo
            .find(tenant_id, client_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        let mut tx = self.pool.begin().await?;

        let bank = self
            .repo
            .create_bank(
                &mut *tx,
                tenant_id,
                client_id,
                total_hours,
                allow_negative_balance,
                effective_min,
                start_date,
                end_date,
            )
            .await?;

        // A carga inicial também entra na trilha, senão a reconciliação
        // (soma de créditos - soma de consumos = saldo) não fecha.
        if total_hours > Decimal::ZERO {
            self.repo
                .insert_transaction(
                    &mut *tx,
                    bank.id,
                    TransactionKind::Addition,
                    total_hours,
                    "Carga inicial de horas contratadas",
                    None,
                    performed_by,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Banco de horas criado para o cliente {} ({} horas)",
            client_id,
            total_hours
        );

        Ok(bank)
    }

    /// Crédito de horas. Transacional: a trava de linha serializa com
    /// consumos concorrentes sobre o mesmo banco.
    pub async fn add_hours(
        &self,
        tenant_id: Uuid,
        bank_id: Uuid,
        hours: Decimal,
        description: &str,
        performed_by: Uuid,
    ) -> Result<HoursBank, AppError> {
        if hours <= Decimal::ZERO {
            return Err(validation_error(
                "hours",
                "range",
                "As horas creditadas devem ser maiores que zero.",
            ));
        }

        let mut tx = self.pool.begin().await?;

        let bank = self
            .repo
            .get_bank_for_update(&mut *tx, tenant_id, bank_id)
            .await?
            .ok_or(AppError::NotFound("Banco de horas"))?;

        let updated = self.repo.apply_addition(&mut *tx, bank.id, hours).await?;

        self.repo
            .insert_transaction(
                &mut *tx,
                bank.id,
                TransactionKind::Addition,
                hours,
                description,
                None,
                performed_by,
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Consumo vinculado a um chamado concluído. O estado do chamado é
    /// responsabilidade do colaborador externo de tickets; aqui o id é
    /// apenas registrado na trilha.
    #[allow(clippy::too_many_arguments)]
    pub async fn consume_hours(
        &self,
        tenant_id: Uuid,
        bank_id: Uuid,
        hours: Decimal,
        description: &str,
        ticket_id: Option<Uuid>,
        performed_by: Uuid,
    ) -> Result<HoursBank, AppError> {
        let mut tx = self.pool.begin().await?;

        // Relê com FOR UPDATE: a checagem de piso abaixo não pode correr
        // contra outro consumo que empurraria o saldo abaixo do permitido.
        let bank = self
            .repo
            .get_bank_for_update(&mut *tx, tenant_id, bank_id)
            .await?
            .ok_or(AppError::NotFound("Banco de horas"))?;

        check_consumption(
            bank.total_hours,
            bank.used_hours,
            bank.allow_negative_balance,
            bank.min_balance,
            hours,
        )?;

        let updated = self.repo.apply_consumption(&mut *tx, bank.id, hours).await?;

        self.repo
            .insert_transaction(
                &mut *tx,
                bank.id,
                TransactionKind::Consumption,
                hours,
                description,
                ticket_id,
                performed_by,
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn list_banks(&self, tenant_id: Uuid) -> Result<Vec<HoursBank>, AppError> {
        self.repo.list_banks(tenant_id).await
    }

    pub async fn get_detail(
        &self,
        tenant_id: Uuid,
        bank_id: Uuid,
    ) -> Result<HoursBankDetail, AppError> {
        let bank = self
            .repo
            .find_bank(tenant_id, bank_id)
            .await?
            .ok_or(AppError::NotFound("Banco de horas"))?;

        let transactions = self.repo.list_transactions(bank.id).await?;

        Ok(HoursBankDetail {
            available_hours: bank.available(),
            bank,
            transactions,
        })
    }

    pub async fn list_transactions(
        &self,
        tenant_id: Uuid,
        bank_id: Uuid,
    ) -> Result<Vec<HoursBankTransaction>, AppError> {
        self.repo
            .find_bank(tenant_id, bank_id)
            .await?
            .ok_or(AppError::NotFound("Banco de horas"))?;

        self.repo.list_transactions(bank_id).await
    }
}

// =========================================================================
//  TESTES
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().expect("decimal inválido no teste")
    }

    #[test]
    fn consumo_rejeitado_quando_fura_o_saldo_sem_credito() {
        // total=10, used=8: consumir 5 rejeita, consumir 2 aceita (used vira 10)
        let err = check_consumption(d("10"), d("8"), false, Decimal::ZERO, d("5"))
            .expect_err("deveria rejeitar");
        match err {
            AppError::InsufficientBalance {
                available,
                requested,
                floor,
            } => {
                assert_eq!(available, d("2"));
                assert_eq!(requested, d("5"));
                assert_eq!(floor, Decimal::ZERO);
            }
            other => panic!("erro inesperado: {:?}", other),
        }

        let new_used = check_consumption(d("10"), d("8"), false, Decimal::ZERO, d("2"))
            .expect("deveria aceitar");
        assert_eq!(new_used, d("10"));
    }

    #[test]
    fn credito_permite_chegar_exatamente_no_piso_mas_nao_passar() {
        // min_balance=-10: chegar exatamente em -10 passa
        let new_used =
            check_consumption(d("10"), d("5"), true, d("-10"), d("15")).expect("piso exato passa");
        assert_eq!(new_used, d("20"));

        // qualquer excesso, por menor que seja, falha
        let err = check_consumption(d("10"), d("5"), true, d("-10"), d("15.5"))
            .expect_err("abaixo do piso deveria falhar");
        assert!(matches!(err, AppError::InsufficientBalance { .. }));
    }

    #[test]
    fn horas_nao_positivas_sao_erro_de_validacao() {
        let err = check_consumption(d("10"), d("0"), false, Decimal::ZERO, d("0"))
            .expect_err("zero horas");
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = check_consumption(d("10"), d("0"), false, Decimal::ZERO, d("-1"))
            .expect_err("horas negativas");
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn min_balance_sem_politica_de_credito_e_invalido() {
        let err = validate_new_bank(d("40"), false, Some(d("-5")))
            .expect_err("minBalance exige allowNegativeBalance");
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn min_balance_positivo_e_invalido() {
        let err = validate_new_bank(d("40"), true, Some(d("5"))).expect_err("piso positivo");
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn total_negativo_e_invalido() {
        let err = validate_new_bank(d("-1"), false, None).expect_err("total negativo");
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn sem_politica_o_piso_e_zero_mesmo_com_min_ausente() {
        assert_eq!(validate_new_bank(d("40"), false, None).unwrap(), Decimal::ZERO);
        assert_eq!(validate_new_bank(d("40"), true, None).unwrap(), Decimal::ZERO);
        assert_eq!(validate_new_bank(d("40"), true, Some(d("-10"))).unwrap(), d("-10"));
    }

    #[test]
    fn reconciliacao_soma_da_trilha_igual_ao_saldo() {
        // Simula a vida de um banco: toda mutação passa pelas regras puras e
        // registra na trilha. O invariante deve valer após cada operação.
        let mut total = d("0");
        let mut used = d("0");
        let mut additions: Vec<Decimal> = Vec::new();
        let mut consumptions: Vec<Decimal> = Vec::new();

        // carga inicial
        total += d("40");
        additions.push(d("40"));

        let ops: &[(&str, &str)] = &[
            ("consume", "2.5"),
            ("consume", "0.5"),
            ("add", "10"),
            ("consume", "12.25"),
            ("consume", "3.75"),
            ("add", "0.5"),
        ];

        for (op, hours) in ops {
            let hours = d(hours);
            match *op {
                "add" => {
                    total += hours;
                    additions.push(hours);
                }
                "consume" => {
                    used = check_consumption(total, used, false, Decimal::ZERO, hours)
                        .expect("consumo dentro do saldo");
                    consumptions.push(hours);
                }
                _ => unreachable!(),
            }

            let ledger: Decimal = additions.iter().copied().sum::<Decimal>()
                - consumptions.iter().copied().sum::<Decimal>();
            assert_eq!(ledger, total - used, "trilha divergiu do saldo");
        }

        // meia-hora de granularidade não acumula erro: saldo exato
        assert_eq!(total - used, d("31.5"));
    }
}
