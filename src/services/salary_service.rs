// src/services/salary_service.rs

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, DoctorRepository, SalaryRepository},
    models::salary::{CreateSalaryPayload, SalaryRecord},
};

#[derive(Clone)]
pub struct SalaryService {
    repo: SalaryRepository,
    doctor_repo: DoctorRepository,
    appointment_repo: AppointmentRepository,
    pool: PgPool,
}

impl SalaryService {
    pub fn new(
        repo: SalaryRepository,
        doctor_repo: DoctorRepository,
        appointment_repo: AppointmentRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            doctor_repo,
            appointment_repo,
            pool,
        }
    }

    // Gera a folha do mês: salário base + soma dos repasses (total_doctor_fee)
    // das consultas do período. A soma é congelada na criação do registro.
    pub async fn create_for_month(
        &self,
        payload: &CreateSalaryPayload,
    ) -> Result<SalaryRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let doctor = self
            .doctor_repo
            .find_by_id(&mut *tx, payload.doctor_id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Médico não encontrado.".into()))?;

        // Normaliza para o dia 1 e calcula a janela [início, início+1 mês)
        let month_start = payload
            .reference_month
            .with_day(1)
            .expect("dia 1 sempre é válido");
        let next_month = next_month_start(month_start);

        let fees = self
            .appointment_repo
            .sum_doctor_fees(&mut *tx, doctor.id, month_start, next_month)
            .await?;

        let total = payload.base_amount + fees;

        let record = self
            .repo
            .create(&mut *tx, doctor.id, month_start, payload.base_amount, fees, total)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🗓️ Folha de {} gerada para {} (repasses: {}).",
            month_start.format("%m/%Y"),
            doctor.full_name,
            fees
        );

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<SalaryRecord>, AppError> {
        self.repo.list_all().await
    }

    pub async fn mark_paid(&self, id: Uuid) -> Result<SalaryRecord, AppError> {
        self.repo
            .mark_paid(id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Folha não encontrada.".into()))
    }
}

fn next_month_start(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("data de início de mês válida")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_month_rolls_over_december() {
        let dec = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(next_month_start(dec), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let jun = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(next_month_start(jun), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }
}
