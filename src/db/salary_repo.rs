// src/db/salary_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::salary::SalaryRecord;

#[derive(Clone)]
pub struct SalaryRepository {
    pool: PgPool,
}

impl SalaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        doctor_id: Uuid,
        reference_month: NaiveDate,
        base_amount: Decimal,
        appointment_fees_amount: Decimal,
        total_amount: Decimal,
    ) -> Result<SalaryRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<Postgres, SalaryRecord>(
            r#"
            INSERT INTO salaries (
                doctor_id, reference_month, base_amount,
                appointment_fees_amount, total_amount
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, doctor_id, reference_month, base_amount,
                      appointment_fees_amount, total_amount, status, paid_at, created_at
            "#,
        )
        .bind(doctor_id)
        .bind(reference_month)
        .bind(base_amount)
        .bind(appointment_fees_amount)
        .bind(total_amount)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe folha para esse médico nesse mês.".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(record)
    }

    pub async fn list_all(&self) -> Result<Vec<SalaryRecord>, AppError> {
        let records = sqlx::query_as::<Postgres, SalaryRecord>(
            r#"
            SELECT id, doctor_id, reference_month, base_amount,
                   appointment_fees_amount, total_amount, status, paid_at, created_at
            FROM salaries
            ORDER BY reference_month DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn mark_paid(&self, id: Uuid) -> Result<Option<SalaryRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, SalaryRecord>(
            r#"
            UPDATE salaries
            SET status = 'PAID', paid_at = now()
            WHERE id = $1
            RETURNING id, doctor_id, reference_month, base_amount,
                      appointment_fees_amount, total_amount, status, paid_at, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
