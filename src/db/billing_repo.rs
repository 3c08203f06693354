// src/db/billing_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::billing::{Invoice, InvoiceStatus};

#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_invoice<'e, E>(
        &self,
        executor: E,
        patient_id: Uuid,
        appointment_id: Option<Uuid>,
        description: &str,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // No início, amount_balance (o que falta pagar) é igual ao amount_original
        let invoice = sqlx::query_as::<Postgres, Invoice>(
            r#"
            INSERT INTO invoices (
                patient_id, appointment_id, description,
                amount_original, amount_balance, due_date
            )
            VALUES ($1, $2, $3, $4, $4, $5)
            RETURNING id, patient_id, appointment_id, description,
                      amount_original, amount_balance, status, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(patient_id)
        .bind(appointment_id)
        .bind(description)
        .bind(amount)
        .bind(due_date)
        .fetch_one(executor)
        .await?;

        Ok(invoice)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<Postgres, Invoice>(
            r#"
            SELECT id, patient_id, appointment_id, description,
                   amount_original, amount_balance, status, due_date,
                   created_at, updated_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(invoice)
    }

    pub async fn list_all(&self) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<Postgres, Invoice>(
            r#"
            SELECT id, patient_id, appointment_id, description,
                   amount_original, amount_balance, status, due_date,
                   created_at, updated_at
            FROM invoices
            ORDER BY due_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<Postgres, Invoice>(
            r#"
            SELECT id, patient_id, appointment_id, description,
                   amount_original, amount_balance, status, due_date,
                   created_at, updated_at
            FROM invoices
            WHERE patient_id = $1
            ORDER BY due_date ASC
            "#,
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    // O serviço decide o novo saldo e a nova situação; aqui só gravamos.
    pub async fn update_balance<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        amount_balance: Decimal,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<Postgres, Invoice>(
            r#"
            UPDATE invoices
            SET amount_balance = $2, status = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, patient_id, appointment_id, description,
                      amount_original, amount_balance, status, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount_balance)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(invoice)
    }
}
