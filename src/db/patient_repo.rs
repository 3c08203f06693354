// src/db/patient_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::patient::Patient};

#[derive(Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        document_number: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        birth_date: Option<chrono::NaiveDate>,
        address: Option<&str>,
    ) -> Result<Patient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let patient = sqlx::query_as::<Postgres, Patient>(
            r#"
            INSERT INTO patients (full_name, document_number, phone, email, birth_date, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, document_number, phone, email, birth_date, address,
                      created_at, updated_at
            "#,
        )
        .bind(full_name)
        .bind(document_number)
        .bind(phone)
        .bind(email)
        .bind(birth_date)
        .bind(address)
        .fetch_one(executor)
        .await?;

        Ok(patient)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, AppError> {
        let patient = sqlx::query_as::<Postgres, Patient>(
            r#"
            SELECT id, full_name, document_number, phone, email, birth_date, address,
                   created_at, updated_at
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(patient)
    }

    pub async fn list_all(&self) -> Result<Vec<Patient>, AppError> {
        let patients = sqlx::query_as::<Postgres, Patient>(
            r#"
            SELECT id, full_name, document_number, phone, email, birth_date, address,
                   created_at, updated_at
            FROM patients
            ORDER BY full_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(patients)
    }

    // A edição parcial é resolvida no serviço (carrega, aplica os Option,
    // grava tudo). Aqui a query é sempre a mesma.
    pub async fn update<'e, E>(&self, executor: E, patient: &Patient) -> Result<Patient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<Postgres, Patient>(
            r#"
            UPDATE patients
            SET full_name = $2, document_number = $3, phone = $4, email = $5,
                birth_date = $6, address = $7, updated_at = now()
            WHERE id = $1
            RETURNING id, full_name, document_number, phone, email, birth_date, address,
                      created_at, updated_at
            "#,
        )
        .bind(patient.id)
        .bind(&patient.full_name)
        .bind(&patient.document_number)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(patient.birth_date)
        .bind(&patient.address)
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
