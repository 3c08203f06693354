// src/db/doctor_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::doctor::Doctor};

#[derive(Clone)]
pub struct DoctorRepository {
    pool: PgPool,
}

impl DoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        specialty: &str,
        license_number: &str,
        procedure_fee_percentage: Decimal,
    ) -> Result<Doctor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let doctor = sqlx::query_as::<Postgres, Doctor>(
            r#"
            INSERT INTO doctors (full_name, specialty, license_number, procedure_fee_percentage)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, specialty, license_number, procedure_fee_percentage,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(full_name)
        .bind(specialty)
        .bind(license_number)
        .bind(procedure_fee_percentage)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um médico com esse registro profissional.".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(doctor)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Doctor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let doctor = sqlx::query_as::<Postgres, Doctor>(
            r#"
            SELECT id, full_name, specialty, license_number, procedure_fee_percentage,
                   is_active, created_at, updated_at
            FROM doctors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(doctor)
    }

    pub async fn list_all(&self) -> Result<Vec<Doctor>, AppError> {
        let doctors = sqlx::query_as::<Postgres, Doctor>(
            r#"
            SELECT id, full_name, specialty, license_number, procedure_fee_percentage,
                   is_active, created_at, updated_at
            FROM doctors
            ORDER BY full_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(doctors)
    }

    pub async fn update<'e, E>(&self, executor: E, doctor: &Doctor) -> Result<Doctor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<Postgres, Doctor>(
            r#"
            UPDATE doctors
            SET full_name = $2, specialty = $3, procedure_fee_percentage = $4,
                is_active = $5, updated_at = now()
            WHERE id = $1
            RETURNING id, full_name, specialty, license_number, procedure_fee_percentage,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(doctor.id)
        .bind(&doctor.full_name)
        .bind(&doctor.specialty)
        .bind(doctor.procedure_fee_percentage)
        .bind(doctor.is_active)
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }
}
