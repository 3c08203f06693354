// src/db/clinic_repo.rs

use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::clinic::Clinic};

#[derive(Clone)]
pub struct ClinicRepository {
    pool: PgPool,
}

impl ClinicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Clinic, AppError> {
        let clinic = sqlx::query_as::<Postgres, Clinic>(
            r#"
            INSERT INTO clinics (name, address, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, phone, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(clinic)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Clinic>, AppError> {
        let clinic = sqlx::query_as::<Postgres, Clinic>(
            "SELECT id, name, address, phone, created_at, updated_at FROM clinics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(clinic)
    }

    pub async fn list_all(&self) -> Result<Vec<Clinic>, AppError> {
        let clinics = sqlx::query_as::<Postgres, Clinic>(
            "SELECT id, name, address, phone, created_at, updated_at FROM clinics ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clinics)
    }
}
