// src/db/prescription_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::prescription::{Prescription, PrescriptionDetail};

#[derive(Clone)]
pub struct PrescriptionRepository {
    pool: PgPool,
}

impl PrescriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
        patient_id: Uuid,
        doctor_id: Uuid,
        medication: &str,
        dosage: &str,
        frequency: &str,
        duration_days: Option<i32>,
        notes: Option<&str>,
    ) -> Result<Prescription, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prescription = sqlx::query_as::<Postgres, Prescription>(
            r#"
            INSERT INTO prescriptions (
                appointment_id, patient_id, doctor_id,
                medication, dosage, frequency, duration_days, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, appointment_id, patient_id, doctor_id,
                      medication, dosage, frequency, duration_days, notes, created_at
            "#,
        )
        .bind(appointment_id)
        .bind(patient_id)
        .bind(doctor_id)
        .bind(medication)
        .bind(dosage)
        .bind(frequency)
        .bind(duration_days)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(prescription)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Prescription>, AppError> {
        let prescription = sqlx::query_as::<Postgres, Prescription>(
            r#"
            SELECT id, appointment_id, patient_id, doctor_id,
                   medication, dosage, frequency, duration_days, notes, created_at
            FROM prescriptions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prescription)
    }

    pub async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Prescription>, AppError> {
        let prescriptions = sqlx::query_as::<Postgres, Prescription>(
            r#"
            SELECT id, appointment_id, patient_id, doctor_id,
                   medication, dosage, frequency, duration_days, notes, created_at
            FROM prescriptions
            WHERE patient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prescriptions)
    }

    // JOIN com os cadastros para a impressão da receita.
    pub async fn find_detail<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<PrescriptionDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let detail = sqlx::query_as::<Postgres, PrescriptionDetail>(
            r#"
            SELECT pr.id, pr.medication, pr.dosage, pr.frequency, pr.duration_days,
                   pr.notes, pr.created_at,
                   pa.full_name AS patient_name,
                   d.full_name AS doctor_name,
                   d.license_number AS doctor_license,
                   c.name AS clinic_name
            FROM prescriptions pr
            JOIN patients pa ON pa.id = pr.patient_id
            JOIN doctors d ON d.id = pr.doctor_id
            JOIN appointments a ON a.id = pr.appointment_id
            JOIN clinics c ON c.id = a.clinic_id
            WHERE pr.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(detail)
    }
}
