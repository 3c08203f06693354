// src/db/appointment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::appointment::{
    Appointment, AppointmentFinancials, AppointmentStatus, CreateAppointmentPayload,
};

// A lista completa de colunas, na ordem do struct. A tabela é larga demais
// para repetir isso em cada query.
const COLUMNS: &str = r#"
    id, patient_id, doctor_id, clinic_id, scheduled_at, status,
    base_consultation_fee, center_discount, doctor_discount,
    additional_procedures_amount, is_first_visit_free, amount_received,
    advance_payment,
    doctor_consultation_fee, center_consultation_fee,
    doctor_procedures_fee, center_procedures_fee,
    total_doctor_fee, total_center_fee, remaining_amount, payment_status,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere a consulta só com as entradas; os derivados nascem zerados e
    // são preenchidos pelo recálculo logo em seguida, na mesma transação.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateAppointmentPayload,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO appointments (
                patient_id, doctor_id, clinic_id, scheduled_at,
                base_consultation_fee, center_discount, doctor_discount,
                additional_procedures_amount, is_first_visit_free, advance_payment
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        );

        let appointment = sqlx::query_as::<Postgres, Appointment>(&sql)
            .bind(payload.patient_id)
            .bind(payload.doctor_id)
            .bind(payload.clinic_id)
            .bind(payload.scheduled_at)
            .bind(payload.base_consultation_fee)
            .bind(payload.center_discount)
            .bind(payload.doctor_discount)
            .bind(payload.additional_procedures_amount)
            .bind(payload.is_first_visit_free)
            .bind(payload.advance_payment)
            .fetch_one(executor)
            .await?;

        Ok(appointment)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");

        let appointment = sqlx::query_as::<Postgres, Appointment>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(appointment)
    }

    pub async fn list_all(&self) -> Result<Vec<Appointment>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM appointments ORDER BY scheduled_at DESC");

        let appointments = sqlx::query_as::<Postgres, Appointment>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    pub async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM appointments WHERE patient_id = $1 ORDER BY scheduled_at DESC"
        );

        let appointments = sqlx::query_as::<Postgres, Appointment>(&sql)
            .bind(patient_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    // Persiste apenas as ENTRADAS do cálculo. Os derivados ficam intactos
    // até o chamador disparar o recálculo.
    pub async fn update_fee_inputs<'e, E>(
        &self,
        executor: E,
        appointment: &Appointment,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE appointments
            SET base_consultation_fee = $2,
                center_discount = $3,
                doctor_discount = $4,
                additional_procedures_amount = $5,
                is_first_visit_free = $6,
                amount_received = $7,
                advance_payment = $8,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.base_consultation_fee)
        .bind(appointment.center_discount)
        .bind(appointment.doctor_discount)
        .bind(appointment.additional_procedures_amount)
        .bind(appointment.is_first_visit_free)
        .bind(appointment.amount_received)
        .bind(appointment.advance_payment)
        .execute(executor)
        .await?;

        Ok(())
    }

    // O único ponto que sobrescreve os campos derivados: um UPDATE só,
    // com os seis valores de repasse mais saldo e situação de pagamento.
    pub async fn update_financials<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        financials: &AppointmentFinancials,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE appointments
            SET doctor_consultation_fee = $2,
                center_consultation_fee = $3,
                doctor_procedures_fee = $4,
                center_procedures_fee = $5,
                total_doctor_fee = $6,
                total_center_fee = $7,
                remaining_amount = $8,
                payment_status = $9,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(financials.doctor_consultation_fee)
        .bind(financials.center_consultation_fee)
        .bind(financials.doctor_procedures_fee)
        .bind(financials.center_procedures_fee)
        .bind(financials.total_doctor_fee)
        .bind(financials.total_center_fee)
        .bind(financials.remaining_amount)
        .bind(financials.payment_status)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE appointments SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Soma dos repasses do médico no período (para a folha de pagamento).
    // Consultas canceladas ficam de fora.
    pub async fn sum_doctor_fees<'e, E>(
        &self,
        executor: E,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<Postgres, Decimal>(
            r#"
            SELECT COALESCE(SUM(total_doctor_fee), 0)
            FROM appointments
            WHERE doctor_id = $1
              AND status <> 'CANCELLED'
              AND scheduled_at >= $2
              AND scheduled_at < $3
            "#,
        )
        .bind(doctor_id)
        .bind(from)
        .bind(to)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }
}
