// src/services/appointment_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, DoctorRepository},
    models::appointment::{
        Appointment, AppointmentStatus, CreateAppointmentPayload, RegisterPaymentPayload,
        UpdateAppointmentFeesPayload,
    },
    models::doctor::Doctor,
    services::fee_service::FeeService,
};

#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    doctor_repo: DoctorRepository,
    fee_service: FeeService,
    pool: PgPool,
}

impl AppointmentService {
    pub fn new(
        repo: AppointmentRepository,
        doctor_repo: DoctorRepository,
        fee_service: FeeService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            doctor_repo,
            fee_service,
            pool,
        }
    }

    // Agenda a consulta e já deixa os derivados calculados, tudo numa
    // transação só.
    pub async fn schedule(
        &self,
        payload: &CreateAppointmentPayload,
    ) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let appointment = self.repo.create(&mut *tx, payload).await?;
        let doctor = self.load_doctor(&mut tx, appointment.doctor_id).await?;

        self.fee_service
            .recalculate(&mut *tx, &appointment, doctor.as_ref())
            .await?;

        let appointment = self
            .repo
            .find_by_id(&mut *tx, appointment.id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Consulta não encontrada.".into()))?;

        tx.commit().await?;

        tracing::info!("📅 Consulta {} agendada.", appointment.id);

        Ok(appointment)
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Consulta não encontrada.".into()))
    }

    pub async fn list(&self, patient_id: Option<Uuid>) -> Result<Vec<Appointment>, AppError> {
        match patient_id {
            Some(pid) => self.repo.list_by_patient(pid).await,
            None => self.repo.list_all().await,
        }
    }

    // Edita as entradas do cálculo e dispara o recálculo em seguida.
    // A edição NÃO recalcula sozinha: o recálculo é sempre uma chamada
    // explícita, aqui na mesma transação.
    pub async fn update_fees(
        &self,
        id: Uuid,
        payload: &UpdateAppointmentFeesPayload,
    ) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut appointment = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Consulta não encontrada.".into()))?;

        if let Some(v) = payload.base_consultation_fee {
            appointment.base_consultation_fee = v;
        }
        if let Some(v) = payload.center_discount {
            appointment.center_discount = v;
        }
        if let Some(v) = payload.doctor_discount {
            appointment.doctor_discount = v;
        }
        if let Some(v) = payload.additional_procedures_amount {
            appointment.additional_procedures_amount = v;
        }
        if let Some(v) = payload.is_first_visit_free {
            appointment.is_first_visit_free = v;
        }
        if let Some(v) = payload.advance_payment {
            appointment.advance_payment = v;
        }

        self.repo.update_fee_inputs(&mut *tx, &appointment).await?;

        let doctor = self.load_doctor(&mut tx, appointment.doctor_id).await?;
        self.fee_service
            .recalculate(&mut *tx, &appointment, doctor.as_ref())
            .await?;

        let appointment = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Consulta não encontrada.".into()))?;

        tx.commit().await?;

        Ok(appointment)
    }

    // Registra um valor recebido do paciente e recalcula o saldo.
    pub async fn register_payment(
        &self,
        id: Uuid,
        payload: &RegisterPaymentPayload,
    ) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut appointment = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Consulta não encontrada.".into()))?;

        appointment.amount_received += payload.amount;
        if appointment.amount_received < Decimal::ZERO {
            appointment.amount_received = Decimal::ZERO;
        }

        self.repo.update_fee_inputs(&mut *tx, &appointment).await?;

        let doctor = self.load_doctor(&mut tx, appointment.doctor_id).await?;
        self.fee_service
            .recalculate(&mut *tx, &appointment, doctor.as_ref())
            .await?;

        let appointment = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Consulta não encontrada.".into()))?;

        tx.commit().await?;

        tracing::info!(
            "💰 Pagamento de {} registrado na consulta {}.",
            payload.amount,
            id
        );

        Ok(appointment)
    }

    // Mudança de situação não mexe em valores: nenhum recálculo aqui.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError> {
        let existing = self.get(id).await?;
        self.repo.update_status(&self.pool, existing.id, status).await?;
        self.get(id).await
    }

    async fn load_doctor(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        doctor_id: Option<Uuid>,
    ) -> Result<Option<Doctor>, AppError> {
        match doctor_id {
            // Médico apagado entre o load e o recálculo conta como ausente
            // (percentual 0), não como erro.
            Some(id) => Ok(self.doctor_repo.find_by_id(&mut **tx, id).await?),
            None => Ok(None),
        }
    }
}
