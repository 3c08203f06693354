// src/services/billing_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BillingRepository,
    models::billing::{CreateInvoicePayload, Invoice, InvoiceStatus},
};

#[derive(Clone)]
pub struct BillingService {
    repo: BillingRepository,
    pool: PgPool,
}

impl BillingService {
    pub fn new(repo: BillingRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_invoice(&self, payload: &CreateInvoicePayload) -> Result<Invoice, AppError> {
        let invoice = self
            .repo
            .create_invoice(
                &self.pool,
                payload.patient_id,
                payload.appointment_id,
                &payload.description,
                payload.amount,
                payload.due_date,
            )
            .await?;

        tracing::info!("🧾 Fatura {} emitida para o paciente {}.", invoice.id, invoice.patient_id);

        Ok(invoice)
    }

    pub async fn get(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Fatura não encontrada.".into()))
    }

    pub async fn list(&self, patient_id: Option<Uuid>) -> Result<Vec<Invoice>, AppError> {
        match patient_id {
            Some(pid) => self.repo.list_by_patient(pid).await,
            None => self.repo.list_all().await,
        }
    }

    // Baixa parcial ou total: o saldo nunca fica negativo e a situação
    // acompanha o saldo (aberta -> parcial -> quitada).
    pub async fn register_payment(&self, id: Uuid, amount: Decimal) -> Result<Invoice, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoice = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Fatura não encontrada.".into()))?;

        if invoice.status == InvoiceStatus::Cancelled {
            return Err(AppError::UniqueConstraintViolation(
                "Fatura cancelada não recebe pagamento.".into(),
            ));
        }

        let new_balance = (invoice.amount_balance - amount).max(Decimal::ZERO);
        let new_status = if new_balance == Decimal::ZERO {
            InvoiceStatus::Paid
        } else if new_balance < invoice.amount_original {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Pending
        };

        let updated = self
            .repo
            .update_balance(&mut *tx, id, new_balance, new_status)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
