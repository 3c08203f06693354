// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pending, // Aberta
    Partial, // Paga parcialmente
    Paid,    // Quitada
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,

    #[schema(example = "Consulta cardiológica")]
    pub description: String,

    // Valores
    #[schema(example = "300.00")]
    pub amount_original: Decimal,
    #[schema(example = "150.00")]
    pub amount_balance: Decimal, // Quanto falta pagar

    pub status: InvoiceStatus,

    #[schema(value_type = String, format = Date, example = "2025-07-31")]
    pub due_date: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePaymentPayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
}
