// src/models/appointment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,

    pub patient_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub clinic_id: Uuid,

    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,

    // --- Entradas do cálculo financeiro ---
    #[schema(example = "100.00")]
    pub base_consultation_fee: Decimal,
    #[schema(example = "10.00")]
    pub center_discount: Decimal,
    #[schema(example = "20.00")]
    pub doctor_discount: Decimal,
    #[schema(example = "200.00")]
    pub additional_procedures_amount: Decimal,
    pub is_first_visit_free: bool,
    pub amount_received: Decimal,
    pub advance_payment: Decimal,

    // --- Campos derivados ---
    // Sobrescritos apenas pelo recálculo explícito, nunca em edições avulsas.
    pub doctor_consultation_fee: Decimal,
    pub center_consultation_fee: Decimal,
    pub doctor_procedures_fee: Decimal,
    pub center_procedures_fee: Decimal,
    pub total_doctor_fee: Decimal,
    pub total_center_fee: Decimal,
    pub remaining_amount: Decimal,
    pub payment_status: PaymentStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resultado consolidado do motor de cálculo. É exatamente o conjunto de
// colunas sobrescritas pelo recálculo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFinancials {
    pub doctor_consultation_fee: Decimal,
    pub center_consultation_fee: Decimal,
    pub doctor_procedures_fee: Decimal,
    pub center_procedures_fee: Decimal,
    pub total_doctor_fee: Decimal,
    pub total_center_fee: Decimal,
    pub remaining_amount: Decimal,
    pub payment_status: PaymentStatus,
}

// ---
// Validação customizada de valores monetários
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub patient_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub clinic_id: Uuid,

    pub scheduled_at: DateTime<Utc>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub base_consultation_fee: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub center_discount: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub doctor_discount: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub additional_procedures_amount: Decimal,

    #[serde(default)]
    pub is_first_visit_free: bool,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub advance_payment: Decimal,
}

// Edição dos campos que afetam o cálculo. Depois de persistir, o serviço
// dispara o recálculo — a edição sozinha não mexe nos derivados.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentFeesPayload {
    #[validate(custom(function = "validate_not_negative"))]
    pub base_consultation_fee: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub center_discount: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub doctor_discount: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub additional_procedures_amount: Option<Decimal>,

    pub is_first_visit_free: Option<bool>,

    #[validate(custom(function = "validate_not_negative"))]
    pub advance_payment: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentPayload {
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "50.00")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: AppointmentStatus,
}
