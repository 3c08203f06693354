// src/models/prescription.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,

    #[schema(example = "Amoxicilina 500mg")]
    pub medication: String,

    #[schema(example = "1 comprimido")]
    pub dosage: String,

    #[schema(example = "8 em 8 horas")]
    pub frequency: String,

    #[schema(example = 7)]
    pub duration_days: Option<i32>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Dados agregados para a impressão da receita (JOIN com os cadastros).
#[derive(Debug, Clone, FromRow)]
pub struct PrescriptionDetail {
    pub id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration_days: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub patient_name: String,
    pub doctor_name: String,
    pub doctor_license: String,
    pub clinic_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionPayload {
    pub appointment_id: Uuid,

    #[validate(length(min = 1, message = "O medicamento é obrigatório."))]
    pub medication: String,

    #[validate(length(min = 1, message = "A posologia é obrigatória."))]
    pub dosage: String,

    #[validate(length(min = 1, message = "A frequência é obrigatória."))]
    pub frequency: String,

    #[validate(range(min = 1, message = "A duração deve ser de pelo menos 1 dia."))]
    pub duration_days: Option<i32>,

    pub notes: Option<String>,
}
