// src/models/patient.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,

    #[schema(example = "Maria de Souza")]
    pub full_name: String,

    pub document_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    #[schema(value_type = String, format = Date, example = "1987-04-12")]
    pub birth_date: Option<NaiveDate>,

    pub address: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    pub document_number: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,

    pub address: Option<String>,
}

// Edição parcial: campos ausentes permanecem como estão.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub full_name: Option<String>,

    pub document_number: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,

    pub address: Option<String>,
}
