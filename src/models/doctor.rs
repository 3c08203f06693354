// src/models/doctor.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,

    #[schema(example = "Dr. Carlos Andrade")]
    pub full_name: String,

    #[schema(example = "Cardiologia")]
    pub specialty: String,

    #[schema(example = "CRM-SP 123456")]
    pub license_number: String,

    // Percentual [0,100] da receita de procedimentos que cabe ao médico;
    // o restante fica com a clínica.
    #[schema(example = "30.00")]
    pub procedure_fee_percentage: Decimal,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O percentual é validado aqui, na borda. O motor de cálculo nunca valida.
fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("O percentual deve estar entre 0 e 100.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "A especialidade é obrigatória."))]
    pub specialty: String,

    #[validate(length(min = 1, message = "O registro profissional é obrigatório."))]
    pub license_number: String,

    #[validate(custom(function = "validate_percentage"))]
    #[serde(default)] // Se o JSON não tiver esse campo, assume 0
    pub procedure_fee_percentage: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub full_name: Option<String>,

    pub specialty: Option<String>,

    #[validate(custom(function = "validate_percentage"))]
    pub procedure_fee_percentage: Option<Decimal>,

    pub is_active: Option<bool>,
}
