// src/models/salary.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "salary_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalaryStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub id: Uuid,
    pub doctor_id: Uuid,

    // Sempre normalizado para o dia 1 do mês de competência.
    #[schema(value_type = String, format = Date, example = "2025-06-01")]
    pub reference_month: NaiveDate,

    #[schema(example = "5000.00")]
    pub base_amount: Decimal,

    // Soma dos total_doctor_fee das consultas do mês, congelada na criação.
    #[schema(example = "1240.00")]
    pub appointment_fees_amount: Decimal,

    #[schema(example = "6240.00")]
    pub total_amount: Decimal,

    pub status: SalaryStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

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
pub struct CreateSalaryPayload {
    pub doctor_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-06-01")]
    pub reference_month: NaiveDate,

    #[validate(custom(function = "validate_not_negative"))]
    pub base_amount: Decimal,
}
