// src/handlers/salaries.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermSalariesManage, RequirePermission},
    models::salary::{CreateSalaryPayload, SalaryRecord},
};

// POST /api/salaries
#[utoipa::path(
    post,
    path = "/api/salaries",
    request_body = CreateSalaryPayload,
    responses((status = 201, body = SalaryRecord), (status = 409)),
    tag = "salaries",
    security(("bearer_auth" = []))
)]
pub async fn create_salary(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalariesManage>,
    Json(payload): Json<CreateSalaryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = app_state.salary_service.create_for_month(&payload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

// GET /api/salaries
#[utoipa::path(
    get,
    path = "/api/salaries",
    responses((status = 200, body = [SalaryRecord])),
    tag = "salaries",
    security(("bearer_auth" = []))
)]
pub async fn list_salaries(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalariesManage>,
) -> Result<impl IntoResponse, AppError> {
    let records = app_state.salary_service.list().await?;
    Ok(Json(records))
}

// POST /api/salaries/{id}/pay
#[utoipa::path(
    post,
    path = "/api/salaries/{id}/pay",
    responses((status = 200, body = SalaryRecord), (status = 404)),
    tag = "salaries",
    security(("bearer_auth" = []))
)]
pub async fn pay_salary(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalariesManage>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state.salary_service.mark_paid(id).await?;
    Ok(Json(record))
}
