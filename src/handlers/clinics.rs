// src/handlers/clinics.rs

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
    middleware::rbac::{AdminRoles, RequireRoles, StaffRoles},
    models::clinic::{Clinic, CreateClinicPayload},
};

// POST /api/clinics
#[utoipa::path(
    post,
    path = "/api/clinics",
    request_body = CreateClinicPayload,
    responses((status = 201, body = Clinic)),
    tag = "clinics",
    security(("bearer_auth" = []))
)]
pub async fn create_clinic(
    State(app_state): State<AppState>,
    _guard: RequireRoles<AdminRoles>,
    Json(payload): Json<CreateClinicPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let clinic = app_state
        .clinic_repo
        .create(&payload.name, payload.address.as_deref(), payload.phone.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(clinic)))
}

// GET /api/clinics
#[utoipa::path(
    get,
    path = "/api/clinics",
    responses((status = 200, body = [Clinic])),
    tag = "clinics",
    security(("bearer_auth" = []))
)]
pub async fn list_clinics(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
) -> Result<impl IntoResponse, AppError> {
    let clinics = app_state.clinic_repo.list_all().await?;
    Ok(Json(clinics))
}

// GET /api/clinics/{id}
#[utoipa::path(
    get,
    path = "/api/clinics/{id}",
    responses((status = 200, body = Clinic), (status = 404)),
    tag = "clinics",
    security(("bearer_auth" = []))
)]
pub async fn get_clinic(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = app_state
        .clinic_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound("Clínica não encontrada.".into()))?;

    Ok(Json(clinic))
}
