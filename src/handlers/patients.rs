// src/handlers/patients.rs

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
    middleware::rbac::{RequireRoles, StaffRoles},
    models::patient::{CreatePatientPayload, Patient, UpdatePatientPayload},
};

// POST /api/patients
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientPayload,
    responses((status = 201, body = Patient)),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn create_patient(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Json(payload): Json<CreatePatientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let patient = app_state
        .patient_repo
        .create(
            &app_state.db_pool,
            &payload.full_name,
            payload.document_number.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.birth_date,
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

// GET /api/patients
#[utoipa::path(
    get,
    path = "/api/patients",
    responses((status = 200, body = [Patient])),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn list_patients(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
) -> Result<impl IntoResponse, AppError> {
    let patients = app_state.patient_repo.list_all().await?;
    Ok(Json(patients))
}

// GET /api/patients/{id}
#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    responses((status = 200, body = Patient), (status = 404)),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn get_patient(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let patient = app_state
        .patient_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound("Paciente não encontrado.".into()))?;

    Ok(Json(patient))
}

// PUT /api/patients/{id}
#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    request_body = UpdatePatientPayload,
    responses((status = 200, body = Patient), (status = 404)),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn update_patient(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePatientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut patient = app_state
        .patient_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound("Paciente não encontrado.".into()))?;

    if let Some(v) = payload.full_name {
        patient.full_name = v;
    }
    if let Some(v) = payload.document_number {
        patient.document_number = Some(v);
    }
    if let Some(v) = payload.phone {
        patient.phone = Some(v);
    }
    if let Some(v) = payload.email {
        patient.email = Some(v);
    }
    if let Some(v) = payload.birth_date {
        patient.birth_date = Some(v);
    }
    if let Some(v) = payload.address {
        patient.address = Some(v);
    }

    let updated = app_state
        .patient_repo
        .update(&app_state.db_pool, &patient)
        .await?;

    Ok(Json(updated))
}

// DELETE /api/patients/{id}
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    responses((status = 204), (status = 404)),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn delete_patient(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state.patient_repo.delete(id).await?;
    if !deleted {
        return Err(AppError::RecordNotFound("Paciente não encontrado.".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
