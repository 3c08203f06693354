// src/handlers/doctors.rs

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
    models::doctor::{CreateDoctorPayload, Doctor, UpdateDoctorPayload},
};

// POST /api/doctors
#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = CreateDoctorPayload,
    responses((status = 201, body = Doctor)),
    tag = "doctors",
    security(("bearer_auth" = []))
)]
pub async fn create_doctor(
    State(app_state): State<AppState>,
    _guard: RequireRoles<AdminRoles>,
    Json(payload): Json<CreateDoctorPayload>,
) -> Result<impl IntoResponse, AppError> {
    // O percentual é validado aqui; o motor de cálculo confia no intervalo.
    payload.validate()?;

    let doctor = app_state
        .doctor_repo
        .create(
            &app_state.db_pool,
            &payload.full_name,
            &payload.specialty,
            &payload.license_number,
            payload.procedure_fee_percentage,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(doctor)))
}

// GET /api/doctors
#[utoipa::path(
    get,
    path = "/api/doctors",
    responses((status = 200, body = [Doctor])),
    tag = "doctors",
    security(("bearer_auth" = []))
)]
pub async fn list_doctors(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
) -> Result<impl IntoResponse, AppError> {
    let doctors = app_state.doctor_repo.list_all().await?;
    Ok(Json(doctors))
}

// GET /api/doctors/{id}
#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    responses((status = 200, body = Doctor), (status = 404)),
    tag = "doctors",
    security(("bearer_auth" = []))
)]
pub async fn get_doctor(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = app_state
        .doctor_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound("Médico não encontrado.".into()))?;

    Ok(Json(doctor))
}

// PUT /api/doctors/{id}
//
// Mudar o percentual aqui NÃO recalcula consultas já lançadas: o recálculo
// de cada consulta continua sendo uma chamada explícita.
#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    request_body = UpdateDoctorPayload,
    responses((status = 200, body = Doctor), (status = 404)),
    tag = "doctors",
    security(("bearer_auth" = []))
)]
pub async fn update_doctor(
    State(app_state): State<AppState>,
    _guard: RequireRoles<AdminRoles>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDoctorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut doctor = app_state
        .doctor_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound("Médico não encontrado.".into()))?;

    if let Some(v) = payload.full_name {
        doctor.full_name = v;
    }
    if let Some(v) = payload.specialty {
        doctor.specialty = v;
    }
    if let Some(v) = payload.procedure_fee_percentage {
        doctor.procedure_fee_percentage = v;
    }
    if let Some(v) = payload.is_active {
        doctor.is_active = v;
    }

    let updated = app_state
        .doctor_repo
        .update(&app_state.db_pool, &doctor)
        .await?;

    Ok(Json(updated))
}
