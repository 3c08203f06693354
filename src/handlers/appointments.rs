// src/handlers/appointments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{RequireRoles, StaffRoles},
    models::appointment::{
        Appointment, CreateAppointmentPayload, RegisterPaymentPayload, UpdateAppointmentFeesPayload,
        UpdateStatusPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsQuery {
    pub patient_id: Option<Uuid>,
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentPayload,
    responses((status = 201, body = Appointment)),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let appointment = app_state.appointment_service.schedule(&payload).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments?patientId=...
#[utoipa::path(
    get,
    path = "/api/appointments",
    params(ListAppointmentsQuery),
    responses((status = 200, body = [Appointment])),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state.appointment_service.list(query.patient_id).await?;
    Ok(Json(appointments))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    responses((status = 200, body = Appointment), (status = 404)),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state.appointment_service.get(id).await?;
    Ok(Json(appointment))
}

// PUT /api/appointments/{id}/fees
//
// Edita as entradas do cálculo; o serviço persiste e dispara o recálculo
// na mesma transação. É o único jeito de mexer nos derivados.
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/fees",
    request_body = UpdateAppointmentFeesPayload,
    responses((status = 200, body = Appointment), (status = 404)),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn update_appointment_fees(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentFeesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let appointment = app_state
        .appointment_service
        .update_fees(id, &payload)
        .await?;

    Ok(Json(appointment))
}

// POST /api/appointments/{id}/payments
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/payments",
    request_body = RegisterPaymentPayload,
    responses((status = 200, body = Appointment), (status = 404)),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn register_appointment_payment(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RegisterPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let appointment = app_state
        .appointment_service
        .register_payment(id, &payload)
        .await?;

    Ok(Json(appointment))
}

// PUT /api/appointments/{id}/status
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    request_body = UpdateStatusPayload,
    responses((status = 200, body = Appointment), (status = 404)),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn update_appointment_status(
    State(app_state): State<AppState>,
    _guard: RequireRoles<StaffRoles>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .appointment_service
        .update_status(id, payload.status)
        .await?;

    Ok(Json(appointment))
}
