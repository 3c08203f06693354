// src/handlers/prescriptions.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{MedicalRoles, PermPrescriptionsWrite, RequirePermission, RequireRoles},
    models::prescription::{CreatePrescriptionPayload, Prescription},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPrescriptionsQuery {
    pub patient_id: Uuid,
}

// POST /api/prescriptions
#[utoipa::path(
    post,
    path = "/api/prescriptions",
    request_body = CreatePrescriptionPayload,
    responses((status = 201, body = Prescription), (status = 404)),
    tag = "prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn create_prescription(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermPrescriptionsWrite>,
    Json(payload): Json<CreatePrescriptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // A receita herda paciente e médico da consulta.
    let appointment = app_state
        .appointment_service
        .get(payload.appointment_id)
        .await?;

    let doctor_id = appointment.doctor_id.ok_or_else(|| {
        AppError::RecordNotFound("A consulta não tem médico vinculado.".into())
    })?;

    let prescription = app_state
        .prescription_repo
        .create(
            &app_state.db_pool,
            appointment.id,
            appointment.patient_id,
            doctor_id,
            &payload.medication,
            &payload.dosage,
            &payload.frequency,
            payload.duration_days,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(prescription)))
}

// GET /api/prescriptions?patientId=...
#[utoipa::path(
    get,
    path = "/api/prescriptions",
    params(ListPrescriptionsQuery),
    responses((status = 200, body = [Prescription])),
    tag = "prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn list_prescriptions(
    State(app_state): State<AppState>,
    _guard: RequireRoles<MedicalRoles>,
    Query(query): Query<ListPrescriptionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let prescriptions = app_state
        .prescription_repo
        .list_by_patient(query.patient_id)
        .await?;

    Ok(Json(prescriptions))
}

// GET /api/prescriptions/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/prescriptions/{id}/pdf",
    responses((status = 200, description = "PDF da receita"), (status = 404)),
    tag = "prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn generate_prescription_pdf(
    State(app_state): State<AppState>,
    _guard: RequireRoles<MedicalRoles>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state
        .document_service
        .generate_prescription_pdf(&app_state.db_pool, id)
        .await?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"receita_{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
