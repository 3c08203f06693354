// src/handlers/billing.rs

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
    middleware::rbac::{PermBillingWrite, ReceptionRoles, RequirePermission, RequireRoles},
    models::billing::{CreateInvoicePayload, Invoice, InvoicePaymentPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesQuery {
    pub patient_id: Option<Uuid>,
}

// POST /api/billing/invoices
#[utoipa::path(
    post,
    path = "/api/billing/invoices",
    request_body = CreateInvoicePayload,
    responses((status = 201, body = Invoice)),
    tag = "billing",
    security(("bearer_auth" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermBillingWrite>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state.billing_service.create_invoice(&payload).await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/billing/invoices?patientId=...
#[utoipa::path(
    get,
    path = "/api/billing/invoices",
    params(ListInvoicesQuery),
    responses((status = 200, body = [Invoice])),
    tag = "billing",
    security(("bearer_auth" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    _guard: RequireRoles<ReceptionRoles>,
    Query(query): Query<ListInvoicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.billing_service.list(query.patient_id).await?;
    Ok(Json(invoices))
}

// GET /api/billing/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/billing/invoices/{id}",
    responses((status = 200, body = Invoice), (status = 404)),
    tag = "billing",
    security(("bearer_auth" = []))
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    _guard: RequireRoles<ReceptionRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.get(id).await?;
    Ok(Json(invoice))
}

// POST /api/billing/invoices/{id}/payments
#[utoipa::path(
    post,
    path = "/api/billing/invoices/{id}/payments",
    request_body = InvoicePaymentPayload,
    responses((status = 200, body = Invoice), (status = 404)),
    tag = "billing",
    security(("bearer_auth" = []))
)]
pub async fn register_invoice_payment(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermBillingWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoicePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state
        .billing_service
        .register_payment(id, payload.amount)
        .await?;

    Ok(Json(invoice))
}
